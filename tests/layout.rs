//! Tests for decision-graph layout, edges and graph queries.
mod common;
use slideflow::tree::*;

#[test]
fn test_phenomenon_height_grows_with_content() {
    assert_eq!(node_height(&common::phenomenon("p", 3, Some("smoke on line 2"))), 140.0);
    assert_eq!(node_height(&common::phenomenon("p", 0, None)), 100.0);
    // Only the first six captures count.
    assert_eq!(node_height(&common::phenomenon("p", 10, None)), 180.0);
    assert_eq!(node_height(&common::phenomenon("p", 3, Some(""))), 120.0);
    assert_eq!(node_height(&WorkflowNode::new("s", NodeKind::Sequence)), 80.0);

    let tall = LayoutConfig {
        capture_height: 100.0,
        ..LayoutConfig::default()
    };
    assert_eq!(tall.node_height(&common::phenomenon("p", 6, None)), 300.0);
}

#[test]
fn test_layout_config_fills_missing_fields() {
    let config = LayoutConfig::from_json(r#"{ "nodeWidth": 200, "vSpacing": 10 }"#).unwrap();
    assert_eq!(config.node_width, 200.0);
    assert_eq!(config.v_spacing, 10.0);
    assert_eq!(config.h_spacing, LayoutConfig::default().h_spacing);
    assert!(LayoutConfig::from_json("not json").is_err());
}

#[test]
fn test_tree_layout_centres_parents_over_children() {
    let graph = common::decision_graph();
    let layout = calculate_tree_layout(&graph, &LayoutConfig::default());
    assert_eq!(layout.len(), 5);

    let order: Vec<&str> = layout.nodes().map(|n| n.id).collect();
    assert_eq!(order, vec!["root", "sel", "seq", "act1", "act2"]);

    let position = |id: &str| {
        let node = layout.find(id).unwrap();
        (node.x, node.y)
    };
    assert_eq!(position("root"), (160.0, 50.0));
    assert_eq!(position("sel"), (160.0, 230.0));
    assert_eq!(position("seq"), (50.0, 390.0));
    assert_eq!(position("act1"), (50.0, 550.0));
    assert_eq!(position("act2"), (270.0, 390.0));

    let bounds = layout.bounds.unwrap();
    assert_eq!((bounds.min_x, bounds.max_x), (50.0, 450.0));
    assert_eq!((bounds.min_y, bounds.max_y), (50.0, 630.0));
}

#[test]
fn test_parent_indices_point_upwards() {
    let graph = common::decision_graph();
    let layout = calculate_tree_layout(&graph, &LayoutConfig::default());
    let tree = &layout.tree;
    let act1 = tree.nodes().iter().position(|n| n.id == "act1").unwrap();
    let root = tree.roots()[0];

    assert_eq!(tree.parent_of(act1).map(|n| n.id), Some("seq"));
    assert!(tree.is_ancestor(root, act1));
    assert!(!tree.is_ancestor(act1, root));
    assert!(tree.parent_of(root).is_none());
}

#[test]
fn test_layout_skips_dangling_children_and_cycles() {
    let mut graph = common::decision_graph();
    graph.insert(
        WorkflowNode::new("seq", NodeKind::Sequence).with_children(["act1", "ghost"]),
    );
    graph.insert(common::action("act1").with_children(["root"]));

    let layout = calculate_tree_layout(&graph, &LayoutConfig::default());
    assert_eq!(layout.len(), 5);
    assert!(layout.find("ghost").is_none());

    let edges = workflow_to_edges(&graph);
    assert!(edges.iter().all(|e| e.target != "ghost"));
}

#[test]
fn test_missing_root_gives_empty_layout() {
    let mut graph = common::decision_graph();
    graph.root_id = Some("nowhere".to_string());
    assert!(calculate_tree_layout(&graph, &LayoutConfig::default()).is_empty());

    graph.root_id = None;
    assert!(workflow_to_nodes(&graph, &LayoutConfig::default()).is_empty());
}

#[test]
fn test_edges_include_loopbacks_from_selector_actions() {
    let graph = common::decision_graph();
    let ids: Vec<String> = workflow_to_edges(&graph).into_iter().map(|e| e.id).collect();
    assert_eq!(
        ids,
        vec![
            "root-sel",
            "sel-seq",
            "sel-act2",
            "seq-act1",
            "loopback-act1-root",
            "loopback-act2-root",
        ]
    );

    let loopbacks = loopback_edges(&graph);
    assert!(loopbacks.iter().all(|e| e.is_loopback() && e.animated && e.dashed));
}

#[test]
fn test_core_row_layout() {
    let graph = common::core_graph();
    assert!(is_core_node_workflow(&graph));

    let roles: Vec<CoreNodeRole> = identify_core_nodes(&graph).iter().map(|info| info.role).collect();
    assert_eq!(roles, CoreNodeRole::ALL.to_vec());

    let layout = calculate_core_node_layout(&graph, &LayoutConfig::default());
    let x = |id: &str| layout.find(id).unwrap().x;
    assert_eq!(x("phenomenon"), 50.0);
    assert_eq!(x("candidate_search"), 390.0);
    assert_eq!(x("cause_derivation"), 730.0);
    assert_eq!(x("p1"), -40.0);
    assert_eq!(x("p2"), 180.0);
    assert_eq!(layout.find("p1").unwrap().y, 230.0);
}

#[test]
fn test_core_nodes_are_identified_by_type_when_ids_are_custom() {
    let mut graph = WorkflowData::default();
    graph.insert(common::phenomenon("a", 0, None));
    graph.insert(WorkflowNode::new("b", NodeKind::Sequence).with_name(CANDIDATE_SEARCH_NAME));
    graph.insert(common::action("c"));
    graph.meta = Some(WorkflowMeta {
        core_nodes: vec!["a".to_string(), "b".to_string(), "c".to_string()],
    });

    let infos = identify_core_nodes(&graph);
    let ids: Vec<&str> = infos.iter().map(|info| info.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(infos[1].role, CoreNodeRole::CandidateSearch);
    assert_eq!(core_node_role(&graph, "c"), Some(CoreNodeRole::CauseDerivation));
}

#[test]
fn test_unnamed_sequence_is_not_candidate_search() {
    let mut graph = WorkflowData::default();
    graph.insert(common::phenomenon("a", 0, None));
    graph.insert(WorkflowNode::new("b", NodeKind::Sequence).with_name("Other"));
    graph.insert(WorkflowNode::new("c", NodeKind::Selector));
    graph.meta = Some(WorkflowMeta {
        core_nodes: vec!["a".to_string(), "b".to_string(), "c".to_string()],
    });

    let roles: Vec<(&str, CoreNodeRole)> = identify_core_nodes(&graph)
        .iter()
        .map(|info| (info.id, info.role))
        .collect();
    assert_eq!(
        roles,
        vec![("a", CoreNodeRole::Phenomenon), ("c", CoreNodeRole::CauseDerivation)]
    );
}

#[test]
fn test_chained_core_nodes_stay_in_the_row() {
    let mut graph = WorkflowData::default();
    graph.insert(common::phenomenon("phenomenon", 0, None).with_children(["candidate_search", "p1"]));
    graph.insert(WorkflowNode::new("candidate_search", NodeKind::Sequence).with_children(["cause_derivation"]));
    graph.insert(WorkflowNode::new("cause_derivation", NodeKind::Selector));
    graph.insert(common::action("p1"));
    graph.meta = Some(WorkflowMeta {
        core_nodes: CORE_NODE_IDS.iter().map(|id| id.to_string()).collect(),
    });

    let layout = calculate_core_node_layout(&graph, &LayoutConfig::default());
    assert_eq!(layout.len(), 4);
    let row: Vec<(&str, bool, f64, f64)> = CORE_NODE_IDS
        .iter()
        .map(|id| {
            let node = layout.find(id).unwrap();
            (node.id, node.is_core_node, node.x, node.y)
        })
        .collect();
    assert_eq!(
        row,
        vec![
            ("phenomenon", true, 50.0, 50.0),
            ("candidate_search", true, 390.0, 50.0),
            ("cause_derivation", true, 730.0, 50.0),
        ]
    );

    // The remaining child is centred alone under its core node.
    let p1 = layout.find("p1").unwrap();
    assert_eq!((p1.x, p1.y), (70.0, 230.0));
    let p1_index = layout.tree.nodes().iter().position(|n| n.id == "p1").unwrap();
    assert_eq!(layout.tree.parent_of(p1_index).map(|n| n.id), Some("phenomenon"));

    let edge_ids: Vec<String> = workflow_to_edges(&graph).into_iter().map(|e| e.id).collect();
    assert_eq!(
        edge_ids,
        vec![
            "core-phenomenon-candidate_search",
            "core-candidate_search-cause_derivation",
            "phenomenon-p1",
        ]
    );
}

#[test]
fn test_render_nodes_for_core_graph() {
    let graph = common::core_graph();
    let nodes = workflow_to_nodes(&graph, &LayoutConfig::default());
    assert_eq!(nodes.len(), 5);

    let core = nodes.iter().find(|n| n.id == "phenomenon").unwrap();
    assert!(core.is_root && core.is_core_node);
    assert_eq!(core.node_type, "CoreNode");
    assert_eq!(core.core_node_role, Some(CoreNodeRole::Phenomenon));
    assert_eq!((core.width, core.height), (220.0, 100.0));

    let child = nodes.iter().find(|n| n.id == "p1").unwrap();
    assert_eq!(child.node_type, "Action");
    assert!(child.core_node_role.is_none());

    let edges = workflow_to_edges(&graph);
    let core_edges: Vec<&str> = edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Core)
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(
        core_edges,
        vec!["core-phenomenon-candidate_search", "core-candidate_search-cause_derivation"]
    );
    let down = edges.iter().find(|e| e.id == "phenomenon-p1").unwrap();
    assert_eq!((down.source_handle, down.target_handle), (Some("bottom"), Some("top")));
}

#[test]
fn test_graph_queries() {
    let graph = common::decision_graph();
    assert_eq!(find_parent(&graph, "act2"), Some("sel"));
    assert_eq!(find_parent(&graph, "root"), None);
    assert!(is_descendant(&graph, "root", "act1"));
    assert!(!is_descendant(&graph, "seq", "act2"));
    assert_eq!(find_descendants_by_type(&graph, "sel", NodeType::Action), vec!["act1", "act2"]);
    assert!(can_have_children(NodeType::Selector));
    assert!(!can_have_children(NodeType::Action));
}

#[test]
fn test_display_names_and_params() {
    let catalogue = vec![WorkflowAction {
        id: "check_temp".to_string(),
        name: "Check temperature".to_string(),
        params: vec![
            WorkflowActionParam {
                id: "zone".to_string(),
                name: "Zone".to_string(),
                required: true,
                param_type: Some("selection".to_string()),
                selection_values: Some(vec!["A".to_string(), "B".to_string()]),
            },
            WorkflowActionParam {
                id: "note".to_string(),
                name: "Note".to_string(),
                required: false,
                param_type: None,
                selection_values: None,
            },
        ],
    }];

    let mut params = ahash::AHashMap::new();
    params.insert("zone".to_string(), "B".to_string());
    params.insert("note".to_string(), String::new());
    let known = WorkflowNode::new(
        "n1",
        NodeKind::Action {
            action_id: Some("check_temp".to_string()),
            params,
        },
    );
    assert_eq!(node_display_name(&known, &catalogue), "Check temperature");
    assert_eq!(node_params(&known, &catalogue), vec![("Zone".to_string(), "B".to_string())]);

    assert_eq!(node_display_name(&common::action("n2"), &catalogue), "알 수 없는 액션");
    assert_eq!(
        node_display_name(&common::action("n3").with_name("Manual"), &catalogue),
        "Manual"
    );
    let selector = WorkflowNode::new("n4", NodeKind::Selector);
    assert_eq!(node_display_name(&selector, &[]), NodeType::Selector.display_name());
}

#[test]
fn test_graph_json_uses_type_tag() {
    let json = r#"{
        "nodes": {
            "root": { "id": "root", "type": "Phenomenon", "children": ["a"], "captures": [], "description": "leak" },
            "a": { "id": "a", "type": "Action", "actionId": "x", "params": { "p": "1" } }
        },
        "rootId": "root"
    }"#;
    let graph = WorkflowData::from_json(json).unwrap();
    assert_eq!(graph.node("root").map(WorkflowNode::node_type), Some(NodeType::Phenomenon));
    assert_eq!(graph.node("a").map(WorkflowNode::node_type), Some(NodeType::Action));

    let round_trip = WorkflowData::from_json(&graph.to_json().unwrap()).unwrap();
    assert_eq!(round_trip, graph);
}
