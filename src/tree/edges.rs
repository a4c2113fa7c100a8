use super::adapter::{find_descendants_by_type, find_parent};
use super::core_layout::{core_node_ids, is_core_node_workflow};
use super::types::{NodeType, WorkflowData};
use ahash::AHashSet;
use itertools::Itertools;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    /// Parent to child.
    Tree,
    /// Between consecutive core nodes of the core row.
    Core,
    /// From an `Action` below a `Selector` back to where the selection
    /// restarts.
    Loopback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<&'static str>,
    pub animated: bool,
    pub dashed: bool,
}

impl FlowEdge {
    fn tree(source: &str, target: &str, vertical_handles: bool) -> Self {
        let (source_handle, target_handle) = if vertical_handles {
            (Some("bottom"), Some("top"))
        } else {
            (None, None)
        };
        Self {
            id: format!("{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Tree,
            source_handle,
            target_handle,
            animated: false,
            dashed: false,
        }
    }

    fn core(source: &str, target: &str) -> Self {
        Self {
            id: format!("core-{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Core,
            source_handle: Some("right"),
            target_handle: Some("left"),
            animated: false,
            dashed: false,
        }
    }

    fn loopback(source: &str, target: &str) -> Self {
        Self {
            id: format!("loopback-{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Loopback,
            source_handle: None,
            target_handle: None,
            animated: true,
            dashed: true,
        }
    }

    pub fn is_loopback(&self) -> bool {
        self.kind == EdgeKind::Loopback
    }
}

/// Every edge of the graph: core row edges first (core graphs only), then
/// parent/child edges, then loopback edges.
///
/// Nodes are visited in id order so the output is stable. Child references
/// to ids missing from the node table produce no edge, and neither do child
/// references to core nodes in a core graph.
pub fn workflow_to_edges(workflow: &WorkflowData) -> Vec<FlowEdge> {
    let mut edges = Vec::new();
    let core_layout = is_core_node_workflow(workflow);
    let core_ids: AHashSet<&str> = if core_layout {
        core_node_ids(workflow).into_iter().collect()
    } else {
        AHashSet::new()
    };

    if core_layout {
        let ids = core_node_ids(workflow);
        for (source, target) in ids.into_iter().tuple_windows() {
            if workflow.nodes.contains_key(source) && workflow.nodes.contains_key(target) {
                edges.push(FlowEdge::core(source, target));
            }
        }
    }

    for (id, node) in workflow.nodes.iter().sorted_by_key(|(id, _)| *id) {
        let vertical = core_ids.contains(id.as_str());
        for child in &node.children {
            // Core nodes sit in the row, joined by core edges only.
            if !workflow.nodes.contains_key(child) || core_ids.contains(child.as_str()) {
                continue;
            }
            edges.push(FlowEdge::tree(id, child, vertical));
        }
    }

    edges.extend(loopback_edges(workflow));
    edges
}

/// For each `Selector`, one edge from every `Action` in its subtree back to
/// the Selector's parent, or to the Selector itself when it has none.
pub fn loopback_edges(workflow: &WorkflowData) -> Vec<FlowEdge> {
    workflow
        .nodes
        .iter()
        .filter(|(_, node)| node.node_type() == NodeType::Selector)
        .map(|(id, _)| id)
        .sorted()
        .flat_map(|selector| {
            let target = find_parent(workflow, selector).unwrap_or(selector.as_str());
            find_descendants_by_type(workflow, selector, NodeType::Action)
                .into_iter()
                .map(move |action| FlowEdge::loopback(action, target))
        })
        .collect()
}
