//! Common test utilities for building workflows and decision graphs.
use slideflow::prelude::*;
use slideflow::tree::{NodeKind, SlideCapture, WorkflowData, WorkflowMeta, WorkflowNode};

/// Builds a unified sequence from a pattern of `C` (core) and `R` (regular)
/// characters, ordered by position.
#[allow(dead_code)]
pub fn unified(pattern: &str) -> Vec<UnifiedStepItem> {
    pattern
        .chars()
        .enumerate()
        .map(|(order, kind)| match kind {
            'C' => create_unified_core_step(&format!("cs_{}", order), Vec::new(), order),
            _ => create_unified_regular_step(&format!("row_{}", order), order),
        })
        .collect()
}

/// A workflow holding only the unified sequence described by `pattern`.
#[allow(dead_code)]
pub fn unified_workflow(pattern: &str) -> ProjectWorkflowData {
    ProjectWorkflowData {
        unified_steps: unified(pattern),
        ..create_empty_workflow_data()
    }
}

/// A legacy workflow: two core instances and three regular steps, each list
/// stored out of order.
#[allow(dead_code)]
pub fn legacy_workflow() -> ProjectWorkflowData {
    use slideflow::workflow::create_core_step_instance;

    ProjectWorkflowData {
        steps: vec![
            create_step_instance("row_c", 2),
            create_step_instance("row_a", 0),
            create_step_instance("row_b", 1),
        ],
        core_step_instances: vec![
            create_core_step_instance("cs_outro", Vec::new(), 1),
            create_core_step_instance("cs_intro", Vec::new(), 0),
        ],
        ..create_empty_workflow_data()
    }
}

/// Ids of the steps in `data.steps`, in stored order.
#[allow(dead_code)]
pub fn step_ids(data: &ProjectWorkflowData) -> Vec<String> {
    data.steps.iter().map(|s| s.id.clone()).collect()
}

#[allow(dead_code)]
pub fn phenomenon(id: &str, captures: usize, description: Option<&str>) -> WorkflowNode {
    WorkflowNode::new(
        id,
        NodeKind::Phenomenon {
            captures: vec![SlideCapture::default(); captures],
            description: description.map(str::to_string),
        },
    )
}

#[allow(dead_code)]
pub fn action(id: &str) -> WorkflowNode {
    WorkflowNode::new(
        id,
        NodeKind::Action {
            action_id: None,
            params: Default::default(),
        },
    )
}

/// A small decision graph:
///
/// ```text
/// root (Phenomenon)
/// └── sel (Selector)
///     ├── seq (Sequence)
///     │   └── act1 (Action)
///     └── act2 (Action)
/// ```
#[allow(dead_code)]
pub fn decision_graph() -> WorkflowData {
    let mut graph = WorkflowData::default();
    graph.insert(phenomenon("root", 0, None).with_children(["sel"]));
    graph.insert(WorkflowNode::new("sel", NodeKind::Selector).with_children(["seq", "act2"]));
    graph.insert(WorkflowNode::new("seq", NodeKind::Sequence).with_children(["act1"]));
    graph.insert(action("act1"));
    graph.insert(action("act2"));
    graph.root_id = Some("root".to_string());
    graph
}

/// A graph declaring the three well-known core nodes, the first with two
/// children.
#[allow(dead_code)]
pub fn core_graph() -> WorkflowData {
    let mut graph = WorkflowData::default();
    graph.insert(phenomenon("phenomenon", 1, None).with_children(["p1", "p2"]));
    graph.insert(WorkflowNode::new("candidate_search", NodeKind::Sequence));
    graph.insert(WorkflowNode::new("cause_derivation", NodeKind::Selector));
    graph.insert(action("p1"));
    graph.insert(action("p2"));
    graph.root_id = Some("phenomenon".to_string());
    graph.meta = Some(WorkflowMeta {
        core_nodes: vec![
            "phenomenon".to_string(),
            "candidate_search".to_string(),
            "cause_derivation".to_string(),
        ],
    });
    graph
}
