//! Graph queries and the conversion of a layout pass into renderable nodes.

use super::config::LayoutConfig;
use super::core_layout::{CoreNodeRole, calculate_core_node_layout, core_node_role, is_core_node_workflow};
use super::layout::calculate_tree_layout;
use super::types::{NodeKind, NodeType, WorkflowAction, WorkflowData, WorkflowNode};
use ahash::AHashSet;
use itertools::Itertools;
use serde::Serialize;

const UNKNOWN_ACTION_NAME: &str = "알 수 없는 액션";

/// A positioned node ready for a graph renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: String,
    /// The node type name, or `"CoreNode"` for entries of the core row.
    pub node_type: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub is_root: bool,
    pub is_core_node: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_node_role: Option<CoreNodeRole>,
}

/// Positions every node reachable from the root, choosing the core-row layout
/// when the graph declares three core nodes.
///
/// Empty when the graph has no root.
pub fn workflow_to_nodes(workflow: &WorkflowData, config: &LayoutConfig) -> Vec<RenderNode> {
    let Some(root_id) = workflow.root_id.as_deref() else {
        return Vec::new();
    };
    let layout = if is_core_node_workflow(workflow) {
        calculate_core_node_layout(workflow, config)
    } else {
        calculate_tree_layout(workflow, config)
    };

    layout
        .nodes()
        .map(|placed| {
            let node_type = placed.node.node_type();
            RenderNode {
                id: placed.id.to_string(),
                node_type: if placed.is_core_node {
                    "CoreNode".to_string()
                } else {
                    node_type.as_str().to_string()
                },
                label: placed.node.name.clone().unwrap_or_else(|| node_type.as_str().to_string()),
                x: placed.x,
                y: placed.y,
                width: placed.width,
                height: placed.height,
                is_root: placed.id == root_id,
                is_core_node: placed.is_core_node,
                core_node_role: placed
                    .is_core_node
                    .then(|| core_node_role(workflow, placed.id))
                    .flatten(),
            }
        })
        .collect()
}

/// The first node (by id) listing `node_id` among its children.
pub fn find_parent<'a>(workflow: &'a WorkflowData, node_id: &str) -> Option<&'a str> {
    workflow
        .nodes
        .iter()
        .filter(|(_, node)| node.children.iter().any(|child| child == node_id))
        .map(|(id, _)| id.as_str())
        .sorted()
        .next()
}

/// True when `node_id` is reachable from `ancestor_id` through children.
pub fn is_descendant(workflow: &WorkflowData, ancestor_id: &str, node_id: &str) -> bool {
    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut stack: Vec<&str> = vec![ancestor_id];
    while let Some(current) = stack.pop() {
        let Some(node) = workflow.node(current) else {
            continue;
        };
        for child in &node.children {
            if child == node_id {
                return true;
            }
            if seen.insert(child.as_str()) {
                stack.push(child);
            }
        }
    }
    false
}

/// Ids of `node_id` and its descendants that have type `node_type`, in
/// pre-order. Each node is visited once.
pub fn find_descendants_by_type<'a>(workflow: &'a WorkflowData, node_id: &str, node_type: NodeType) -> Vec<&'a str> {
    let mut found = Vec::new();
    let mut seen: AHashSet<&str> = AHashSet::new();
    let Some((id, _)) = workflow.nodes.get_key_value(node_id) else {
        return found;
    };
    let mut stack: Vec<&'a str> = vec![id.as_str()];
    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        let Some(node) = workflow.node(current) else {
            continue;
        };
        if node.node_type() == node_type {
            found.push(current);
        }
        stack.extend(node.children.iter().rev().map(String::as_str));
    }
    found
}

/// The label shown for a node: the catalogue name for actions, else the
/// node's own name, else its type's display name.
pub fn node_display_name(node: &WorkflowNode, actions: &[WorkflowAction]) -> String {
    if let NodeKind::Action { action_id, .. } = &node.kind {
        let action = action_id
            .as_deref()
            .and_then(|id| actions.iter().find(|action| action.id == id));
        return match (action, &node.name) {
            (Some(action), _) => action.name.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => UNKNOWN_ACTION_NAME.to_string(),
        };
    }
    node.name
        .clone()
        .unwrap_or_else(|| node.node_type().display_name().to_string())
}

/// Filled-in parameters of an action node as `(parameter name, value)` in
/// catalogue order.
pub fn node_params(node: &WorkflowNode, actions: &[WorkflowAction]) -> Vec<(String, String)> {
    let NodeKind::Action {
        action_id: Some(action_id),
        params,
    } = &node.kind
    else {
        return Vec::new();
    };
    let Some(action) = actions.iter().find(|action| &action.id == action_id) else {
        return Vec::new();
    };
    action
        .params
        .iter()
        .filter_map(|param| {
            let value = params.get(&param.id).filter(|value| !value.is_empty())?;
            Some((param.name.clone(), value.clone()))
        })
        .collect()
}

pub fn can_have_children(node_type: NodeType) -> bool {
    node_type.can_have_children()
}
