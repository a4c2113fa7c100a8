//! Alternate layout for graphs that declare three core nodes: the core nodes
//! sit in one horizontal row and each one's descendants hang beneath it.

use super::config::{CANDIDATE_SEARCH_NAME, CORE_NODE_IDS, LayoutConfig};
use super::layout::{LayoutTree, TreeLayout};
use super::types::{NodeType, WorkflowData, WorkflowNode};
use serde::Serialize;

/// The fixed role of a core node in the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CoreNodeRole {
    Phenomenon,
    CandidateSearch,
    CauseDerivation,
}

impl CoreNodeRole {
    pub const ALL: [CoreNodeRole; 3] = [
        CoreNodeRole::Phenomenon,
        CoreNodeRole::CandidateSearch,
        CoreNodeRole::CauseDerivation,
    ];

    /// The fallback id of this role's node.
    pub fn default_id(self) -> &'static str {
        CORE_NODE_IDS[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreNodeInfo<'a> {
    pub id: &'a str,
    pub role: CoreNodeRole,
    pub node: &'a WorkflowNode,
}

/// True when the graph's metadata lists exactly three core nodes.
pub fn is_core_node_workflow(workflow: &WorkflowData) -> bool {
    workflow.core_nodes().is_some_and(|ids| ids.len() == 3)
}

/// The declared core node ids, or [`CORE_NODE_IDS`] when none are declared.
pub fn core_node_ids(workflow: &WorkflowData) -> Vec<&str> {
    match workflow.core_nodes() {
        Some(ids) => ids.iter().map(String::as_str).collect(),
        None => CORE_NODE_IDS.to_vec(),
    }
}

/// Role of `node_id` within the core row: by well-known id first, then by
/// declaration position.
pub fn core_node_role(workflow: &WorkflowData, node_id: &str) -> Option<CoreNodeRole> {
    if let Some(role) = CoreNodeRole::ALL.into_iter().find(|role| role.default_id() == node_id) {
        return Some(role);
    }
    core_node_ids(workflow)
        .iter()
        .position(|id| *id == node_id)
        .and_then(|position| CoreNodeRole::ALL.get(position).copied())
}

/// Resolves the core row in declaration order.
///
/// Ids missing from the node table are skipped. A node whose id is not a
/// well-known core id is classified by its type, and skipped when the type
/// fits no role. A Sequence only counts as the candidate search when it
/// carries [`CANDIDATE_SEARCH_NAME`].
pub fn identify_core_nodes(workflow: &WorkflowData) -> Vec<CoreNodeInfo<'_>> {
    core_node_ids(workflow)
        .into_iter()
        .filter_map(|id| {
            let (id, node) = workflow.nodes.get_key_value(id)?;
            let by_id = CoreNodeRole::ALL.into_iter().find(|role| role.default_id() == id);
            let role = by_id.or(match node.node_type() {
                NodeType::Phenomenon => Some(CoreNodeRole::Phenomenon),
                NodeType::Sequence if node.name.as_deref() == Some(CANDIDATE_SEARCH_NAME) => {
                    Some(CoreNodeRole::CandidateSearch)
                }
                NodeType::Selector => Some(CoreNodeRole::CauseDerivation),
                NodeType::Sequence | NodeType::Condition | NodeType::Action => None,
            });
            let Some(role) = role else {
                log::warn!("Core node '{}' has no core role, leaving it out of the row", id);
                return None;
            };
            Some(CoreNodeInfo { id, role, node })
        })
        .collect()
}

/// Lays out the core row at the layout origin, advancing by core node width
/// plus core spacing, with each core node's children centred beneath it.
pub fn calculate_core_node_layout<'a>(workflow: &'a WorkflowData, config: &LayoutConfig) -> TreeLayout<'a> {
    let mut tree = LayoutTree::new();
    let mut x = config.origin_x;
    let core_nodes = identify_core_nodes(workflow);
    for info in &core_nodes {
        tree.reserve(info.id);
    }

    for info in core_nodes {
        let Some(index) = tree.add_root(
            workflow,
            info.id,
            config.core_node_width,
            config.core_node_height,
            config,
        ) else {
            continue;
        };
        let core = tree.node_mut(index);
        core.is_core_node = true;
        core.x = x;
        core.y = config.origin_y;
        position_core_children(&mut tree, index, config);
        x += config.core_node_width + config.core_node_h_spacing;
    }

    TreeLayout::from_tree(tree)
}

fn position_core_children(tree: &mut LayoutTree<'_>, index: usize, config: &LayoutConfig) {
    let core = tree.node(index);
    let count = core.children.len();
    if count == 0 {
        return;
    }
    let (core_x, core_width) = (core.x, core.width);
    let y = core.y + core.height + config.v_spacing;
    let total: f64 = core
        .children
        .iter()
        .map(|&child| tree.subtree_width(child, config))
        .sum::<f64>()
        + (count - 1) as f64 * config.h_spacing;
    tree.position_children(index, y, core_x + (core_width - total) / 2.0, config);
}
