//! Layout of decision graphs for top-down rendering.
//!
//! A [`WorkflowData`] graph is a table of typed nodes (`Phenomenon`,
//! `Selector`, `Sequence`, `Condition`, `Action`) linked through `children`
//! id lists. A layout pass materializes the reachable part of that graph into
//! a [`LayoutTree`] arena, reserves a horizontal band for every subtree and
//! centres each parent over its children. Graphs that declare three core
//! nodes in their metadata are laid out as a horizontal core row instead, see
//! [`calculate_core_node_layout`].
//!
//! Malformed graphs degrade quietly: dangling child ids are skipped and nodes
//! reachable twice are placed once.

pub mod adapter;
pub mod config;
pub mod core_layout;
pub mod edges;
pub mod layout;
pub mod types;

pub use adapter::{
    RenderNode, can_have_children, find_descendants_by_type, find_parent, is_descendant, node_display_name,
    node_params, workflow_to_nodes,
};
pub use config::{CANDIDATE_SEARCH_NAME, CORE_NODE_IDS, LayoutConfig, node_height};
pub use core_layout::{
    CoreNodeInfo, CoreNodeRole, calculate_core_node_layout, core_node_ids, core_node_role, identify_core_nodes,
    is_core_node_workflow,
};
pub use edges::{EdgeKind, FlowEdge, loopback_edges, workflow_to_edges};
pub use layout::{LayoutNode, LayoutTree, TreeBounds, TreeLayout, calculate_tree_layout};
pub use types::{
    NodeKind, NodeType, SlideCapture, WorkflowAction, WorkflowActionParam, WorkflowData, WorkflowMeta,
    WorkflowNode,
};

use crate::error::{self, LoadError};
use std::path::Path;

impl WorkflowData {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        error::parse_json("decision graph", json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        error::read_json_file("decision graph", path.as_ref())
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        error::write_json("decision graph", self)
    }
}
