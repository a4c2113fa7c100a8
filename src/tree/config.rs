use super::types::{NodeKind, WorkflowNode};
use crate::error::{self, LoadError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ids the core-node layout falls back to when the graph does not list its
/// own core nodes.
pub const CORE_NODE_IDS: [&str; 3] = ["phenomenon", "candidate_search", "cause_derivation"];

/// Name marking a Sequence as the candidate-search core node.
pub const CANDIDATE_SEARCH_NAME: &str = "원인후보탐색";

/// Dimensions and spacing used by every layout pass.
///
/// Every field is optional in JSON; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub phenomenon_base_height: f64,
    pub phenomenon_min_height: f64,
    pub phenomenon_max_height: f64,
    /// Height added per capture, up to `max_counted_captures`.
    pub capture_height: f64,
    pub max_counted_captures: usize,
    pub description_height: f64,
    pub h_spacing: f64,
    pub v_spacing: f64,
    pub core_node_width: f64,
    pub core_node_height: f64,
    pub core_node_h_spacing: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 80.0,
            phenomenon_base_height: 60.0,
            phenomenon_min_height: 100.0,
            phenomenon_max_height: 300.0,
            capture_height: 20.0,
            max_counted_captures: 6,
            description_height: 20.0,
            h_spacing: 40.0,
            v_spacing: 80.0,
            core_node_width: 220.0,
            core_node_height: 100.0,
            core_node_h_spacing: 120.0,
            origin_x: 50.0,
            origin_y: 50.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        error::parse_json("layout config", json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        error::read_json_file("layout config", path.as_ref())
    }

    /// Height of a regular (non-core) layout node.
    ///
    /// Fixed for every type except `Phenomenon`, which grows with its capture
    /// count and description and is clamped into
    /// `[phenomenon_min_height, phenomenon_max_height]`.
    pub fn node_height(&self, node: &WorkflowNode) -> f64 {
        let NodeKind::Phenomenon { captures, description } = &node.kind else {
            return self.node_height;
        };
        let counted = captures.len().min(self.max_counted_captures) as f64;
        let mut height = self.phenomenon_base_height + self.capture_height * counted;
        if description.as_deref().is_some_and(|d| !d.is_empty()) {
            height += self.description_height;
        }
        height.min(self.phenomenon_max_height).max(self.phenomenon_min_height)
    }
}

/// [`LayoutConfig::node_height`] with the default dimensions.
pub fn node_height(node: &WorkflowNode) -> f64 {
    LayoutConfig::default().node_height(node)
}
