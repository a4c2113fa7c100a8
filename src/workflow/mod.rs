//! The unified workflow of Core and Regular steps.
//!
//! A [`ProjectWorkflowData`] aggregate is never mutated in place by this
//! module: every operation borrows an aggregate and returns a new one with
//! `updated_at` refreshed. Validators report a [`ValidationResult`] or an
//! `Option<String>` message and leave it to the caller to decide whether the
//! mutation should be committed.

pub mod factory;
pub mod linking;
pub mod migration;
pub mod support;
pub mod types;
pub mod unified;
pub mod validation;

pub use factory::*;
pub use linking::*;
pub use migration::*;
pub use support::{
    LayoutRow, SupporterEntry, add_phase_type, add_support_relation, cleanup_orphaned_supports,
    get_all_phase_types, get_layout_rows, get_main_flow_steps, get_phase_by_id, get_support_info,
    get_support_steps, is_step_supporter, phase_of_step, remove_phase_type, remove_support_by_step_id,
    remove_support_relation, reorder_phase_types, update_phase_type,
};
pub use types::*;
pub use unified::*;
pub use validation::*;

use crate::error::{self, LoadError};
use std::path::Path;

impl ProjectWorkflowData {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        error::parse_json("workflow", json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        error::read_json_file("workflow", path.as_ref())
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        error::write_json("workflow", self)
    }

    /// True when either step list carries entries.
    pub fn has_steps(&self) -> bool {
        !self.unified_steps.is_empty() || !self.steps.is_empty() || !self.core_step_instances.is_empty()
    }
}
