//! Structural edits of the unified step sequence.
//!
//! These transforms do not enforce the first/last core rule; validate with
//! [`validate_reorder`](super::validate_reorder) or
//! [`validate_deletion`](super::validate_deletion) before committing.

use super::support::touched;
use super::types::{ProjectWorkflowData, UnifiedStepItem};
use crate::list;
use itertools::Itertools;

/// The unified sequence in display order.
pub fn sorted_unified_steps(data: &ProjectWorkflowData) -> Vec<UnifiedStepItem> {
    data.unified_steps
        .iter()
        .cloned()
        .sorted_by_key(UnifiedStepItem::order)
        .collect()
}

/// Inserts `item` at `index` (clamped) and renumbers.
pub fn insert_unified_step(data: &ProjectWorkflowData, index: usize, item: UnifiedStepItem) -> ProjectWorkflowData {
    let mut steps = list::insert_at(&sorted_unified_steps(data), index, item);
    list::renumber(&mut steps);
    with_steps(data, steps)
}

/// Removes the step at `index` (display order) and renumbers.
pub fn remove_unified_step(data: &ProjectWorkflowData, index: usize) -> ProjectWorkflowData {
    let mut steps = list::remove_at(&sorted_unified_steps(data), index).into_owned();
    list::renumber(&mut steps);
    with_steps(data, steps)
}

pub fn reorder_unified_steps(data: &ProjectWorkflowData, from: usize, to: usize) -> ProjectWorkflowData {
    let mut steps = list::reorder(&sorted_unified_steps(data), from, to).into_owned();
    list::renumber(&mut steps);
    with_steps(data, steps)
}

/// Replaces the unified step with the same id as `item`.
pub fn replace_unified_step(data: &ProjectWorkflowData, item: UnifiedStepItem) -> ProjectWorkflowData {
    let steps = list::update_by_id(&data.unified_steps, item.id(), |_| item.clone()).into_owned();
    with_steps(data, steps)
}

fn with_steps(data: &ProjectWorkflowData, unified_steps: Vec<UnifiedStepItem>) -> ProjectWorkflowData {
    ProjectWorkflowData {
        unified_steps,
        ..touched(data)
    }
}
