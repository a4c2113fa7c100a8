//! Support relations, phases and the row layout derived from them.
//!
//! The support graph is flat: a supporter never has supporters of its own and
//! a target is never a supporter.

use super::factory::{create_phase_type, create_support_relation};
use super::types::*;
use crate::clock::now_iso;
use crate::list;
use itertools::Itertools;

/// Relations whose target is `target_step_id`.
pub fn get_support_steps<'a>(target_step_id: &str, relations: &'a [SupportRelation]) -> Vec<&'a SupportRelation> {
    relations
        .iter()
        .filter(|r| r.target_step_id == target_step_id)
        .collect()
}

pub fn is_step_supporter(step_id: &str, relations: &[SupportRelation]) -> bool {
    relations.iter().any(|r| r.supporter_step_id == step_id)
}

/// The relation in which `step_id` is the supporter.
pub fn get_support_info<'a>(step_id: &str, relations: &'a [SupportRelation]) -> Option<&'a SupportRelation> {
    relations.iter().find(|r| r.supporter_step_id == step_id)
}

pub fn phase_of_step(step_id: &str, relations: &[SupportRelation]) -> PhaseAssignment {
    match get_support_info(step_id, relations) {
        Some(relation) => PhaseAssignment::Phase(relation.phase_id.clone()),
        None => PhaseAssignment::Main,
    }
}

/// Steps that are not supporting another step, in input order.
pub fn get_main_flow_steps<'a>(
    steps: &'a [WorkflowStepInstance],
    relations: &[SupportRelation],
) -> Vec<&'a WorkflowStepInstance> {
    steps
        .iter()
        .filter(|s| !is_step_supporter(&s.id, relations))
        .collect()
}

/// Adds `supporter -> target` under `phase_id`.
///
/// Any relation in which the supporter was a target is dropped, and a previous
/// relation of the same supporter is replaced. Self-support and targets that
/// are themselves supporters are refused; the returned aggregate then only
/// differs in `updated_at`.
pub fn add_support_relation(
    data: &ProjectWorkflowData,
    supporter_step_id: &str,
    target_step_id: &str,
    phase_id: &str,
) -> ProjectWorkflowData {
    let mut next = touched(data);
    if supporter_step_id == target_step_id || is_step_supporter(target_step_id, &data.support_relations) {
        log::warn!(
            "Refusing support relation '{}' -> '{}': it would nest supporters",
            supporter_step_id,
            target_step_id
        );
        return next;
    }

    let (dropped, mut kept): (Vec<_>, Vec<_>) = data
        .support_relations
        .iter()
        .cloned()
        .partition(|r| r.target_step_id == supporter_step_id || r.supporter_step_id == supporter_step_id);
    for relation in dropped.iter().filter(|r| r.target_step_id == supporter_step_id) {
        log::info!(
            "Dropping support relation '{}' -> '{}': '{}' became a supporter",
            relation.supporter_step_id,
            relation.target_step_id,
            supporter_step_id
        );
    }

    kept.push(create_support_relation(supporter_step_id, target_step_id, phase_id));
    next.support_relations = kept;
    next
}

pub fn remove_support_relation(data: &ProjectWorkflowData, relation_id: &str) -> ProjectWorkflowData {
    let mut next = touched(data);
    next.support_relations = list::remove_by_id(&data.support_relations, relation_id).into_owned();
    next
}

/// Removes the relation in which `step_id` is the supporter.
pub fn remove_support_by_step_id(data: &ProjectWorkflowData, step_id: &str) -> ProjectWorkflowData {
    let mut next = touched(data);
    next.support_relations = list::remove_where(&data.support_relations, |r| r.supporter_step_id == step_id)
        .into_owned();
    next
}

/// Drops relations whose supporter or target is no longer among `steps`.
pub fn cleanup_orphaned_supports(data: &ProjectWorkflowData) -> ProjectWorkflowData {
    let exists = |id: &str| data.steps.iter().any(|s| s.id == id);
    let mut next = touched(data);
    next.support_relations = list::remove_where(&data.support_relations, |r| {
        !exists(&r.supporter_step_id) || !exists(&r.target_step_id)
    })
    .into_owned();
    let removed = data.support_relations.len() - next.support_relations.len();
    if removed > 0 {
        log::debug!("Removed {} orphaned support relation(s)", removed);
    }
    next
}

pub fn add_phase_type(data: &ProjectWorkflowData, name: &str, color: &str) -> ProjectWorkflowData {
    let mut next = touched(data);
    next.phase_types
        .push(create_phase_type(name, color, data.phase_types.len()));
    next
}

/// Removes a phase together with every relation filed under it.
pub fn remove_phase_type(data: &ProjectWorkflowData, phase_id: &str) -> ProjectWorkflowData {
    let mut next = touched(data);
    let mut phases = list::remove_by_id(&data.phase_types, phase_id).into_owned();
    list::renumber(&mut phases);
    next.phase_types = phases;
    next.support_relations = list::remove_where(&data.support_relations, |r| r.phase_id == phase_id).into_owned();
    next
}

pub fn update_phase_type(data: &ProjectWorkflowData, phase_id: &str, update: &PhaseTypeUpdate) -> ProjectWorkflowData {
    let mut next = touched(data);
    next.phase_types = list::update_by_id(&data.phase_types, phase_id, |phase| PhaseType {
        name: update.name.clone().unwrap_or_else(|| phase.name.clone()),
        color: update.color.clone().unwrap_or_else(|| phase.color.clone()),
        ..phase.clone()
    })
    .into_owned();
    next
}

pub fn reorder_phase_types(data: &ProjectWorkflowData, from: usize, to: usize) -> ProjectWorkflowData {
    let mut next = touched(data);
    let mut phases = list::reorder(&data.phase_types, from, to).into_owned();
    list::renumber(&mut phases);
    next.phase_types = phases;
    next
}

pub fn get_all_phase_types(data: &ProjectWorkflowData) -> &[PhaseType] {
    &data.phase_types
}

pub fn get_phase_by_id<'a>(phase_id: &str, phases: &'a [PhaseType]) -> Option<&'a PhaseType> {
    phases.iter().find(|p| p.id == phase_id)
}

/// A supporting step shown beside its target.
#[derive(Debug, Clone, PartialEq)]
pub struct SupporterEntry<'a> {
    pub step: &'a WorkflowStepInstance,
    pub relation: &'a SupportRelation,
    /// `None` when the relation references a phase that no longer exists.
    pub phase: Option<&'a PhaseType>,
}

/// A main-flow step with the steps supporting it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRow<'a> {
    pub main_step: &'a WorkflowStepInstance,
    pub supporters: Vec<SupporterEntry<'a>>,
}

/// Groups steps into rows for display: one row per main-flow step, ordered by
/// `order`, with its supporters ordered by phase order then step order.
pub fn get_layout_rows<'a>(
    steps: &'a [WorkflowStepInstance],
    relations: &'a [SupportRelation],
    phases: &'a [PhaseType],
) -> Vec<LayoutRow<'a>> {
    let phase_rank = |entry: &SupporterEntry<'_>| entry.phase.map_or(usize::MAX, |p| p.order);

    get_main_flow_steps(steps, relations)
        .into_iter()
        .sorted_by_key(|s| s.order)
        .map(|main_step| {
            let supporters = get_support_steps(&main_step.id, relations)
                .into_iter()
                .filter_map(|relation| {
                    let step = list::find_by_id(steps, &relation.supporter_step_id)?;
                    Some(SupporterEntry {
                        step,
                        relation,
                        phase: get_phase_by_id(&relation.phase_id, phases),
                    })
                })
                .sorted_by_key(|entry| (phase_rank(entry), entry.step.order))
                .collect();
            LayoutRow { main_step, supporters }
        })
        .collect()
}

/// A copy of `data` with `updated_at` refreshed.
pub(super) fn touched(data: &ProjectWorkflowData) -> ProjectWorkflowData {
    ProjectWorkflowData {
        updated_at: Some(now_iso()),
        ..data.clone()
    }
}
