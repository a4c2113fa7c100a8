//! Conversion between the legacy two-list shape (`steps` +
//! `coreStepInstances`) and the unified step sequence.
//!
//! Instance ids survive both directions, so support relations and key-step
//! links keep pointing at the same steps.

use super::types::{CoreStepInstance, ProjectWorkflowData, UnifiedStepItem, WorkflowStepInstance};
use crate::clock::now_iso;
use crate::list;
use ahash::AHashMap;
use itertools::Itertools;

/// Builds `unified_steps` from the legacy lists.
///
/// The first core instance (by legacy order) leads, every regular step
/// follows in legacy order, and the remaining core instances close the
/// sequence. A no-op clone when `unified_steps` is already non-empty or
/// there is nothing to migrate.
pub fn migrate_to_unified_steps(data: &ProjectWorkflowData) -> ProjectWorkflowData {
    if !data.unified_steps.is_empty() {
        log::debug!("Workflow already has {} unified step(s), skipping migration", data.unified_steps.len());
        return data.clone();
    }
    if data.steps.is_empty() && data.core_step_instances.is_empty() {
        return data.clone();
    }

    let mut cores = data
        .core_step_instances
        .iter()
        .cloned()
        .sorted_by_key(|c| c.order)
        .map(UnifiedStepItem::Core);
    let regulars = data
        .steps
        .iter()
        .cloned()
        .sorted_by_key(|s| s.order)
        .map(UnifiedStepItem::Regular);

    let mut unified_steps: Vec<UnifiedStepItem> = cores.next().into_iter().chain(regulars).chain(cores).collect();
    list::renumber(&mut unified_steps);

    log::info!(
        "Migrated {} regular and {} core step(s) into {} unified step(s)",
        data.steps.len(),
        data.core_step_instances.len(),
        unified_steps.len()
    );

    ProjectWorkflowData {
        unified_steps,
        updated_at: Some(now_iso()),
        ..data.clone()
    }
}

/// Splits `unified_steps` back into `steps` and `core_step_instances`, each
/// renumbered from 0 in unified order.
pub fn sync_unified_to_legacy(data: &ProjectWorkflowData) -> ProjectWorkflowData {
    let (mut cores, mut steps): (Vec<CoreStepInstance>, Vec<WorkflowStepInstance>) = data
        .unified_steps
        .iter()
        .sorted_by_key(|item| item.order())
        .cloned()
        .partition_map(|item| match item {
            UnifiedStepItem::Core(core) => itertools::Either::Left(core),
            UnifiedStepItem::Regular(step) => itertools::Either::Right(step),
        });
    list::renumber(&mut cores);
    list::renumber(&mut steps);

    ProjectWorkflowData {
        steps,
        core_step_instances: cores,
        ..data.clone()
    }
}

/// What happened to one workflow in [`migrate_project_workflows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No unified steps and neither legacy list had entries.
    NoData,
    AlreadyMigrated,
    Migrated { unified_steps: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Workflow ids with their outcome, sorted by id.
    pub outcomes: Vec<(String, MigrationOutcome)>,
}

impl MigrationSummary {
    pub fn migrated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, MigrationOutcome::Migrated { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.migrated()
    }

    pub fn has_changes(&self) -> bool {
        self.migrated() > 0
    }
}

/// Migrates every workflow of a project in place.
pub fn migrate_project_workflows(workflows: &mut AHashMap<String, ProjectWorkflowData>) -> MigrationSummary {
    let ids: Vec<String> = workflows.keys().cloned().sorted().collect();
    let mut summary = MigrationSummary::default();

    for id in ids {
        let Some(data) = workflows.get_mut(&id) else {
            continue;
        };
        let outcome = if !data.unified_steps.is_empty() {
            MigrationOutcome::AlreadyMigrated
        } else if data.steps.is_empty() && data.core_step_instances.is_empty() {
            MigrationOutcome::NoData
        } else {
            *data = migrate_to_unified_steps(data);
            MigrationOutcome::Migrated {
                unified_steps: data.unified_steps.len(),
            }
        };
        log::debug!("Workflow '{}': {:?}", id, outcome);
        summary.outcomes.push((id, outcome));
    }
    summary
}
