use super::writable::{Writable, observable};
use crate::clock::now_iso;
use crate::error::StepOrderError;
use crate::workflow::{
    self, CoreStepInstance, KeyStepLink, LayoutRow, MigrationSummary, PhaseType, ProjectWorkflowData,
    UnifiedStepItem, ValidationResult, WorkflowStepInstance, create_empty_workflow_data,
};
use ahash::AHashMap;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    /// The workflow being edited.
    pub data: ProjectWorkflowData,
    pub active_workflow_id: Option<String>,
    /// Every workflow of the project by workflow definition id. The active
    /// entry mirrors `data`.
    pub all_workflows_data: AHashMap<String, ProjectWorkflowData>,
    pub global_phases: Vec<PhaseType>,
    pub saving: bool,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            data: create_empty_workflow_data(),
            active_workflow_id: None,
            all_workflows_data: AHashMap::new(),
            global_phases: Vec::new(),
            saving: false,
        }
    }
}

/// The project's workflows and the one being edited.
///
/// Every mutator commits a new aggregate into `data` and, when a workflow is
/// active, into its entry of `all_workflows_data`.
#[derive(Debug, Default)]
pub struct WorkflowStore {
    state: Writable<WorkflowState>,
}

observable!(WorkflowStore, WorkflowState);

impl WorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every workflow of a project, migrating legacy ones to the
    /// unified sequence, and activates `active_workflow_id`.
    pub fn load(
        &mut self,
        mut workflows: AHashMap<String, ProjectWorkflowData>,
        active_workflow_id: Option<&str>,
        global_phases: Vec<PhaseType>,
    ) -> MigrationSummary {
        let summary = workflow::migrate_project_workflows(&mut workflows);
        if summary.has_changes() {
            log::info!(
                "Migrated {} workflow(s) to unified steps, {} skipped",
                summary.migrated(),
                summary.skipped()
            );
        }
        let data = active_workflow_id
            .and_then(|id| workflows.get(id).cloned())
            .unwrap_or_else(create_empty_workflow_data);
        self.state.set(WorkflowState {
            data,
            active_workflow_id: active_workflow_id.map(str::to_string),
            all_workflows_data: workflows,
            global_phases,
            saving: false,
        });
        summary
    }

    /// Replaces the edited workflow with `data`, migrated when needed.
    pub fn init(&mut self, data: ProjectWorkflowData) {
        let data = workflow::migrate_to_unified_steps(&data);
        self.commit(data);
    }

    pub fn set_data(&mut self, data: ProjectWorkflowData) {
        self.commit(data);
    }

    /// Switches to another workflow; an unknown id starts an empty one.
    pub fn set_active_workflow(&mut self, workflow_id: &str) {
        self.state.modify(|s| {
            s.data = s
                .all_workflows_data
                .get(workflow_id)
                .cloned()
                .unwrap_or_else(create_empty_workflow_data);
            s.active_workflow_id = Some(workflow_id.to_string());
        });
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.state.modify(|s| s.saving = saving);
    }

    pub fn set_global_phases(&mut self, phases: Vec<PhaseType>) {
        self.state.modify(|s| s.global_phases = phases);
    }

    pub fn add_support(&mut self, supporter_step_id: &str, target_step_id: &str, phase_id: &str) {
        let next = workflow::add_support_relation(&self.state.get().data, supporter_step_id, target_step_id, phase_id);
        self.commit(next);
    }

    /// Removes the relation in which `step_id` is the supporter.
    pub fn remove_support(&mut self, step_id: &str) {
        let next = workflow::remove_support_by_step_id(&self.state.get().data, step_id);
        self.commit(next);
    }

    /// Replaces the Regular Steps and drops support relations left dangling.
    pub fn update_steps(&mut self, steps: Vec<WorkflowStepInstance>) {
        let updated = ProjectWorkflowData {
            steps,
            updated_at: Some(now_iso()),
            ..self.state.get().data.clone()
        };
        self.commit(workflow::cleanup_orphaned_supports(&updated));
    }

    pub fn update_core_step_instances(&mut self, instances: Vec<CoreStepInstance>) {
        let updated = ProjectWorkflowData {
            core_step_instances: instances,
            updated_at: Some(now_iso()),
            ..self.state.get().data.clone()
        };
        self.commit(updated);
    }

    /// Inserts a unified step at `index` (display order) and refreshes the
    /// legacy lists.
    pub fn insert_unified(&mut self, index: usize, item: UnifiedStepItem) {
        let next = workflow::insert_unified_step(&self.state.get().data, index, item);
        self.commit(workflow::sync_unified_to_legacy(&next));
    }

    /// Moves a unified step, refusing moves that leave a Regular Step at
    /// either end of the sequence.
    pub fn reorder_unified(&mut self, from: usize, to: usize) -> Result<(), StepOrderError> {
        let data = &self.state.get().data;
        let sorted = workflow::sorted_unified_steps(data);
        for index in [from, to] {
            if index >= sorted.len() {
                return Err(StepOrderError::IndexOutOfRange {
                    index,
                    len: sorted.len(),
                });
            }
        }

        let verdict = workflow::validate_reorder(&sorted, from, to);
        if let Some(message) = verdict.error_message {
            log::warn!("Rejected reorder of unified step {} -> {}: {}", from, to, message);
            return Err(StepOrderError::ReorderRejected { from, to, message });
        }
        if from == to {
            return Ok(());
        }

        let next = workflow::reorder_unified_steps(data, from, to);
        self.commit(workflow::sync_unified_to_legacy(&next));
        Ok(())
    }

    /// Deletes a unified step together with the support relations and key
    /// step links that referenced it.
    pub fn delete_unified(&mut self, index: usize) -> Result<(), StepOrderError> {
        let data = &self.state.get().data;
        let sorted = workflow::sorted_unified_steps(data);
        let Some(removed) = sorted.get(index) else {
            return Err(StepOrderError::IndexOutOfRange {
                index,
                len: sorted.len(),
            });
        };

        let verdict = workflow::validate_deletion(&sorted, index);
        if let Some(message) = verdict.error_message {
            log::warn!("Rejected deletion of unified step {}: {}", index, message);
            return Err(StepOrderError::DeletionRejected { index, message });
        }

        let removed_id = removed.id().to_string();
        let next = workflow::remove_unified_step(data, index);
        let next = workflow::sync_unified_to_legacy(&next);
        let next = workflow::cleanup_orphaned_supports(&next);
        let next = workflow::prune_key_step_links(&next, &removed_id);
        self.commit(next);
        Ok(())
    }

    /// Validates and stores the key step links of one core instance.
    pub fn save_key_step_links(&mut self, core_step_instance_id: &str, linked_steps: Vec<KeyStepLink>) -> ValidationResult {
        let data = &self.state.get().data;
        if let Some(message) = workflow::validate_key_step_links(data, core_step_instance_id, &linked_steps) {
            log::warn!("Rejected key step links for '{}': {}", core_step_instance_id, message);
            return ValidationResult::invalid(message);
        }
        let next = workflow::save_key_step_links(data, core_step_instance_id, linked_steps);
        self.commit(next);
        ValidationResult::valid()
    }

    pub fn confirm(&mut self) {
        let next = workflow::confirm_workflow(&self.state.get().data);
        self.commit(next);
    }

    pub fn unconfirm(&mut self) {
        let next = workflow::unconfirm_workflow(&self.state.get().data);
        self.commit(next);
    }

    /// Empties the active workflow.
    pub fn reset(&mut self) {
        self.commit(create_empty_workflow_data());
    }

    pub fn layout_rows(&self) -> Vec<LayoutRow<'_>> {
        let state = self.state.get();
        workflow::get_layout_rows(&state.data.steps, &state.data.support_relations, &state.global_phases)
    }

    pub fn sorted_core_step_instances(&self) -> Vec<&CoreStepInstance> {
        self.state
            .get()
            .data
            .core_step_instances
            .iter()
            .sorted_by_key(|instance| instance.order)
            .collect()
    }

    pub fn sorted_unified_steps(&self) -> Vec<UnifiedStepItem> {
        workflow::sorted_unified_steps(&self.state.get().data)
    }

    pub fn has_workflow_data(&self) -> bool {
        self.state.get().data.has_steps()
    }

    fn commit(&mut self, data: ProjectWorkflowData) {
        self.state.modify(|s| {
            if let Some(id) = &s.active_workflow_id {
                s.all_workflows_data.insert(id.clone(), data.clone());
            }
            s.data = data;
        });
    }
}
