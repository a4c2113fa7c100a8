//! Prelude module for convenient imports
//!
//! Re-exports the workflow model with its transforms and validators, the
//! stores, and the error types. Decision-graph layout lives in
//! [`crate::tree`] and is imported from there.
//!
//! # Example
//!
//! ```rust,no_run
//! use slideflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let data = ProjectWorkflowData::from_file("path/to/workflow.json")?;
//! let migrated = migrate_to_unified_steps(&data);
//! let verdict = validate_first_last_core(&sorted_unified_steps(&migrated));
//!
//! if let Some(message) = verdict.error_message {
//!     println!("Workflow is not structurally valid: {}", message);
//! }
//! # Ok(())
//! # }
//! ```

// Workflow model
pub use crate::workflow::{
    CoreStepDefinition, CoreStepInstance, KeyStepLink, KeyStepLinkingData, PhaseType, ProjectWorkflowData,
    StepKind, SupportRelation, UnifiedStepItem, ValidationResult, WorkflowStepInstance,
};

// Factories
pub use crate::workflow::{
    create_empty_workflow_data, create_step_instance, create_unified_core_step, create_unified_regular_step,
};

// Transforms and validators
pub use crate::workflow::{
    add_support_relation, get_layout_rows, get_main_flow_steps, migrate_to_unified_steps, sorted_unified_steps,
    sync_unified_to_legacy, validate_deletion, validate_first_last_core, validate_reorder,
    validate_support_creation,
};

// Stores
pub use crate::store::{KeyInfoStore, ModalStore, ToastStore, UiStore, WorkflowStore, Writable};

// Error types
pub use crate::error::{LoadError, StepOrderError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
