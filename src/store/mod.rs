//! Observable state containers for the editor.
//!
//! Each store wraps its state in a [`Writable`]: subscribers receive the
//! current value as soon as they subscribe and again after every mutation.
//! Stores hold no decision logic of their own; they delegate to the
//! [`workflow`](crate::workflow) and [`key_info`](crate::key_info) transforms
//! and commit the result.

pub mod key_info;
pub mod modal;
pub mod toast;
pub mod ui;
pub mod workflow;
pub mod writable;

pub use key_info::{KeyInfoState, KeyInfoStore};
pub use modal::{
    AttachmentModalState, CoreStepImageModalState, ImageAddModalState, ModalState, ModalStore,
    PhaseSelectModalState,
};
pub use toast::{ToastKind, ToastMessage, ToastStore};
pub use ui::{
    CaptureState, DragDropState, DragMode, DropHover, ExpandedState, PopupState, SelectionState, UiState, UiStore,
    ViewMode, drop_slot, resolve_drop,
};
pub use workflow::{WorkflowState, WorkflowStore};
pub use writable::{SubscriptionId, Writable};
