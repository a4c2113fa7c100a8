//! # Slideflow - Evidence Workflow Core
//!
//! **Slideflow** is the domain core of a slide-based root-cause analysis editor.
//! An analyst works through a presentation, captures regions of slides as
//! evidence and arranges that evidence into an ordered workflow of steps. This
//! crate owns the data model of that workflow and every rule the editor enforces
//! on it, independent of any UI toolkit or backend.
//!
//! ## Core Concepts
//!
//! 1.  **Unified steps**: A workflow is one ordered sequence of
//!     [`UnifiedStepItem`](workflow::UnifiedStepItem)s. *Core* steps are built
//!     from predefined presets and must open and close the sequence; *Regular*
//!     steps reference a user-defined step row and carry captures and
//!     attachments.
//! 2.  **Support relations**: A step may support a main-flow step under a
//!     named phase. The support graph is flat: supporters never have
//!     supporters.
//! 3.  **Key step linking**: Core steps that require it are linked to a
//!     prioritized set of preceding steps before a workflow can be confirmed.
//! 4.  **Decision graphs**: A separate typed node graph (phenomenon, selector,
//!     sequence, condition, action) is laid out top-down for rendering by the
//!     [`tree`] module.
//!
//! Every transform in [`workflow`] takes an aggregate by reference and returns
//! a new one. Validators never fail: they report a
//! [`ValidationResult`](workflow::ValidationResult) and leave it to the caller
//! to commit or discard the mutation. The observable [`store`]s do exactly that.
//!
//! ## Quick Start
//!
//! ```rust
//! use slideflow::prelude::*;
//!
//! let mut data = create_empty_workflow_data();
//! data.unified_steps = vec![
//!     create_unified_core_step("core-intro", Vec::new(), 0),
//!     create_unified_regular_step("row-a", 1),
//!     create_unified_core_step("core-outro", Vec::new(), 2),
//! ];
//!
//! // Moving the closing core step into the middle would leave a regular step last.
//! let steps = sorted_unified_steps(&data);
//! assert!(!validate_reorder(&steps, 2, 1).is_valid);
//!
//! // Stores commit only what validates.
//! let mut store = WorkflowStore::new();
//! store.set_data(data);
//! assert!(store.reorder_unified(2, 1).is_err());
//! assert!(store.delete_unified(1).is_ok());
//! assert_eq!(store.get().data.unified_steps.len(), 2);
//! ```
//!
//! Laying out a decision graph:
//!
//! ```rust
//! use slideflow::tree::{LayoutConfig, NodeKind, WorkflowData, WorkflowNode, calculate_tree_layout};
//!
//! let mut graph = WorkflowData::default();
//! graph.insert(WorkflowNode::new("root", NodeKind::Selector).with_children(["a", "b"]));
//! graph.insert(WorkflowNode::new("a", NodeKind::Sequence));
//! graph.insert(WorkflowNode::new("b", NodeKind::Sequence));
//! graph.root_id = Some("root".to_string());
//!
//! let layout = calculate_tree_layout(&graph, &LayoutConfig::default());
//! assert_eq!(layout.len(), 3);
//! ```

pub mod clock;
pub mod error;
pub mod id;
pub mod key_info;
pub mod list;
pub mod prelude;
pub mod store;
pub mod tree;
pub mod workflow;
