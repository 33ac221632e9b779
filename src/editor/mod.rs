//! Editor state container, history, and drop resolution
//!
//! This module holds the reducer-style state machine behind the canvas:
//! pure suite transitions, the suite-aware store with undo/redo, the
//! drop-target resolver, and the shared handle for embedding hosts.

pub mod handle;
pub mod history;
pub mod resolver;
pub mod store;
pub mod suite;

pub use handle::EditorHandle;
pub use resolver::{resolve, DragSource, DropAction, DropTarget, RejectReason};
pub use store::EditorStore;
pub use suite::{FieldEdit, Suite};
