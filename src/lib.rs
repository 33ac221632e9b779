//! Block Editor - Core implementation for the Visual Test Builder
//!
//! This crate provides the editing core behind the visual test-case
//! builder: the typed block model and containment rules, the suite store
//! with undo/redo, drop-target resolution for drag-and-drop, and the
//! deterministic source generator.

pub mod codegen;
pub mod core;
pub mod editor;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use self::core::{Block, BlockData, BlockId, BlockKind, SuiteId};
pub use self::editor::{DragSource, DropTarget, EditorHandle, EditorStore, Suite};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
