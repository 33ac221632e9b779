//! Shared editor handle for embedding hosts
//!
//! The handle wraps one [`EditorStore`] in `Arc<RwLock>` for hosts that
//! hold the editor from several places (a window, a preview pane, a
//! shortcut handler). It uses parking_lot's RwLock for concurrent reads
//! and exclusive writes; every transition still applies atomically under
//! the write lock, so observers never see a half-applied mutation.

use std::sync::Arc;

use parking_lot::RwLock;

use super::store::EditorStore;

/// Clone-shared handle to one editor store.
#[derive(Clone)]
pub struct EditorHandle {
    store: Arc<RwLock<EditorStore>>,
}

impl EditorHandle {
    /// Create a handle owning a fresh store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(EditorStore::new())),
        }
    }

    /// Run a read-only closure against the store.
    pub fn read<R>(&self, f: impl FnOnce(&EditorStore) -> R) -> R {
        f(&self.store.read())
    }

    /// Run a mutating closure against the store.
    pub fn write<R>(&self, f: impl FnOnce(&mut EditorStore) -> R) -> R {
        f(&mut self.store.write())
    }
}

impl Default for EditorHandle {
    fn default() -> Self {
        Self::new()
    }
}
