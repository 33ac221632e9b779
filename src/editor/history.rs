//! Undo/redo history
//!
//! Snapshot-based history for one suite: mutations push the pre-mutation
//! block sequence onto the `past` stack and discard any `future` states,
//! `undo`/`redo` shuttle snapshots between the two stacks. Depth is capped;
//! the oldest snapshot is evicted first.

use crate::core::block::Block;

/// Maximum number of undo steps retained per suite.
pub const MAX_HISTORY: usize = 100;

/// Full-snapshot undo/redo stacks for one block collection.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Vec<Block>>,
    future: Vec<Vec<Block>>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an undo step is available
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo step is available
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Record the pre-mutation snapshot. Any redo states past the current
    /// point are discarded, so redoing is only possible until the next
    /// fresh mutation.
    pub fn record(&mut self, pre_mutation: Vec<Block>) {
        self.past.push(pre_mutation);
        self.future.clear();
        if self.past.len() > MAX_HISTORY {
            self.past.remove(0);
        }
    }

    /// Step back: returns the snapshot to restore, storing `current` for
    /// redo. `None` at the boundary (nothing to undo).
    pub fn undo(&mut self, current: Vec<Block>) -> Option<Vec<Block>> {
        let restored = self.past.pop()?;
        self.future.push(current);
        Some(restored)
    }

    /// Step forward: returns the snapshot to restore, storing `current`
    /// for undo. `None` at the boundary (nothing to redo).
    pub fn redo(&mut self, current: Vec<Block>) -> Option<Vec<Block>> {
        let restored = self.future.pop()?;
        self.past.push(current);
        Some(restored)
    }
}
