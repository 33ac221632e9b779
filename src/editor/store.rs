//! Suite-aware editor store
//!
//! The store owns every suite plus its undo/redo history and tracks which
//! suite is active. All mutations route through a single commit step that
//! snapshots the pre-mutation state; transitions that turn out to be no-ops
//! (stale ids, dangling parents) leave the history untouched so a failed
//! gesture never eats an undo step.
//!
//! The store is created at editor mount and discarded at unmount. Suite
//! switching swaps which collection is active without discarding the
//! others; suites are fully isolated from each other.

use crate::core::block::BlockData;
use crate::core::template::Template;
use crate::core::{BlockId, SuiteId};

use super::history::History;
use super::resolver::{resolve, DragSource, DropAction, DropTarget};
use super::suite::{FieldEdit, Suite};

/// Name given to the suite a fresh store starts with.
const DEFAULT_SUITE_NAME: &str = "New Test Suite";

struct SuiteEntry {
    suite: Suite,
    history: History,
}

/// The state container behind one editor instance.
pub struct EditorStore {
    suites: Vec<SuiteEntry>,
    active: SuiteId,
}

impl EditorStore {
    /// Create a store holding one empty default suite.
    pub fn new() -> Self {
        let suite = Suite::new(DEFAULT_SUITE_NAME);
        let active = suite.id;
        Self {
            suites: vec![SuiteEntry {
                suite,
                history: History::new(),
            }],
            active,
        }
    }

    // ── Suite management ────────────────────────────────────────────────

    /// Create a new empty suite, make it active, and return its id.
    pub fn add_suite(&mut self, name: impl Into<String>) -> SuiteId {
        let suite = Suite::new(name);
        let id = suite.id;
        self.suites.push(SuiteEntry {
            suite,
            history: History::new(),
        });
        self.active = id;
        id
    }

    /// Rename a suite. No-op for an unknown id.
    pub fn rename_suite(&mut self, id: SuiteId, name: impl Into<String>) {
        if let Some(entry) = self.suites.iter_mut().find(|e| e.suite.id == id) {
            entry.suite.name = name.into();
        }
    }

    /// Switch the active suite. No-op for an unknown id.
    pub fn select_suite(&mut self, id: SuiteId) {
        if self.suites.iter().any(|e| e.suite.id == id) {
            self.active = id;
        }
    }

    /// The currently active suite.
    pub fn active_suite(&self) -> &Suite {
        &self
            .suites
            .iter()
            .find(|e| e.suite.id == self.active)
            .expect("active suite always exists")
            .suite
    }

    /// All suites, in creation order.
    pub fn suites(&self) -> impl Iterator<Item = &Suite> {
        self.suites.iter().map(|e| &e.suite)
    }

    /// Number of suites held by the store.
    pub fn suite_count(&self) -> usize {
        self.suites.len()
    }

    // ── Transitions (applied to the active suite) ───────────────────────

    /// Insert a new block. See [`Suite::add_block`].
    pub fn add_block(
        &mut self,
        data: BlockData,
        parent_id: Option<BlockId>,
        insert_before: Option<BlockId>,
    ) {
        self.commit(|suite| suite.add_block(data, parent_id, insert_before));
    }

    /// Instantiate a template subtree. See [`Suite::add_template`].
    pub fn add_template(&mut self, template: &Template, insert_before: Option<BlockId>) {
        self.commit(|suite| suite.add_template(template, insert_before));
    }

    /// Same-parent reorder. See [`Suite::move_block`].
    pub fn move_block(&mut self, active: BlockId, over: BlockId) {
        self.commit(|suite| suite.move_block(active, over));
    }

    /// Single-field update, including reparent. See
    /// [`Suite::update_block_data`].
    pub fn update_block_data(&mut self, id: BlockId, edit: FieldEdit) {
        self.commit(|suite| suite.update_block_data(id, edit));
    }

    /// Cascade removal. See [`Suite::remove_block`].
    pub fn remove_block(&mut self, id: BlockId) {
        self.commit(|suite| suite.remove_block(id));
    }

    /// Resolve a completed drag gesture and apply the resulting action.
    /// A rejected resolution leaves the tree byte-for-byte unchanged.
    pub fn drag_end(&mut self, source: &DragSource, target: Option<&DropTarget>) {
        match resolve(self.active_suite(), source, target) {
            DropAction::Insert {
                data,
                parent_id,
                insert_before,
            } => self.add_block(data, parent_id, insert_before),
            DropAction::Instantiate {
                template,
                insert_before,
            } => self.add_template(&template, insert_before),
            DropAction::Move { active, over } => self.move_block(active, over),
            DropAction::Reparent { id, new_parent } => {
                self.update_block_data(id, FieldEdit::Parent(new_parent))
            }
            DropAction::Remove { id } => self.remove_block(id),
            DropAction::Reject(_) => {}
        }
    }

    // ── Undo / redo ─────────────────────────────────────────────────────

    /// Whether the active suite has an undo step available.
    pub fn can_undo(&self) -> bool {
        self.active_entry().history.can_undo()
    }

    /// Whether the active suite has a redo step available.
    pub fn can_redo(&self) -> bool {
        self.active_entry().history.can_redo()
    }

    /// Restore the active suite to the state before the last mutation.
    /// No-op at the history boundary.
    pub fn undo(&mut self) {
        let entry = self.active_entry_mut();
        if let Some(restored) = entry.history.undo(entry.suite.blocks.clone()) {
            entry.suite.blocks = restored;
        }
    }

    /// Re-apply the last undone mutation. No-op at the history boundary.
    pub fn redo(&mut self) {
        let entry = self.active_entry_mut();
        if let Some(restored) = entry.history.redo(entry.suite.blocks.clone()) {
            entry.suite.blocks = restored;
        }
    }

    // ── Generation ──────────────────────────────────────────────────────

    /// Render the active suite to source text.
    pub fn generate_source(&self) -> String {
        crate::codegen::generate(self.active_suite())
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn active_entry(&self) -> &SuiteEntry {
        self.suites
            .iter()
            .find(|e| e.suite.id == self.active)
            .expect("active suite always exists")
    }

    fn active_entry_mut(&mut self) -> &mut SuiteEntry {
        let active = self.active;
        self.suites
            .iter_mut()
            .find(|e| e.suite.id == active)
            .expect("active suite always exists")
    }

    /// Apply one pure transition to the active suite, recording the
    /// pre-mutation snapshot. No-op transitions are not recorded.
    fn commit(&mut self, transition: impl FnOnce(&Suite) -> Suite) {
        let entry = self.active_entry_mut();
        let next = transition(&entry.suite);
        if next.blocks == entry.suite.blocks {
            return;
        }
        entry
            .history
            .record(std::mem::replace(&mut entry.suite.blocks, next.blocks));
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}
