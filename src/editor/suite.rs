//! Test suite and pure tree transitions
//!
//! A suite owns the single flat ordered sequence of blocks that backs the
//! whole tree. Every transition is a total pure function: input suite in,
//! output suite out, and malformed requests (missing ids, dangling parents)
//! return the suite unchanged instead of failing. This makes the suite safe
//! to drive from best-effort UI gesture handlers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::block::{Block, BlockData, MatcherOp};
use crate::core::template::Template;
use crate::core::{BlockId, SuiteId};

/// A single-field edit to one block, including the reparent special case.
///
/// Edits that do not apply to the block's kind are ignored (the transition
/// returns the suite unchanged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    /// Function or analysis name
    Name(String),
    /// Variable declared type
    VarType(String),
    /// Variable name
    VarName(String),
    /// Variable initial value
    VarValue(String),
    /// Assertion target expression
    Target(String),
    /// Exception-assertion expression under test
    Expression(String),
    /// Exception-assertion expected exception type
    Exception(String),
    /// Static-assertion condition
    Condition(String),
    /// Matcher operator
    Op(MatcherOp),
    /// Matcher expected value
    Value(String),
    /// Extracting property name
    Property(String),
    /// Structure-check rule text
    Rule(String),
    /// Reparent: move the block under a different parent (or top level)
    Parent(Option<BlockId>),
}

/// A named, independent collection of blocks representing one generated
/// source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub id: SuiteId,
    pub name: String,
    /// The flat ordered sequence backing the whole tree.
    pub blocks: Vec<Block>,
}

impl Suite {
    /// Create a new empty suite
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SuiteId::new(),
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Look up a block by id
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Whether a block with the given id exists
    pub fn contains(&self, id: BlockId) -> bool {
        self.get(id).is_some()
    }

    /// Top-level blocks, in sequence order
    pub fn roots(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.parent_id.is_none())
    }

    /// Direct children of `parent`, in sequence order
    pub fn children(&self, parent: BlockId) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |b| b.parent_id == Some(parent))
    }

    /// Walk the ancestor chain of `id`, nearest first, excluding `id`
    /// itself. The walk is cycle-guarded: it visits at most `blocks.len()`
    /// nodes, so a corrupted parent chain cannot loop forever.
    pub fn ancestors(&self, id: BlockId) -> Vec<&Block> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(|b| b.parent_id);
        while let Some(parent_id) = current {
            if chain.len() >= self.blocks.len() {
                break;
            }
            match self.get(parent_id) {
                Some(parent) => {
                    chain.push(parent);
                    current = parent.parent_id;
                }
                None => break,
            }
        }
        chain
    }

    /// The ids of `id` and every block whose parent chain leads back to it.
    pub fn subtree_ids(&self, id: BlockId) -> HashSet<BlockId> {
        let mut closed: HashSet<BlockId> = HashSet::new();
        if !self.contains(id) {
            return closed;
        }
        closed.insert(id);
        // The sequence is unordered with respect to depth, so iterate to a
        // fixpoint; each pass adds at least one id or terminates.
        loop {
            let before = closed.len();
            for block in &self.blocks {
                if let Some(parent) = block.parent_id {
                    if closed.contains(&parent) {
                        closed.insert(block.id);
                    }
                }
            }
            if closed.len() == before {
                break;
            }
        }
        closed
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Insert a new block (fresh id) into the flat sequence.
    ///
    /// If `insert_before` names an existing block, the new block lands
    /// immediately before it; otherwise it is appended. No-op when
    /// `parent_id` is `Some` but dangling. Containment legality is the
    /// resolver's responsibility and is not re-checked here.
    pub fn add_block(
        &self,
        data: BlockData,
        parent_id: Option<BlockId>,
        insert_before: Option<BlockId>,
    ) -> Suite {
        if let Some(parent) = parent_id {
            if !self.contains(parent) {
                return self.clone();
            }
        }

        let mut next = self.clone();
        let block = Block::new(data, parent_id);
        match insert_before.and_then(|before| next.index_of(before)) {
            Some(idx) => next.blocks.insert(idx, block),
            None => next.blocks.push(block),
        }
        next
    }

    /// Instantiate a template's full subtree with fresh ids, inserting the
    /// produced blocks at the given position (or at the end).
    pub fn add_template(&self, template: &Template, insert_before: Option<BlockId>) -> Suite {
        let mut subtree = Vec::new();
        template.root.instantiate(None, &mut subtree);

        let mut next = self.clone();
        match insert_before.and_then(|before| next.index_of(before)) {
            Some(idx) => {
                for block in subtree.into_iter().rev() {
                    next.blocks.insert(idx, block);
                }
            }
            None => next.blocks.extend(subtree),
        }
        next
    }

    /// Reorder `active` to sit immediately before `over`, within the same
    /// parent only. No-op if either id is missing or the parents differ
    /// (cross-parent drags resolve to a reparent instead).
    pub fn move_block(&self, active: BlockId, over: BlockId) -> Suite {
        if active == over {
            return self.clone();
        }
        let (Some(a), Some(b)) = (self.get(active), self.get(over)) else {
            return self.clone();
        };
        if a.parent_id != b.parent_id {
            return self.clone();
        }

        let mut next = self.clone();
        let from = next.index_of(active).expect("checked above");
        let moved = next.blocks.remove(from);
        let to = next.index_of(over).expect("checked above");
        next.blocks.insert(to, moved);
        next
    }

    /// Set a single field on one block.
    ///
    /// `FieldEdit::Parent` reparents the block without touching its
    /// position in the flat sequence. A reparent is ignored when the new
    /// parent is dangling, is the block itself, or is one of the block's
    /// own descendants (that would detach the subtree into a cycle).
    /// Edits that do not fit the block's kind are ignored.
    pub fn update_block_data(&self, id: BlockId, edit: FieldEdit) -> Suite {
        if !self.contains(id) {
            return self.clone();
        }

        if let FieldEdit::Parent(new_parent) = &edit {
            if let Some(parent) = new_parent {
                if !self.contains(*parent) || self.subtree_ids(id).contains(parent) {
                    return self.clone();
                }
            }
        }

        let mut next = self.clone();
        let block = next
            .blocks
            .iter_mut()
            .find(|b| b.id == id)
            .expect("checked above");

        match (&mut block.data, edit) {
            (BlockData::TestFunction { name }, FieldEdit::Name(v)) => *name = v,
            (BlockData::AnalysisFunction { name }, FieldEdit::Name(v)) => *name = v,
            (BlockData::Variable { var_type, .. }, FieldEdit::VarType(v)) => *var_type = v,
            (BlockData::Variable { name, .. }, FieldEdit::VarName(v)) => *name = v,
            (BlockData::Variable { value, .. }, FieldEdit::VarValue(v)) => *value = v,
            (BlockData::Assertion { target }, FieldEdit::Target(v)) => *target = v,
            (BlockData::ExceptionAssertion { expression, .. }, FieldEdit::Expression(v)) => {
                *expression = v
            }
            (BlockData::ExceptionAssertion { exception, .. }, FieldEdit::Exception(v)) => {
                *exception = v
            }
            (BlockData::StaticAssertion { condition }, FieldEdit::Condition(v)) => *condition = v,
            (BlockData::Matcher { op, .. }, FieldEdit::Op(v)) => *op = v,
            (BlockData::Matcher { value, .. }, FieldEdit::Value(v)) => *value = v,
            (BlockData::Extracting { property }, FieldEdit::Property(v)) => *property = v,
            (BlockData::StructureCheck { rule }, FieldEdit::Rule(v)) => *rule = v,
            (_, FieldEdit::Parent(new_parent)) => block.parent_id = new_parent,
            // Field does not apply to this kind: ignore.
            _ => return self.clone(),
        }
        next
    }

    /// Remove the block and, transitively, every descendant, in one atomic
    /// transition. No-op for an unknown id.
    pub fn remove_block(&self, id: BlockId) -> Suite {
        if !self.contains(id) {
            return self.clone();
        }
        let doomed = self.subtree_ids(id);
        let mut next = self.clone();
        next.blocks.retain(|b| !doomed.contains(&b.id));
        next
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }
}
