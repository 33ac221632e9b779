//! Drop-target resolution
//!
//! Translates a raw drag-and-drop gesture (what is being dragged, what is
//! being hovered) into a concrete tree mutation or a rejection. Resolution
//! is pure and deterministic: the same (source, target, suite) triple
//! always yields the same action, and a rejection implies zero state
//! change. Containment legality is enforced here, before the store ever
//! sees the gesture.

use serde::{Deserialize, Serialize};

use crate::core::block::{allowed_at_root, can_contain, Block, BlockData, BlockKind};
use crate::core::template::Template;
use crate::core::BlockId;

use super::suite::Suite;

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragSource {
    /// A palette entry producing a single new block
    NewBlock { data: BlockData },
    /// A palette entry producing a whole template subtree
    NewTemplate { template: Template },
    /// An existing canvas block being reordered or reparented
    Existing { id: BlockId },
}

/// What is being hovered when the drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropTarget {
    /// The empty canvas area (top level, append at end)
    Canvas,
    /// A rendered block, used as a position anchor
    Block { id: BlockId },
    /// A typed container region owned by one block (e.g. a function body)
    Zone { owner: BlockId },
    /// The designated trash target
    Trash,
}

/// Why a drop was rejected. Rejections are silent in the UI; the reason is
/// for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    /// The drag ended with no hover target
    #[error("drag ended outside any drop target")]
    NoTarget,

    /// The hovered id does not exist (stale event)
    #[error("drop target references an unknown block")]
    UnknownBlock,

    /// No ancestor of the target can legally contain the dragged kind
    #[error("no compatible ancestor for the dragged block")]
    NoCompatibleAncestor,

    /// Templates and top-level blocks only accept top-level targets
    #[error("only top-level drop targets are accepted")]
    TopLevelOnly,

    /// The block was dropped onto itself or its current position
    #[error("drop would not change anything")]
    SelfDrop,

    /// Reparenting here would place a block under its own subtree
    #[error("drop would create a containment cycle")]
    WouldCreateCycle,

    /// The dragged kind may not nest under the implied parent
    #[error("containment rules forbid this nesting")]
    IllegalContainment,
}

/// The concrete mutation a drag gesture resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Insert a single new block
    Insert {
        data: BlockData,
        parent_id: Option<BlockId>,
        insert_before: Option<BlockId>,
    },
    /// Instantiate a template subtree at the top level
    Instantiate {
        template: Template,
        insert_before: Option<BlockId>,
    },
    /// Same-parent reorder
    Move { active: BlockId, over: BlockId },
    /// Cross-parent reparent
    Reparent {
        id: BlockId,
        new_parent: Option<BlockId>,
    },
    /// Remove the dragged block (trash)
    Remove { id: BlockId },
    /// No-op; the tree must remain byte-for-byte unchanged
    Reject(RejectReason),
}

/// Resolve a completed drag gesture against the current tree.
pub fn resolve(suite: &Suite, source: &DragSource, target: Option<&DropTarget>) -> DropAction {
    let Some(target) = target else {
        return DropAction::Reject(RejectReason::NoTarget);
    };

    match source {
        DragSource::NewTemplate { template } => resolve_top_level_insert(suite, target)
            .map(|insert_before| DropAction::Instantiate {
                template: template.clone(),
                insert_before,
            })
            .unwrap_or_else(DropAction::Reject),

        DragSource::NewBlock { data } => resolve_new_block(suite, data, target),

        DragSource::Existing { id } => resolve_existing(suite, *id, target),
    }
}

// ── Palette drops ───────────────────────────────────────────────────────────

/// Top-level insertion: accepts the canvas (append) or an existing
/// top-level block as a position anchor. Everything else rejects.
fn resolve_top_level_insert(
    suite: &Suite,
    target: &DropTarget,
) -> Result<Option<BlockId>, RejectReason> {
    match target {
        DropTarget::Canvas => Ok(None),
        DropTarget::Block { id } => {
            let anchor = suite.get(*id).ok_or(RejectReason::UnknownBlock)?;
            if anchor.parent_id.is_none() {
                Ok(Some(anchor.id))
            } else {
                Err(RejectReason::TopLevelOnly)
            }
        }
        DropTarget::Zone { .. } | DropTarget::Trash => Err(RejectReason::TopLevelOnly),
    }
}

fn resolve_new_block(suite: &Suite, data: &BlockData, target: &DropTarget) -> DropAction {
    let kind = data.kind();

    if allowed_at_root(kind) {
        return resolve_top_level_insert(suite, target)
            .map(|insert_before| DropAction::Insert {
                data: data.clone(),
                parent_id: None,
                insert_before,
            })
            .unwrap_or_else(DropAction::Reject);
    }

    let placement = match target {
        DropTarget::Canvas => Err(RejectReason::NoCompatibleAncestor),
        DropTarget::Trash => Err(RejectReason::NoCompatibleAncestor),
        DropTarget::Zone { owner } => resolve_zone_placement(suite, *owner, kind),
        DropTarget::Block { id } => resolve_block_placement(suite, *id, kind),
    };

    match placement {
        Ok((parent, insert_before)) => DropAction::Insert {
            data: data.clone(),
            parent_id: Some(parent),
            insert_before,
        },
        Err(reason) => DropAction::Reject(reason),
    }
}

/// A typed zone accepts the child directly when its owner's kind matches;
/// otherwise the gesture falls through to the owner's ancestor chain.
fn resolve_zone_placement(
    suite: &Suite,
    owner: BlockId,
    child: BlockKind,
) -> Result<(BlockId, Option<BlockId>), RejectReason> {
    let owner_block = suite.get(owner).ok_or(RejectReason::UnknownBlock)?;
    if can_contain(owner_block.kind(), child) {
        return Ok((owner, None));
    }
    nearest_legal_ancestor(suite, owner_block, child)
}

/// A plain block target starts the ancestor walk at the hovered block
/// itself: dropping a variable straight onto a function block nests it.
fn resolve_block_placement(
    suite: &Suite,
    hovered: BlockId,
    child: BlockKind,
) -> Result<(BlockId, Option<BlockId>), RejectReason> {
    let block = suite.get(hovered).ok_or(RejectReason::UnknownBlock)?;
    if can_contain(block.kind(), child) {
        return Ok((block.id, None));
    }
    nearest_legal_ancestor(suite, block, child)
}

/// Walk `from`'s ancestor chain for the nearest block that can contain
/// `child`. When one is found, the chain element directly below it becomes
/// the sibling insertion anchor, so drops land next to what was hovered.
/// The walk is bounded by the collection size (cycle guard).
fn nearest_legal_ancestor(
    suite: &Suite,
    from: &Block,
    child: BlockKind,
) -> Result<(BlockId, Option<BlockId>), RejectReason> {
    let mut anchor = from.id;
    for ancestor in suite.ancestors(from.id) {
        if can_contain(ancestor.kind(), child) {
            return Ok((ancestor.id, Some(anchor)));
        }
        anchor = ancestor.id;
    }
    Err(RejectReason::NoCompatibleAncestor)
}

// ── Canvas-block drops ──────────────────────────────────────────────────────

fn resolve_existing(suite: &Suite, id: BlockId, target: &DropTarget) -> DropAction {
    if !suite.contains(id) {
        return DropAction::Reject(RejectReason::UnknownBlock);
    }

    match target {
        // Trash always wins, regardless of type.
        DropTarget::Trash => DropAction::Remove { id },

        DropTarget::Canvas => resolve_existing_to_root(suite, id),

        DropTarget::Zone { owner } => resolve_existing_to_parent(suite, id, *owner),

        DropTarget::Block { id: over } => {
            if *over == id {
                return DropAction::Reject(RejectReason::SelfDrop);
            }
            let Some(over_block) = suite.get(*over) else {
                return DropAction::Reject(RejectReason::UnknownBlock);
            };
            let dragged = suite.get(id).expect("checked above");

            if dragged.parent_id == over_block.parent_id {
                // Same parent: plain reorder.
                return DropAction::Move { active: id, over: *over };
            }

            // Different effective parent: reparent under the target's
            // parent, if the containment rules allow it.
            match over_block.parent_id {
                Some(parent) => resolve_existing_to_parent(suite, id, parent),
                None => resolve_existing_to_root(suite, id),
            }
        }
    }
}

fn resolve_existing_to_root(suite: &Suite, id: BlockId) -> DropAction {
    let block = suite.get(id).expect("caller checked");
    if block.parent_id.is_none() {
        return DropAction::Reject(RejectReason::SelfDrop);
    }
    if !allowed_at_root(block.kind()) {
        return DropAction::Reject(RejectReason::IllegalContainment);
    }
    DropAction::Reparent {
        id,
        new_parent: None,
    }
}

fn resolve_existing_to_parent(suite: &Suite, id: BlockId, parent: BlockId) -> DropAction {
    let Some(parent_block) = suite.get(parent) else {
        return DropAction::Reject(RejectReason::UnknownBlock);
    };
    let dragged = suite.get(id).expect("caller checked");

    if dragged.parent_id == Some(parent) {
        return DropAction::Reject(RejectReason::SelfDrop);
    }
    // Dropping a block into its own subtree would orphan it into a cycle.
    if suite.subtree_ids(id).contains(&parent) {
        return DropAction::Reject(RejectReason::WouldCreateCycle);
    }
    if !can_contain(parent_block.kind(), dragged.kind()) {
        return DropAction::Reject(RejectReason::IllegalContainment);
    }
    DropAction::Reparent {
        id,
        new_parent: Some(parent),
    }
}
