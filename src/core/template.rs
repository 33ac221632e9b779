//! Instantiable block templates
//!
//! A template is an immutable, author-defined skeleton describing a
//! top-level block plus its nested children. Instantiating one stamps the
//! whole subtree into a suite with freshly generated ids and a consistent
//! parent chain; the skeleton itself is never mutated.

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockData};
use super::BlockId;

/// One node of a template: a data payload plus nested child skeletons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSkeleton {
    #[serde(flatten)]
    pub data: BlockData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockSkeleton>,
}

impl BlockSkeleton {
    /// A skeleton with no children
    pub fn leaf(data: BlockData) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    /// A skeleton with the given children
    pub fn with_children(data: BlockData, children: Vec<BlockSkeleton>) -> Self {
        Self { data, children }
    }

    /// Total number of blocks this skeleton instantiates (itself included)
    pub fn block_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(BlockSkeleton::block_count)
            .sum::<usize>()
    }

    /// Instantiate this skeleton under `parent_id`, appending the produced
    /// blocks to `out` in depth-first pre-order. Every block receives a
    /// fresh id; the returned id is the root of the instantiated subtree.
    pub(crate) fn instantiate(&self, parent_id: Option<BlockId>, out: &mut Vec<Block>) -> BlockId {
        let block = Block::new(self.data.clone(), parent_id);
        let id = block.id;
        out.push(block);
        for child in &self.children {
            child.instantiate(Some(id), out);
        }
        id
    }
}

/// An author-defined, instantiable skeleton of a block subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Stable catalog identifier (e.g. `"equality_test"`)
    pub id: String,
    /// Human-readable template name
    pub name: String,
    /// Brief description shown in the palette
    pub description: String,
    /// The top-level block skeleton
    pub root: BlockSkeleton,
}

impl Template {
    /// Total number of blocks this template instantiates
    pub fn block_count(&self) -> usize {
        self.root.block_count()
    }
}
