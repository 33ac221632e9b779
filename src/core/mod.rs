//! Core block model and types
//!
//! This module defines the fundamental block types, the containment rules,
//! and the template/catalog structures that form the foundation of the
//! block editor.

pub mod block;
pub mod catalog;
pub mod template;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a test suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuiteId(pub Uuid);

impl SuiteId {
    /// Generate a new random suite ID
    pub fn new() -> Self {
        SuiteId(Uuid::new_v4())
    }
}

impl Default for SuiteId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SuiteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub use block::{Block, BlockData, BlockKind, MatcherOp};
pub use template::{BlockSkeleton, Template};
