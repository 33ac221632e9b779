//! Block model and containment rules
//!
//! This module defines the closed set of block kinds, the per-kind data
//! payloads, and the containment predicate that decides which kinds may
//! nest inside which parents. The predicate is the single source of truth
//! for nesting legality; the drop resolver consults it before any drop is
//! committed, and the store trusts the resolver's pre-validation.

use serde::{Deserialize, Serialize};

use super::BlockId;

/// Closed tag enumeration for every block kind the editor knows about.
///
/// Adding a kind means adding a `BlockData` variant, extending
/// `can_contain`, and giving the code generator an emission template;
/// the exhaustive matches turn that into a compile-time checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Top-level test function, rendered as one `@Test` method
    TestFunction,
    /// Top-level analysis function, rendered as an annotation comment block
    AnalysisFunction,
    /// Typed local variable declaration inside a test function
    Variable,
    /// Fluent assertion on a target expression
    Assertion,
    /// Assertion that an expression throws a given exception
    ExceptionAssertion,
    /// Plain boolean assertion on a condition
    StaticAssertion,
    /// Chained comparison fragment on an assertion or extraction
    Matcher,
    /// Chained property extraction on an assertion or extraction
    Extracting,
    /// Structural rule checked by an analysis function
    StructureCheck,
}

impl BlockKind {
    /// Get a human-readable name for the kind
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockKind::TestFunction => "Test Function",
            BlockKind::AnalysisFunction => "Analysis Function",
            BlockKind::Variable => "Variable",
            BlockKind::Assertion => "Assertion",
            BlockKind::ExceptionAssertion => "Exception Assertion",
            BlockKind::StaticAssertion => "Static Assertion",
            BlockKind::Matcher => "Matcher",
            BlockKind::Extracting => "Extracting",
            BlockKind::StructureCheck => "Structure Check",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Comparison operators available to matcher blocks.
///
/// Each operator maps to exactly one chained-call fragment in the
/// generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherOp {
    IsEqualTo,
    IsNotEqualTo,
    IsGreaterThan,
    IsLessThan,
    Contains,
    IsNull,
    IsNotNull,
}

impl MatcherOp {
    /// Get a human-readable name for the operator
    pub fn display_name(&self) -> &'static str {
        match self {
            MatcherOp::IsEqualTo => "is equal to",
            MatcherOp::IsNotEqualTo => "is not equal to",
            MatcherOp::IsGreaterThan => "is greater than",
            MatcherOp::IsLessThan => "is less than",
            MatcherOp::Contains => "contains",
            MatcherOp::IsNull => "is null",
            MatcherOp::IsNotNull => "is not null",
        }
    }

    /// Whether this operator compares against a value.
    ///
    /// `IsNull`/`IsNotNull` ignore the matcher's value field.
    pub fn takes_value(&self) -> bool {
        !matches!(self, MatcherOp::IsNull | MatcherOp::IsNotNull)
    }
}

/// Per-kind data payload. The variant is the kind; `kind()` derives the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockData {
    /// A top-level test function with a method name
    TestFunction { name: String },
    /// A top-level analysis function with a display name
    AnalysisFunction { name: String },
    /// A typed variable declaration-and-assignment
    Variable {
        var_type: String,
        name: String,
        value: String,
    },
    /// A fluent assertion on a target expression
    Assertion { target: String },
    /// An assertion that evaluating `expression` throws `exception`
    ExceptionAssertion { expression: String, exception: String },
    /// A plain boolean assertion
    StaticAssertion { condition: String },
    /// A chained comparison fragment
    Matcher { op: MatcherOp, value: String },
    /// A chained property extraction
    Extracting { property: String },
    /// A structural rule for analysis functions
    StructureCheck { rule: String },
}

impl BlockData {
    /// The kind tag for this payload
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockData::TestFunction { .. } => BlockKind::TestFunction,
            BlockData::AnalysisFunction { .. } => BlockKind::AnalysisFunction,
            BlockData::Variable { .. } => BlockKind::Variable,
            BlockData::Assertion { .. } => BlockKind::Assertion,
            BlockData::ExceptionAssertion { .. } => BlockKind::ExceptionAssertion,
            BlockData::StaticAssertion { .. } => BlockKind::StaticAssertion,
            BlockData::Matcher { .. } => BlockKind::Matcher,
            BlockData::Extracting { .. } => BlockKind::Extracting,
            BlockData::StructureCheck { .. } => BlockKind::StructureCheck,
        }
    }
}

/// One node in the edited tree.
///
/// `parent_id == None` means top-level. Sibling order is the block's
/// position within the suite's single flat sequence; children are derived
/// by filtering that sequence on `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub parent_id: Option<BlockId>,
    #[serde(flatten)]
    pub data: BlockData,
}

impl Block {
    /// Create a new block with a freshly generated id
    pub fn new(data: BlockData, parent_id: Option<BlockId>) -> Self {
        Self {
            id: BlockId::new(),
            parent_id,
            data,
        }
    }

    /// The kind tag for this block
    pub fn kind(&self) -> BlockKind {
        self.data.kind()
    }
}

/// Whether `child` may be a direct child of `parent`.
///
/// This predicate is exhaustive over every kind pair and is the single
/// source of truth for nesting legality. Kinds not listed as parents
/// cannot contain anything.
pub fn can_contain(parent: BlockKind, child: BlockKind) -> bool {
    use BlockKind::*;
    match parent {
        TestFunction => matches!(
            child,
            Variable | Assertion | ExceptionAssertion | StaticAssertion
        ),
        Assertion | Extracting => matches!(child, Matcher | Extracting),
        AnalysisFunction => matches!(child, StructureCheck),
        // Leaf kinds: never a parent.
        Variable | ExceptionAssertion | StaticAssertion | Matcher | StructureCheck => false,
    }
}

/// Whether `kind` may sit at the top level of a suite (`parent_id == None`).
pub fn allowed_at_root(kind: BlockKind) -> bool {
    matches!(kind, BlockKind::TestFunction | BlockKind::AnalysisFunction)
}

/// All kinds, for exhaustive enumeration in tests and the palette.
pub const ALL_KINDS: [BlockKind; 9] = [
    BlockKind::TestFunction,
    BlockKind::AnalysisFunction,
    BlockKind::Variable,
    BlockKind::Assertion,
    BlockKind::ExceptionAssertion,
    BlockKind::StaticAssertion,
    BlockKind::Matcher,
    BlockKind::Extracting,
    BlockKind::StructureCheck,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_id_uniqueness() {
        let id1 = BlockId::new();
        let id2 = BlockId::new();
        assert_ne!(id1, id2, "Block IDs should be unique");
    }

    #[test]
    fn test_block_data_kind_tags() {
        let data = BlockData::Variable {
            var_type: "int".into(),
            name: "x".into(),
            value: "5".into(),
        };
        assert_eq!(data.kind(), BlockKind::Variable);

        let data = BlockData::Matcher {
            op: MatcherOp::IsEqualTo,
            value: "5".into(),
        };
        assert_eq!(data.kind(), BlockKind::Matcher);
    }

    #[test]
    fn test_containment_function_children() {
        assert!(can_contain(BlockKind::TestFunction, BlockKind::Variable));
        assert!(can_contain(BlockKind::TestFunction, BlockKind::Assertion));
        assert!(can_contain(
            BlockKind::TestFunction,
            BlockKind::ExceptionAssertion
        ));
        assert!(can_contain(
            BlockKind::TestFunction,
            BlockKind::StaticAssertion
        ));
        assert!(!can_contain(BlockKind::TestFunction, BlockKind::Matcher));
        assert!(!can_contain(
            BlockKind::TestFunction,
            BlockKind::StructureCheck
        ));
    }

    #[test]
    fn test_containment_matcher_chains() {
        assert!(can_contain(BlockKind::Assertion, BlockKind::Matcher));
        assert!(can_contain(BlockKind::Assertion, BlockKind::Extracting));
        assert!(can_contain(BlockKind::Extracting, BlockKind::Matcher));
        assert!(can_contain(BlockKind::Extracting, BlockKind::Extracting));
        assert!(!can_contain(BlockKind::Matcher, BlockKind::Matcher));
    }

    #[test]
    fn test_containment_analysis() {
        assert!(can_contain(
            BlockKind::AnalysisFunction,
            BlockKind::StructureCheck
        ));
        assert!(!can_contain(
            BlockKind::AnalysisFunction,
            BlockKind::Variable
        ));
    }

    #[test]
    fn test_leaves_are_never_parents() {
        for child in ALL_KINDS {
            assert!(!can_contain(BlockKind::Variable, child));
            assert!(!can_contain(BlockKind::Matcher, child));
            assert!(!can_contain(BlockKind::StaticAssertion, child));
            assert!(!can_contain(BlockKind::StructureCheck, child));
            assert!(!can_contain(BlockKind::ExceptionAssertion, child));
        }
    }

    #[test]
    fn test_root_legality() {
        assert!(allowed_at_root(BlockKind::TestFunction));
        assert!(allowed_at_root(BlockKind::AnalysisFunction));
        assert!(!allowed_at_root(BlockKind::Variable));
        assert!(!allowed_at_root(BlockKind::Matcher));
    }

    #[test]
    fn test_block_serialization_round_trip() {
        let block = Block::new(
            BlockData::Assertion {
                target: "result".into(),
            },
            None,
        );
        let json = serde_json::to_string(&block).expect("Failed to serialize block");
        let back: Block = serde_json::from_str(&json).expect("Failed to deserialize block");
        assert_eq!(block, back);
    }
}
