//! Static palette and template catalog
//!
//! The catalog is the pre-defined list of blocks and templates the palette
//! offers. It is a pure, always-available service: the functions here
//! allocate fresh descriptor values on every call and never touch editor
//! state.

use serde::{Deserialize, Serialize};

use super::block::{BlockData, BlockKind, MatcherOp};
use super::template::{BlockSkeleton, Template};

/// One draggable palette entry: a named block skeleton with default fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Stable catalog identifier (e.g. `"variable"`)
    pub id: String,
    /// Human-readable entry name
    pub name: String,
    /// Brief description shown in the palette
    pub description: String,
    /// The data payload a drop instantiates
    pub skeleton: BlockData,
}

impl PaletteEntry {
    /// The kind of block this entry produces
    pub fn kind(&self) -> BlockKind {
        self.skeleton.kind()
    }
}

/// Catalog error types
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No palette entry with the given id
    #[error("Unknown palette entry: {0}")]
    UnknownEntry(String),

    /// No template with the given id
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

/// All palette entries, in display order.
pub fn palette() -> Vec<PaletteEntry> {
    vec![
        PaletteEntry {
            id: "test_function".into(),
            name: "Test Function".into(),
            description: "A test method; holds variables and assertions".into(),
            skeleton: BlockData::TestFunction {
                name: "newTest".into(),
            },
        },
        PaletteEntry {
            id: "analysis_function".into(),
            name: "Analysis Function".into(),
            description: "A structural analysis; holds structure checks".into(),
            skeleton: BlockData::AnalysisFunction {
                name: "newAnalysis".into(),
            },
        },
        PaletteEntry {
            id: "variable".into(),
            name: "Variable".into(),
            description: "A typed local variable with an initial value".into(),
            skeleton: BlockData::Variable {
                var_type: "int".into(),
                name: "value".into(),
                value: "0".into(),
            },
        },
        PaletteEntry {
            id: "assertion".into(),
            name: "Assertion".into(),
            description: "A fluent assertion on a target expression".into(),
            skeleton: BlockData::Assertion {
                target: "value".into(),
            },
        },
        PaletteEntry {
            id: "exception_assertion".into(),
            name: "Exception Assertion".into(),
            description: "Asserts that an expression throws an exception".into(),
            skeleton: BlockData::ExceptionAssertion {
                expression: "methodCall()".into(),
                exception: "IllegalArgumentException".into(),
            },
        },
        PaletteEntry {
            id: "static_assertion".into(),
            name: "Static Assertion".into(),
            description: "A plain boolean assertion on a condition".into(),
            skeleton: BlockData::StaticAssertion {
                condition: "true".into(),
            },
        },
        PaletteEntry {
            id: "matcher".into(),
            name: "Matcher".into(),
            description: "A chained comparison against an expected value".into(),
            skeleton: BlockData::Matcher {
                op: MatcherOp::IsEqualTo,
                value: "0".into(),
            },
        },
        PaletteEntry {
            id: "extracting".into(),
            name: "Extracting".into(),
            description: "Extracts a property for further chained checks".into(),
            skeleton: BlockData::Extracting {
                property: "field".into(),
            },
        },
        PaletteEntry {
            id: "structure_check".into(),
            name: "Structure Check".into(),
            description: "A structural rule for analysis functions".into(),
            skeleton: BlockData::StructureCheck {
                rule: "classes should reside in a package".into(),
            },
        },
    ]
}

/// Look up a palette entry by catalog id.
pub fn palette_entry(id: &str) -> Result<PaletteEntry, CatalogError> {
    palette()
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| CatalogError::UnknownEntry(id.to_string()))
}

/// All instantiable templates, in display order.
pub fn templates() -> Vec<Template> {
    vec![
        Template {
            id: "equality_test".into(),
            name: "Equality Test".into(),
            description: "A test asserting a variable equals its value".into(),
            root: BlockSkeleton::with_children(
                BlockData::TestFunction {
                    name: "checksEquality".into(),
                },
                vec![
                    BlockSkeleton::leaf(BlockData::Variable {
                        var_type: "int".into(),
                        name: "expected".into(),
                        value: "42".into(),
                    }),
                    BlockSkeleton::with_children(
                        BlockData::Assertion {
                            target: "expected".into(),
                        },
                        vec![BlockSkeleton::leaf(BlockData::Matcher {
                            op: MatcherOp::IsEqualTo,
                            value: "42".into(),
                        })],
                    ),
                ],
            ),
        },
        Template {
            id: "exception_test".into(),
            name: "Exception Test".into(),
            description: "A test expecting a call to throw".into(),
            root: BlockSkeleton::with_children(
                BlockData::TestFunction {
                    name: "rejectsInvalidInput".into(),
                },
                vec![BlockSkeleton::leaf(BlockData::ExceptionAssertion {
                    expression: "subject.process(null)".into(),
                    exception: "IllegalArgumentException".into(),
                })],
            ),
        },
        Template {
            id: "extraction_test".into(),
            name: "Extraction Test".into(),
            description: "A test drilling into a property before matching".into(),
            root: BlockSkeleton::with_children(
                BlockData::TestFunction {
                    name: "checksProperty".into(),
                },
                vec![BlockSkeleton::with_children(
                    BlockData::Assertion {
                        target: "result".into(),
                    },
                    vec![BlockSkeleton::with_children(
                        BlockData::Extracting {
                            property: "name".into(),
                        },
                        vec![BlockSkeleton::leaf(BlockData::Matcher {
                            op: MatcherOp::IsNotNull,
                            value: String::new(),
                        })],
                    )],
                )],
            ),
        },
        Template {
            id: "layer_analysis".into(),
            name: "Layer Analysis".into(),
            description: "An analysis with common layering rules".into(),
            root: BlockSkeleton::with_children(
                BlockData::AnalysisFunction {
                    name: "layering".into(),
                },
                vec![
                    BlockSkeleton::leaf(BlockData::StructureCheck {
                        rule: "controllers should only be accessed by controllers".into(),
                    }),
                    BlockSkeleton::leaf(BlockData::StructureCheck {
                        rule: "services should not depend on controllers".into(),
                    }),
                ],
            ),
        },
    ]
}

/// Look up a template by catalog id.
pub fn template(id: &str) -> Result<Template, CatalogError> {
    templates()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| CatalogError::UnknownTemplate(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::{allowed_at_root, can_contain};

    #[test]
    fn test_palette_covers_every_kind() {
        let entries = palette();
        for kind in crate::core::block::ALL_KINDS {
            assert!(
                entries.iter().any(|e| e.kind() == kind),
                "No palette entry for {kind:?}"
            );
        }
    }

    #[test]
    fn test_palette_ids_are_unique() {
        let entries = palette();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                assert_ne!(a.id, b.id, "Duplicate palette id");
            }
        }
    }

    #[test]
    fn test_palette_lookup() {
        assert!(palette_entry("variable").is_ok());
        let err = palette_entry("nonexistent").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownEntry(_)));
    }

    #[test]
    fn test_template_lookup() {
        assert!(template("equality_test").is_ok());
        let err = template("nonexistent").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownTemplate(_)));
    }

    /// Every template skeleton must itself satisfy the containment rules;
    /// otherwise instantiation would plant an illegal tree.
    #[test]
    fn test_templates_respect_containment() {
        fn check(skeleton: &BlockSkeleton) {
            let parent = skeleton.data.kind();
            for child in &skeleton.children {
                assert!(
                    can_contain(parent, child.data.kind()),
                    "{parent:?} may not contain {:?}",
                    child.data.kind()
                );
                check(child);
            }
        }

        for t in templates() {
            assert!(
                allowed_at_root(t.root.data.kind()),
                "Template {} root must be a top-level kind",
                t.id
            );
            check(&t.root);
        }
    }
}
