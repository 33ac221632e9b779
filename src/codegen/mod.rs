//! Source generation
//!
//! Renders a suite's block tree into a complete Java test class. The pass
//! is a pure function of the tree: a depth-first, pre-order traversal over
//! the top-level blocks in flat-sequence order, one fixed emission template
//! per block kind. Matcher and extracting chains expand inline as fluent
//! call fragments; analysis functions render as annotation-style comment
//! blocks. A block sitting in a position its kind has no template for
//! emits an inline placeholder instead of being dropped, so the rest of
//! the tree still renders.

use crate::core::block::{Block, BlockData, MatcherOp};
use crate::core::BlockId;
use crate::editor::suite::Suite;

const INDENT: &str = "    ";

/// Render the suite to complete source text.
///
/// Generation never mutates the tree and may be invoked repeatedly; the
/// same tree always yields identical text.
pub fn generate(suite: &Suite) -> String {
    let mut out = String::new();

    out.push_str("import org.junit.jupiter.api.Test;\n");
    out.push_str("import static org.assertj.core.api.Assertions.*;\n");
    out.push_str("import static org.junit.jupiter.api.Assertions.assertTrue;\n");
    out.push('\n');
    out.push_str(&format!("public class {} {{\n", class_name(&suite.name)));

    let roots: Vec<&Block> = suite.roots().collect();
    for (i, root) in roots.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match &root.data {
            BlockData::TestFunction { name } => emit_test_function(suite, root, name, &mut out),
            BlockData::AnalysisFunction { name } => {
                emit_analysis_function(suite, root, name, &mut out)
            }
            other => {
                out.push_str(INDENT);
                out.push_str(&placeholder(other));
                out.push('\n');
            }
        }
    }

    out.push_str("}\n");
    out
}

// ── Function bodies ─────────────────────────────────────────────────────────

fn emit_test_function(suite: &Suite, func: &Block, name: &str, out: &mut String) {
    out.push_str(INDENT);
    out.push_str("@Test\n");
    out.push_str(INDENT);
    out.push_str(&format!("void {}() {{\n", method_name(name)));

    for child in suite.children(func.id) {
        out.push_str(INDENT);
        out.push_str(INDENT);
        out.push_str(&statement(suite, child));
        out.push('\n');
    }

    out.push_str(INDENT);
    out.push_str("}\n");
}

/// One statement per direct child of a test function.
fn statement(suite: &Suite, block: &Block) -> String {
    match &block.data {
        BlockData::Variable {
            var_type,
            name,
            value,
        } => format!("{var_type} {name} = {value};"),
        BlockData::Assertion { target } => {
            format!("assertThat({target}){};", chain(suite, block.id))
        }
        BlockData::ExceptionAssertion {
            expression,
            exception,
        } => format!("assertThatThrownBy(() -> {expression}).isInstanceOf({exception}.class);"),
        BlockData::StaticAssertion { condition } => format!("assertTrue({condition});"),
        other => placeholder(other),
    }
}

/// Expand a block's matcher/extracting children into one fluent chain,
/// in sibling order, recursing through extracting sub-chains.
fn chain(suite: &Suite, parent: BlockId) -> String {
    let mut out = String::new();
    for child in suite.children(parent) {
        match &child.data {
            BlockData::Matcher { op, value } => out.push_str(&matcher_fragment(*op, value)),
            BlockData::Extracting { property } => {
                out.push_str(&format!(".extracting(\"{property}\")"));
                out.push_str(&chain(suite, child.id));
            }
            other => out.push_str(&placeholder(other)),
        }
    }
    out
}

fn matcher_fragment(op: MatcherOp, value: &str) -> String {
    match op {
        MatcherOp::IsEqualTo => format!(".isEqualTo({value})"),
        MatcherOp::IsNotEqualTo => format!(".isNotEqualTo({value})"),
        MatcherOp::IsGreaterThan => format!(".isGreaterThan({value})"),
        MatcherOp::IsLessThan => format!(".isLessThan({value})"),
        MatcherOp::Contains => format!(".contains({value})"),
        MatcherOp::IsNull => ".isNull()".to_string(),
        MatcherOp::IsNotNull => ".isNotNull()".to_string(),
    }
}

// ── Analysis blocks ─────────────────────────────────────────────────────────

/// Analysis functions have no executable body: a comment header plus one
/// annotation-style comment per structure-check child.
fn emit_analysis_function(suite: &Suite, func: &Block, name: &str, out: &mut String) {
    out.push_str(INDENT);
    out.push_str(&format!("// Analysis: {name}\n"));

    for child in suite.children(func.id) {
        out.push_str(INDENT);
        match &child.data {
            BlockData::StructureCheck { rule } => out.push_str(&format!("// @Check: {rule}\n")),
            other => {
                out.push_str(&placeholder(other));
                out.push('\n');
            }
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Clearly marked inline placeholder for a block with no emission template
/// in its position. Keeps generation total: nothing is silently dropped.
fn placeholder(data: &BlockData) -> String {
    format!("/* unsupported block: {} */", data.kind())
}

/// Sanitize the suite name into a Java class identifier.
fn class_name(name: &str) -> String {
    let mut out = String::new();
    let mut upper_next = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if out.is_empty() && ch.is_ascii_digit() {
                continue;
            }
            if upper_next {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    if out.is_empty() {
        "GeneratedTest".to_string()
    } else {
        out
    }
}

/// Sanitize a function block's name into a Java method identifier.
fn method_name(name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if cleaned.is_empty() || cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("test{cleaned}")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_sanitization() {
        assert_eq!(class_name("My Test Suite"), "MyTestSuite");
        assert_eq!(class_name("calculator-tests"), "CalculatorTests");
        assert_eq!(class_name("   "), "GeneratedTest");
        assert_eq!(class_name("123"), "GeneratedTest");
    }

    #[test]
    fn test_method_name_sanitization() {
        assert_eq!(method_name("addsTwoNumbers"), "addsTwoNumbers");
        assert_eq!(method_name("adds two numbers"), "addstwonumbers");
        assert_eq!(method_name("1stCase"), "test1stCase");
        assert_eq!(method_name(""), "test");
    }

    #[test]
    fn test_empty_suite_renders_empty_class() {
        let suite = Suite::new("Empty");
        let source = generate(&suite);
        assert!(source.contains("public class Empty {"));
        assert!(source.ends_with("}\n"));
    }

    #[test]
    fn test_matcher_fragments() {
        assert_eq!(
            matcher_fragment(MatcherOp::IsEqualTo, "5"),
            ".isEqualTo(5)"
        );
        assert_eq!(matcher_fragment(MatcherOp::IsNull, "ignored"), ".isNull()");
    }
}
