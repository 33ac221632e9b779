//! Integration tests: driving the editor the way the UI does
//!
//! These tests simulate full editing sessions: palette drags resolved by
//! the drop resolver, field edits, suite switching, undo, and generation,
//! all through the suite-aware store.

use crate::core::block::{BlockKind, MatcherOp};
use crate::core::catalog;
use crate::editor::resolver::{DragSource, DropTarget};
use crate::editor::store::EditorStore;
use crate::editor::suite::FieldEdit;

/// Drag a palette entry onto a target and commit the drop.
fn drop_from_palette(store: &mut EditorStore, entry_id: &str, target: DropTarget) {
    let entry = catalog::palette_entry(entry_id).unwrap();
    store.drag_end(
        &DragSource::NewBlock {
            data: entry.skeleton,
        },
        Some(&target),
    );
}

/// Build `addsTwoNumbers` from palette drops and field edits, then
/// generate.
#[test]
fn test_build_adds_two_numbers_end_to_end() {
    let mut store = EditorStore::new();

    // Function block onto the canvas.
    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let func = store.active_suite().blocks[0].id;
    store.update_block_data(func, FieldEdit::Name("addsTwoNumbers".into()));

    // Variable int x = 5 into the function.
    drop_from_palette(&mut store, "variable", DropTarget::Zone { owner: func });
    let var = store.active_suite().blocks[1].id;
    store.update_block_data(var, FieldEdit::VarType("int".into()));
    store.update_block_data(var, FieldEdit::VarName("x".into()));
    store.update_block_data(var, FieldEdit::VarValue("5".into()));

    // Assertion on x into the function.
    drop_from_palette(&mut store, "assertion", DropTarget::Zone { owner: func });
    let assertion = store.active_suite().blocks[2].id;
    store.update_block_data(assertion, FieldEdit::Target("x".into()));

    // Equality matcher against 5 into the assertion.
    drop_from_palette(&mut store, "matcher", DropTarget::Zone { owner: assertion });
    let matcher = store.active_suite().blocks[3].id;
    store.update_block_data(matcher, FieldEdit::Op(MatcherOp::IsEqualTo));
    store.update_block_data(matcher, FieldEdit::Value("5".into()));

    let source = store.generate_source();
    assert!(source.contains("void addsTwoNumbers()"));
    assert!(source.contains("int x = 5;"));
    assert!(source.contains("assertThat(x).isEqualTo(5);"));

    // The declaration precedes the assertion.
    let decl = source.find("int x = 5;").unwrap();
    let assertion_stmt = source.find("assertThat(x)").unwrap();
    assert!(decl < assertion_stmt);
}

/// A matcher dropped onto the bare canvas has no assertion ancestor: the
/// tree and the generated text must both be unchanged.
#[test]
fn test_matcher_on_canvas_changes_nothing() {
    let mut store = EditorStore::new();
    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);

    let blocks_before = store.active_suite().blocks.clone();
    let source_before = store.generate_source();

    drop_from_palette(&mut store, "matcher", DropTarget::Canvas);

    assert_eq!(store.active_suite().blocks, blocks_before);
    assert_eq!(store.generate_source(), source_before);
    assert!(!store.can_redo(), "Rejected drop must not touch history");
}

/// Removing a function with two children removes the whole subtree:
/// three blocks gone, nothing left behind.
#[test]
fn test_remove_function_with_two_children() {
    let mut store = EditorStore::new();
    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let func = store.active_suite().blocks[0].id;
    drop_from_palette(&mut store, "variable", DropTarget::Zone { owner: func });
    drop_from_palette(&mut store, "assertion", DropTarget::Zone { owner: func });
    assert_eq!(store.active_suite().blocks.len(), 3);

    store.drag_end(&DragSource::Existing { id: func }, Some(&DropTarget::Trash));
    assert!(store.active_suite().blocks.is_empty());
}

/// Dropping a template instantiates its whole subtree and the result
/// generates in one pass.
#[test]
fn test_template_drop_generates_complete_test() {
    let mut store = EditorStore::new();
    let template = catalog::template("equality_test").unwrap();
    store.drag_end(
        &DragSource::NewTemplate { template },
        Some(&DropTarget::Canvas),
    );

    assert_eq!(store.active_suite().blocks.len(), 4);
    let source = store.generate_source();
    assert!(source.contains("void checksEquality()"));
    assert!(source.contains("int expected = 42;"));
    assert!(source.contains("assertThat(expected).isEqualTo(42);"));
}

/// Undo restores byte-identical state across a whole gesture sequence.
#[test]
fn test_undo_walks_back_through_gestures() {
    let mut store = EditorStore::new();
    let empty = store.active_suite().blocks.clone();

    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let one_block = store.active_suite().blocks.clone();

    let func = store.active_suite().blocks[0].id;
    drop_from_palette(&mut store, "variable", DropTarget::Zone { owner: func });

    store.undo();
    assert_eq!(store.active_suite().blocks, one_block);
    store.undo();
    assert_eq!(store.active_suite().blocks, empty);

    store.redo();
    assert_eq!(store.active_suite().blocks, one_block);
}

/// Suites are isolated: edits and history in one never leak into another.
#[test]
fn test_suite_isolation() {
    let mut store = EditorStore::new();
    let first = store.active_suite().id;
    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);

    let second = store.add_suite("Second Suite");
    drop_from_palette(&mut store, "analysis_function", DropTarget::Canvas);
    let analysis = store.active_suite().blocks[0].id;
    drop_from_palette(
        &mut store,
        "structure_check",
        DropTarget::Zone { owner: analysis },
    );

    // Second suite renders analysis comments; first renders a test method.
    let second_source = store.generate_source();
    assert!(second_source.contains("// Analysis:"));
    assert!(second_source.contains("public class SecondSuite"));

    store.select_suite(first);
    let first_source = store.generate_source();
    assert!(first_source.contains("@Test"));
    assert!(!first_source.contains("// Analysis:"));

    // Undoing in the first suite leaves the second untouched.
    store.undo();
    assert!(store.active_suite().blocks.is_empty());
    store.select_suite(second);
    assert_eq!(store.active_suite().blocks.len(), 2);
}

/// Reordering top-level functions via drag changes generation order.
#[test]
fn test_reorder_changes_generation_order() {
    let mut store = EditorStore::new();
    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let first = store.active_suite().blocks[0].id;
    store.update_block_data(first, FieldEdit::Name("alpha".into()));

    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let second = store.active_suite().blocks[1].id;
    store.update_block_data(second, FieldEdit::Name("beta".into()));

    store.drag_end(
        &DragSource::Existing { id: second },
        Some(&DropTarget::Block { id: first }),
    );

    let source = store.generate_source();
    assert!(source.find("void beta()").unwrap() < source.find("void alpha()").unwrap());
}

/// Dragging an existing variable into another function's zone reparents
/// it; the generated statement moves with it.
#[test]
fn test_cross_function_drag_reparents() {
    let mut store = EditorStore::new();
    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let f = store.active_suite().blocks[0].id;
    store.update_block_data(f, FieldEdit::Name("source".into()));
    drop_from_palette(&mut store, "variable", DropTarget::Zone { owner: f });
    let var = store.active_suite().blocks[1].id;

    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let g = store.active_suite().blocks[2].id;
    store.update_block_data(g, FieldEdit::Name("destination".into()));

    store.drag_end(
        &DragSource::Existing { id: var },
        Some(&DropTarget::Zone { owner: g }),
    );

    assert_eq!(store.active_suite().get(var).unwrap().parent_id, Some(g));
    assert_eq!(store.active_suite().get(var).unwrap().kind(), BlockKind::Variable);

    let source = store.generate_source();
    let dest = source.find("void destination()").unwrap();
    let decl = source.find("int value = 0;").unwrap();
    assert!(decl > dest, "Declaration must render inside destination");
}

/// Every palette entry drops somewhere legal and the result generates
/// without panicking.
#[test]
fn test_every_palette_entry_is_usable() {
    let mut store = EditorStore::new();

    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let func = store.active_suite().blocks[0].id;
    drop_from_palette(&mut store, "analysis_function", DropTarget::Canvas);
    let analysis = store.active_suite().blocks[1].id;
    drop_from_palette(&mut store, "assertion", DropTarget::Zone { owner: func });
    let assertion = store
        .active_suite()
        .blocks
        .iter()
        .find(|b| b.kind() == BlockKind::Assertion)
        .unwrap()
        .id;

    for entry in catalog::palette() {
        let target = match entry.kind() {
            BlockKind::TestFunction | BlockKind::AnalysisFunction => DropTarget::Canvas,
            BlockKind::Matcher | BlockKind::Extracting => DropTarget::Zone { owner: assertion },
            BlockKind::StructureCheck => DropTarget::Zone { owner: analysis },
            _ => DropTarget::Zone { owner: func },
        };
        let before = store.active_suite().blocks.len();
        store.drag_end(
            &DragSource::NewBlock {
                data: entry.skeleton.clone(),
            },
            Some(&target),
        );
        assert_eq!(
            store.active_suite().blocks.len(),
            before + 1,
            "Palette entry {} failed to drop",
            entry.id
        );
    }

    let source = store.generate_source();
    assert!(source.contains("public class"));
}

/// Field edits through the store are undoable like any other mutation.
#[test]
fn test_field_edit_is_undoable() {
    let mut store = EditorStore::new();
    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let func = store.active_suite().blocks[0].id;

    store.update_block_data(func, FieldEdit::Name("renamed".into()));
    assert!(store.generate_source().contains("void renamed()"));

    store.undo();
    assert!(store.generate_source().contains("void newTest()"));
}

/// A mismatched field edit (stale UI event) neither changes the tree nor
/// consumes an undo step.
#[test]
fn test_stale_field_edit_is_harmless() {
    let mut store = EditorStore::new();
    drop_from_palette(&mut store, "test_function", DropTarget::Canvas);
    let func = store.active_suite().blocks[0].id;
    let before = store.active_suite().blocks.clone();

    store.update_block_data(func, FieldEdit::Rule("not a function field".into()));
    assert_eq!(store.active_suite().blocks, before);

    store.undo();
    assert!(
        store.active_suite().blocks.is_empty(),
        "The only undo step should be the original drop"
    );
}
