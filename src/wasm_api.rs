//! WASM API — `#[wasm_bindgen]` exports matching the frontend's editor
//! module interface.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_editor` / `destroy_editor` — lifecycle
//! - `add_suite` / `rename_suite` / `select_suite` / `list_suites` — suites
//! - `preview_drop` — read-only hover feedback during a drag
//! - `drag_end` / `field_edit` / `remove_block` — mutations
//! - `undo` / `redo` / `history_flags` — history
//! - `get_blocks` / `generate_source` — snapshots for rendering
//! - `get_palette` / `get_templates` — the static catalog

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::core::block::Block;
use crate::core::catalog;
use crate::core::{BlockId, SuiteId};
use crate::editor::resolver::{resolve, DragSource, DropAction, DropTarget};
use crate::editor::store::EditorStore;
use crate::editor::suite::FieldEdit;

// ── Global state ────────────────────────────────────────────────────────────

thread_local! {
    static EDITOR: RefCell<Option<EditorStore>> = RefCell::new(None);
}

fn with_editor<R>(f: impl FnOnce(&mut EditorStore) -> R) -> Result<R, String> {
    EDITOR.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(store) => Ok(f(store)),
            None => Err("Editor not initialized. Call init_editor() first.".into()),
        }
    })
}

// ── JSON interchange types ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct DragEndJson {
    source: DragSource,
    #[serde(default)]
    target: Option<DropTarget>,
}

#[derive(Deserialize)]
struct FieldEditJson {
    #[serde(rename = "blockId")]
    block_id: String,
    #[serde(flatten)]
    edit: FieldEdit,
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct OkResponse {
    id: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct SuiteInfo {
    id: String,
    name: String,
    #[serde(rename = "blockCount")]
    block_count: usize,
    active: bool,
}

#[derive(Serialize)]
struct BlocksResponse {
    #[serde(rename = "suiteId")]
    suite_id: String,
    blocks: Vec<Block>,
}

#[derive(Serialize)]
struct PreviewResponse {
    accepted: bool,
}

#[derive(Serialize)]
struct HistoryFlags {
    #[serde(rename = "canUndo")]
    can_undo: bool,
    #[serde(rename = "canRedo")]
    can_redo: bool,
}

fn json_ok(id: &str) -> String {
    serde_json::to_string(&OkResponse { id: id.into() }).unwrap_or_default()
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn parse_block_id(raw: &str) -> Result<BlockId, String> {
    Uuid::parse_str(raw)
        .map(BlockId)
        .map_err(|e| format!("Invalid block id '{raw}': {e}"))
}

fn parse_suite_id(raw: &str) -> Result<SuiteId, String> {
    Uuid::parse_str(raw)
        .map(SuiteId)
        .map_err(|e| format!("Invalid suite id '{raw}': {e}"))
}

// ── Exported functions ──────────────────────────────────────────────────────

#[wasm_bindgen]
pub fn init_editor() {
    console_error_panic_hook::set_once();

    EDITOR.with(|cell| {
        *cell.borrow_mut() = Some(EditorStore::new());
    });
}

#[wasm_bindgen]
pub fn destroy_editor() {
    EDITOR.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn add_suite(name: &str) -> String {
    match with_editor(|store| store.add_suite(name)) {
        Ok(id) => json_ok(&id.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn rename_suite(suite_id: &str, name: &str) -> String {
    let id = match parse_suite_id(suite_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };
    match with_editor(|store| store.rename_suite(id, name)) {
        Ok(()) => json_ok(suite_id),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn select_suite(suite_id: &str) -> String {
    let id = match parse_suite_id(suite_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };
    match with_editor(|store| store.select_suite(id)) {
        Ok(()) => json_ok(suite_id),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn list_suites() -> String {
    match with_editor(|store| {
        let active = store.active_suite().id;
        store
            .suites()
            .map(|s| SuiteInfo {
                id: s.id.to_string(),
                name: s.name.clone(),
                block_count: s.blocks.len(),
                active: s.id == active,
            })
            .collect::<Vec<_>>()
    }) {
        Ok(suites) => serde_json::to_string(&suites).unwrap_or_default(),
        Err(e) => json_err(e),
    }
}

/// Read-only hover feedback during a drag: resolves the gesture against
/// the current tree without committing anything.
#[wasm_bindgen]
pub fn preview_drop(gesture_json: &str) -> String {
    let gesture: DragEndJson = match serde_json::from_str(gesture_json) {
        Ok(g) => g,
        Err(e) => return json_err(format!("Invalid gesture JSON: {e}")),
    };

    match with_editor(|store| {
        let action = resolve(store.active_suite(), &gesture.source, gesture.target.as_ref());
        !matches!(action, DropAction::Reject(_))
    }) {
        Ok(accepted) => {
            serde_json::to_string(&PreviewResponse { accepted }).unwrap_or_default()
        }
        Err(e) => json_err(e),
    }
}

/// Terminal resolution of a drag gesture. A rejected drop leaves the
/// tree unchanged.
#[wasm_bindgen]
pub fn drag_end(gesture_json: &str) -> String {
    let gesture: DragEndJson = match serde_json::from_str(gesture_json) {
        Ok(g) => g,
        Err(e) => return json_err(format!("Invalid gesture JSON: {e}")),
    };

    match with_editor(|store| store.drag_end(&gesture.source, gesture.target.as_ref())) {
        Ok(()) => json_ok("drag_end"),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn field_edit(edit_json: &str) -> String {
    let edit: FieldEditJson = match serde_json::from_str(edit_json) {
        Ok(e) => e,
        Err(e) => return json_err(format!("Invalid edit JSON: {e}")),
    };
    let id = match parse_block_id(&edit.block_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };

    match with_editor(|store| store.update_block_data(id, edit.edit)) {
        Ok(()) => json_ok(&edit.block_id),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn remove_block(block_id: &str) -> String {
    let id = match parse_block_id(block_id) {
        Ok(id) => id,
        Err(e) => return json_err(e),
    };
    match with_editor(|store| store.remove_block(id)) {
        Ok(()) => json_ok(block_id),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn undo() -> String {
    match with_editor(|store| store.undo()) {
        Ok(()) => json_ok("undo"),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn redo() -> String {
    match with_editor(|store| store.redo()) {
        Ok(()) => json_ok("redo"),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn history_flags() -> String {
    match with_editor(|store| HistoryFlags {
        can_undo: store.can_undo(),
        can_redo: store.can_redo(),
    }) {
        Ok(flags) => serde_json::to_string(&flags).unwrap_or_default(),
        Err(e) => json_err(e),
    }
}

/// Ordered block sequence for the active suite, for canvas rendering.
#[wasm_bindgen]
pub fn get_blocks() -> String {
    match with_editor(|store| BlocksResponse {
        suite_id: store.active_suite().id.to_string(),
        blocks: store.active_suite().blocks.clone(),
    }) {
        Ok(resp) => serde_json::to_string(&resp).unwrap_or_default(),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn generate_source() -> String {
    match with_editor(|store| store.generate_source()) {
        Ok(source) => source,
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn get_palette() -> String {
    serde_json::to_string(&catalog::palette()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_templates() -> String {
    serde_json::to_string(&catalog::templates()).unwrap_or_default()
}
