//! Shared document cell: the single-writer register holding document text.
//!
//! The cell owns the canonical JSON text plus a dirty flag. It is only ever
//! replaced wholesale (one `set_text` per successful edit), so readers
//! always observe a complete document.

use std::sync::Mutex;

/// Text of the empty document.
pub const EMPTY_DOCUMENT: &str = "{}";

struct DocumentState {
    text: String,
    dirty: bool,
}

/// Holder for the current document text.
pub struct DocumentCell(Mutex<DocumentState>);

impl DocumentCell {
    /// Create a cell with the given initial text, marked clean.
    pub fn new(text: impl Into<String>) -> Self {
        Self(Mutex::new(DocumentState {
            text: text.into(),
            dirty: false,
        }))
    }

    /// Snapshot the current document text.
    pub fn get_text(&self) -> String {
        self.0.lock().unwrap().text.clone()
    }

    /// Replace the document text. `clean` clears the unsaved-changes flag;
    /// pass `false` for in-progress editor keystrokes.
    pub fn set_text(&self, text: impl Into<String>, clean: bool) {
        let mut state = self.0.lock().unwrap();
        state.text = text.into();
        state.dirty = !clean;
    }

    /// Whether the cell holds unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.0.lock().unwrap().dirty
    }

    /// Consume the cell and return the text.
    pub fn into_text(self) -> String {
        self.0.into_inner().unwrap().text
    }
}

impl Default for DocumentCell {
    fn default() -> Self {
        Self::new(EMPTY_DOCUMENT)
    }
}

impl Clone for DocumentCell {
    fn clone(&self) -> Self {
        let state = self.0.lock().unwrap();
        Self(Mutex::new(DocumentState {
            text: state.text.clone(),
            dirty: state.dirty,
        }))
    }
}

impl std::fmt::Debug for DocumentCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.0.lock().unwrap();
        f.debug_struct("DocumentCell")
            .field("len", &state.text.len())
            .field("dirty", &state.dirty)
            .finish()
    }
}
