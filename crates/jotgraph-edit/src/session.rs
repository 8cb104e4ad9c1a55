//! Editor context: explicit ownership of the document and graph holders.
//!
//! One context per open document. The context replaces ambient
//! "current document / current graph" globals with a value the application
//! constructs, passes around, and drops.

use crate::doc::{DocumentCell, EMPTY_DOCUMENT};
use crate::engine::apply_edit;
use crate::error::{EditError, EditResult};
use crate::graph::GraphSink;
use crate::rows::{rows_to_text, NodeRow};
use crate::Path;
use serde_json::Value;

/// The currently selected node: its display rows and structural path.
///
/// Supplied by the node view; read-only input to an edit. An edit session is
/// scoped to one selected node and discarded when the selection changes.
#[derive(Clone, Debug)]
pub struct SelectedNode {
    /// Flattened field rows of the node.
    pub rows: Vec<NodeRow>,
    /// Structural path of the node inside the document.
    pub path: Path,
}

impl SelectedNode {
    /// Create a selection from rows and a path.
    pub fn new(rows: Vec<NodeRow>, path: Path) -> Self {
        Self { rows, path }
    }
}

/// Explicit editor context owning the document cell and the graph sink.
pub struct EditorContext<G: GraphSink> {
    doc: DocumentCell,
    graph: G,
}

impl<G: GraphSink> EditorContext<G> {
    /// Create a context over the empty document.
    pub fn new(graph: G) -> Self {
        Self {
            doc: DocumentCell::default(),
            graph,
        }
    }

    /// The document cell.
    #[inline]
    pub fn document(&self) -> &DocumentCell {
        &self.doc
    }

    /// The graph sink.
    #[inline]
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Install `text` as the current document and refresh the graph.
    ///
    /// Text that does not parse as JSON leaves both holders untouched.
    pub fn load(&self, text: &str) -> EditResult<()> {
        serde_json::from_str::<Value>(text).map_err(EditError::document_parse)?;
        self.doc.set_text(text, true);
        self.graph.set_from_text(text);
        Ok(())
    }

    /// Reset to the empty document and clear the graph.
    pub fn clear(&self) {
        self.doc.set_text(EMPTY_DOCUMENT, true);
        self.graph.clear();
    }

    /// Editable text for the selected node, via row normalization.
    pub fn begin_edit(&self, node: &SelectedNode) -> String {
        rows_to_text(&node.rows)
    }

    /// Apply `edited_text` at the selected node's path and propagate.
    ///
    /// `editor_text` is whatever the text pane currently shows; it may be
    /// stale relative to the cell. On success the cell is replaced exactly
    /// once (clean) and the graph refreshed from the new text. On error
    /// neither holder is touched.
    pub fn commit_edit(
        &self,
        node: &SelectedNode,
        editor_text: &str,
        edited_text: &str,
    ) -> EditResult<String> {
        let document_text = self.doc.get_text();
        let new_text = apply_edit(editor_text, &document_text, &node.path, edited_text)?;
        self.doc.set_text(new_text.clone(), true);
        self.graph.set_from_text(&new_text);
        Ok(new_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NoopGraph;
    use crate::rows::rows_for_value;
    use crate::path;
    use serde_json::json;

    #[test]
    fn test_load_rejects_invalid_json() {
        let ctx = EditorContext::new(NoopGraph);
        let err = ctx.load("{nope").unwrap_err();
        assert!(matches!(err, EditError::DocumentParse { .. }));
        assert_eq!(ctx.document().get_text(), "{}");
    }

    #[test]
    fn test_load_installs_clean_text() {
        let ctx = EditorContext::new(NoopGraph);
        ctx.load(r#"{"a": 1}"#).unwrap();
        assert_eq!(ctx.document().get_text(), r#"{"a": 1}"#);
        assert!(!ctx.document().is_dirty());
    }

    #[test]
    fn test_clear_resets_document() {
        let ctx = EditorContext::new(NoopGraph);
        ctx.load(r#"{"a": 1}"#).unwrap();
        ctx.clear();
        assert_eq!(ctx.document().get_text(), "{}");
    }

    #[test]
    fn test_begin_edit_normalizes_rows() {
        let ctx = EditorContext::new(NoopGraph);
        let doc = json!({"name": "ada", "friends": [1, 2]});
        let node = SelectedNode::new(rows_for_value(&doc), Path::root());
        assert_eq!(ctx.begin_edit(&node), "{\n  \"name\": \"ada\"\n}");
    }

    #[test]
    fn test_commit_edit_replaces_document() {
        let ctx = EditorContext::new(NoopGraph);
        let text = "{\n  \"stock\": 3\n}";
        ctx.load(text).unwrap();
        let node = SelectedNode::new(vec![], path!("stock"));
        let out = ctx.commit_edit(&node, text, "4").unwrap();
        assert_eq!(out, "{\n  \"stock\": 4\n}");
        assert_eq!(ctx.document().get_text(), out);
        assert!(!ctx.document().is_dirty());
    }
}
