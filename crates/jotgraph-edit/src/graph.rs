//! Narrow contract for the graph view.
//!
//! The graph rendering lives outside this crate; the editing core only needs
//! to keep it synchronized with the document.

/// Sink kept in sync with the document: refreshed after every successful
/// save, cleared when the document is cleared.
pub trait GraphSink {
    /// Rebuild the graph from document text.
    fn set_from_text(&self, text: &str);

    /// Drop the graph entirely.
    fn clear(&self);
}

/// Sink for embedders without a graph view.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopGraph;

impl GraphSink for NoopGraph {
    fn set_from_text(&self, _text: &str) {}

    fn clear(&self) {}
}
