//! Path-addressed JSON document patching for graph-style editors.
//!
//! The crate reconciles three views of one JSON document: the flattened
//! row view a node editor displays, the live parsed tree, and the original
//! formatted text. The text is canonical; rows and trees are derived on
//! demand. Edits land as the smallest possible textual change, and fall
//! back to a full rebuild of the tree whenever the minimal edit cannot be
//! computed.
//!
//! # Core pieces
//!
//! - [`Path`] / [`Seg`]: structural paths (object keys and array indices)
//!   with the bracket display form `$["users"][0]["name"]`
//! - [`rows_to_text`] / [`rows_for_value`]: the row view, derived and
//!   editable
//! - [`apply_edit`]: the patch engine (parse, merge, minimal edit,
//!   fallback rebuild)
//! - [`DocumentCell`] / [`GraphSink`] / [`EditorContext`]: the holders an
//!   application wires together instead of ambient globals
//!
//! # Quick start
//!
//! ```
//! use jotgraph_edit::{apply_edit, path};
//!
//! let doc = "{\n  \"name\": \"boots\",\n  \"stock\": 3\n}";
//! let out = apply_edit(doc, doc, &path!("stock"), "4").unwrap();
//! assert_eq!(out, "{\n  \"name\": \"boots\",\n  \"stock\": 4\n}");
//! ```
//!
//! Object edits merge one level deep, so fields the row view dropped
//! survive a save:
//!
//! ```
//! use jotgraph_edit::{apply_edit, path, Value};
//!
//! let doc = r#"{"user": {"id": 7, "name": "ada"}}"#;
//! let out = apply_edit(doc, doc, &path!("user"), r#"{"name": "Ada"}"#).unwrap();
//! let parsed: Value = serde_json::from_str(&out).unwrap();
//! assert_eq!(parsed["user"]["id"], 7);
//! assert_eq!(parsed["user"]["name"], "Ada");
//! ```

mod apply;
mod doc;
mod engine;
mod error;
mod graph;
mod path;
mod rows;
mod scan;
mod session;

pub use apply::{get_at_path, set_at_path, shallow_merge};
pub use doc::{DocumentCell, EMPTY_DOCUMENT};
pub use engine::apply_edit;
pub use error::{EditError, EditResult};
pub use graph::{GraphSink, NoopGraph};
pub use path::{Path, Seg};
pub use rows::{rows_for_value, rows_to_text, NodeRow, RowKind};
pub use scan::{span_of, splice};
pub use session::{EditorContext, SelectedNode};

// Re-export serde_json::Value for convenience
pub use serde_json::Value;
