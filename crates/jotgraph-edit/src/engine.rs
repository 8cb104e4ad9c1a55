//! The patch engine: minimal textual edits with a full-rebuild fallback.
//!
//! Two texts flow in: `original_text` is whatever the editor pane currently
//! shows (possibly stale), `document_text` is the authoritative document.
//! The minimal edit targets the original so user-authored formatting
//! survives; the fallback rebuilds from the authoritative tree so
//! correctness never depends on the editor pane.

use crate::apply::{get_at_path, set_at_path, shallow_merge};
use crate::error::{EditError, EditResult};
use crate::scan::{span_of, splice};
use crate::Path;
use serde_json::Value;
use tracing::{debug, warn};

/// Apply `edited_text` at `path`, producing the new document text.
///
/// In priority order:
///
/// 1. `edited_text` must parse as JSON; failure aborts the whole edit.
/// 2. The existing value at `path` is read from `document_text`; anything
///    missing simply reads as absent.
/// 3. When both the existing and the edited value are objects, the value to
///    write is their shallow merge (edited wins per key, existing-only keys
///    survive). Otherwise the edited value is written verbatim.
/// 4. A minimal textual edit replaces only the span at `path` inside
///    `original_text`, verified by reparse. Failure here is silent.
/// 5. Fallback: the authoritative tree is rebuilt with the verbatim edited
///    value at `path` and re-serialized whole. Only an unparseable
///    `document_text` makes this step fail.
///
/// On success the returned text parses, and its value at `path` deep-equals
/// the value chosen in step 3 or 5. When step 4 succeeded, every byte
/// outside the edited span is identical to `original_text`.
pub fn apply_edit(
    original_text: &str,
    document_text: &str,
    path: &Path,
    edited_text: &str,
) -> EditResult<String> {
    let edited: Value = serde_json::from_str(edited_text).map_err(EditError::edit_parse)?;

    let document: Result<Value, serde_json::Error> = serde_json::from_str(document_text);
    let existing = document.as_ref().ok().and_then(|doc| get_at_path(doc, path));

    // The row view drops container fields before editing, so an object edit
    // merges over the existing object to restore those siblings.
    let to_write = shallow_merge(existing, &edited);

    if let Some(new_text) = minimal_edit(original_text, path, &to_write) {
        debug!(%path, "applied minimal textual edit");
        return Ok(new_text);
    }

    warn!(%path, "minimal edit not possible, rebuilding document");
    let mut tree = document.map_err(EditError::document_parse)?;
    set_at_path(&mut tree, path, edited);
    Ok(serde_json::to_string_pretty(&tree)?)
}

/// Attempt the span-preserving edit. `None` means "fall back", never an
/// error: the candidate must locate, splice, reparse, and carry exactly
/// `value` at `path`.
fn minimal_edit(text: &str, path: &Path, value: &Value) -> Option<String> {
    let span = span_of(text, path)?;
    let candidate = splice(text, span, value).ok()?;
    let reparsed: Value = serde_json::from_str(&candidate).ok()?;
    (get_at_path(&reparsed, path) == Some(value)).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use serde_json::json;

    #[test]
    fn test_invalid_edited_text_is_fatal() {
        let err = apply_edit("{}", "{}", &path!("a"), "{not json").unwrap_err();
        assert!(matches!(err, EditError::EditParse { .. }));
    }

    #[test]
    fn test_scalar_replacement_preserves_text() {
        let doc = "{\n  \"name\": \"boots\",\n  \"stock\": 3\n}";
        let out = apply_edit(doc, doc, &path!("stock"), "4").unwrap();
        assert_eq!(out, "{\n  \"name\": \"boots\",\n  \"stock\": 4\n}");
    }

    #[test]
    fn test_object_edit_merges_existing_fields() {
        let doc = r#"{"user": {"a": 1, "b": 2}}"#;
        let out = apply_edit(doc, doc, &path!("user"), r#"{"b": 3, "c": 4}"#).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["user"], json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_array_edit_does_not_merge() {
        let doc = r#"{"xs": [1, 2, 3]}"#;
        let out = apply_edit(doc, doc, &path!("xs"), "[9]").unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["xs"], json!([9]));
    }

    #[test]
    fn test_root_edit_merges_whole_document() {
        let doc = r#"{"a": 1}"#;
        let out = apply_edit(doc, doc, &Path::root(), r#"{"b": 2}"#).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_fallback_on_garbage_original() {
        let out = apply_edit("not json {{{", r#"{"a": 1, "b": 2}"#, &path!("a"), "9").unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!({"a": 9, "b": 2}));
    }

    #[test]
    fn test_fallback_writes_verbatim_edited_value() {
        // The rebuild intentionally skips the merge: the edited object
        // replaces the existing one wholesale.
        let out = apply_edit(
            "",
            r#"{"user": {"a": 1, "b": 2}}"#,
            &path!("user"),
            r#"{"b": 3}"#,
        )
        .unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["user"], json!({"b": 3}));
    }

    #[test]
    fn test_fallback_creates_missing_path() {
        let out = apply_edit(r#"{"a": 1}"#, r#"{"a": 1}"#, &path!("b", "c"), "2").unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn test_both_texts_garbage_is_invalid_input() {
        let err = apply_edit("oops", "also oops", &path!("a"), "1").unwrap_err();
        assert!(matches!(err, EditError::DocumentParse { .. }));
    }

    #[test]
    fn test_truncated_original_falls_back() {
        // The span is found in the truncated text, but the spliced result
        // no longer parses, so the rebuild takes over.
        let out = apply_edit("{\"a\": 1", r#"{"a": 1}"#, &path!("a"), "2").unwrap();
        assert_eq!(out, "{\n  \"a\": 2\n}");
    }

    #[test]
    fn test_stale_original_wins_over_document_formatting() {
        // The editor pane has different formatting than the stored
        // document; the minimal edit is computed against the pane.
        let original = "{ \"a\": 1, \"b\": 2 }";
        let document = "{\"a\":1,\"b\":2}";
        let out = apply_edit(original, document, &path!("b"), "5").unwrap();
        assert_eq!(out, "{ \"a\": 1, \"b\": 5 }");
    }

    #[test]
    fn test_round_trip_is_deep_equal() {
        let doc = "{\n  \"users\": [\n    {\"name\": \"ada\", \"age\": 36}\n  ]\n}";
        let parsed: Value = serde_json::from_str(doc).unwrap();
        let existing = get_at_path(&parsed, &path!("users", 0, "age")).unwrap();
        let out = apply_edit(doc, doc, &path!("users", 0, "age"), &existing.to_string()).unwrap();
        let reparsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(reparsed, parsed);
    }
}
