//! Node rows: the flattened field view of a single graph node.
//!
//! The graph view displays one node per container and one row per field.
//! Rows are a derived, display-only representation; the document text stays
//! canonical, and rows are rebuilt from it on demand, never persisted.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The JSON kind of a row's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Null,
    Boolean,
    Number,
    String,
    Object,
    Array,
}

impl RowKind {
    /// The kind of a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => RowKind::Null,
            Value::Bool(_) => RowKind::Boolean,
            Value::Number(_) => RowKind::Number,
            Value::String(_) => RowKind::String,
            Value::Array(_) => RowKind::Array,
            Value::Object(_) => RowKind::Object,
        }
    }

    /// Container kinds are rendered as separate nodes, not inline rows.
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, RowKind::Object | RowKind::Array)
    }
}

/// A single display row of a node.
///
/// `key` is absent when the node itself is a scalar leaf or an array
/// element. On the wire the kind field is named `type`, matching the
/// frontend's row tuples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    /// Field key, if the row belongs to an object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// The row's value.
    pub value: Value,
    /// The value's JSON kind.
    #[serde(rename = "type")]
    pub kind: RowKind,
}

impl NodeRow {
    /// Create a keyed row; the kind is derived from the value.
    pub fn keyed(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: Some(key.into()),
            kind: RowKind::of(&value),
            value,
        }
    }

    /// Create a keyless row; the kind is derived from the value.
    pub fn bare(value: Value) -> Self {
        Self {
            key: None,
            kind: RowKind::of(&value),
            value,
        }
    }
}

/// Reconstruct editable text from a node's rows.
///
/// Container rows are dropped, since their content lives in child nodes,
/// not inline; only scalar fields survive into the editable object. A single
/// keyless row means the node itself is a leaf and yields the bare value
/// text (string contents unquoted). Malformed rows are skipped, never an
/// error.
pub fn rows_to_text(rows: &[NodeRow]) -> String {
    match rows {
        [] => "{}".to_owned(),
        [row] if row.key.is_none() => match &row.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        _ => {
            let mut fields = Map::new();
            for row in rows {
                if row.kind.is_container() {
                    continue;
                }
                let Some(key) = &row.key else { continue };
                fields.insert(key.clone(), row.value.clone());
            }
            serde_json::to_string_pretty(&Value::Object(fields)).unwrap_or_else(|_| "{}".to_owned())
        }
    }
}

/// Flatten one node of a parsed document into display rows.
///
/// Objects produce one row per field (container fields included; the
/// normalizer drops them again), arrays produce keyless element rows, and a
/// scalar produces a single keyless row.
pub fn rows_for_value(value: &Value) -> Vec<NodeRow> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| NodeRow::keyed(k.clone(), v.clone()))
            .collect(),
        Value::Array(items) => items.iter().map(|v| NodeRow::bare(v.clone())).collect(),
        leaf => vec![NodeRow::bare(leaf.clone())],
    }
}
