//! Caller-supplied values for `forEach` blocks

use crate::error::{Result, TplkitError};
use serde_json::Value;

/// Which loop index an [`FieldValue::Index`] inserts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBase {
    /// `0, 1, 2, ...`
    ZeroBased,
    /// `1, 2, 3, ...`
    OneBased,
}

/// A field value inside a `forEach` row
///
/// Literals are always HTML-entity encoded. Index values insert the row
/// position as a bare number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Literal(String),
    Index(IndexBase),
}

impl FieldValue {
    /// Map textual input onto a field value: exactly `%i0` or `%i1` become
    /// index values, everything else stays literal.
    pub fn from_token(token: &str) -> Self {
        match token {
            "%i0" => FieldValue::Index(IndexBase::ZeroBased),
            "%i1" => FieldValue::Index(IndexBase::OneBased),
            other => FieldValue::Literal(other.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Literal(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Literal(value)
    }
}

impl From<IndexBase> for FieldValue {
    fn from(base: IndexBase) -> Self {
        FieldValue::Index(base)
    }
}

/// One `forEach` entry; fields keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, FieldValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Input of a `forEach` call: a list of rows, or one bare row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForEachInput {
    Rows(Vec<Row>),
    Single(Row),
}

impl ForEachInput {
    pub fn rows(&self) -> &[Row] {
        match self {
            ForEachInput::Rows(rows) => rows,
            ForEachInput::Single(row) => std::slice::from_ref(row),
        }
    }

    /// Build from JSON: an array of objects or a single object. String values
    /// go through [`FieldValue::from_token`]; numbers and booleans become
    /// literals, `null` an empty literal.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| row_from_json(item, &format!("[{}]", i)))
                .collect::<Result<Vec<_>>>()
                .map(ForEachInput::Rows),
            Value::Object(_) => row_from_json(value, "").map(ForEachInput::Single),
            _ => Err(invalid("", "expected an object or an array of objects")),
        }
    }
}

impl From<Vec<Row>> for ForEachInput {
    fn from(rows: Vec<Row>) -> Self {
        ForEachInput::Rows(rows)
    }
}

impl From<Row> for ForEachInput {
    fn from(row: Row) -> Self {
        ForEachInput::Single(row)
    }
}

fn row_from_json(value: &Value, at: &str) -> Result<Row> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid(at, "expected an object"))?;

    object
        .iter()
        .map(|(key, field)| {
            let value = match field {
                Value::String(s) => FieldValue::from_token(s),
                Value::Number(n) => FieldValue::Literal(n.to_string()),
                Value::Bool(b) => FieldValue::Literal(b.to_string()),
                Value::Null => FieldValue::Literal(String::new()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(invalid(&format!("{}.{}", at, key), "expected a scalar"));
                }
            };
            Ok((key.clone(), value))
        })
        .collect()
}

fn invalid(at: &str, reason: &str) -> TplkitError {
    TplkitError::InvalidInput(format!("forEach input{}: {}", at, reason))
}
