//! Coarse type inference for sampled documents.

use std::collections::BTreeMap;
use std::fmt;

use docbridge_core::Value;
use serde::{Deserialize, Serialize};

/// Schema-level type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// JSON null
    Null,
    /// Any string
    String,
    /// Integer or floating point
    Number,
    /// true / false
    Bool,
    /// Any sequence
    Array,
    /// Nested document
    Object,
}

impl FieldType {
    /// Label used in schema reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Null => "null",
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Bool => "bool",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a single value.
pub fn infer_type(value: &Value) -> FieldType {
    match value {
        Value::Null => FieldType::Null,
        Value::Bool(_) => FieldType::Bool,
        Value::Int(_) | Value::Float(_) => FieldType::Number,
        Value::String(_) => FieldType::String,
        Value::Array(_) => FieldType::Array,
        Value::Object(_) => FieldType::Object,
    }
}

/// Field observations accumulated over a sample.
///
/// The first value seen for a field decides its type; later samples with
/// a different shape are ignored.
#[derive(Debug, Default)]
pub struct FieldObservations {
    fields: BTreeMap<String, FieldType>,
}

impl FieldObservations {
    /// Empty observation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every top-level field of a sampled row. Non-object rows
    /// contribute nothing.
    pub fn observe(&mut self, row: &Value) {
        let Some(doc) = row.as_object() else { return };
        for (name, value) in doc {
            self.fields
                .entry(name.clone())
                .or_insert_with(|| infer_type(value));
        }
    }

    /// Observed fields, sorted by name.
    pub fn into_fields(self) -> Vec<(String, FieldType)> {
        self.fields.into_iter().collect()
    }
}
