//! Output envelopes for command execution results.
//!
//! Every command produces exactly one envelope type. Envelopes serialize
//! as flat JSON objects with stable field names, so [`Output`] is
//! untagged on the wire:
//!
//! | Command | Envelope |
//! |---------|----------|
//! | `list_databases` | [`DatabaseList`] |
//! | `list_tables` | [`TableList`] |
//! | `query_table` | [`QueryResult`] |
//! | `table_info` | [`TableInfo`] |
//! | `write_data` | [`WriteSummary`] |
//! | `aggregate` | [`AggregateResult`] |
//! | `advanced_query` | [`AdvancedResult`] |
//! | `schema_inspector` | [`SchemaReport`] |
//! | `index_info` | [`IndexReport`] |

use docbridge_core::Value;
use serde::{Deserialize, Serialize};

use crate::infer::FieldType;

/// Successful command execution results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// Namespace names
    Databases(DatabaseList),
    /// Collection names in one namespace
    Tables(TableList),
    /// Rows from a plain query, with timing
    Query(QueryResult),
    /// Collection metadata
    TableInfo(TableInfo),
    /// Write counters
    Write(WriteSummary),
    /// Aggregate value
    Aggregate(AggregateResult),
    /// Rows from an advanced query
    Advanced(AdvancedResult),
    /// Inferred schema
    Schema(SchemaReport),
    /// Index build state
    Indexes(IndexReport),
}

impl Output {
    /// Serialize to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // Envelopes contain only strings, numbers and JSON-backed values.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// `list_databases` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseList {
    /// Every namespace
    pub databases: Vec<String>,
}

/// `list_tables` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableList {
    /// Namespace that was listed
    pub namespace: String,
    /// Its collections
    pub tables: Vec<String>,
}

/// `query_table` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Source namespace
    pub namespace: String,
    /// Source collection
    pub collection: String,
    /// Number of rows returned
    pub count: usize,
    /// The rows
    pub results: Vec<Value>,
    /// Wall-clock time of the driver call, fractional milliseconds
    pub execution_time_ms: f64,
}

/// `table_info` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Source namespace
    pub namespace: String,
    /// Source collection
    pub collection: String,
    /// Primary key field; empty when the driver does not report one
    pub primary_key: String,
    /// Secondary index names; empty when the lookup failed
    pub indexes: Vec<String>,
    /// Total documents; zero when the lookup failed
    pub doc_count: u64,
}

/// `write_data` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteSummary {
    /// Target namespace
    pub namespace: String,
    /// Target collection
    pub collection: String,
    /// insert, update, upsert or delete
    pub operation: String,
    /// Documents created
    pub inserted: u64,
    /// Documents changed in place
    pub replaced: u64,
    /// Documents matched but identical
    pub unchanged: u64,
    /// Documents removed
    pub deleted: u64,
    /// Documents rejected
    pub errors: u64,
    /// First rejection message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_error: Option<String>,
}

/// `aggregate` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Source namespace
    pub namespace: String,
    /// Source collection
    pub collection: String,
    /// count, sum, avg, min, max or group
    pub operation: String,
    /// Aggregated or grouping field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Scalar, whole document, or list of `{group, reduction}` pairs
    pub value: Value,
}

/// `advanced_query` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedResult {
    /// Source namespace
    pub namespace: String,
    /// Source collection
    pub collection: String,
    /// eq_join, between, contains or map
    pub operation: String,
    /// Number of rows returned
    pub count: usize,
    /// The rows
    pub results: Vec<Value>,
}

/// One inferred field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Inferred type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// `schema_inspector` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaReport {
    /// Source namespace
    pub namespace: String,
    /// Source collection
    pub collection: String,
    /// Primary key field
    pub primary_key: String,
    /// Secondary index names
    pub indexes: Vec<String>,
    /// Total documents, independent of the sample
    pub doc_count: u64,
    /// Resolved sample size requested from the driver
    pub sample_size: usize,
    /// Fields seen in the sample, sorted by name
    pub fields: Vec<FieldInfo>,
}

/// Build state of one secondary index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Index name
    pub name: String,
    /// Fully built and usable
    pub ready: bool,
    /// One entry per array element
    pub multi: bool,
    /// Spatial index
    pub geo: bool,
    /// Built with an older format; needs a rebuild
    pub outdated: bool,
}

/// `index_info` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReport {
    /// Source namespace
    pub namespace: String,
    /// Source collection
    pub collection: String,
    /// One descriptor per secondary index
    pub indexes: Vec<IndexDescriptor>,
}
