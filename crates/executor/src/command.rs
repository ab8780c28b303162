//! Command enum defining every docbridge operation.
//!
//! Commands are the typed form of a request. Each operation family is a sum
//! type whose variants carry only the parameters that operation needs:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Validated**: [`Command::validate`] runs before any driver call
//!
//! Loosely-typed requests (a command name plus a JSON object) are turned
//! into commands by [`Command::from_request`](crate::Command::from_request).

use docbridge_core::{Bound, CollectionRef, Document, Value};
use serde::{Deserialize, Serialize};

use crate::bounds::{require, require_collection, require_namespace};
use crate::{Error, Result};

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Commands |
/// |----------|----------|
/// | Catalogue | `ListDatabases`, `ListTables`, `TableInfo`, `IndexInfo` |
/// | Read | `QueryTable`, `AdvancedQuery`, `Aggregate` |
/// | Write | `WriteData` |
/// | Schema | `SchemaInspector` |
///
/// Limits and sample sizes are kept as requested; the executor resolves
/// them against its [`ExecutorConfig`](crate::ExecutorConfig).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Catalogue ====================
    /// List every namespace.
    ListDatabases,

    /// List collections in a namespace.
    ListTables {
        /// Namespace to list.
        namespace: String,
    },

    /// Primary key, index names and document count of a collection.
    TableInfo {
        /// Target collection.
        collection: CollectionRef,
    },

    /// Build state of every secondary index.
    IndexInfo {
        /// Target collection.
        collection: CollectionRef,
    },

    // ==================== Read ====================
    /// Filtered, ordered, limited scan.
    QueryTable {
        /// Target collection.
        collection: CollectionRef,
        /// Conjunctive equality filter.
        #[serde(default)]
        filter: Option<Document>,
        /// Ascending sort field.
        #[serde(default)]
        order_by: Option<String>,
        /// Requested row cap.
        #[serde(default)]
        limit: Option<i64>,
    },

    /// Join, range scan, array-contains or projection.
    AdvancedQuery {
        /// Source collection.
        collection: CollectionRef,
        /// Operation and its parameters.
        query: AdvancedQuery,
        /// Requested row cap.
        #[serde(default)]
        limit: Option<i64>,
    },

    /// Count, sum, avg, min, max or group.
    Aggregate {
        /// Target collection.
        collection: CollectionRef,
        /// Pre-filter applied before aggregating.
        #[serde(default)]
        filter: Option<Document>,
        /// Operation and its parameters.
        spec: AggregateSpec,
    },

    // ==================== Write ====================
    /// Insert, update, upsert or delete.
    WriteData {
        /// Target collection.
        collection: CollectionRef,
        /// Operation and its payload.
        write: WriteRequest,
    },

    // ==================== Schema ====================
    /// Infer field types from a sample.
    SchemaInspector {
        /// Target collection.
        collection: CollectionRef,
        /// Requested number of documents to sample.
        #[serde(default)]
        sample_size: Option<i64>,
    },
}

impl Command {
    /// Wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListDatabases => "list_databases",
            Command::ListTables { .. } => "list_tables",
            Command::TableInfo { .. } => "table_info",
            Command::IndexInfo { .. } => "index_info",
            Command::QueryTable { .. } => "query_table",
            Command::AdvancedQuery { .. } => "advanced_query",
            Command::Aggregate { .. } => "aggregate",
            Command::WriteData { .. } => "write_data",
            Command::SchemaInspector { .. } => "schema_inspector",
        }
    }

    /// Check required names and operation parameters.
    ///
    /// Runs before any driver call; failures are always `InvalidRequest`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::ListDatabases => Ok(()),
            Command::ListTables { namespace } => require_namespace(namespace),
            Command::TableInfo { collection }
            | Command::IndexInfo { collection }
            | Command::QueryTable { collection, .. }
            | Command::SchemaInspector { collection, .. } => require_collection(collection),
            Command::AdvancedQuery {
                collection, query, ..
            } => {
                require_collection(collection)?;
                query.validate()
            }
            Command::Aggregate {
                collection, spec, ..
            } => {
                require_collection(collection)?;
                spec.validate()
            }
            Command::WriteData { collection, write } => {
                require_collection(collection)?;
                write.validate()
            }
        }
    }
}

// =============================================================================
// Advanced queries
// =============================================================================

/// One of the four advanced read shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum AdvancedQuery {
    /// Pair each row with the target row whose key equals `field`.
    EqJoin {
        /// Field on the source rows.
        field: String,
        /// Collection in the same namespace to join with.
        target: String,
        /// Lookup index on the target; its primary key when `None`.
        #[serde(default)]
        index: Option<String>,
    },
    /// Half-open range `[lower, upper)` over an index.
    Between {
        /// Index name (may be the primary key).
        index: String,
        /// Inclusive lower edge.
        lower: Bound,
        /// Exclusive upper edge.
        upper: Bound,
    },
    /// Rows whose array field holds `value`.
    Contains {
        /// Array-valued field.
        field: String,
        /// Probe value.
        value: Value,
    },
    /// Keep only the named fields of each row.
    Map {
        /// Fields to keep.
        fields: Vec<String>,
    },
}

impl AdvancedQuery {
    /// Wire name of the operation.
    pub fn operation(&self) -> &'static str {
        match self {
            AdvancedQuery::EqJoin { .. } => "eq_join",
            AdvancedQuery::Between { .. } => "between",
            AdvancedQuery::Contains { .. } => "contains",
            AdvancedQuery::Map { .. } => "map",
        }
    }

    fn validate(&self) -> Result<()> {
        let op = self.operation();
        match self {
            AdvancedQuery::EqJoin { field, target, index } => {
                require("join_field", field, op)?;
                require("join_table", target, op)?;
                if let Some(index) = index {
                    require("join_index", index, op)?;
                }
                Ok(())
            }
            AdvancedQuery::Between { index, .. } => require("index", index, op),
            AdvancedQuery::Contains { field, .. } => require("contains_field", field, op),
            AdvancedQuery::Map { fields } => {
                if fields.is_empty() || fields.iter().any(String::is_empty) {
                    return Err(Error::invalid("map requires a non-empty list of field names"));
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Aggregations
// =============================================================================

/// Whole-collection aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum AggregateSpec {
    /// Number of rows.
    Count,
    /// Sum of a numeric field.
    Sum {
        /// Field to add up.
        field: String,
    },
    /// Mean of a numeric field.
    Avg {
        /// Field to average.
        field: String,
    },
    /// Row with the smallest value of `field`.
    Min {
        /// Field to compare.
        field: String,
    },
    /// Row with the largest value of `field`.
    Max {
        /// Field to compare.
        field: String,
    },
    /// Partition by `field`, optionally reducing each group.
    Group {
        /// Grouping key.
        field: String,
        /// Per-group reduction; members are returned when `None`.
        #[serde(default)]
        reduce: Option<GroupReduce>,
    },
}

impl AggregateSpec {
    /// Wire name of the operation.
    pub fn operation(&self) -> &'static str {
        match self {
            AggregateSpec::Count => "count",
            AggregateSpec::Sum { .. } => "sum",
            AggregateSpec::Avg { .. } => "avg",
            AggregateSpec::Min { .. } => "min",
            AggregateSpec::Max { .. } => "max",
            AggregateSpec::Group { .. } => "group",
        }
    }

    /// The aggregated (or grouping) field, if the operation has one.
    pub fn field(&self) -> Option<&str> {
        match self {
            AggregateSpec::Count => None,
            AggregateSpec::Sum { field }
            | AggregateSpec::Avg { field }
            | AggregateSpec::Min { field }
            | AggregateSpec::Max { field }
            | AggregateSpec::Group { field, .. } => Some(field),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(field) = self.field() {
            require("field", field, self.operation())?;
        }
        if let AggregateSpec::Group {
            reduce: Some(reduce),
            ..
        } = self
        {
            if let Some(field) = reduce.field() {
                require("aggregate_field", field, "group")?;
            }
        }
        Ok(())
    }
}

/// Reduction applied to each group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum GroupReduce {
    /// Members per group.
    Count,
    /// Sum of `field` per group.
    Sum {
        /// Field to add up.
        field: String,
    },
    /// Mean of `field` per group.
    Avg {
        /// Field to average.
        field: String,
    },
    /// Row with the smallest `field` per group.
    Min {
        /// Field to compare.
        field: String,
    },
    /// Row with the largest `field` per group.
    Max {
        /// Field to compare.
        field: String,
    },
}

impl GroupReduce {
    /// Parse a `group_aggregation` name; `field` feeds everything but count.
    pub fn parse(name: &str, field: String) -> Result<Self> {
        match name {
            "count" => Ok(GroupReduce::Count),
            "sum" => Ok(GroupReduce::Sum { field }),
            "avg" => Ok(GroupReduce::Avg { field }),
            "min" => Ok(GroupReduce::Min { field }),
            "max" => Ok(GroupReduce::Max { field }),
            other => Err(Error::invalid(format!(
                "invalid group_aggregation {:?}: must be one of count, sum, avg, min, max",
                other
            ))),
        }
    }

    fn field(&self) -> Option<&str> {
        match self {
            GroupReduce::Count => None,
            GroupReduce::Sum { field }
            | GroupReduce::Avg { field }
            | GroupReduce::Min { field }
            | GroupReduce::Max { field } => Some(field),
        }
    }
}

// =============================================================================
// Writes
// =============================================================================

/// A write operation with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum WriteRequest {
    /// Insert; duplicate keys are counted as errors.
    Insert {
        /// Documents to insert.
        documents: Vec<Value>,
    },
    /// Insert, deep-merging into existing documents.
    Update {
        /// Documents to merge.
        documents: Vec<Value>,
    },
    /// Insert, replacing existing documents wholesale.
    Upsert {
        /// Replacement documents.
        documents: Vec<Value>,
    },
    /// Point delete by primary key.
    DeleteByKey {
        /// Primary key value.
        key: Value,
    },
    /// Delete every document matching an equality filter.
    DeleteWhere {
        /// Conjunctive equality filter; never empty.
        filter: Document,
    },
}

impl WriteRequest {
    /// Build a write from an operation name and its raw payload.
    ///
    /// A payload array becomes several documents; anything else is one.
    /// Delete payloads must be objects: `{"id": x}` alone is a point
    /// delete, any other object is a filter.
    pub fn from_payload(operation: &str, data: Value) -> Result<Self> {
        match operation {
            "" | "insert" => Ok(WriteRequest::Insert {
                documents: split_documents(data),
            }),
            "update" => Ok(WriteRequest::Update {
                documents: split_documents(data),
            }),
            "upsert" => Ok(WriteRequest::Upsert {
                documents: split_documents(data),
            }),
            "delete" => {
                let Value::Object(mut filter) = data else {
                    return Err(Error::invalid(format!(
                        "delete requires an object payload, got {}",
                        data.type_name()
                    )));
                };
                if filter.len() == 1 {
                    if let Some(key) = filter.remove(docbridge_core::DEFAULT_PRIMARY_KEY) {
                        return Ok(WriteRequest::DeleteByKey { key });
                    }
                }
                Ok(WriteRequest::DeleteWhere { filter })
            }
            other => Err(Error::invalid(format!(
                "invalid operation {:?}: must be one of insert, update, upsert, delete",
                other
            ))),
        }
    }

    /// Wire name of the operation.
    pub fn operation(&self) -> &'static str {
        match self {
            WriteRequest::Insert { .. } => "insert",
            WriteRequest::Update { .. } => "update",
            WriteRequest::Upsert { .. } => "upsert",
            WriteRequest::DeleteByKey { .. } | WriteRequest::DeleteWhere { .. } => "delete",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            WriteRequest::DeleteWhere { filter } if filter.is_empty() => {
                Err(Error::invalid("delete filter must name at least one field"))
            }
            _ => Ok(()),
        }
    }
}

fn split_documents(data: Value) -> Vec<Value> {
    match data {
        Value::Array(items) => items,
        single => vec![single],
    }
}
