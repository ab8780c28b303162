//! Loosely-typed request parsing.
//!
//! Callers that speak a tool-call protocol send a command name and a flat
//! JSON object of parameters. Each command has a params struct that accepts
//! exactly that shape (including the `database`/`table` aliases), and a
//! conversion into the typed [`Command`].
//!
//! Parsing is lenient about absent optional fields and strict about
//! operation names and value shapes.

use docbridge_core::{Bound, CollectionRef, Document, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::command::{AdvancedQuery, AggregateSpec, Command, GroupReduce, WriteRequest};
use crate::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NamespaceParams {
    #[serde(alias = "database")]
    namespace: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CollectionParams {
    #[serde(alias = "database")]
    namespace: String,
    #[serde(alias = "table")]
    collection: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryTableParams {
    #[serde(alias = "database")]
    namespace: String,
    #[serde(alias = "table")]
    collection: String,
    filter: Option<Document>,
    limit: Option<i64>,
    order_by: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WriteDataParams {
    #[serde(alias = "database")]
    namespace: String,
    #[serde(alias = "table")]
    collection: String,
    data: Option<Value>,
    operation: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AggregateParams {
    #[serde(alias = "database")]
    namespace: String,
    #[serde(alias = "table")]
    collection: String,
    operation: String,
    field: String,
    filter: Option<Document>,
    group_aggregation: String,
    aggregate_field: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AdvancedQueryParams {
    #[serde(alias = "database")]
    namespace: String,
    #[serde(alias = "table")]
    collection: String,
    operation: String,
    join_field: String,
    join_table: String,
    join_index: Option<String>,
    index: String,
    #[serde(deserialize_with = "present")]
    lower_bound: Option<Value>,
    #[serde(deserialize_with = "present")]
    upper_bound: Option<Value>,
    contains_field: String,
    #[serde(deserialize_with = "present")]
    contains_value: Option<Value>,
    fields: Option<Vec<String>>,
    map_expr: Option<Document>,
    limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SchemaParams {
    #[serde(alias = "database")]
    namespace: String,
    #[serde(alias = "table")]
    collection: String,
    sample_size: Option<i64>,
}

fn parse<T: DeserializeOwned + Default>(name: &str, params: serde_json::Value) -> Result<T> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params)
        .map_err(|e| Error::invalid(format!("invalid parameters for {}: {}", name, e)))
}

/// An empty filter object means "no filter".
fn non_empty(filter: Option<Document>) -> Option<Document> {
    filter.filter(|f| !f.is_empty())
}

/// A key that is present maps to `Some`, even when its value is `null`.
/// Absent keys fall back to the struct default.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn bound(raw: Option<Value>, absent: Bound) -> Bound {
    raw.map_or(absent, Bound::Value)
}

impl Command {
    /// Build a typed command from a command name and its JSON parameters.
    ///
    /// Unknown command names, unknown operation names and malformed values
    /// are `InvalidRequest`. Required-field checks happen in
    /// [`Command::validate`], which the executor runs on every command.
    pub fn from_request(name: &str, params: serde_json::Value) -> Result<Command> {
        match name {
            "list_databases" => Ok(Command::ListDatabases),

            "list_tables" => {
                let p: NamespaceParams = parse(name, params)?;
                Ok(Command::ListTables {
                    namespace: p.namespace,
                })
            }

            "table_info" | "index_info" => {
                let p: CollectionParams = parse(name, params)?;
                let collection = CollectionRef::new(p.namespace, p.collection);
                Ok(if name == "table_info" {
                    Command::TableInfo { collection }
                } else {
                    Command::IndexInfo { collection }
                })
            }

            "query_table" => {
                let p: QueryTableParams = parse(name, params)?;
                Ok(Command::QueryTable {
                    collection: CollectionRef::new(p.namespace, p.collection),
                    filter: non_empty(p.filter),
                    order_by: p.order_by.filter(|f| !f.is_empty()),
                    limit: p.limit,
                })
            }

            "write_data" => {
                let p: WriteDataParams = parse(name, params)?;
                let data = match p.data {
                    Some(Value::Null) | None => return Err(Error::invalid("data is required")),
                    Some(data) => data,
                };
                Ok(Command::WriteData {
                    collection: CollectionRef::new(p.namespace, p.collection),
                    write: WriteRequest::from_payload(&p.operation, data)?,
                })
            }

            "aggregate" => {
                let p: AggregateParams = parse(name, params)?;
                let field = p.field;
                let spec = match p.operation.as_str() {
                    "count" => AggregateSpec::Count,
                    "sum" => AggregateSpec::Sum { field },
                    "avg" => AggregateSpec::Avg { field },
                    "min" => AggregateSpec::Min { field },
                    "max" => AggregateSpec::Max { field },
                    "group" => {
                        let reduce = if p.group_aggregation.is_empty() {
                            None
                        } else {
                            let target = p
                                .aggregate_field
                                .filter(|f| !f.is_empty())
                                .unwrap_or_else(|| field.clone());
                            Some(GroupReduce::parse(&p.group_aggregation, target)?)
                        };
                        AggregateSpec::Group { field, reduce }
                    }
                    other => {
                        return Err(Error::invalid(format!(
                            "invalid operation {:?}: must be one of count, sum, avg, min, max, group",
                            other
                        )))
                    }
                };
                Ok(Command::Aggregate {
                    collection: CollectionRef::new(p.namespace, p.collection),
                    filter: non_empty(p.filter),
                    spec,
                })
            }

            "advanced_query" => {
                let p: AdvancedQueryParams = parse(name, params)?;
                let query = match p.operation.as_str() {
                    "eq_join" => AdvancedQuery::EqJoin {
                        field: p.join_field,
                        target: p.join_table,
                        index: p.join_index.filter(|i| !i.is_empty()),
                    },
                    "between" => AdvancedQuery::Between {
                        index: p.index,
                        lower: bound(p.lower_bound, Bound::MinVal),
                        upper: bound(p.upper_bound, Bound::MaxVal),
                    },
                    "contains" => AdvancedQuery::Contains {
                        field: p.contains_field,
                        value: p
                            .contains_value
                            .ok_or_else(|| Error::invalid("contains_value is required for contains"))?,
                    },
                    "map" => {
                        let mut fields = match (p.fields, p.map_expr) {
                            (Some(fields), _) if !fields.is_empty() => fields,
                            (_, Some(expr)) => expr.into_keys().collect(),
                            _ => Vec::new(),
                        };
                        fields.sort();
                        fields.dedup();
                        AdvancedQuery::Map { fields }
                    }
                    other => {
                        return Err(Error::invalid(format!(
                            "invalid operation {:?}: must be one of eq_join, between, contains, map",
                            other
                        )))
                    }
                };
                Ok(Command::AdvancedQuery {
                    collection: CollectionRef::new(p.namespace, p.collection),
                    query,
                    limit: p.limit,
                })
            }

            "schema_inspector" => {
                let p: SchemaParams = parse(name, params)?;
                Ok(Command::SchemaInspector {
                    collection: CollectionRef::new(p.namespace, p.collection),
                    sample_size: p.sample_size,
                })
            }

            other => Err(Error::invalid(format!("unknown command {:?}", other))),
        }
    }
}
