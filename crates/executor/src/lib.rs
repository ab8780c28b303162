//! # docbridge Executor
//!
//! The command translation and execution layer over a document database.
//!
//! It provides:
//! - [`Executor`] - validates commands and runs them against a [`Driver`]
//! - [`Command`] - the typed command set, buildable from loose JSON requests
//! - [`Output`] - the response envelopes
//! - [`Error`] - `InvalidRequest`, `DriverFailure` and `WriteFailed`
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use docbridge_engine::MemoryDriver;
//! use docbridge_executor::{Executor, Output};
//! use serde_json::json;
//!
//! let driver = Arc::new(MemoryDriver::new());
//! driver.create_namespace("app").unwrap();
//! driver.create_collection("app", "users").unwrap();
//!
//! let executor = Executor::new(driver);
//! executor
//!     .execute_request(
//!         "write_data",
//!         json!({"database": "app", "table": "users", "data": {"id": "1", "age": 30}}),
//!     )
//!     .unwrap();
//!
//! let out = executor
//!     .execute_request("aggregate", json!({"database": "app", "table": "users", "operation": "count"}))
//!     .unwrap();
//! assert_eq!(out.to_json()["value"], json!(1));
//! ```
//!
//! ## Commands
//!
//! | Command | Handler |
//! |---------|---------|
//! | list_databases, list_tables, table_info | catalogue |
//! | query_table, advanced_query | query builder |
//! | aggregate | aggregation dispatcher |
//! | write_data | write executor |
//! | schema_inspector | schema sampler |
//! | index_info | index inspector |

#![warn(missing_docs)]

mod bounds;
mod command;
mod config;
mod convert;
mod error;
mod executor;
mod infer;
mod output;
mod request;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use bounds::{resolve_limit, resolve_sample_size};
pub use command::{AdvancedQuery, AggregateSpec, Command, GroupReduce, WriteRequest};
pub use config::{ExecutorConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use executor::{tools, Executor, ToolSpec};
pub use infer::{infer_type, FieldObservations, FieldType};
pub use output::{
    AdvancedResult, AggregateResult, DatabaseList, FieldInfo, IndexDescriptor, IndexReport, Output,
    QueryResult, SchemaReport, TableInfo, TableList, WriteSummary,
};

// Re-export core types so users don't need docbridge-core directly
pub use docbridge_core::{Bound, CollectionRef, Document, Driver, DriverError, Value};
