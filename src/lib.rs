//! docbridge - generic command layer for document databases
//!
//! docbridge exposes a small set of parameterized commands (list, query,
//! aggregate, join/range/contains/project, write, infer schema, inspect
//! indexes) over any database that implements [`Driver`], and returns
//! stable response envelopes.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use docbridge::{Executor, MemoryDriver};
//! use serde_json::json;
//!
//! let driver = Arc::new(MemoryDriver::new());
//! driver.create_namespace("app").unwrap();
//! driver.create_collection("app", "users").unwrap();
//!
//! let executor = Executor::new(driver);
//! let out = executor
//!     .execute_request("list_tables", json!({"database": "app"}))
//!     .unwrap();
//! assert_eq!(out.to_json()["tables"], json!(["users"]));
//! ```
//!
//! # Architecture
//!
//! All commands go through the [`Executor`]. The database itself sits
//! behind the [`Driver`] trait; [`MemoryDriver`] is the in-process
//! implementation.

// Re-export the public API from docbridge-executor
pub use docbridge_executor::*;

// The in-process driver, for embedding and tests
pub use docbridge_engine::{IndexOptions, MemoryDriver};
