//! The Executor - single entry point to the command layer.
//!
//! The Executor is a stateless dispatcher that validates commands, routes
//! them to handlers and returns their envelopes.

use std::sync::Arc;

use docbridge_core::Driver;
use serde::Serialize;
use tracing::debug;

use crate::bounds::{resolve_limit, resolve_sample_size};
use crate::handlers;
use crate::{Command, ExecutorConfig, Output, Result};

/// The command executor.
///
/// The Executor is **stateless**: it holds a driver handle and its bounds
/// configuration but keeps nothing between calls. The driver connection is
/// owned by whoever constructed it.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads; each
/// command issues its driver calls sequentially on the calling thread.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use docbridge_engine::MemoryDriver;
/// use docbridge_executor::{Command, Executor, Output};
///
/// let driver = Arc::new(MemoryDriver::new());
/// driver.create_namespace("app").unwrap();
///
/// let executor = Executor::new(driver);
/// match executor.execute(Command::ListDatabases).unwrap() {
///     Output::Databases(list) => assert_eq!(list.databases, vec!["app"]),
///     other => panic!("unexpected output {:?}", other),
/// }
/// ```
pub struct Executor {
    driver: Arc<dyn Driver>,
    config: ExecutorConfig,
}

impl Executor {
    /// Create an executor with the default bounds.
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self::with_config(driver, ExecutorConfig::default())
    }

    /// Create an executor with explicit bounds.
    pub fn with_config(driver: Arc<dyn Driver>, config: ExecutorConfig) -> Self {
        Self { driver, config }
    }

    /// Execute a single command.
    ///
    /// The command is validated first; an invalid command never reaches
    /// the driver.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        cmd.validate()?;
        debug!(target: "docbridge::executor", command = cmd.name(), "Executing command");

        let driver = self.driver.as_ref();
        match cmd {
            // Catalogue commands
            Command::ListDatabases => handlers::catalog::list_databases(driver),
            Command::ListTables { namespace } => handlers::catalog::list_tables(driver, namespace),
            Command::TableInfo { collection } => handlers::catalog::table_info(driver, collection),
            Command::IndexInfo { collection } => handlers::index::index_info(driver, collection),

            // Read commands
            Command::QueryTable {
                collection,
                filter,
                order_by,
                limit,
            } => handlers::query::query_table(
                driver,
                collection,
                filter,
                order_by,
                resolve_limit(limit, &self.config),
            ),
            Command::AdvancedQuery {
                collection,
                query,
                limit,
            } => handlers::query::advanced_query(
                driver,
                collection,
                query,
                resolve_limit(limit, &self.config),
            ),
            Command::Aggregate {
                collection,
                filter,
                spec,
            } => handlers::aggregate::aggregate(driver, collection, filter, spec),

            // Write commands
            Command::WriteData { collection, write } => {
                handlers::write::write_data(driver, collection, write)
            }

            // Schema commands
            Command::SchemaInspector {
                collection,
                sample_size,
            } => handlers::schema::schema_inspector(
                driver,
                collection,
                resolve_sample_size(sample_size, &self.config),
            ),
        }
    }

    /// Execute a command given by name with loosely-typed JSON parameters.
    pub fn execute_request(&self, name: &str, params: serde_json::Value) -> Result<Output> {
        self.execute(Command::from_request(name, params)?)
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns one result per command, in order. A failing command does
    /// not stop the ones after it.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Bounds this executor applies.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// The underlying driver.
    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }
}

/// Name and one-line description of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    /// Command name accepted by [`Executor::execute_request`]
    pub name: &'static str,
    /// What the command does
    pub description: &'static str,
}

const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_databases",
        description: "List all databases",
    },
    ToolSpec {
        name: "list_tables",
        description: "List all tables in a database",
    },
    ToolSpec {
        name: "query_table",
        description: "Query documents with optional filter, ordering and limit",
    },
    ToolSpec {
        name: "table_info",
        description: "Primary key, index names and document count of a table",
    },
    ToolSpec {
        name: "write_data",
        description: "Insert, update, upsert or delete documents",
    },
    ToolSpec {
        name: "aggregate",
        description: "Count, sum, avg, min, max or group documents",
    },
    ToolSpec {
        name: "advanced_query",
        description: "Equality join, index range scan, array contains or field projection",
    },
    ToolSpec {
        name: "schema_inspector",
        description: "Infer field types by sampling documents",
    },
    ToolSpec {
        name: "index_info",
        description: "Build state of every secondary index on a table",
    },
];

/// Every command the executor accepts by name.
pub fn tools() -> &'static [ToolSpec] {
    TOOLS
}
