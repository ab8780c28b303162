//! Test modules for the executor crate.
//!
//! Scenarios run against the in-process `MemoryDriver`; `partial_reads`
//! uses a driver double that fails selected calls.


use std::sync::Arc;

use docbridge_core::{CollectionRef, Conflict, Driver, Value, WriteTerm};
use docbridge_engine::MemoryDriver;
use serde_json::json;

use crate::Executor;

/// Namespace `test_db` with an empty `users` collection.
pub(crate) fn create_test_driver() -> Arc<MemoryDriver> {
    let driver = Arc::new(MemoryDriver::new());
    driver.create_namespace("test_db").unwrap();
    driver.create_collection("test_db", "users").unwrap();
    driver
}

/// Alice (30, active), Bob (25, inactive), Charlie (35, active).
pub(crate) fn seed_users(driver: &MemoryDriver) {
    let docs = vec![
        json!({"id": "1", "name": "Alice", "age": 30, "status": "active", "tags": ["admin", "dev"]}),
        json!({"id": "2", "name": "Bob", "age": 25, "status": "inactive", "tags": ["dev"]}),
        json!({"id": "3", "name": "Charlie", "age": 35, "status": "active", "tags": []}),
    ];
    driver
        .write(&WriteTerm::Insert {
            collection: users(),
            documents: docs.into_iter().map(Value::from).collect(),
            conflict: Conflict::Error,
        })
        .unwrap();
}

pub(crate) fn users() -> CollectionRef {
    CollectionRef::new("test_db", "users")
}

/// Route executor logs to the test harness. Safe to call repeatedly.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Executor over a seeded `test_db.users`, plus the driver for setup.
pub(crate) fn create_test_executor() -> (Executor, Arc<MemoryDriver>) {
    init_tracing();
    let driver = create_test_driver();
    seed_users(&driver);
    (Executor::new(driver.clone()), driver)
}
