//! Shared fixtures for the executor integration suite.

#![allow(dead_code)]

use std::sync::Arc;

use docbridge::{Executor, MemoryDriver, Output};
use serde_json::{json, Value as Json};

pub const DB: &str = "test_db";
pub const USERS: &str = "users";

/// Executor over `test_db.users` seeded with three users:
/// Alice (30, active), Bob (25, inactive), Charlie (35, active).
pub fn seeded() -> (Executor, Arc<MemoryDriver>) {
    let driver = Arc::new(MemoryDriver::new());
    driver.create_namespace(DB).unwrap();
    driver.create_collection(DB, USERS).unwrap();
    let executor = Executor::new(driver.clone());
    call(
        &executor,
        "write_data",
        json!({
            "data": [
                {"id": "1", "name": "Alice", "age": 30, "status": "active"},
                {"id": "2", "name": "Bob", "age": 25, "status": "inactive"},
                {"id": "3", "name": "Charlie", "age": 35, "status": "active"}
            ]
        }),
    );
    (executor, driver)
}

/// Run a command against `test_db.users` and return its JSON envelope.
pub fn call(executor: &Executor, name: &str, mut params: Json) -> Json {
    params["database"] = json!(DB);
    params["table"] = json!(USERS);
    let out: Output = executor
        .execute_request(name, params)
        .unwrap_or_else(|e| panic!("{} failed: {}", name, e));
    out.to_json()
}

/// Names of the rows in a `results` array, in order.
pub fn names(envelope: &Json) -> Vec<String> {
    envelope["results"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|r| r["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
