//! Limit and sample-size bounds.

use std::sync::Arc;

use docbridge::{resolve_limit, Executor, ExecutorConfig, MemoryDriver};
use proptest::prelude::*;
use serde_json::json;

use crate::common::{call, DB, USERS};

/// Executor over a collection holding `n` documents.
fn with_rows(n: usize, config: ExecutorConfig) -> Executor {
    let driver = Arc::new(MemoryDriver::new());
    driver.create_namespace(DB).unwrap();
    driver.create_collection(DB, USERS).unwrap();
    let executor = Executor::with_config(driver, config);
    let docs: Vec<_> = (0..n).map(|i| json!({"id": i, "n": i})).collect();
    call(&executor, "write_data", json!({ "data": docs }));
    executor
}

#[test]
fn oversized_limit_is_clamped() {
    let executor = with_rows(1200, ExecutorConfig::default());
    let out = call(&executor, "query_table", json!({"limit": 5000}));
    assert_eq!(out["count"], json!(1000));
}

#[test]
fn non_positive_limit_uses_default() {
    let executor = with_rows(150, ExecutorConfig::default());
    assert_eq!(call(&executor, "query_table", json!({"limit": -3}))["count"], json!(100));
    assert_eq!(call(&executor, "query_table", json!({}))["count"], json!(100));
}

#[test]
fn advanced_query_obeys_the_same_cap() {
    let executor = with_rows(1200, ExecutorConfig::default());
    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "map", "fields": ["n"], "limit": 1001}),
    );
    assert_eq!(out["count"], json!(1000));
}

#[test]
fn configured_bounds_apply() {
    let config = ExecutorConfig::from_toml_str("default_limit = 10\nmax_limit = 20").unwrap();
    let executor = with_rows(50, config);
    assert_eq!(call(&executor, "query_table", json!({}))["count"], json!(10));
    assert_eq!(call(&executor, "query_table", json!({"limit": 30}))["count"], json!(20));
}

#[test]
fn sample_size_defaults_to_one_hundred() {
    let executor = with_rows(3, ExecutorConfig::default());
    let out = call(&executor, "schema_inspector", json!({"sample_size": 0}));
    assert_eq!(out["sample_size"], json!(100));
}

proptest! {
    #[test]
    fn limit_resolution_matches_policy(l in -10_000i64..10_000) {
        let resolved = resolve_limit(Some(l), &ExecutorConfig::default()) as i64;
        let expected = if l <= 0 { 100 } else { l.min(1000) };
        prop_assert_eq!(resolved, expected);
    }
}
