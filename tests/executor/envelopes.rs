//! Field names of every response envelope.

use docbridge::{CollectionRef, IndexOptions};
use serde_json::json;

use crate::common::{call, seeded, DB, USERS};

fn keys(v: &serde_json::Value) -> Vec<String> {
    let mut keys: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

#[test]
fn list_databases_envelope() {
    let (executor, _) = seeded();
    let out = executor
        .execute_request("list_databases", serde_json::Value::Null)
        .unwrap()
        .to_json();
    assert_eq!(out, json!({"databases": [DB]}));
}

#[test]
fn query_table_envelope() {
    let (executor, _) = seeded();
    let out = call(&executor, "query_table", json!({}));
    assert_eq!(
        keys(&out),
        vec!["collection", "count", "execution_time_ms", "namespace", "results"]
    );
    assert_eq!(out["namespace"], json!(DB));
    assert_eq!(out["collection"], json!(USERS));
}

#[test]
fn table_info_envelope() {
    let (executor, _) = seeded();
    let out = call(&executor, "table_info", json!({}));
    assert_eq!(
        out,
        json!({
            "namespace": DB, "collection": USERS,
            "primary_key": "id", "indexes": [], "doc_count": 3
        })
    );
}

#[test]
fn write_envelope_without_errors_omits_first_error() {
    let (executor, _) = seeded();
    let out = call(&executor, "write_data", json!({"data": {"id": "9"}}));
    assert_eq!(
        keys(&out),
        vec![
            "collection", "deleted", "errors", "inserted", "namespace", "operation", "replaced",
            "unchanged"
        ]
    );
}

#[test]
fn schema_envelope() {
    let (executor, _) = seeded();
    let out = call(&executor, "schema_inspector", json!({}));
    assert_eq!(
        keys(&out),
        vec![
            "collection", "doc_count", "fields", "indexes", "namespace", "primary_key",
            "sample_size"
        ]
    );
    assert!(out["fields"]
        .as_array()
        .unwrap()
        .contains(&json!({"name": "age", "type": "number"})));
}

#[test]
fn index_info_envelope() {
    let (executor, driver) = seeded();
    driver
        .create_index(&CollectionRef::new(DB, USERS), "status", "status", IndexOptions::default())
        .unwrap();
    let out = call(&executor, "index_info", json!({}));
    assert_eq!(
        out["indexes"],
        json!([{"name": "status", "ready": true, "multi": false, "geo": false, "outdated": false}])
    );
}

#[test]
fn advanced_query_envelope() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "map", "fields": ["name"]}),
    );
    assert_eq!(
        keys(&out),
        vec!["collection", "count", "namespace", "operation", "results"]
    );
    assert_eq!(out["operation"], json!("map"));
}
