//! write_data conflict strategies and delete disambiguation.

use serde_json::json;

use crate::common::{call, seeded};

fn fetch(executor: &docbridge::Executor, id: &str) -> serde_json::Value {
    let out = call(executor, "query_table", json!({"filter": {"id": id}}));
    out["results"][0].clone()
}

#[test]
fn duplicate_insert_is_counted_not_raised() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "write_data",
        json!({"operation": "insert", "data": {"id": "1", "name": "Again"}}),
    );
    assert_eq!(out["inserted"], json!(0));
    assert!(out["errors"].as_u64().unwrap() >= 1);
    assert!(out["first_error"].as_str().is_some());
    assert_eq!(fetch(&executor, "1")["name"], json!("Alice"));
}

#[test]
fn update_keeps_fields_not_in_payload() {
    let (executor, _) = seeded();
    call(
        &executor,
        "write_data",
        json!({"operation": "update", "data": {"id": "1", "status": "away"}}),
    );
    let alice = fetch(&executor, "1");
    assert_eq!(alice["status"], json!("away"));
    assert_eq!(alice["age"], json!(30));
}

#[test]
fn upsert_drops_fields_not_in_payload() {
    let (executor, _) = seeded();
    call(
        &executor,
        "write_data",
        json!({"operation": "upsert", "data": {"id": "1", "status": "away"}}),
    );
    let alice = fetch(&executor, "1");
    assert_eq!(alice["status"], json!("away"));
    assert!(alice.get("age").is_none());
}

#[test]
fn delete_by_id_removes_exactly_one() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "write_data",
        json!({"operation": "delete", "data": {"id": "1"}}),
    );
    assert_eq!(out["deleted"], json!(1));
    let left = call(&executor, "aggregate", json!({"operation": "count"}));
    assert_eq!(left["value"], json!(2));
}

#[test]
fn delete_by_filter_removes_every_match() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "write_data",
        json!({"operation": "delete", "data": {"status": "active"}}),
    );
    assert_eq!(out["deleted"], json!(2));
    let left = call(&executor, "query_table", json!({}));
    assert_eq!(left["results"][0]["name"], json!("Bob"));
}

#[test]
fn delete_of_missing_id_deletes_nothing() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "write_data",
        json!({"operation": "delete", "data": {"id": "404"}}),
    );
    assert_eq!(out["deleted"], json!(0));
}
