//! Aggregation scenarios over the three seeded users.

use serde_json::json;

use crate::common::{call, seeded};

#[test]
fn sum_of_ages_is_ninety() {
    let (executor, _) = seeded();
    let out = call(&executor, "aggregate", json!({"operation": "sum", "field": "age"}));
    assert_eq!(out["value"], json!(90));
}

#[test]
fn avg_of_ages_is_thirty() {
    let (executor, _) = seeded();
    let out = call(&executor, "aggregate", json!({"operation": "avg", "field": "age"}));
    assert_eq!(out["value"].as_f64(), Some(30.0));
}

#[test]
fn count_is_a_bare_scalar() {
    let (executor, _) = seeded();
    let out = call(&executor, "aggregate", json!({"operation": "count"}));
    assert_eq!(out["value"], json!(3));
    assert!(out.get("field").is_none());
}

#[test]
fn min_and_max_return_whole_documents() {
    let (executor, _) = seeded();
    let min = call(&executor, "aggregate", json!({"operation": "min", "field": "age"}));
    assert_eq!(min["value"]["name"], json!("Bob"));
    assert_eq!(min["value"]["status"], json!("inactive"));

    let max = call(&executor, "aggregate", json!({"operation": "max", "field": "age"}));
    assert_eq!(max["value"]["name"], json!("Charlie"));
}

#[test]
fn group_by_status_yields_two_groups() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "aggregate",
        json!({"operation": "group", "field": "status"}),
    );
    let groups = out["value"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    let total: usize = groups
        .iter()
        .map(|g| g["reduction"].as_array().map_or(0, Vec::len))
        .sum();
    assert_eq!(total, 3);
}

#[test]
fn group_with_avg_reduces_each_group() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "aggregate",
        json!({
            "operation": "group", "field": "status",
            "group_aggregation": "avg", "aggregate_field": "age"
        }),
    );
    let groups = out["value"].as_array().unwrap();
    let active = groups.iter().find(|g| g["group"] == json!("active")).unwrap();
    assert_eq!(active["reduction"].as_f64(), Some(32.5));
}

#[test]
fn filtered_sum() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "aggregate",
        json!({"operation": "sum", "field": "age", "filter": {"status": "active"}}),
    );
    assert_eq!(out["value"], json!(65));
}
