//! query_table and advanced_query through the facade.

use docbridge::{CollectionRef, IndexOptions};
use serde_json::json;

use crate::common::{call, names, seeded, DB, USERS};

#[test]
fn filter_on_status_counts_two() {
    let (executor, _) = seeded();
    let out = call(&executor, "query_table", json!({"filter": {"status": "active"}}));
    assert_eq!(out["count"], json!(2));
    assert!(out["execution_time_ms"].as_f64().is_some());
}

#[test]
fn filter_compares_numbers_by_value() {
    let (executor, _) = seeded();
    let out = call(&executor, "query_table", json!({"filter": {"age": 30.0}}));
    assert_eq!(names(&out), vec!["Alice"]);
}

#[test]
fn order_by_sorts_ascending() {
    let (executor, _) = seeded();
    let out = call(&executor, "query_table", json!({"order_by": "age"}));
    assert_eq!(names(&out), vec!["Bob", "Alice", "Charlie"]);
}

#[test]
fn between_includes_lower_and_excludes_upper() {
    let (executor, driver) = seeded();
    driver
        .create_index(&CollectionRef::new(DB, USERS), "age", "age", IndexOptions::default())
        .unwrap();

    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "between", "index": "age", "lower_bound": 26, "upper_bound": 35}),
    );
    assert_eq!(out["count"], json!(1));

    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "between", "index": "age", "lower_bound": 25, "upper_bound": 36}),
    );
    assert_eq!(out["count"], json!(3));

    // Exactly-equal lower edge is in, exactly-equal upper edge is out.
    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "between", "index": "age", "lower_bound": 25, "upper_bound": 30}),
    );
    assert_eq!(names(&out), vec!["Bob"]);
}

#[test]
fn explicit_null_bound_is_a_key_not_a_sentinel() {
    let (executor, driver) = seeded();
    driver
        .create_index(&CollectionRef::new(DB, USERS), "age", "age", IndexOptions::default())
        .unwrap();

    // Null sorts below every number, so [MinVal, null) holds no ages.
    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "between", "index": "age", "upper_bound": null}),
    );
    assert_eq!(out["count"], json!(0));

    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "between", "index": "age", "lower_bound": null}),
    );
    assert_eq!(out["count"], json!(3));
}

#[test]
fn between_on_primary_key_with_open_bounds() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "between", "index": "id", "lower_bound": "2"}),
    );
    assert_eq!(names(&out), vec!["Bob", "Charlie"]);
}

#[test]
fn map_accepts_map_expr() {
    let (executor, _) = seeded();
    let out = call(
        &executor,
        "advanced_query",
        json!({"operation": "map", "map_expr": {"age": true}}),
    );
    assert_eq!(out["count"], json!(3));
    assert_eq!(out["results"][0], json!({"age": 30}));
}

#[test]
fn unknown_table_surfaces_driver_error() {
    let (executor, _) = seeded();
    let err = executor
        .execute_request(
            "query_table",
            json!({"database": DB, "table": "nope"}),
        )
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
