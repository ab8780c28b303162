//! One executor shared across threads.

use std::sync::Arc;
use std::thread;

use serde_json::json;

use crate::common::{call, seeded};

#[test]
fn concurrent_inserts_all_land() {
    let (executor, _) = seeded();
    let executor = Arc::new(executor);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let executor = Arc::clone(&executor);
            thread::spawn(move || {
                for i in 0..25 {
                    let out = call(
                        &executor,
                        "write_data",
                        json!({"data": {"id": format!("t{}-{}", t, i), "age": i}}),
                    );
                    assert_eq!(out["inserted"], json!(1));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let out = call(&executor, "aggregate", json!({"operation": "count"}));
    assert_eq!(out["value"], json!(3 + 8 * 25));
}

#[test]
fn readers_see_consistent_counts_while_writing() {
    let (executor, _) = seeded();
    let executor = Arc::new(executor);

    let writer = {
        let executor = Arc::clone(&executor);
        thread::spawn(move || {
            for i in 0..50 {
                call(
                    &executor,
                    "write_data",
                    json!({"data": {"id": format!("w{}", i)}}),
                );
            }
        })
    };

    let mut last = 0;
    for _ in 0..50 {
        let out = call(&executor, "aggregate", json!({"operation": "count"}));
        let n = out["value"].as_u64().unwrap();
        assert!(n >= last && (3..=53).contains(&n));
        last = n;
    }
    writer.join().unwrap();
}
