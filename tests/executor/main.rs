//! Executor Layer Tests
//!
//! End-to-end tests through the public `docbridge` facade:
//! - bounds: limit and sample-size resolution
//! - reads: query_table and advanced_query shapes
//! - aggregation: scalar vs document results, grouping
//! - writes: conflict strategies and delete disambiguation
//! - envelopes: JSON field names of every response
//! - concurrency: one executor shared across threads

mod common;

mod aggregation;
mod bounds;
mod concurrency;
mod envelopes;
mod reads;
mod writes;
