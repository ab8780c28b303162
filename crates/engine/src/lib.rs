//! In-memory document engine for docbridge
//!
//! This crate provides a reference [`Driver`](docbridge_core::Driver):
//! - Catalogue: namespaces, collections, primary keys, secondary indexes
//! - Query evaluation: filter, order, limit, joins, range scans, reductions
//! - Mutations: inserts with conflict strategies, keyed and filtered deletes
//!
//! It stands in for a networked database wherever the command layer needs
//! a real backend, most notably in tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
mod eval;
mod mutate;
mod store;

pub use driver::MemoryDriver;
pub use store::IndexOptions;
