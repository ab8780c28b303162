//! Core types and traits for docbridge
//!
//! This crate defines the foundational types used throughout the system:
//! - Value: recursive tagged value for documents, filters and results
//! - CollectionRef: `(namespace, collection)` address
//! - Term / WriteTerm: the query and mutation AST handed to a driver
//! - Driver: the contract any database backend implements
//! - DriverError: failures reported by a driver

#![warn(clippy::all)]

pub mod driver;
pub mod error;
pub mod term;
pub mod types;
pub mod value;

pub use driver::{Cursor, Driver, WriteResponse};
pub use error::{DriverError, DriverResult};
pub use term::{Bound, Conflict, Predicate, Reduction, Term, WriteTerm};
pub use types::{CollectionRef, DEFAULT_PRIMARY_KEY};
pub use value::{Document, Value};
