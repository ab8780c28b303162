//! The database driver contract.
//!
//! The command layer never talks to storage directly: it builds [`Term`]s
//! and [`WriteTerm`]s and hands them to a [`Driver`]. Anything that can
//! evaluate those terms (a network client, an embedded engine, a test
//! double) plugs in behind this trait.
//!
//! Thread safety: a driver is shared by every concurrently executing
//! command, so implementations must be `Send + Sync`. A driver wrapping a
//! session that is not safe for concurrent use must scope it per call.

use serde::{Deserialize, Serialize};

use crate::error::{DriverError, DriverResult};
use crate::term::{Term, WriteTerm};
use crate::types::CollectionRef;
use crate::value::Value;

/// Rows produced by a read, pulled one at a time.
///
/// Aggregations that produce a single value yield a one-row cursor.
pub struct Cursor {
    rows: Box<dyn Iterator<Item = DriverResult<Value>> + Send>,
}

impl Cursor {
    /// Wrap any row iterator.
    pub fn new<I>(rows: I) -> Self
    where
        I: Iterator<Item = DriverResult<Value>> + Send + 'static,
    {
        Self {
            rows: Box::new(rows),
        }
    }

    /// A cursor over already-materialized rows.
    pub fn from_rows(rows: Vec<Value>) -> Self {
        Self::new(rows.into_iter().map(Ok))
    }

    /// A cursor holding exactly one value.
    pub fn single(value: Value) -> Self {
        Self::from_rows(vec![value])
    }

    /// Drain every row, stopping at the first error.
    pub fn all(self) -> DriverResult<Vec<Value>> {
        self.rows.collect()
    }

    /// Take the first row; an empty cursor is an error.
    pub fn one(mut self) -> DriverResult<Value> {
        self.rows
            .next()
            .unwrap_or_else(|| Err(DriverError::invalid_query("cursor is empty")))
    }
}

impl Iterator for Cursor {
    type Item = DriverResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

impl std::fmt::Debug for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").finish_non_exhaustive()
    }
}

/// Summary of a write, not a per-document report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// Documents newly created
    pub inserted: u64,
    /// Documents changed in place
    pub replaced: u64,
    /// Documents matched but left identical
    pub unchanged: u64,
    /// Documents removed
    pub deleted: u64,
    /// Documents rejected
    pub errors: u64,
    /// Message of the first rejection, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_error: Option<String>,
}

impl WriteResponse {
    /// Record a rejected document, keeping only the first message.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors += 1;
        if self.first_error.is_none() {
            self.first_error = Some(message.into());
        }
    }
}

/// Issues queries and mutations against a document database.
///
/// Every method is a single blocking call. Errors are returned as-is; the
/// caller decides what to tolerate.
pub trait Driver: Send + Sync {
    /// Names of every namespace.
    fn namespace_list(&self) -> DriverResult<Vec<String>>;

    /// Names of every collection in a namespace.
    fn collection_list(&self, namespace: &str) -> DriverResult<Vec<String>>;

    /// Raw info record for a collection; carries at least `primary_key`.
    fn collection_info(&self, collection: &CollectionRef) -> DriverResult<Value>;

    /// Names of the collection's secondary indexes.
    fn index_list(&self, collection: &CollectionRef) -> DriverResult<Vec<String>>;

    /// Raw status record for each secondary index.
    ///
    /// Records may omit any flag; readers must default missing flags.
    fn index_status(&self, collection: &CollectionRef) -> DriverResult<Vec<Value>>;

    /// Evaluate a read query.
    fn run(&self, term: &Term) -> DriverResult<Cursor>;

    /// Apply a mutation.
    fn write(&self, term: &WriteTerm) -> DriverResult<WriteResponse>;
}
