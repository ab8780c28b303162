//! Query and write terms issued to a [`Driver`](crate::Driver).
//!
//! A read is a chain of [`Term`]s rooted at [`Term::Table`]; each
//! transformation wraps its source, so builders compose with the fluent
//! methods below:
//!
//! ```
//! use docbridge_core::{CollectionRef, Term};
//!
//! let users = CollectionRef::new("app", "users");
//! let term = Term::table(users).order_by("name").limit(10);
//! assert_eq!(term.collection().collection, "users");
//! ```
//!
//! Writes are flat: a [`WriteTerm`] names its collection and carries its
//! payload directly.

use serde::{Deserialize, Serialize};

use crate::types::CollectionRef;
use crate::value::{Document, Value};

/// Row predicate applied by [`Term::Filter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Every key in the document must be datum-equal in the row.
    Equals(Document),
    /// The named field is an array holding a datum-equal element.
    Contains {
        /// Array-valued field to probe.
        field: String,
        /// Element to look for.
        value: Value,
    },
}

/// One edge of an index range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// Sorts before every value.
    MinVal,
    /// A concrete key.
    Value(Value),
    /// Sorts after every value.
    MaxVal,
}

/// Reduction applied to a whole sequence or to each group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reduction {
    /// Number of rows.
    Count,
    /// Sum of a numeric field.
    Sum(String),
    /// Mean of a numeric field.
    Avg(String),
    /// Row holding the smallest value of a field.
    Min(String),
    /// Row holding the largest value of a field.
    Max(String),
}

/// A read query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// Unrestricted scan of a collection.
    Table(CollectionRef),
    /// Keep rows matching a predicate.
    Filter {
        source: Box<Term>,
        predicate: Predicate,
    },
    /// Ascending sort on one field.
    OrderBy { source: Box<Term>, field: String },
    /// Keep at most `n` rows.
    Limit { source: Box<Term>, n: usize },
    /// Pair each row with the target row whose key equals `field`.
    /// `index` selects the target's lookup index; `None` means its primary key.
    EqJoin {
        source: Box<Term>,
        field: String,
        target: CollectionRef,
        index: Option<String>,
    },
    /// Half-open index range `[lower, upper)`.
    Between {
        source: Box<Term>,
        index: String,
        lower: Bound,
        upper: Bound,
    },
    /// Reduce every row to the named top-level fields.
    Pluck {
        source: Box<Term>,
        fields: Vec<String>,
    },
    /// Reduce the whole sequence to one value.
    Reduce {
        source: Box<Term>,
        reduction: Reduction,
    },
    /// Partition rows by a field, optionally reducing each group.
    Group {
        source: Box<Term>,
        field: String,
        reduction: Option<Reduction>,
    },
}

impl Term {
    /// Start from a full collection scan.
    pub fn table(collection: CollectionRef) -> Self {
        Term::Table(collection)
    }

    /// Narrow by a predicate.
    pub fn filter(self, predicate: Predicate) -> Self {
        Term::Filter {
            source: Box::new(self),
            predicate,
        }
    }

    /// Sort ascending by `field`.
    pub fn order_by(self, field: impl Into<String>) -> Self {
        Term::OrderBy {
            source: Box::new(self),
            field: field.into(),
        }
    }

    /// Cap the result count.
    pub fn limit(self, n: usize) -> Self {
        Term::Limit {
            source: Box::new(self),
            n,
        }
    }

    /// Equality join against `target`.
    pub fn eq_join(
        self,
        field: impl Into<String>,
        target: CollectionRef,
        index: Option<String>,
    ) -> Self {
        Term::EqJoin {
            source: Box::new(self),
            field: field.into(),
            target,
            index,
        }
    }

    /// Range scan over a secondary index.
    pub fn between(self, index: impl Into<String>, lower: Bound, upper: Bound) -> Self {
        Term::Between {
            source: Box::new(self),
            index: index.into(),
            lower,
            upper,
        }
    }

    /// Project rows onto `fields`.
    pub fn pluck(self, fields: Vec<String>) -> Self {
        Term::Pluck {
            source: Box::new(self),
            fields,
        }
    }

    /// Reduce to a single value.
    pub fn reduce(self, reduction: Reduction) -> Self {
        Term::Reduce {
            source: Box::new(self),
            reduction,
        }
    }

    /// Group by `field`.
    pub fn group(self, field: impl Into<String>, reduction: Option<Reduction>) -> Self {
        Term::Group {
            source: Box::new(self),
            field: field.into(),
            reduction,
        }
    }

    /// The collection at the root of this term.
    pub fn collection(&self) -> &CollectionRef {
        match self {
            Term::Table(c) => c,
            Term::Filter { source, .. }
            | Term::OrderBy { source, .. }
            | Term::Limit { source, .. }
            | Term::EqJoin { source, .. }
            | Term::Between { source, .. }
            | Term::Pluck { source, .. }
            | Term::Reduce { source, .. }
            | Term::Group { source, .. } => source.collection(),
        }
    }
}

/// Policy when an inserted document's primary key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conflict {
    /// Reject the document and count an error.
    Error,
    /// Deep-merge incoming fields into the stored document.
    Update,
    /// Replace the stored document wholesale.
    Replace,
}

/// A mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WriteTerm {
    /// Insert documents with a conflict policy.
    Insert {
        collection: CollectionRef,
        documents: Vec<Value>,
        conflict: Conflict,
    },
    /// Delete the single document with this primary key.
    DeleteByKey { collection: CollectionRef, key: Value },
    /// Delete every document matching the equality filter.
    DeleteWhere {
        collection: CollectionRef,
        filter: Document,
    },
}

impl WriteTerm {
    /// The collection this write targets.
    pub fn collection(&self) -> &CollectionRef {
        match self {
            WriteTerm::Insert { collection, .. }
            | WriteTerm::DeleteByKey { collection, .. }
            | WriteTerm::DeleteWhere { collection, .. } => collection,
        }
    }
}
