//! Addressing types shared by every layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the primary-key field the reference database uses by default.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// A concrete, addressable collection: `(namespace, collection)`.
///
/// References are resolved per call and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionRef {
    /// Top-level grouping (a database).
    pub namespace: String,
    /// Collection (table) inside the namespace.
    pub collection: String,
}

impl CollectionRef {
    /// Create a reference from its two parts.
    pub fn new(namespace: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            collection: collection.into(),
        }
    }

    /// Reference to another collection in the same namespace.
    pub fn sibling(&self, collection: impl Into<String>) -> Self {
        Self::new(self.namespace.clone(), collection)
    }
}

impl fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.collection)
    }
}
