//! Catalogue and row storage for the in-memory engine.
//!
//! Namespaces own collections; collections own rows keyed by primary key
//! under the datum order, plus secondary index definitions. Index contents
//! are derived from rows at query time, so definitions never go stale.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use docbridge_core::{CollectionRef, Document, DriverError, DriverResult, Value};

/// Row key ordered and compared by the datum order.
#[derive(Debug, Clone)]
pub(crate) struct DatumKey(pub Value);

impl PartialEq for DatumKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.datum_eq(&other.0)
    }
}

impl Eq for DatumKey {}

impl PartialOrd for DatumKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DatumKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.datum_cmp(&other.0)
    }
}

/// Options for a secondary index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// One index entry per array element.
    pub multi: bool,
    /// Spatial index; not usable for range scans.
    pub geo: bool,
}

/// Secondary index definition and build state.
#[derive(Debug, Clone)]
pub(crate) struct IndexDef {
    pub field: String,
    pub options: IndexOptions,
    pub ready: bool,
    pub outdated: bool,
}

impl IndexDef {
    /// Index keys a row contributes; empty when the field is absent.
    pub fn keys_of(&self, row: &Document) -> Vec<Value> {
        match row.get(&self.field) {
            None => Vec::new(),
            Some(Value::Array(items)) if self.options.multi => items.clone(),
            Some(v) => vec![v.clone()],
        }
    }
}

/// One collection: rows plus index definitions.
#[derive(Debug)]
pub(crate) struct Table {
    pub primary_key: String,
    pub rows: BTreeMap<DatumKey, Document>,
    pub indexes: BTreeMap<String, IndexDef>,
}

impl Table {
    pub fn new(primary_key: String) -> Self {
        Self {
            primary_key,
            rows: BTreeMap::new(),
            indexes: BTreeMap::new(),
        }
    }

    /// Rows in primary-key order, as values.
    pub fn scan(&self) -> Vec<Value> {
        self.rows.values().cloned().map(Value::Object).collect()
    }
}

/// Every namespace and its collections.
#[derive(Debug, Default)]
pub(crate) struct Catalog {
    pub namespaces: BTreeMap<String, BTreeMap<String, Table>>,
}

impl Catalog {
    pub fn namespace(&self, name: &str) -> DriverResult<&BTreeMap<String, Table>> {
        self.namespaces
            .get(name)
            .ok_or_else(|| DriverError::not_found(format!("database `{}` does not exist", name)))
    }

    pub fn table(&self, coll: &CollectionRef) -> DriverResult<&Table> {
        self.namespace(&coll.namespace)?
            .get(&coll.collection)
            .ok_or_else(|| missing_table(coll))
    }

    pub fn table_mut(&mut self, coll: &CollectionRef) -> DriverResult<&mut Table> {
        self.namespaces
            .get_mut(&coll.namespace)
            .ok_or_else(|| {
                DriverError::not_found(format!("database `{}` does not exist", coll.namespace))
            })?
            .get_mut(&coll.collection)
            .ok_or_else(|| missing_table(coll))
    }
}

fn missing_table(coll: &CollectionRef) -> DriverError {
    DriverError::not_found(format!("table `{}` does not exist", coll))
}
