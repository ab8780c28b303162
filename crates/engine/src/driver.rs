//! In-process [`Driver`] implementation.
//!
//! `MemoryDriver` keeps every namespace in a single catalogue behind a
//! `parking_lot::RwLock`. Reads evaluate under the shared lock, writes
//! under the exclusive one, so each call observes a consistent snapshot.
//!
//! # Example
//!
//! ```
//! use docbridge_core::{CollectionRef, Driver, Term};
//! use docbridge_engine::MemoryDriver;
//!
//! let driver = MemoryDriver::new();
//! driver.create_namespace("app").unwrap();
//! driver.create_collection("app", "users").unwrap();
//!
//! let rows = driver
//!     .run(&Term::table(CollectionRef::new("app", "users")))
//!     .unwrap()
//!     .all()
//!     .unwrap();
//! assert!(rows.is_empty());
//! ```

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use docbridge_core::{
    CollectionRef, Cursor, Document, Driver, DriverError, DriverResult, Term, Value,
    WriteResponse, WriteTerm, DEFAULT_PRIMARY_KEY,
};

use crate::eval::{eval, Datum};
use crate::mutate;
use crate::store::{Catalog, IndexDef, IndexOptions, Table};

/// Reference document store that evaluates terms in memory.
#[derive(Debug, Default)]
pub struct MemoryDriver {
    catalog: RwLock<Catalog>,
}

impl MemoryDriver {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a namespace. Fails with `Conflict` if it exists.
    pub fn create_namespace(&self, name: &str) -> DriverResult<()> {
        let mut catalog = self.catalog.write();
        if catalog.namespaces.contains_key(name) {
            return Err(DriverError::Conflict(format!(
                "database `{}` already exists",
                name
            )));
        }
        catalog.namespaces.insert(name.to_string(), BTreeMap::new());
        info!(target: "docbridge::engine", namespace = name, "Created namespace");
        Ok(())
    }

    /// Create a collection keyed by `id`.
    pub fn create_collection(&self, namespace: &str, name: &str) -> DriverResult<()> {
        self.create_collection_with_key(namespace, name, DEFAULT_PRIMARY_KEY)
    }

    /// Create a collection with a custom primary key field.
    pub fn create_collection_with_key(
        &self,
        namespace: &str,
        name: &str,
        primary_key: &str,
    ) -> DriverResult<()> {
        let mut catalog = self.catalog.write();
        let tables = catalog.namespaces.get_mut(namespace).ok_or_else(|| {
            DriverError::not_found(format!("database `{}` does not exist", namespace))
        })?;
        if tables.contains_key(name) {
            return Err(DriverError::Conflict(format!(
                "table `{}.{}` already exists",
                namespace, name
            )));
        }
        tables.insert(name.to_string(), Table::new(primary_key.to_string()));
        info!(
            target: "docbridge::engine",
            namespace,
            collection = name,
            primary_key,
            "Created collection"
        );
        Ok(())
    }

    /// Define a secondary index over `field`. New indexes are ready.
    pub fn create_index(
        &self,
        collection: &CollectionRef,
        name: &str,
        field: &str,
        options: IndexOptions,
    ) -> DriverResult<()> {
        let mut catalog = self.catalog.write();
        let table = catalog.table_mut(collection)?;
        if name == table.primary_key || table.indexes.contains_key(name) {
            return Err(DriverError::Conflict(format!(
                "index `{}` already exists on table `{}`",
                name, collection
            )));
        }
        table.indexes.insert(
            name.to_string(),
            IndexDef {
                field: field.to_string(),
                options,
                ready: true,
                outdated: false,
            },
        );
        info!(
            target: "docbridge::engine",
            collection = %collection,
            index = name,
            field,
            multi = options.multi,
            geo = options.geo,
            "Created index"
        );
        Ok(())
    }

    /// Override the reported build state of an index.
    pub fn set_index_state(
        &self,
        collection: &CollectionRef,
        name: &str,
        ready: bool,
        outdated: bool,
    ) -> DriverResult<()> {
        let mut catalog = self.catalog.write();
        let def = catalog
            .table_mut(collection)?
            .indexes
            .get_mut(name)
            .ok_or_else(|| {
                DriverError::not_found(format!("index `{}` on table `{}`", name, collection))
            })?;
        def.ready = ready;
        def.outdated = outdated;
        Ok(())
    }
}

impl Driver for MemoryDriver {
    fn namespace_list(&self) -> DriverResult<Vec<String>> {
        Ok(self.catalog.read().namespaces.keys().cloned().collect())
    }

    fn collection_list(&self, namespace: &str) -> DriverResult<Vec<String>> {
        Ok(self.catalog.read().namespace(namespace)?.keys().cloned().collect())
    }

    fn collection_info(&self, collection: &CollectionRef) -> DriverResult<Value> {
        let catalog = self.catalog.read();
        let table = catalog.table(collection)?;
        let mut info = Document::new();
        info.insert("name".into(), Value::from(collection.collection.as_str()));
        info.insert("db".into(), Value::from(collection.namespace.as_str()));
        info.insert("type".into(), Value::from("TABLE"));
        info.insert("primary_key".into(), Value::from(table.primary_key.as_str()));
        Ok(Value::Object(info))
    }

    fn index_list(&self, collection: &CollectionRef) -> DriverResult<Vec<String>> {
        Ok(self.catalog.read().table(collection)?.indexes.keys().cloned().collect())
    }

    fn index_status(&self, collection: &CollectionRef) -> DriverResult<Vec<Value>> {
        let catalog = self.catalog.read();
        let table = catalog.table(collection)?;
        Ok(table
            .indexes
            .iter()
            .map(|(name, def)| {
                let mut status = Document::new();
                status.insert("index".into(), Value::from(name.as_str()));
                status.insert("ready".into(), Value::Bool(def.ready));
                status.insert("multi".into(), Value::Bool(def.options.multi));
                status.insert("geo".into(), Value::Bool(def.options.geo));
                status.insert("outdated".into(), Value::Bool(def.outdated));
                Value::Object(status)
            })
            .collect())
    }

    fn run(&self, term: &Term) -> DriverResult<Cursor> {
        debug!(target: "docbridge::engine", collection = %term.collection(), "Evaluating query");
        let datum = eval(&self.catalog.read(), term)?;
        Ok(match datum {
            Datum::Stream(rows) => Cursor::from_rows(rows),
            Datum::Single(value) => Cursor::single(value),
        })
    }

    fn write(&self, term: &WriteTerm) -> DriverResult<WriteResponse> {
        let resp = mutate::apply(&mut self.catalog.write(), term)?;
        debug!(
            target: "docbridge::engine",
            collection = %term.collection(),
            inserted = resp.inserted,
            replaced = resp.replaced,
            unchanged = resp.unchanged,
            deleted = resp.deleted,
            errors = resp.errors,
            "Applied write"
        );
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbridge_core::{Bound, Conflict, Predicate, Reduction};
    use serde_json::json;

    fn seeded() -> (MemoryDriver, CollectionRef) {
        let driver = MemoryDriver::new();
        driver.create_namespace("test_db").unwrap();
        driver.create_collection("test_db", "users").unwrap();
        let users = CollectionRef::new("test_db", "users");
        let docs = json!([
            {"id": "1", "name": "Alice", "age": 30, "status": "active"},
            {"id": "2", "name": "Bob", "age": 25, "status": "inactive"},
            {"id": "3", "name": "Charlie", "age": 35, "status": "active"}
        ]);
        let Value::Array(documents) = Value::from(docs) else {
            unreachable!()
        };
        driver
            .write(&WriteTerm::Insert {
                collection: users.clone(),
                documents,
                conflict: Conflict::Error,
            })
            .unwrap();
        (driver, users)
    }

    #[test]
    fn test_catalogue_listing_is_sorted() {
        let driver = MemoryDriver::new();
        driver.create_namespace("b").unwrap();
        driver.create_namespace("a").unwrap();
        assert_eq!(driver.namespace_list().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_namespace_is_conflict() {
        let driver = MemoryDriver::new();
        driver.create_namespace("a").unwrap();
        assert!(matches!(
            driver.create_namespace("a"),
            Err(DriverError::Conflict(_))
        ));
    }

    #[test]
    fn test_collection_list_unknown_namespace() {
        let driver = MemoryDriver::new();
        assert!(matches!(
            driver.collection_list("nope"),
            Err(DriverError::NotFound(_))
        ));
    }

    #[test]
    fn test_collection_info_reports_primary_key() {
        let driver = MemoryDriver::new();
        driver.create_namespace("db").unwrap();
        driver.create_collection_with_key("db", "t", "email").unwrap();
        let info = driver.collection_info(&CollectionRef::new("db", "t")).unwrap();
        assert_eq!(info.field("primary_key"), Some(&Value::from("email")));
    }

    #[test]
    fn test_filter_then_count() {
        let (driver, users) = seeded();
        let filter = Value::from(json!({"status": "active"})).into_object().unwrap();
        let count = driver
            .run(&Term::table(users).filter(Predicate::Equals(filter)).reduce(Reduction::Count))
            .unwrap()
            .one()
            .unwrap();
        assert_eq!(count, Value::Int(2));
    }

    #[test]
    fn test_between_on_secondary_index() {
        let (driver, users) = seeded();
        driver
            .create_index(&users, "age", "age", IndexOptions::default())
            .unwrap();
        let rows = driver
            .run(&Term::table(users.clone()).between(
                "age",
                Bound::Value(Value::Int(26)),
                Bound::Value(Value::Int(35)),
            ))
            .unwrap()
            .all()
            .unwrap();
        assert_eq!(rows.len(), 1);

        let rows = driver
            .run(&Term::table(users).between(
                "age",
                Bound::Value(Value::Int(25)),
                Bound::Value(Value::Int(36)),
            ))
            .unwrap()
            .all()
            .unwrap();
        let names: Vec<_> = rows.iter().filter_map(|r| r.field("name")).collect();
        assert_eq!(
            names,
            vec![&Value::from("Bob"), &Value::from("Alice"), &Value::from("Charlie")]
        );
    }

    #[test]
    fn test_between_unknown_index_is_not_found() {
        let (driver, users) = seeded();
        let err = driver
            .run(&Term::table(users).between("age", Bound::MinVal, Bound::MaxVal))
            .unwrap_err();
        assert!(matches!(err, DriverError::NotFound(_)));
    }

    #[test]
    fn test_between_requires_table_source() {
        let (driver, users) = seeded();
        let err = driver
            .run(&Term::table(users).limit(1).between("id", Bound::MinVal, Bound::MaxVal))
            .unwrap_err();
        assert!(matches!(err, DriverError::InvalidQuery(_)));
    }

    #[test]
    fn test_group_by_status_counts() {
        let (driver, users) = seeded();
        let groups = driver
            .run(&Term::table(users).group("status", Some(Reduction::Count)))
            .unwrap()
            .all()
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].field("group"), Some(&Value::from("active")));
        assert_eq!(groups[0].field("reduction"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_eq_join_on_primary_key() {
        let (driver, users) = seeded();
        driver.create_collection("test_db", "orders").unwrap();
        let orders = users.sibling("orders");
        driver
            .write(&WriteTerm::Insert {
                collection: orders.clone(),
                documents: vec![
                    Value::from(json!({"id": "o1", "user_id": "1"})),
                    Value::from(json!({"id": "o2", "user_id": "9"})),
                ],
                conflict: Conflict::Error,
            })
            .unwrap();
        let rows = driver
            .run(&Term::table(orders).eq_join("user_id", users, None))
            .unwrap()
            .all()
            .unwrap();
        assert_eq!(rows.len(), 1);
        let right = rows[0].field("right").unwrap();
        assert_eq!(right.field("name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn test_between_multi_index_returns_each_row_once() {
        let (driver, users) = seeded();
        driver
            .write(&WriteTerm::Insert {
                collection: users.clone(),
                documents: vec![
                    Value::from(json!({"id": "4", "name": "Dana", "scores": [3, 5, 7]})),
                    Value::from(json!({"id": "5", "name": "Eve", "scores": [1, 9]})),
                ],
                conflict: Conflict::Error,
            })
            .unwrap();
        driver
            .create_index(
                &users,
                "scores",
                "scores",
                IndexOptions {
                    multi: true,
                    geo: false,
                },
            )
            .unwrap();

        // Dana has three scores in range but appears once.
        let rows = driver
            .run(&Term::table(users).between(
                "scores",
                Bound::Value(Value::Int(2)),
                Bound::Value(Value::Int(8)),
            ))
            .unwrap()
            .all()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field("name"), Some(&Value::from("Dana")));
    }

    #[test]
    fn test_between_on_geo_index_is_invalid_query() {
        let (driver, users) = seeded();
        driver
            .create_index(
                &users,
                "location",
                "location",
                IndexOptions {
                    multi: false,
                    geo: true,
                },
            )
            .unwrap();
        let err = driver
            .run(&Term::table(users).between("location", Bound::MinVal, Bound::MaxVal))
            .unwrap_err();
        assert!(matches!(err, DriverError::InvalidQuery(_)));
    }

    #[test]
    fn test_eq_join_on_secondary_index() {
        let (driver, users) = seeded();
        driver.create_collection("test_db", "badges").unwrap();
        let badges = users.sibling("badges");
        driver
            .write(&WriteTerm::Insert {
                collection: badges.clone(),
                documents: vec![
                    Value::from(json!({"id": "b1", "label": "gold", "level": "active"})),
                    Value::from(json!({"id": "b2", "label": "grey", "level": "inactive"})),
                ],
                conflict: Conflict::Error,
            })
            .unwrap();
        driver
            .create_index(&badges, "level", "level", IndexOptions::default())
            .unwrap();

        let rows = driver
            .run(&Term::table(users).eq_join("status", badges, Some("level".into())))
            .unwrap()
            .all()
            .unwrap();
        assert_eq!(rows.len(), 3);
        let labels: Vec<_> = rows
            .iter()
            .filter_map(|r| r.field("right").and_then(|b| b.field("label")))
            .collect();
        assert_eq!(
            labels,
            vec![&Value::from("gold"), &Value::from("grey"), &Value::from("gold")]
        );
    }

    #[test]
    fn test_eq_join_unknown_index_is_not_found() {
        let (driver, users) = seeded();
        let err = driver
            .run(&Term::table(users.clone()).eq_join("status", users, Some("nope".into())))
            .unwrap_err();
        assert!(matches!(err, DriverError::NotFound(_)));
    }

    #[test]
    fn test_index_status_records() {
        let (driver, users) = seeded();
        driver
            .create_index(
                &users,
                "tags",
                "tags",
                IndexOptions {
                    multi: true,
                    geo: false,
                },
            )
            .unwrap();
        driver.set_index_state(&users, "tags", false, true).unwrap();
        let status = driver.index_status(&users).unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].field("ready"), Some(&Value::Bool(false)));
        assert_eq!(status[0].field("multi"), Some(&Value::Bool(true)));
        assert_eq!(status[0].field("outdated"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_delete_by_key() {
        let (driver, users) = seeded();
        let resp = driver
            .write(&WriteTerm::DeleteByKey {
                collection: users.clone(),
                key: Value::from("2"),
            })
            .unwrap();
        assert_eq!(resp.deleted, 1);
        let resp = driver
            .write(&WriteTerm::DeleteByKey {
                collection: users,
                key: Value::from("2"),
            })
            .unwrap();
        assert_eq!(resp.deleted, 0);
    }
}
