//! Command handlers organized by concern.
//!
//! | Module | Commands |
//! |--------|----------|
//! | `catalog` | list_databases, list_tables, table_info |
//! | `query` | query_table, advanced_query |
//! | `aggregate` | aggregate |
//! | `write` | write_data |
//! | `schema` | schema_inspector |
//! | `index` | index_info |
//!
//! Handlers receive already-validated parameters and a borrowed driver.
//! The lookups shared by `table_info` and `schema_inspector` live here.

pub mod aggregate;
pub mod catalog;
pub mod index;
pub mod query;
pub mod schema;
pub mod write;

use docbridge_core::{CollectionRef, Driver, Reduction, Term};
use tracing::warn;

use crate::convert::convert_result;
use crate::Result;

/// Primary key field reported by the driver's info record.
///
/// A failing info call is fatal; an info record without a string
/// `primary_key` yields an empty name.
pub(crate) fn primary_key(
    driver: &dyn Driver,
    collection: &CollectionRef,
    operation: &str,
) -> Result<String> {
    let info = convert_result(driver.collection_info(collection), operation)?;
    Ok(info
        .field("primary_key")
        .and_then(|pk| pk.as_str())
        .unwrap_or_default()
        .to_string())
}

/// Secondary index names; empty when the lookup fails.
pub(crate) fn index_names_or_empty(driver: &dyn Driver, collection: &CollectionRef) -> Vec<String> {
    driver.index_list(collection).unwrap_or_else(|e| {
        warn!(
            target: "docbridge::executor",
            collection = %collection,
            error = %e,
            "Index list unavailable, reporting none"
        );
        Vec::new()
    })
}

/// Total document count; zero when the lookup fails.
pub(crate) fn doc_count_or_zero(driver: &dyn Driver, collection: &CollectionRef) -> u64 {
    let count = driver
        .run(&Term::table(collection.clone()).reduce(Reduction::Count))
        .and_then(|cursor| cursor.one());
    match count {
        Ok(v) => v
            .as_int()
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or_default(),
        Err(e) => {
            warn!(
                target: "docbridge::executor",
                collection = %collection,
                error = %e,
                "Document count unavailable, reporting zero"
            );
            0
        }
    }
}
