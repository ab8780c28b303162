//! Catalogue command handlers.

use docbridge_core::{CollectionRef, Driver};

use super::{doc_count_or_zero, index_names_or_empty, primary_key};
use crate::convert::convert_result;
use crate::output::{DatabaseList, TableInfo, TableList};
use crate::{Output, Result};

/// Handle ListDatabases command.
pub fn list_databases(driver: &dyn Driver) -> Result<Output> {
    let databases = convert_result(driver.namespace_list(), "list_databases")?;
    Ok(Output::Databases(DatabaseList { databases }))
}

/// Handle ListTables command.
pub fn list_tables(driver: &dyn Driver, namespace: String) -> Result<Output> {
    let tables = convert_result(driver.collection_list(&namespace), "list_tables")?;
    Ok(Output::Tables(TableList { namespace, tables }))
}

/// Handle TableInfo command.
///
/// The info record is required; index names and count are best effort.
pub fn table_info(driver: &dyn Driver, collection: CollectionRef) -> Result<Output> {
    let primary_key = primary_key(driver, &collection, "table_info")?;
    let indexes = index_names_or_empty(driver, &collection);
    let doc_count = doc_count_or_zero(driver, &collection);
    Ok(Output::TableInfo(TableInfo {
        namespace: collection.namespace,
        collection: collection.collection,
        primary_key,
        indexes,
        doc_count,
    }))
}
