//! Write executor.
//!
//! Per-document rejections (duplicate keys, non-object documents) are
//! reported in the summary counters. Only a failure of the write as a
//! whole becomes an error, and then no partial summary is returned.

use docbridge_core::{CollectionRef, Conflict, Driver, WriteTerm};

use crate::command::WriteRequest;
use crate::convert::convert_write;
use crate::output::WriteSummary;
use crate::{Output, Result};

/// Translate a write request into the driver mutation.
pub(crate) fn build_write(collection: CollectionRef, write: WriteRequest) -> WriteTerm {
    let insert = |documents, conflict| WriteTerm::Insert {
        collection: collection.clone(),
        documents,
        conflict,
    };
    match write {
        WriteRequest::Insert { documents } => insert(documents, Conflict::Error),
        WriteRequest::Update { documents } => insert(documents, Conflict::Update),
        WriteRequest::Upsert { documents } => insert(documents, Conflict::Replace),
        WriteRequest::DeleteByKey { key } => WriteTerm::DeleteByKey {
            collection: collection.clone(),
            key,
        },
        WriteRequest::DeleteWhere { filter } => WriteTerm::DeleteWhere {
            collection: collection.clone(),
            filter,
        },
    }
}

/// Handle WriteData command.
pub fn write_data(
    driver: &dyn Driver,
    collection: CollectionRef,
    write: WriteRequest,
) -> Result<Output> {
    let operation = write.operation();
    let term = build_write(collection.clone(), write);
    let resp = convert_write(driver.write(&term), operation)?;

    Ok(Output::Write(WriteSummary {
        namespace: collection.namespace,
        collection: collection.collection,
        operation: operation.to_string(),
        inserted: resp.inserted,
        replaced: resp.replaced,
        unchanged: resp.unchanged,
        deleted: resp.deleted,
        errors: resp.errors,
        first_error: resp.first_error,
    }))
}
