//! Index inspector.

use docbridge_core::{CollectionRef, Driver, Value};

use crate::convert::convert_result;
use crate::output::{IndexDescriptor, IndexReport};
use crate::{Output, Result};

fn flag(status: &Value, name: &str) -> bool {
    status
        .field(name)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Extract a descriptor from a raw status record; absent flags are false.
pub(crate) fn describe(status: &Value) -> IndexDescriptor {
    IndexDescriptor {
        name: status
            .field("index")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        ready: flag(status, "ready"),
        multi: flag(status, "multi"),
        geo: flag(status, "geo"),
        outdated: flag(status, "outdated"),
    }
}

/// Handle IndexInfo command.
pub fn index_info(driver: &dyn Driver, collection: CollectionRef) -> Result<Output> {
    let statuses = convert_result(driver.index_status(&collection), "index_info")?;
    Ok(Output::Indexes(IndexReport {
        namespace: collection.namespace,
        collection: collection.collection,
        indexes: statuses.iter().map(describe).collect(),
    }))
}
