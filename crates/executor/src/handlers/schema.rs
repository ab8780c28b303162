//! Schema sampler.

use docbridge_core::{CollectionRef, Driver, Term};

use super::{doc_count_or_zero, index_names_or_empty, primary_key};
use crate::convert::convert_result;
use crate::infer::FieldObservations;
use crate::output::{FieldInfo, SchemaReport};
use crate::{Output, Result};

/// Handle SchemaInspector command.
///
/// Samples up to `sample_size` rows in driver order. Field types come from
/// the first row that carries each field.
pub fn schema_inspector(
    driver: &dyn Driver,
    collection: CollectionRef,
    sample_size: usize,
) -> Result<Output> {
    let primary_key = primary_key(driver, &collection, "schema_inspector")?;
    let indexes = index_names_or_empty(driver, &collection);
    let doc_count = doc_count_or_zero(driver, &collection);

    let sample = convert_result(
        driver
            .run(&Term::table(collection.clone()).limit(sample_size))
            .and_then(|cursor| cursor.all()),
        "schema_inspector",
    )?;

    let mut observations = FieldObservations::new();
    for row in &sample {
        observations.observe(row);
    }
    let fields = observations
        .into_fields()
        .into_iter()
        .map(|(name, field_type)| FieldInfo { name, field_type })
        .collect();

    Ok(Output::Schema(SchemaReport {
        namespace: collection.namespace,
        collection: collection.collection,
        primary_key,
        indexes,
        doc_count,
        sample_size,
        fields,
    }))
}
