//! Aggregation dispatcher.
//!
//! `count`, `sum` and `avg` produce a bare scalar; `min` and `max` produce
//! the whole document holding the extreme value; `group` produces a list
//! of `{group, reduction}` objects in the order the driver emits them.

use docbridge_core::{CollectionRef, Document, Driver, Predicate, Reduction, Term, Value};

use crate::command::{AggregateSpec, GroupReduce};
use crate::convert::convert_result;
use crate::output::AggregateResult;
use crate::{Output, Result};

fn group_reduction(reduce: GroupReduce) -> Reduction {
    match reduce {
        GroupReduce::Count => Reduction::Count,
        GroupReduce::Sum { field } => Reduction::Sum(field),
        GroupReduce::Avg { field } => Reduction::Avg(field),
        GroupReduce::Min { field } => Reduction::Min(field),
        GroupReduce::Max { field } => Reduction::Max(field),
    }
}

/// Term for an aggregation over the optionally pre-filtered collection.
pub(crate) fn build_aggregate(
    collection: CollectionRef,
    filter: Option<Document>,
    spec: AggregateSpec,
) -> Term {
    let mut source = Term::table(collection);
    if let Some(filter) = filter {
        source = source.filter(Predicate::Equals(filter));
    }
    match spec {
        AggregateSpec::Count => source.reduce(Reduction::Count),
        AggregateSpec::Sum { field } => source.reduce(Reduction::Sum(field)),
        AggregateSpec::Avg { field } => source.reduce(Reduction::Avg(field)),
        AggregateSpec::Min { field } => source.reduce(Reduction::Min(field)),
        AggregateSpec::Max { field } => source.reduce(Reduction::Max(field)),
        AggregateSpec::Group { field, reduce } => {
            source.group(field, reduce.map(group_reduction))
        }
    }
}

/// Handle Aggregate command.
pub fn aggregate(
    driver: &dyn Driver,
    collection: CollectionRef,
    filter: Option<Document>,
    spec: AggregateSpec,
) -> Result<Output> {
    let operation = spec.operation();
    let field = spec.field().map(str::to_string);
    let grouped = matches!(spec, AggregateSpec::Group { .. });

    let term = build_aggregate(collection.clone(), filter, spec);
    let value = if grouped {
        let groups = convert_result(driver.run(&term).and_then(|c| c.all()), operation)?;
        Value::Array(groups)
    } else {
        convert_result(driver.run(&term).and_then(|c| c.one()), operation)?
    };

    Ok(Output::Aggregate(AggregateResult {
        namespace: collection.namespace,
        collection: collection.collection,
        operation: operation.to_string(),
        field,
        value,
    }))
}
