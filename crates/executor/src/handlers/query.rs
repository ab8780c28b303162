//! Query builder: plain scans and the advanced read shapes.

use std::time::Instant;

use docbridge_core::{CollectionRef, Document, Driver, Predicate, Term};

use crate::command::AdvancedQuery;
use crate::convert::convert_result;
use crate::output::{AdvancedResult, QueryResult};
use crate::{Output, Result};

/// Scan, then filter, then order, then limit.
pub(crate) fn build_query(
    collection: CollectionRef,
    filter: Option<Document>,
    order_by: Option<String>,
    limit: usize,
) -> Term {
    let mut term = Term::table(collection);
    if let Some(filter) = filter {
        term = term.filter(Predicate::Equals(filter));
    }
    if let Some(field) = order_by {
        term = term.order_by(field);
    }
    term.limit(limit)
}

/// Term for one advanced read shape, capped at `limit`.
pub(crate) fn build_advanced(collection: CollectionRef, query: AdvancedQuery, limit: usize) -> Term {
    let table = Term::table(collection.clone());
    let shaped = match query {
        AdvancedQuery::EqJoin {
            field,
            target,
            index,
        } => table.eq_join(field, collection.sibling(target), index),
        AdvancedQuery::Between {
            index,
            lower,
            upper,
        } => table.between(index, lower, upper),
        AdvancedQuery::Contains { field, value } => {
            table.filter(Predicate::Contains { field, value })
        }
        AdvancedQuery::Map { fields } => table.pluck(fields),
    };
    shaped.limit(limit)
}

/// Handle QueryTable command.
pub fn query_table(
    driver: &dyn Driver,
    collection: CollectionRef,
    filter: Option<Document>,
    order_by: Option<String>,
    limit: usize,
) -> Result<Output> {
    let term = build_query(collection.clone(), filter, order_by, limit);

    let start = Instant::now();
    let results = convert_result(
        driver.run(&term).and_then(|cursor| cursor.all()),
        "query_table",
    )?;
    let execution_time_ms = start.elapsed().as_micros() as f64 / 1000.0;

    Ok(Output::Query(QueryResult {
        namespace: collection.namespace,
        collection: collection.collection,
        count: results.len(),
        results,
        execution_time_ms,
    }))
}

/// Handle AdvancedQuery command.
pub fn advanced_query(
    driver: &dyn Driver,
    collection: CollectionRef,
    query: AdvancedQuery,
    limit: usize,
) -> Result<Output> {
    let operation = query.operation();
    let term = build_advanced(collection.clone(), query, limit);
    let results = convert_result(driver.run(&term).and_then(|cursor| cursor.all()), operation)?;

    Ok(Output::Advanced(AdvancedResult {
        namespace: collection.namespace,
        collection: collection.collection,
        operation: operation.to_string(),
        count: results.len(),
        results,
    }))
}
