//! Term evaluation against a catalogue snapshot.
//!
//! Evaluation is fully materialized: every intermediate stage is a
//! `Vec<Value>`, which matches how the command layer consumes cursors.

use std::collections::BTreeMap;

use docbridge_core::{Bound, Document, DriverError, DriverResult, Predicate, Reduction, Term, Value};

use crate::store::{Catalog, DatumKey, IndexDef};

/// Result of evaluating a term.
#[derive(Debug)]
pub(crate) enum Datum {
    /// A sequence of rows
    Stream(Vec<Value>),
    /// A single reduced value
    Single(Value),
}

impl Datum {
    fn into_stream(self, stage: &str) -> DriverResult<Vec<Value>> {
        match self {
            Datum::Stream(rows) => Ok(rows),
            Datum::Single(v) => Err(DriverError::invalid_query(format!(
                "cannot apply {} to a single {} value",
                stage,
                v.type_name()
            ))),
        }
    }
}

pub(crate) fn eval(catalog: &Catalog, term: &Term) -> DriverResult<Datum> {
    match term {
        Term::Table(coll) => Ok(Datum::Stream(catalog.table(coll)?.scan())),

        Term::Filter { source, predicate } => {
            let rows = eval(catalog, source)?.into_stream("filter")?;
            Ok(Datum::Stream(
                rows.into_iter().filter(|row| matches(row, predicate)).collect(),
            ))
        }

        Term::OrderBy { source, field } => {
            let mut rows = eval(catalog, source)?.into_stream("order_by")?;
            // Stable; rows lacking the field go last.
            rows.sort_by(|a, b| match (a.field(field), b.field(field)) {
                (Some(x), Some(y)) => x.datum_cmp(y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
            Ok(Datum::Stream(rows))
        }

        Term::Limit { source, n } => {
            let mut rows = eval(catalog, source)?.into_stream("limit")?;
            rows.truncate(*n);
            Ok(Datum::Stream(rows))
        }

        Term::EqJoin {
            source,
            field,
            target,
            index,
        } => {
            let left_rows = eval(catalog, source)?.into_stream("eq_join")?;
            let right = catalog.table(target)?;
            let lookup = match index {
                Some(name) if name != &right.primary_key => Some(
                    right.indexes.get(name).ok_or_else(|| {
                        DriverError::not_found(format!("index `{}` on table `{}`", name, target))
                    })?,
                ),
                _ => None,
            };

            let mut joined = Vec::new();
            for left in left_rows {
                let Some(key) = left.field(field).cloned() else {
                    continue;
                };
                match lookup {
                    None => {
                        if let Some(row) = right.rows.get(&DatumKey(key)) {
                            joined.push(pair(left.clone(), Value::Object(row.clone())));
                        }
                    }
                    Some(def) => {
                        for row in right.rows.values() {
                            if def.keys_of(row).iter().any(|k| k.datum_eq(&key)) {
                                joined.push(pair(left.clone(), Value::Object(row.clone())));
                            }
                        }
                    }
                }
            }
            Ok(Datum::Stream(joined))
        }

        Term::Between {
            source,
            index,
            lower,
            upper,
        } => {
            let Term::Table(coll) = source.as_ref() else {
                return Err(DriverError::invalid_query(
                    "between can only be applied to a table",
                ));
            };
            let table = catalog.table(coll)?;
            let primary;
            let def = if index == &table.primary_key {
                primary = IndexDef {
                    field: table.primary_key.clone(),
                    options: Default::default(),
                    ready: true,
                    outdated: false,
                };
                &primary
            } else {
                table.indexes.get(index).ok_or_else(|| {
                    DriverError::not_found(format!("index `{}` on table `{}`", index, coll))
                })?
            };
            if def.options.geo {
                return Err(DriverError::invalid_query(format!(
                    "index `{}` is a geospatial index",
                    index
                )));
            }

            // Key each matching row by its smallest in-range index key.
            let mut hits: BTreeMap<(DatumKey, DatumKey), Value> = BTreeMap::new();
            for (pk, row) in &table.rows {
                let first = def
                    .keys_of(row)
                    .into_iter()
                    .filter(|k| in_range(k, lower, upper))
                    .min_by(|a, b| a.datum_cmp(b));
                if let Some(key) = first {
                    hits.insert((DatumKey(key), pk.clone()), Value::Object(row.clone()));
                }
            }
            Ok(Datum::Stream(hits.into_values().collect()))
        }

        Term::Pluck { source, fields } => {
            let rows = eval(catalog, source)?.into_stream("pluck")?;
            Ok(Datum::Stream(
                rows.into_iter().map(|row| pluck(&row, fields)).collect(),
            ))
        }

        Term::Reduce { source, reduction } => {
            let rows = eval(catalog, source)?.into_stream("reduction")?;
            reduce(&rows, reduction).map(Datum::Single)
        }

        Term::Group {
            source,
            field,
            reduction,
        } => {
            let rows = eval(catalog, source)?.into_stream("group")?;
            let mut groups: BTreeMap<DatumKey, Vec<Value>> = BTreeMap::new();
            for row in rows {
                if let Some(key) = row.field(field).cloned() {
                    groups.entry(DatumKey(key)).or_default().push(row);
                }
            }

            let mut out = Vec::with_capacity(groups.len());
            for (DatumKey(key), members) in groups {
                let value = match reduction {
                    Some(r) => reduce(&members, r)?,
                    None => Value::Array(members),
                };
                let mut entry = Document::new();
                entry.insert("group".to_string(), key);
                entry.insert("reduction".to_string(), value);
                out.push(Value::Object(entry));
            }
            Ok(Datum::Stream(out))
        }
    }
}

pub(crate) fn matches(row: &Value, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Equals(filter) => filter_matches(row, filter),
        Predicate::Contains { field, value } => match row.field(field) {
            Some(Value::Array(items)) => items.iter().any(|item| item.datum_eq(value)),
            _ => false,
        },
    }
}

pub(crate) fn filter_matches(row: &Value, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(k, expected)| row.field(k).is_some_and(|actual| actual.datum_eq(expected)))
}

fn in_range(key: &Value, lower: &Bound, upper: &Bound) -> bool {
    let above_lower = match lower {
        Bound::MinVal => true,
        Bound::Value(lo) => key.datum_cmp(lo) != std::cmp::Ordering::Less,
        Bound::MaxVal => false,
    };
    let below_upper = match upper {
        Bound::MinVal => false,
        Bound::Value(hi) => key.datum_cmp(hi) == std::cmp::Ordering::Less,
        Bound::MaxVal => true,
    };
    above_lower && below_upper
}

fn pair(left: Value, right: Value) -> Value {
    let mut doc = Document::new();
    doc.insert("left".to_string(), left);
    doc.insert("right".to_string(), right);
    Value::Object(doc)
}

fn pluck(row: &Value, fields: &[String]) -> Value {
    let Some(obj) = row.as_object() else {
        return Value::Object(Document::new());
    };
    Value::Object(
        fields
            .iter()
            .filter_map(|f| obj.get(f).map(|v| (f.clone(), v.clone())))
            .collect(),
    )
}

fn reduce(rows: &[Value], reduction: &Reduction) -> DriverResult<Value> {
    match reduction {
        Reduction::Count => Ok(Value::from(rows.len())),
        Reduction::Sum(field) => sum(rows, field),
        Reduction::Avg(field) => {
            let values = numbers(rows, field)?;
            if values.is_empty() {
                return Err(empty_stream("avg"));
            }
            let total: f64 = values.iter().sum();
            Ok(Value::Float(total / values.len() as f64))
        }
        Reduction::Min(field) => extreme(rows, field, std::cmp::Ordering::Less, "min"),
        Reduction::Max(field) => extreme(rows, field, std::cmp::Ordering::Greater, "max"),
    }
}

fn sum(rows: &[Value], field: &str) -> DriverResult<Value> {
    let mut int_total: Option<i64> = Some(0);
    let mut float_total = 0.0;
    for row in rows {
        match row.field(field) {
            None => continue,
            Some(Value::Int(i)) => {
                int_total = int_total.and_then(|t| t.checked_add(*i));
                float_total += *i as f64;
            }
            Some(Value::Float(f)) => {
                int_total = None;
                float_total += f;
            }
            Some(other) => return Err(not_a_number(field, other)),
        }
    }
    Ok(match int_total {
        Some(t) => Value::Int(t),
        None => Value::Float(float_total),
    })
}

fn numbers(rows: &[Value], field: &str) -> DriverResult<Vec<f64>> {
    rows.iter()
        .filter_map(|row| row.field(field))
        .map(|v| v.as_f64().ok_or_else(|| not_a_number(field, v)))
        .collect()
}

fn extreme(
    rows: &[Value],
    field: &str,
    wanted: std::cmp::Ordering,
    op: &str,
) -> DriverResult<Value> {
    let mut best: Option<(&Value, &Value)> = None;
    for row in rows {
        let Some(v) = row.field(field) else { continue };
        match best {
            Some((current, _)) if v.datum_cmp(current) != wanted => {}
            _ => best = Some((v, row)),
        }
    }
    best.map(|(_, row)| row.clone())
        .ok_or_else(|| empty_stream(op))
}

fn not_a_number(field: &str, v: &Value) -> DriverError {
    DriverError::invalid_query(format!(
        "expected type NUMBER but found {} in field `{}`",
        v.type_name(),
        field
    ))
}

fn empty_stream(op: &str) -> DriverError {
    DriverError::invalid_query(format!("cannot {} over an empty stream", op))
}
