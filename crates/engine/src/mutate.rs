//! Mutation application: inserts with conflict handling and deletes.

use docbridge_core::{Conflict, Document, DriverResult, Value, WriteResponse, WriteTerm};

use crate::eval::filter_matches;
use crate::store::{Catalog, DatumKey, Table};

pub(crate) fn apply(catalog: &mut Catalog, term: &WriteTerm) -> DriverResult<WriteResponse> {
    let table = catalog.table_mut(term.collection())?;
    let mut resp = WriteResponse::default();

    match term {
        WriteTerm::Insert {
            documents,
            conflict,
            ..
        } => {
            for doc in documents {
                insert_one(table, doc, *conflict, &mut resp);
            }
        }

        WriteTerm::DeleteByKey { key, .. } => {
            if table.rows.remove(&DatumKey(key.clone())).is_some() {
                resp.deleted = 1;
            }
        }

        WriteTerm::DeleteWhere { filter, .. } => {
            let doomed: Vec<DatumKey> = table
                .rows
                .iter()
                .filter(|(_, row)| filter_matches(&Value::Object((*row).clone()), filter))
                .map(|(k, _)| k.clone())
                .collect();
            for key in doomed {
                table.rows.remove(&key);
                resp.deleted += 1;
            }
        }
    }

    Ok(resp)
}

fn insert_one(table: &mut Table, doc: &Value, conflict: Conflict, resp: &mut WriteResponse) {
    let Some(obj) = doc.as_object() else {
        resp.record_error(format!("expected type OBJECT but found {}", doc.type_name()));
        return;
    };
    let mut obj = obj.clone();

    let key = match obj.get(&table.primary_key) {
        Some(Value::Null) | Some(Value::Object(_)) => {
            resp.record_error(format!(
                "primary key `{}` cannot be NULL or OBJECT",
                table.primary_key
            ));
            return;
        }
        Some(k) => k.clone(),
        None => {
            let generated = Value::String(uuid::Uuid::new_v4().to_string());
            obj.insert(table.primary_key.clone(), generated.clone());
            generated
        }
    };

    let slot = DatumKey(key);
    let Some(existing) = table.rows.get_mut(&slot) else {
        table.rows.insert(slot, obj);
        resp.inserted += 1;
        return;
    };

    let next = match conflict {
        Conflict::Error => {
            resp.record_error(format!(
                "Duplicate primary key `{}`: {}",
                table.primary_key,
                serde_json::Value::from(slot.0)
            ));
            return;
        }
        Conflict::Update => {
            let mut merged = existing.clone();
            merge_into(&mut merged, obj);
            merged
        }
        Conflict::Replace => obj,
    };

    if Value::Object(next.clone()).datum_eq(&Value::Object(existing.clone())) {
        resp.unchanged += 1;
    } else {
        *existing = next;
        resp.replaced += 1;
    }
}

/// Deep merge: nested objects merge key by key, anything else overwrites.
pub(crate) fn merge_into(target: &mut Document, patch: Document) {
    for (k, v) in patch {
        let Value::Object(nested) = v else {
            target.insert(k, v);
            continue;
        };
        if let Some(Value::Object(existing)) = target.get_mut(&k) {
            merge_into(existing, nested);
            continue;
        }
        target.insert(k, Value::Object(nested));
    }
}
