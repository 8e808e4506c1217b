use std::marker::PhantomData;

use serde_json::{Map, Value};

use crate::{
    domain::{Mode, Record},
    storage::{case, generate_id, Row, TableClient},
};

use super::{
    notify::{ChangeAction, ChangeEvent},
    Database,
};

/// A partial update: camelCase field names mapped to their new values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Map<String, Value>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Uniform CRUD over one entity kind, served by whichever backend is reachable.
///
/// None of these operations fail from the caller's point of view. Remote
/// errors are logged and the request is answered from the local store.
pub struct EntityStore<'db, T: Record> {
    db: &'db Database,
    _record: PhantomData<T>,
}

impl<'db, T: Record> EntityStore<'db, T> {
    pub(super) fn new(db: &'db Database) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    fn table(&self) -> &'static str {
        T::KIND.table_name()
    }

    fn remote(&self) -> Option<&dyn TableClient> {
        self.db.remote.as_deref()
    }

    fn notify(&self, action: ChangeAction) {
        self.db.notifier.notify(ChangeEvent::entity(T::KIND, action));
    }

    /// All records, optionally only those tagged with `mode`.
    pub fn get_all(&self, mode: Option<Mode>) -> Vec<T> {
        if let Some(remote) = self.remote() {
            let filters: Vec<(&str, String)> = mode
                .map(|mode| vec![("mode", mode.stored_label().to_string())])
                .unwrap_or_default();
            match remote.select(self.table(), &filters) {
                Ok(rows) => return rows.into_iter().filter_map(decode_row).collect(),
                Err(err) => tracing::warn!(
                    table = self.table(),
                    error = %err,
                    "remote get_all failed, using local store"
                ),
            }
        }

        self.local_records()
            .into_iter()
            .filter_map(decode)
            .filter(|record: &T| mode.is_none() || record.mode() == mode)
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        if let Some(remote) = self.remote() {
            match remote.select(self.table(), &[("id", id.to_string())]) {
                Ok(rows) => {
                    if let Some(record) = rows.into_iter().find_map(decode_row) {
                        return Some(record);
                    }
                }
                Err(err) => tracing::warn!(table = self.table(), id, error = %err, "remote get_by_id failed"),
            }
        }

        self.local_records()
            .into_iter()
            .find(|value| value_id(value) == Some(id))
            .and_then(decode)
    }

    /// Stores `item` under a new id and returns the stored record.
    ///
    /// Any id already set on `item` is discarded.
    pub fn add(&self, item: T) -> T {
        if let Some(remote) = self.remote() {
            match encode_row(&item) {
                Some(mut row) => {
                    row.remove("id");
                    match remote.insert(self.table(), &row) {
                        Ok(stored) => {
                            self.notify(ChangeAction::Added);
                            return self.stored_or(stored, item);
                        }
                        Err(err) => tracing::error!(
                            table = self.table(),
                            error = %err,
                            "remote insert failed, saving to local store"
                        ),
                    }
                }
                None => tracing::error!(table = self.table(), "record could not be encoded"),
            }
        }

        self.add_local(item)
    }

    fn add_local(&self, mut item: T) -> T {
        item.set_id(generate_id());
        match serde_json::to_value(&item) {
            Ok(value) => {
                let mut all = self.local_records();
                all.push(value);
                self.db.local.write(T::KIND, &all);
            }
            Err(err) => tracing::error!(error = %err, "record could not be encoded"),
        }
        self.notify(ChangeAction::Added);
        item
    }

    /// Applies `patch` to the record with `id`.
    ///
    /// Returns `None`, without notifying, when no such record exists locally
    /// (after a remote failure or with no remote configured). A remote update
    /// that succeeds is never repeated locally.
    pub fn update(&self, id: &str, patch: &Patch) -> Option<T> {
        let mut fields = patch.fields().clone();
        fields.remove("id");

        if let Some(remote) = self.remote() {
            let row = match case::to_remote(&Value::Object(fields.clone())) {
                Value::Object(row) => row,
                _ => Row::new(),
            };
            match remote.update(self.table(), id, &row) {
                Ok(stored) => {
                    self.notify(ChangeAction::Updated);
                    let record = decode_row::<T>(stored);
                    if record.is_none() {
                        tracing::error!(table = self.table(), id, "updated row could not be decoded");
                    }
                    return record;
                }
                Err(err) => tracing::error!(
                    table = self.table(),
                    id,
                    error = %err,
                    "remote update failed, updating local store"
                ),
            }
        }

        let mut all = self.local_records();
        let index = all.iter().position(|value| value_id(value) == Some(id))?;
        let mut merged = all[index].clone();
        if let Value::Object(object) = &mut merged {
            object.extend(fields);
        }
        let record: T = decode(merged.clone())?;
        all[index] = merged;
        self.db.local.write(T::KIND, &all);
        self.notify(ChangeAction::Updated);
        Some(record)
    }

    /// Removes the record with `id`. Always reports success.
    pub fn delete(&self, id: &str) -> bool {
        if let Some(remote) = self.remote() {
            match remote.delete(self.table(), id) {
                Ok(()) => {
                    self.notify(ChangeAction::Deleted);
                    return true;
                }
                Err(err) => tracing::error!(
                    table = self.table(),
                    id,
                    error = %err,
                    "remote delete failed, deleting from local store"
                ),
            }
        }

        let remaining: Vec<Value> = self
            .local_records()
            .into_iter()
            .filter(|value| value_id(value) != Some(id))
            .collect();
        self.db.local.write(T::KIND, &remaining);
        self.notify(ChangeAction::Deleted);
        true
    }

    fn local_records(&self) -> Vec<Value> {
        self.db.local.read(T::KIND)
    }

    /// The inserted row as a record; if it cannot be decoded, `item` carrying
    /// whatever id the backend assigned.
    fn stored_or(&self, stored: Row, mut item: T) -> T {
        let assigned = stored.get("id").map(|id| match id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        });
        match decode_row(stored) {
            Some(record) => record,
            None => {
                tracing::error!(table = self.table(), "inserted row could not be decoded");
                if let Some(id) = assigned {
                    item.set_id(id);
                }
                item
            }
        }
    }
}

fn value_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

fn encode_row<T: Record>(item: &T) -> Option<Row> {
    match serde_json::to_value(item).ok().map(|value| case::to_remote(&value)) {
        Some(Value::Object(row)) => Some(row),
        _ => None,
    }
}

fn decode_row<T: Record>(row: Row) -> Option<T> {
    decode(case::from_remote(&Value::Object(normalize_id(row))))
}

/// Numeric primary keys are exposed as strings like every other id.
fn normalize_id(mut row: Row) -> Row {
    if let Some(Value::Number(id)) = row.get("id") {
        let id = id.to_string();
        row.insert("id".into(), Value::String(id));
    }
    row
}

fn decode<T: Record>(value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(err) => {
            let kind = T::KIND;
            tracing::warn!(%kind, error = %err, "skipping undecodable record");
            None
        }
    }
}
