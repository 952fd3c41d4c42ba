//! Repeated-entry lists.
//!
//! An [`EntryList`] is an ordered sequence of records of one category (medications, economic
//! activities, travel records, ...). Every record carries a [`RecordId`] assigned once when the
//! record enters the list; removing a record never touches the tokens of its siblings.
//!
//! Lists are persistent values: every operation returns a new list and leaves the receiver
//! untouched. Records sit behind an `Arc`, so an edit replaces exactly one record while every
//! sibling stays shared with the previous list.
//!
//! Positions that are out of bounds are no-ops rather than errors. They legitimately arise when
//! a stale edit races a removal.

use crate::IntakeResult;
use intake_uuid::RecordId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A record type that can live in an [`EntryList`].
pub trait EntryRecord: Clone + Default + Serialize {
    /// Names the editable fields of the record.
    type Field: Copy + fmt::Debug;

    /// Returns a copy of the record with `field` set from user input.
    ///
    /// Numeric fields clamp their input here.
    fn with_field(&self, field: Self::Field, value: &str) -> Self;

    /// Builds a record from a stored JSON object, tolerating missing or mistyped fields.
    fn from_json(object: &Map<String, Value>) -> Self;
}

/// One record together with its identity token.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<R> {
    id: RecordId,
    record: Arc<R>,
}

impl<R> Entry<R> {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    /// True when both entries share the same record allocation.
    pub fn shares_record_with(&self, other: &Entry<R>) -> bool {
        Arc::ptr_eq(&self.record, &other.record)
    }
}

impl<R> Deref for Entry<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

/// Ordered list of records with stable identity tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryList<R> {
    entries: Vec<Entry<R>>,
}

impl<R> Default for EntryList<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R: EntryRecord> EntryList<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list holding one blank record.
    pub fn seeded() -> Self {
        Self::new().append_blank()
    }

    /// Appends `seed` under a fresh token.
    pub fn append(&self, seed: R) -> Self {
        let mut entries = self.entries.clone();
        entries.push(Entry {
            id: RecordId::new(),
            record: Arc::new(seed),
        });
        Self { entries }
    }

    pub fn append_blank(&self) -> Self {
        self.append(R::default())
    }

    /// Replaces one field of the record at `position`.
    pub fn update_field(&self, position: usize, field: R::Field, value: &str) -> Self {
        let Some(current) = self.entries.get(position) else {
            tracing::debug!(position, len = self.len(), ?field, "update past end of list ignored");
            return self.clone();
        };

        let mut entries = self.entries.clone();
        entries[position] = Entry {
            id: current.id,
            record: Arc::new(current.record.with_field(field, value)),
        };
        Self { entries }
    }

    /// Removes the record at `position`.
    pub fn remove(&self, position: usize) -> Self {
        if position >= self.entries.len() {
            tracing::debug!(position, len = self.len(), "remove past end of list ignored");
            return self.clone();
        }

        let mut entries = self.entries.clone();
        entries.remove(position);
        Self { entries }
    }

    /// Builds a list from stored JSON elements.
    ///
    /// A stored canonical `id` is kept unless another record already claimed it; any other
    /// record gets a fresh token. Elements that are not objects become blank records.
    pub fn from_values(values: &[Value]) -> Self {
        let mut seen = HashSet::new();
        let entries = values
            .iter()
            .map(|value| {
                let record = match value.as_object() {
                    Some(object) => R::from_json(object),
                    None => {
                        tracing::warn!(element = %value, "list element is not an object; using a blank record");
                        R::default()
                    }
                };

                let stored = value
                    .get("id")
                    .and_then(Value::as_str)
                    .and_then(|token| RecordId::parse(token).ok())
                    .filter(|id| !seen.contains(id));
                let id = stored.unwrap_or_else(RecordId::new);
                seen.insert(id);

                Entry {
                    id,
                    record: Arc::new(record),
                }
            })
            .collect();

        Self { entries }
    }
}

impl<R> EntryList<R> {
    pub fn get(&self, position: usize) -> Option<&Entry<R>> {
        self.entries.get(position)
    }

    /// Current position of the record carrying `id`.
    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Like [`EntryList::position_of`], for a token received as text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::IntakeError::RecordId`] if `token` is not a canonical token.
    pub fn position_of_token(&self, token: &str) -> IntakeResult<Option<usize>> {
        let id = RecordId::parse(token)?;
        Ok(self.position_of(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<R>> {
        self.entries.iter()
    }

    /// Iterates over the records, without their tokens.
    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.entries.iter().map(|entry| entry.record())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Serialize)]
struct StoredEntry<'a, R> {
    id: RecordId,
    #[serde(flatten)]
    record: &'a R,
}

impl<R: Serialize> Serialize for EntryList<R> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.entries.iter().map(|entry| StoredEntry {
            id: entry.id,
            record: entry.record.as_ref(),
        }))
    }
}

impl<'de, R: EntryRecord> Deserialize<'de> for EntryList<R> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        Ok(Self::from_values(&values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Medication, MedicationField};
    use serde_json::json;

    fn medication(name: &str) -> Medication {
        Medication {
            name: name.into(),
            ..Medication::default()
        }
    }

    fn two_medications() -> EntryList<Medication> {
        EntryList::new()
            .append(medication("Metformina"))
            .append(medication("Losartán"))
    }

    #[test]
    fn append_assigns_distinct_tokens() {
        let list = two_medications();
        assert_eq!(list.len(), 2);
        assert_ne!(list.get(0).map(Entry::id), list.get(1).map(Entry::id));
    }

    #[test]
    fn append_leaves_original_untouched() {
        let original = two_medications();
        let grown = original.append_blank();
        assert_eq!(original.len(), 2);
        assert_eq!(grown.len(), 3);
    }

    #[test]
    fn remove_of_appended_record_restores_list() {
        let list = two_medications();
        let grown = list.append(medication("Omeprazol"));
        let added = grown.get(2).map(Entry::id).expect("appended entry");

        let position = grown.position_of(added).expect("position");
        let restored = grown.remove(position);

        assert_eq!(restored, list);
        let ids: Vec<_> = restored.iter().map(Entry::id).collect();
        let original_ids: Vec<_> = list.iter().map(Entry::id).collect();
        assert_eq!(ids, original_ids);
    }

    #[test]
    fn remove_keeps_sibling_tokens() {
        let list = two_medications().append(medication("Omeprazol"));
        let last = list.get(2).map(Entry::id);

        let shorter = list.remove(0);
        assert_eq!(shorter.len(), 2);
        assert_eq!(shorter.get(1).map(Entry::id), last);
    }

    #[test]
    fn update_field_replaces_only_target_record() {
        let list = two_medications();
        let edited = list.update_field(1, MedicationField::Dose, "50 mg");

        assert_eq!(edited.get(1).map(|e| e.dose.as_str()), Some("50 mg"));
        assert_eq!(list.get(1).map(|e| e.dose.as_str()), Some(""));
        assert_eq!(edited.get(1).map(Entry::id), list.get(1).map(Entry::id));

        let untouched = edited.get(0).expect("first");
        assert!(untouched.shares_record_with(list.get(0).expect("first")));
    }

    #[test]
    fn out_of_bounds_positions_are_no_ops() {
        let list = two_medications();
        assert_eq!(list.remove(5), list);
        assert_eq!(list.update_field(2, MedicationField::Name, "x"), list);
    }

    #[test]
    fn stored_tokens_are_kept_and_duplicates_replaced() {
        let token = "550e8400e29b41d4a716446655440000";
        let list: EntryList<Medication> = EntryList::from_values(&[
            json!({ "id": token, "name": "Aspirina" }),
            json!({ "id": token, "name": "Paracetamol" }),
            json!({ "id": "not-a-token", "name": "Insulina" }),
        ]);

        assert_eq!(list.get(0).map(|e| e.id().to_string()), Some(token.to_string()));
        assert_ne!(list.get(1).map(|e| e.id().to_string()), Some(token.to_string()));
        assert_eq!(list.get(2).map(|e| e.name.as_str()), Some("Insulina"));
    }

    #[test]
    fn malformed_elements_become_blank_records() {
        let list: EntryList<Medication> =
            EntryList::from_values(&[json!("Aspirina"), json!(null), json!({ "dose": 5 })]);

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0).map(|e| e.record().clone()), Some(Medication::default()));
        assert_eq!(list.get(2).map(|e| e.dose.as_str()), Some("5"));
    }

    #[test]
    fn serializes_token_beside_record_fields() {
        let list = EntryList::new().append(medication("Metformina"));
        let value = serde_json::to_value(&list).expect("serialize");

        let first = &value[0];
        assert_eq!(first["name"], json!("Metformina"));
        assert!(first["id"].as_str().is_some_and(RecordId::is_canonical));

        let back: EntryList<Medication> = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, list);
    }

    #[test]
    fn token_lookup_rejects_malformed_text() {
        let list = two_medications();
        let id = list.get(1).map(Entry::id).expect("entry");

        assert_eq!(list.position_of_token(&id.to_string()).expect("valid"), Some(1));
        assert!(list.position_of_token("123").is_err());
    }
}
