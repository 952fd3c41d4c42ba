//! Hereditary disease selections.
//!
//! The family history form offers a fixed catalog of diseases grouped by body system. A
//! [`HereditarySet`] holds the checked (system, disease) pairs with their details, indexed by the
//! composite key and kept in canonical catalog order so its serialization does not depend on
//! the order in which the boxes were ticked.

use crate::constants::HEREDITARY_SYSTEMS;
use crate::normalize::scalar_text;
use intake_types::NonEmptyText;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Composite key of a selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    system: NonEmptyText,
    disease: NonEmptyText,
}

impl SelectionKey {
    /// Returns `None` when either part is blank.
    pub fn new(system: &str, disease: &str) -> Option<Self> {
        Some(Self {
            system: NonEmptyText::new(system).ok()?,
            disease: NonEmptyText::new(disease).ok()?,
        })
    }

    pub fn system(&self) -> &str {
        self.system.as_str()
    }

    pub fn disease(&self) -> &str {
        self.disease.as_str()
    }

    /// True if the pair appears in the hereditary catalog.
    pub fn in_catalog(&self) -> bool {
        let (system, disease) = self.rank();
        system != usize::MAX && disease != usize::MAX
    }

    /// Position of the system in the catalog, then of the disease within its system.
    ///
    /// Parts missing from the catalog rank last.
    fn rank(&self) -> (usize, usize) {
        HEREDITARY_SYSTEMS
            .iter()
            .position(|(system, _)| *system == self.system())
            .map(|system_pos| {
                let diseases = HEREDITARY_SYSTEMS[system_pos].1;
                let disease_pos = diseases
                    .iter()
                    .position(|disease| *disease == self.disease())
                    .unwrap_or(usize::MAX);
                (system_pos, disease_pos)
            })
            .unwrap_or((usize::MAX, usize::MAX))
    }
}

/// One checked disease and its details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HereditarySelection {
    pub system: String,
    pub disease: String,
    /// Disease name typed by the user when `disease` is "Otro".
    pub other_name: String,
    /// Relatives carrying the disease, comma separated.
    pub carriers: String,
}

impl HereditarySelection {
    fn blank(key: &SelectionKey) -> Self {
        Self {
            system: key.system().to_owned(),
            disease: key.disease().to_owned(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionField {
    OtherName,
    Carriers,
}

/// Set of hereditary selections in canonical order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HereditarySet {
    order: Vec<SelectionKey>,
    index: HashMap<SelectionKey, HereditarySelection>,
}

impl HereditarySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks or unchecks a disease.
    ///
    /// Any present pair is removed, including stored pairs outside the catalog. Only catalog
    /// pairs can be added.
    pub fn toggle(&self, system: &str, disease: &str) -> Self {
        let Some(key) = SelectionKey::new(system, disease) else {
            return self.clone();
        };

        let mut next = self.clone();
        if next.index.remove(&key).is_some() {
            next.order.retain(|k| k != &key);
        } else {
            if !key.in_catalog() {
                tracing::debug!(system, disease, "toggle of unknown hereditary pair ignored");
                return next;
            }
            let selection = HereditarySelection::blank(&key);
            next.index.insert(key.clone(), selection);
            next.order.push(key);
            next.sort();
        }
        next
    }

    /// Updates one detail of a checked disease; no-op if the pair is not checked.
    pub fn update_detail(
        &self,
        system: &str,
        disease: &str,
        field: SelectionField,
        value: &str,
    ) -> Self {
        let Some(key) = SelectionKey::new(system, disease) else {
            return self.clone();
        };
        if !self.index.contains_key(&key) {
            tracing::debug!(system, disease, ?field, "detail update of unchecked pair ignored");
            return self.clone();
        }

        let mut next = self.clone();
        if let Some(selection) = next.index.get_mut(&key) {
            match field {
                SelectionField::OtherName => selection.other_name = value.to_owned(),
                SelectionField::Carriers => selection.carriers = value.to_owned(),
            }
        }
        next
    }

    pub fn contains(&self, system: &str, disease: &str) -> bool {
        SelectionKey::new(system, disease).is_some_and(|key| self.index.contains_key(&key))
    }

    pub fn get(&self, system: &str, disease: &str) -> Option<&HereditarySelection> {
        SelectionKey::new(system, disease).and_then(|key| self.index.get(&key))
    }

    /// Keyed read view of the selections.
    pub fn lookup(&self) -> &HashMap<SelectionKey, HereditarySelection> {
        &self.index
    }

    /// Selections in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &HereditarySelection> {
        self.order.iter().filter_map(|key| self.index.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn sort(&mut self) {
        self.order.sort_by_key(SelectionKey::rank);
    }

    /// Builds a set from stored JSON elements.
    ///
    /// Elements without a non-blank system and disease are skipped. When a pair appears twice
    /// the first occurrence wins.
    pub fn from_values(values: &[Value]) -> Self {
        let mut set = Self::default();
        for value in values {
            let field = |name: &str| value.get(name).map(scalar_text).unwrap_or_default();

            let Some(key) = SelectionKey::new(&field("system"), &field("disease")) else {
                tracing::warn!(element = %value, "skipping malformed hereditary selection");
                continue;
            };
            if set.index.contains_key(&key) {
                tracing::debug!(system = key.system(), disease = key.disease(), "duplicate hereditary selection dropped");
                continue;
            }

            let selection = HereditarySelection {
                system: key.system().to_owned(),
                disease: key.disease().to_owned(),
                other_name: field("other_name"),
                carriers: field("carriers"),
            };
            set.index.insert(key.clone(), selection);
            set.order.push(key);
        }
        set.sort();
        set
    }
}

impl Serialize for HereditarySet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for HereditarySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        Ok(Self::from_values(&values))
    }
}
