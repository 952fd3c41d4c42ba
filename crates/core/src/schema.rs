//! Schema and defaults registry.
//!
//! Every section of the intake model has one canonical defaults object: a JSON object naming
//! each recognized field with its zero value (`""`, `false`, `[]`, or a one-element list holding
//! a blank seed record). The objects are derived once from the typed sections' `Default`
//! implementations, with the identity tokens of seed records stripped so that every session
//! mints its own.

use crate::model::{
    FamilyBackground, GynecologicalBackground, NonPathologicalBackground, PathologicalBackground,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// The four independent categories of the intake form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    NonPathological,
    Pathological,
    Family,
    Gynecological,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::NonPathological,
        SectionKind::Pathological,
        SectionKind::Family,
        SectionKind::Gynecological,
    ];

    /// Canonical JSON key of the section.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::NonPathological => "non_pathological_background",
            SectionKind::Pathological => "pathological_background",
            SectionKind::Family => "family_background",
            SectionKind::Gynecological => "gynecological_background",
        }
    }

    /// Alternative section keys found in stored records.
    pub fn legacy_keys(self) -> &'static [&'static str] {
        match self {
            SectionKind::Pathological => &["patological_background"],
            _ => &[],
        }
    }

    /// Resolves a section from its canonical or legacy key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == key || kind.legacy_keys().iter().any(|k| *k == key))
    }

    /// `(canonical, legacy)` column names accepted for fields of this section.
    pub fn aliases(self) -> &'static [(&'static str, &'static str)] {
        match self {
            SectionKind::NonPathological => &[
                ("tattoos", "tattoos_bool"),
                ("piercings", "piercings_bool"),
                ("economic_activities", "economic_activities_json"),
                ("education_records", "education_records_json"),
                ("travel_records", "recent_travel_list_json"),
                ("exercise_activities", "exercise_activities_json"),
            ],
            SectionKind::Pathological => &[
                ("personal_diseases", "personal_diseases_list"),
                ("medications", "medications_list"),
                ("hospitalizations", "hospitalizations_list"),
                ("traumatisms", "traumatisms_list"),
                ("transfusions", "transfusions_list"),
            ],
            SectionKind::Family | SectionKind::Gynecological => &[],
        }
    }

    /// Every recognized field of the section.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            SectionKind::NonPathological => NON_PATHOLOGICAL_FIELDS,
            SectionKind::Pathological => PATHOLOGICAL_FIELDS,
            SectionKind::Family => FAMILY_FIELDS,
            SectionKind::Gynecological => GYNECOLOGICAL_FIELDS,
        }
    }

    fn index(self) -> usize {
        match self {
            SectionKind::NonPathological => 0,
            SectionKind::Pathological => 1,
            SectionKind::Family => 2,
            SectionKind::Gynecological => 3,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A typed section of the intake model.
pub trait Section: Serialize + DeserializeOwned + Default + Clone {
    const KIND: SectionKind;

    /// Seeds the lists whose gating flag is already set. Called once a stored section has
    /// been materialized.
    fn seed_flagged_lists(&mut self) {}
}

/// Returns the canonical defaults object of a section.
pub fn defaults(kind: SectionKind) -> &'static Map<String, Value> {
    static DEFAULTS: OnceLock<[Map<String, Value>; 4]> = OnceLock::new();

    let all = DEFAULTS.get_or_init(|| {
        [
            default_object::<NonPathologicalBackground>(),
            default_object::<PathologicalBackground>(),
            default_object::<FamilyBackground>(),
            default_object::<GynecologicalBackground>(),
        ]
    });
    &all[kind.index()]
}

fn default_object<S: Section>() -> Map<String, Value> {
    match serde_json::to_value(S::default()) {
        Ok(Value::Object(mut map)) => {
            for value in map.values_mut() {
                strip_record_ids(value);
            }
            map
        }
        Ok(other) => {
            tracing::error!(section = S::KIND.key(), shape = ?other, "section default is not an object");
            Map::new()
        }
        Err(e) => {
            tracing::error!(section = S::KIND.key(), error = %e, "failed to serialize section default");
            Map::new()
        }
    }
}

fn strip_record_ids(value: &mut Value) {
    if let Value::Array(records) = value {
        for record in records.iter_mut().filter_map(Value::as_object_mut) {
            record.remove("id");
        }
    }
}

const NON_PATHOLOGICAL_FIELDS: &[&str] = &[
    "sex",
    "blood_type",
    "ethnic_group",
    "birth_country",
    "birth_state",
    "birth_city",
    "birth_neighborhood",
    "birth_street",
    "birth_ext_int",
    "birth_zip",
    "birth_other_info",
    "residence_country",
    "residence_state",
    "residence_city",
    "residence_neighborhood",
    "residence_street",
    "residence_ext_int",
    "residence_zip",
    "residence_other_info",
    "nationality",
    "languages",
    "education_level",
    "education_details",
    "economic_activity",
    "civil_status",
    "housing_type",
    "cohabitants",
    "dependents",
    "hobbies",
    "social_activities",
    "social_volunteer",
    "social_sports_club",
    "social_cultural_events",
    "social_family_friends",
    "spiritual_practice_type",
    "spiritual_frequency",
    "spiritual_community",
    "spiritual_meaning",
    "spiritual_practices",
    "recent_travel_place",
    "recent_travel_date",
    "recent_travel_duration",
    "recent_travel_reason",
    "recent_travels",
    "does_exercise",
    "exercise_type",
    "exercise_days_per_week",
    "exercise_hours_per_week",
    "exercise_focus",
    "exercise",
    "hygiene",
    "tattoos",
    "piercings",
    "tattoo_locations",
    "piercing_locations",
    "consume_tobacco",
    "tobacco_frequency",
    "tobacco_days_per_week",
    "tobacco_quantity",
    "consume_alcohol",
    "alcohol_frequency",
    "alcohol_days_per_week",
    "alcohol_type",
    "alcohol_quantity",
    "consume_recreational_drugs",
    "recreational_drugs_frequency",
    "recreational_drugs_days_per_week",
    "recreational_drug_type",
    "recreational_drugs_quantity",
    "addictions",
    "meals_per_day",
    "diet_supplements",
    "favorite_foods",
    "foods_to_avoid",
    "economic_activities",
    "education_records",
    "travel_records",
    "exercise_activities",
];

const PATHOLOGICAL_FIELDS: &[&str] = &[
    "visual_disability",
    "hearing_disability",
    "motor_disability",
    "intellectual_disability",
    "disability_description",
    "has_personal_diseases",
    "personal_diseases",
    "takes_medications",
    "medications",
    "has_hospitalizations",
    "hospitalizations",
    "surgeries",
    "has_traumatisms",
    "traumatisms",
    "has_transfusions",
    "transfusions",
    "allergies",
    "others",
];

const FAMILY_FIELDS: &[&str] = &[
    "hypertension",
    "diabetes",
    "cancer",
    "heart_disease",
    "kidney_disease",
    "liver_disease",
    "mental_illness",
    "congenital_malformations",
    "others",
    "hereditary_selections",
];

const GYNECOLOGICAL_FIELDS: &[&str] = &[
    "menarche_age",
    "pregnancies",
    "births",
    "c_sections",
    "abortions",
    "contraceptive_method",
    "contraceptive_since",
    "others",
];
