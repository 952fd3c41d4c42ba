//! Loading stored medical files into the editable model.
//!
//! The persistence API returns `{ "medical_file": { <section>: {...}, ... }, "user": {...} }`.
//! Every section is optional; an absent or null section starts from its defaults.

use crate::model::IntakeModel;
use crate::normalize::normalize_section;
use crate::schema::{Section, SectionKind};
use crate::{IntakeError, IntakeResult};
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads and parses a JSON record file.
///
/// # Errors
///
/// Returns [`IntakeError::FileRead`] if the file cannot be read and
/// [`IntakeError::Deserialization`] if it is not valid JSON.
pub fn read_record_file(path: &Path) -> IntakeResult<Value> {
    let content = fs::read_to_string(path).map_err(IntakeError::FileRead)?;
    serde_json::from_str(&content).map_err(IntakeError::Deserialization)
}

/// Reads a medical file from disk and normalizes it into a model.
///
/// # Errors
///
/// See [`read_record_file`]. Normalization itself never fails.
pub fn load_medical_file(path: &Path) -> IntakeResult<(IntakeModel, PatientContext)> {
    let value = read_record_file(path)?;
    tracing::info!(path = %path.display(), "loaded medical file");
    Ok((
        IntakeModel::from_medical_file(&value),
        PatientContext::from_response(&value),
    ))
}

impl IntakeModel {
    /// Builds the model from a medical file response, or from the bare `medical_file` object.
    pub fn from_medical_file(response: &Value) -> Self {
        let medical_file = response.get("medical_file").unwrap_or(response);

        Self {
            non_pathological_background: section_from(medical_file),
            pathological_background: section_from(medical_file),
            family_background: section_from(medical_file),
            gynecological_background: section_from(medical_file),
        }
    }
}

fn section_from<S: Section>(medical_file: &Value) -> S {
    let kind = S::KIND;
    let stored = std::iter::once(kind.key())
        .chain(kind.legacy_keys().iter().copied())
        .filter_map(|key| medical_file.get(key))
        .find(|value| !value.is_null());

    match stored {
        Some(value) => normalize_section::<S>(value),
        None => {
            tracing::debug!(section = kind.key(), "section not stored; using defaults");
            S::default()
        }
    }
}

/// Read-only patient facts shown next to the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientContext {
    pub birth_day: Option<NaiveDate>,
}

impl PatientContext {
    /// Reads `user.birth_day` (`YYYY-MM-DD`) from a medical file response.
    pub fn from_response(response: &Value) -> Self {
        let birth_day = response
            .get("user")
            .and_then(|user| user.get("birth_day"))
            .and_then(Value::as_str)
            .and_then(|raw| {
                let date = raw.get(..10).unwrap_or(raw);
                NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
            });
        Self { birth_day }
    }

    /// Age in whole years on `today`; `None` without a birth date or for future dates.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let birth = self.birth_day?;
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }
}

/// Section keys present in a stored medical file, in canonical order.
pub fn stored_sections(response: &Value) -> Vec<SectionKind> {
    let medical_file = response.get("medical_file").unwrap_or(response);
    SectionKind::ALL
        .into_iter()
        .filter(|kind| {
            std::iter::once(kind.key())
                .chain(kind.legacy_keys().iter().copied())
                .any(|key| medical_file.get(key).is_some_and(|v| !v.is_null()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FamilyBackground;
    use serde_json::json;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn legacy_pathological_key_is_read() {
        let model = IntakeModel::from_medical_file(&json!({
            "medical_file": {
                "patological_background": { "allergies": "Penicilina", "takes_medications": true },
            }
        }));
        assert_eq!(model.pathological_background.allergies, "Penicilina");
        assert!(model.pathological_background.takes_medications);
    }

    #[test]
    fn missing_and_null_sections_use_defaults() {
        let model = IntakeModel::from_medical_file(&json!({
            "medical_file": { "family_background": null }
        }));
        assert_eq!(model.family_background, FamilyBackground::default());
        assert_eq!(model.non_pathological_background.economic_activities.len(), 1);
    }

    #[test]
    fn bare_medical_file_is_accepted() {
        let model = IntakeModel::from_medical_file(&json!({
            "gynecological_background": { "pregnancies": 2, "contraceptive_method": "DIU" }
        }));
        assert_eq!(model.gynecological_background.pregnancies, "2");
        assert_eq!(model.gynecological_background.contraceptive_method, "DIU");
    }

    #[test]
    fn stored_sections_lists_present_keys() {
        let sections = stored_sections(&json!({
            "medical_file": {
                "patological_background": {},
                "non_pathological_background": {},
                "gynecological_background": null,
            }
        }));
        assert_eq!(
            sections,
            vec![SectionKind::NonPathological, SectionKind::Pathological]
        );
    }

    #[test]
    fn age_counts_completed_years() {
        let context = PatientContext::from_response(&json!({
            "user": { "birth_day": "1990-06-15" }
        }));
        assert_eq!(context.age_on(date(2024, 6, 14)), Some(33));
        assert_eq!(context.age_on(date(2024, 6, 15)), Some(34));
        assert_eq!(context.age_on(date(1980, 1, 1)), None);
        assert_eq!(PatientContext::default().age_on(date(2024, 1, 1)), None);
    }

    #[test]
    fn birth_day_accepts_timestamps() {
        let context = PatientContext::from_response(&json!({
            "user": { "birth_day": "1985-02-03T00:00:00" }
        }));
        assert_eq!(context.birth_day, Some(date(1985, 2, 3)));
    }

    #[test]
    fn loads_medical_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "{}",
            json!({
                "medical_file": { "non_pathological_background": { "blood_type": "O+" } },
                "user": { "birth_day": "2000-01-01" }
            })
        )
        .expect("write");

        let (model, context) = load_medical_file(file.path()).expect("load");
        assert_eq!(model.non_pathological_background.identity.blood_type, "O+");
        assert_eq!(context.birth_day, Some(date(2000, 1, 1)));
    }

    #[test]
    fn unreadable_or_invalid_files_are_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            read_record_file(&missing),
            Err(IntakeError::FileRead(_))
        ));

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, "{ not json").expect("write");
        assert!(matches!(
            read_record_file(&invalid),
            Err(IntakeError::Deserialization(_))
        ));
    }
}
