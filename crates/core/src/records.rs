//! Record types held by the repeated-entry lists.
//!
//! Each record is a plain value with a companion `*Field` enum naming its editable fields.
//! Records are built leniently from stored JSON: a missing or mistyped field reads as blank.

use crate::constants::OTHER_OPTION;
use crate::entries::EntryRecord;
use crate::normalize::scalar_text;
use crate::validation::{clamp_days_per_week, clamp_hours_per_week};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

fn text(object: &Map<String, Value>, key: &str) -> String {
    object.get(key).map(scalar_text).unwrap_or_default()
}

fn blank_when_none<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

/// Catalog sectors of an economic activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EconomicSector {
    Health,
    Technology,
    EconomicAdministrative,
    Education,
}

impl EconomicSector {
    pub const ALL: [EconomicSector; 4] = [
        EconomicSector::Health,
        EconomicSector::Technology,
        EconomicSector::EconomicAdministrative,
        EconomicSector::Education,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EconomicSector::Health => "Salud",
            EconomicSector::Technology => "Tecnología",
            EconomicSector::EconomicAdministrative => "Económico administrativos",
            EconomicSector::Education => "Educación",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sector| sector.label() == label)
    }
}

/// Sector of an economic activity: unanswered, a catalog entry, or free text.
///
/// Stored and submitted as a single string, so a free-text answer that happens to match a
/// catalog label reads back as that catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Sector {
    #[default]
    Unset,
    Catalog(EconomicSector),
    Other(String),
}

impl Sector {
    pub fn from_raw(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            Sector::Unset
        } else if raw == OTHER_OPTION {
            Sector::Other(String::new())
        } else if let Some(sector) = EconomicSector::from_label(raw) {
            Sector::Catalog(sector)
        } else {
            Sector::Other(raw.to_owned())
        }
    }

    /// The text submitted for this sector; empty when nothing was entered.
    pub fn as_text(&self) -> &str {
        match self {
            Sector::Unset => "",
            Sector::Catalog(sector) => sector.label(),
            Sector::Other(text) => text,
        }
    }
}

impl Serialize for Sector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_text())
    }
}

/// One paid or unpaid occupation of the patient.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EconomicActivity {
    pub employment_type: String,
    pub sector: Sector,
    pub role: String,
    #[serde(serialize_with = "blank_when_none")]
    pub days_per_week: Option<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EconomicActivityField {
    EmploymentType,
    /// The sector picker; choosing "Otro" switches to free text.
    Sector,
    /// The free-text sector box.
    SectorOther,
    Role,
    DaysPerWeek,
}

impl EntryRecord for EconomicActivity {
    type Field = EconomicActivityField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        match field {
            EconomicActivityField::EmploymentType => next.employment_type = value.to_owned(),
            EconomicActivityField::Sector => {
                next.sector = match (Sector::from_raw(value), &self.sector) {
                    (Sector::Other(text), Sector::Other(previous)) if text.is_empty() => {
                        Sector::Other(previous.clone())
                    }
                    (sector, _) => sector,
                }
            }
            EconomicActivityField::SectorOther => next.sector = Sector::Other(value.to_owned()),
            EconomicActivityField::Role => next.role = value.to_owned(),
            EconomicActivityField::DaysPerWeek => next.days_per_week = clamp_days_per_week(value),
        }
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            employment_type: text(object, "employment_type"),
            sector: Sector::from_raw(&text(object, "sector")),
            role: text(object, "role"),
            days_per_week: clamp_days_per_week(&text(object, "days_per_week")),
        }
    }
}

/// One physical activity.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExerciseActivity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(serialize_with = "blank_when_none")]
    pub days_per_week: Option<u8>,
    #[serde(serialize_with = "blank_when_none")]
    pub hours_per_week: Option<f64>,
    pub focus: String,
    pub note: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseActivityField {
    Kind,
    DaysPerWeek,
    HoursPerWeek,
    Focus,
    Note,
}

impl EntryRecord for ExerciseActivity {
    type Field = ExerciseActivityField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        match field {
            ExerciseActivityField::Kind => next.kind = value.to_owned(),
            ExerciseActivityField::DaysPerWeek => next.days_per_week = clamp_days_per_week(value),
            ExerciseActivityField::HoursPerWeek => {
                next.hours_per_week = clamp_hours_per_week(value)
            }
            ExerciseActivityField::Focus => next.focus = value.to_owned(),
            ExerciseActivityField::Note => next.note = value.to_owned(),
        }
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            kind: text(object, "type"),
            days_per_week: clamp_days_per_week(&text(object, "days_per_week")),
            hours_per_week: clamp_hours_per_week(&text(object, "hours_per_week")),
            focus: text(object, "focus"),
            note: text(object, "note"),
        }
    }
}

/// Education levels, in ascending rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EducationLevel {
    None,
    Primary,
    Secondary,
    HighSchool,
    Technical,
    Bachelor,
    Postgraduate,
    Doctorate,
}

impl EducationLevel {
    /// Recognizes both the stored codes and the labels shown on the form.
    pub fn parse(raw: &str) -> Option<Self> {
        let level = match raw.trim().to_lowercase().as_str() {
            "none" | "ninguno" | "sin estudios" => EducationLevel::None,
            "primary" | "primaria" => EducationLevel::Primary,
            "secondary" | "secundaria" => EducationLevel::Secondary,
            "high-school" | "high_school" | "preparatoria" | "bachillerato" => {
                EducationLevel::HighSchool
            }
            "technical" | "técnica" | "tecnica" | "técnico" => EducationLevel::Technical,
            "bachelor" | "licenciatura" => EducationLevel::Bachelor,
            "postgraduate" | "posgrado" | "maestría" | "maestria" => EducationLevel::Postgraduate,
            "doctorate" | "doctorado" => EducationLevel::Doctorate,
            _ => return None,
        };
        Some(level)
    }
}

/// One completed or ongoing stage of education.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EducationRecord {
    pub level: String,
    pub degree_title: String,
    pub institution: String,
    pub year: String,
    pub notes: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EducationRecordField {
    Level,
    DegreeTitle,
    Institution,
    Year,
    Notes,
}

impl EntryRecord for EducationRecord {
    type Field = EducationRecordField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            EducationRecordField::Level => &mut next.level,
            EducationRecordField::DegreeTitle => &mut next.degree_title,
            EducationRecordField::Institution => &mut next.institution,
            EducationRecordField::Year => &mut next.year,
            EducationRecordField::Notes => &mut next.notes,
        };
        *slot = value.to_owned();
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            level: text(object, "level"),
            degree_title: text(object, "degree_title"),
            institution: text(object, "institution"),
            year: text(object, "year"),
            notes: text(object, "notes"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TravelRecord {
    pub place: String,
    pub date: String,
    pub duration: String,
    pub reason: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelRecordField {
    Place,
    Date,
    Duration,
    Reason,
}

impl EntryRecord for TravelRecord {
    type Field = TravelRecordField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            TravelRecordField::Place => &mut next.place,
            TravelRecordField::Date => &mut next.date,
            TravelRecordField::Duration => &mut next.duration,
            TravelRecordField::Reason => &mut next.reason,
        };
        *slot = value.to_owned();
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            place: text(object, "place"),
            date: text(object, "date"),
            duration: text(object, "duration"),
            reason: text(object, "reason"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PersonalDisease {
    pub name: String,
    pub diagnosis_year: String,
    pub treatment: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonalDiseaseField {
    Name,
    DiagnosisYear,
    Treatment,
}

impl EntryRecord for PersonalDisease {
    type Field = PersonalDiseaseField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            PersonalDiseaseField::Name => &mut next.name,
            PersonalDiseaseField::DiagnosisYear => &mut next.diagnosis_year,
            PersonalDiseaseField::Treatment => &mut next.treatment,
        };
        *slot = value.to_owned();
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            name: text(object, "name"),
            diagnosis_year: text(object, "diagnosis_year"),
            treatment: text(object, "treatment"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Medication {
    pub name: String,
    pub dose: String,
    pub frequency: String,
    pub reason: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MedicationField {
    Name,
    Dose,
    Frequency,
    Reason,
}

impl EntryRecord for Medication {
    type Field = MedicationField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            MedicationField::Name => &mut next.name,
            MedicationField::Dose => &mut next.dose,
            MedicationField::Frequency => &mut next.frequency,
            MedicationField::Reason => &mut next.reason,
        };
        *slot = value.to_owned();
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            name: text(object, "name"),
            dose: text(object, "dose"),
            frequency: text(object, "frequency"),
            reason: text(object, "reason"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Hospitalization {
    pub reason: String,
    pub date: String,
    pub duration: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HospitalizationField {
    Reason,
    Date,
    Duration,
}

impl EntryRecord for Hospitalization {
    type Field = HospitalizationField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            HospitalizationField::Reason => &mut next.reason,
            HospitalizationField::Date => &mut next.date,
            HospitalizationField::Duration => &mut next.duration,
        };
        *slot = value.to_owned();
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            reason: text(object, "reason"),
            date: text(object, "date"),
            duration: text(object, "duration"),
        }
    }
}

/// An accident or injury.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Traumatism {
    pub kind: String,
    pub date: String,
    pub sequelae: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraumatismField {
    Kind,
    Date,
    Sequelae,
}

impl EntryRecord for Traumatism {
    type Field = TraumatismField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            TraumatismField::Kind => &mut next.kind,
            TraumatismField::Date => &mut next.date,
            TraumatismField::Sequelae => &mut next.sequelae,
        };
        *slot = value.to_owned();
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            kind: text(object, "kind"),
            date: text(object, "date"),
            sequelae: text(object, "sequelae"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Transfusion {
    pub reason: String,
    pub date: String,
    pub reactions: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransfusionField {
    Reason,
    Date,
    Reactions,
}

impl EntryRecord for Transfusion {
    type Field = TransfusionField;

    fn with_field(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        let slot = match field {
            TransfusionField::Reason => &mut next.reason,
            TransfusionField::Date => &mut next.date,
            TransfusionField::Reactions => &mut next.reactions,
        };
        *slot = value.to_owned();
        next
    }

    fn from_json(object: &Map<String, Value>) -> Self {
        Self {
            reason: text(object, "reason"),
            date: text(object, "date"),
            reactions: text(object, "reactions"),
        }
    }
}
