//! Outbound payload consumed by the persistence API.
//!
//! Optional fields are omitted from the serialized payload when absent, so a partial
//! re-submission never overwrites a stored value with a blank.

use crate::config::IntakeConfig;
use crate::entries::EntryList;
use crate::records::{Hospitalization, Medication, PersonalDisease, Transfusion, Traumatism};
use crate::schema::SectionKind;
use crate::{IntakeError, IntakeResult};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Three-step quality scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Good,
    Regular,
    Bad,
}

impl QualityLevel {
    /// Maps a form label; any other label has no quality level.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Buena" => Some(QualityLevel::Good),
            "Regular" => Some(QualityLevel::Regular),
            "Mala" => Some(QualityLevel::Bad),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NonPathologicalPayload {
    pub sex: String,
    pub nationality: String,
    pub ethnic_group: String,
    pub languages: String,
    pub blood_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_origin_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_living_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housing_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub civil_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohabitants: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_education_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spiritual_practices: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_travel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hygiene_quality: Option<QualityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_hygiene_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_recreational_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_piercings: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_tattoos: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol_use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tobacco_use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_drug_use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addictions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals_per_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_diet_info: Option<String>,
}

/// Pathological block. Lists are always present; they are empty when their flag is off.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PathologicalPayload {
    pub visual_disability: bool,
    pub hearing_disability: bool,
    pub motor_disability: bool,
    pub intellectual_disability: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability_description: Option<String>,
    pub has_personal_diseases: bool,
    pub personal_diseases_list: EntryList<PersonalDisease>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronic_diseases: Option<String>,
    pub takes_medications: bool,
    pub medications_list: EntryList<Medication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_medications: Option<String>,
    pub has_hospitalizations: bool,
    pub hospitalizations_list: EntryList<Hospitalization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospitalizations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surgeries: Option<String>,
    pub has_traumatisms: bool,
    pub traumatisms_list: EntryList<Traumatism>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accidents: Option<String>,
    pub has_transfusions: bool,
    pub transfusions_list: EntryList<Transfusion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfusions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub others: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FamilyPayload {
    pub hypertension: bool,
    pub diabetes: bool,
    pub cancer: bool,
    pub heart_diseases: bool,
    pub kidney_diseases: bool,
    pub liver_diseases: bool,
    pub mental_illnesses: bool,
    pub congenital_diseases: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_family_background_info: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GynecologicalPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menarche_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pregnancies: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub births: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_sections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abortions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contraceptive_methods: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contraceptive_since: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_gynecological_info: Option<String>,
}

/// The consolidated record, one block per section.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IntakePayload {
    pub non_pathological_background: NonPathologicalPayload,
    pub pathological_background: PathologicalPayload,
    pub family_background: FamilyPayload,
    pub gynecological_background: GynecologicalPayload,
}

/// A payload addressed to one medical file, ready for submission.
#[derive(Clone, Debug)]
pub struct SubmissionEnvelope {
    medical_file_id: u64,
    payload: IntakePayload,
    pathological_key: &'static str,
}

impl SubmissionEnvelope {
    pub fn new(medical_file_id: u64, payload: IntakePayload, config: &IntakeConfig) -> Self {
        Self {
            medical_file_id,
            payload,
            pathological_key: config.submission_key_style().pathological_key(),
        }
    }

    pub fn medical_file_id(&self) -> u64 {
        self.medical_file_id
    }

    pub fn payload(&self) -> &IntakePayload {
        &self.payload
    }
}

impl Serialize for SubmissionEnvelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("medical_file_id", &self.medical_file_id)?;
        map.serialize_entry(
            SectionKind::NonPathological.key(),
            &self.payload.non_pathological_background,
        )?;
        map.serialize_entry(self.pathological_key, &self.payload.pathological_background)?;
        map.serialize_entry(SectionKind::Family.key(), &self.payload.family_background)?;
        map.serialize_entry(
            SectionKind::Gynecological.key(),
            &self.payload.gynecological_background,
        )?;
        map.end()
    }
}

/// Text formats a payload can be rendered to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderFormat {
    #[default]
    Json,
    Yaml,
}

/// Renders any intake value (payload, envelope, model) as pretty text.
///
/// # Errors
///
/// Returns [`IntakeError::Serialization`] or [`IntakeError::YamlSerialization`] if the value
/// cannot be serialized.
pub fn render<T: Serialize>(value: &T, format: RenderFormat) -> IntakeResult<String> {
    match format {
        RenderFormat::Json => {
            serde_json::to_string_pretty(value).map_err(IntakeError::Serialization)
        }
        RenderFormat::Yaml => serde_yaml::to_string(value).map_err(IntakeError::YamlSerialization),
    }
}
