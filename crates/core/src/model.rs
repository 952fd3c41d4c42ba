//! The editable intake model.
//!
//! Four independent sections, each a typed view of one defaults object (see [`crate::schema`]).
//! Field names match the stored column names, so a section serializes back to exactly the key
//! set of its defaults object.
//!
//! The non-pathological section is large; its fields are grouped into flattened sub-structs that
//! follow the blocks of the intake form.

use crate::entries::EntryList;
use crate::hereditary::HereditarySet;
use crate::records::{
    EconomicActivity, EducationRecord, ExerciseActivity, Hospitalization, Medication,
    PersonalDisease, Transfusion, Traumatism, TravelRecord,
};
use crate::schema::{Section, SectionKind};
use crate::validation::{clamp_days_text, clamp_hours_per_week};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiologicalIdentity {
    pub sex: String,
    pub blood_type: String,
    pub ethnic_group: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirthPlace {
    pub birth_country: String,
    pub birth_state: String,
    pub birth_city: String,
    pub birth_neighborhood: String,
    pub birth_street: String,
    pub birth_ext_int: String,
    pub birth_zip: String,
    pub birth_other_info: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Residence {
    pub residence_country: String,
    pub residence_state: String,
    pub residence_city: String,
    pub residence_neighborhood: String,
    pub residence_street: String,
    pub residence_ext_int: String,
    pub residence_zip: String,
    pub residence_other_info: String,
}

/// Political, social and economic identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialProfile {
    pub nationality: String,
    pub languages: String,
    pub education_level: String,
    pub education_details: String,
    /// Free-text occupation stored before multiple activities were supported.
    pub economic_activity: String,
    pub civil_status: String,
    pub housing_type: String,
    pub cohabitants: String,
    pub dependents: String,
    pub hobbies: String,
    /// Note accompanying the social activity checkboxes.
    pub social_activities: String,
    pub social_volunteer: bool,
    pub social_sports_club: bool,
    pub social_cultural_events: bool,
    pub social_family_friends: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiritualPractice {
    pub spiritual_practice_type: String,
    pub spiritual_frequency: String,
    pub spiritual_community: String,
    pub spiritual_meaning: String,
    pub spiritual_practices: String,
}

/// Single-trip travel fields kept for records stored before travel lists existed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentTravel {
    pub recent_travel_place: String,
    pub recent_travel_date: String,
    pub recent_travel_duration: String,
    pub recent_travel_reason: String,
    /// Section note, also folded after the travel list.
    pub recent_travels: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExerciseHabits {
    pub does_exercise: bool,
    pub exercise_type: String,
    pub exercise_days_per_week: String,
    pub exercise_hours_per_week: String,
    pub exercise_focus: String,
    /// Section note, also folded after the activity list.
    pub exercise: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalCare {
    pub hygiene: String,
    pub tattoos: bool,
    pub piercings: bool,
    pub tattoo_locations: String,
    pub piercing_locations: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consumption {
    pub consume_tobacco: bool,
    pub tobacco_frequency: String,
    pub tobacco_days_per_week: String,
    pub tobacco_quantity: String,
    pub consume_alcohol: bool,
    pub alcohol_frequency: String,
    pub alcohol_days_per_week: String,
    pub alcohol_type: String,
    pub alcohol_quantity: String,
    pub consume_recreational_drugs: bool,
    pub recreational_drugs_frequency: String,
    pub recreational_drugs_days_per_week: String,
    pub recreational_drug_type: String,
    pub recreational_drugs_quantity: String,
    pub addictions: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diet {
    pub meals_per_day: String,
    pub diet_supplements: String,
    pub favorite_foods: String,
    pub foods_to_avoid: String,
}

/// Days-per-week answers held directly on the non-pathological section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HabitDays {
    Exercise,
    Tobacco,
    Alcohol,
    RecreationalDrugs,
}

/// Demographic and lifestyle background.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonPathologicalBackground {
    #[serde(flatten)]
    pub identity: BiologicalIdentity,
    #[serde(flatten)]
    pub birth: BirthPlace,
    #[serde(flatten)]
    pub residence: Residence,
    #[serde(flatten)]
    pub social: SocialProfile,
    #[serde(flatten)]
    pub spiritual: SpiritualPractice,
    #[serde(flatten)]
    pub travel: RecentTravel,
    #[serde(flatten)]
    pub exercise: ExerciseHabits,
    #[serde(flatten)]
    pub care: PersonalCare,
    #[serde(flatten)]
    pub consumption: Consumption,
    #[serde(flatten)]
    pub diet: Diet,
    pub economic_activities: EntryList<EconomicActivity>,
    pub education_records: EntryList<EducationRecord>,
    pub travel_records: EntryList<TravelRecord>,
    pub exercise_activities: EntryList<ExerciseActivity>,
}

impl Default for NonPathologicalBackground {
    fn default() -> Self {
        Self {
            identity: BiologicalIdentity::default(),
            birth: BirthPlace::default(),
            residence: Residence::default(),
            social: SocialProfile::default(),
            spiritual: SpiritualPractice::default(),
            travel: RecentTravel::default(),
            exercise: ExerciseHabits::default(),
            care: PersonalCare::default(),
            consumption: Consumption::default(),
            diet: Diet::default(),
            economic_activities: EntryList::seeded(),
            education_records: EntryList::seeded(),
            travel_records: EntryList::new(),
            exercise_activities: EntryList::new(),
        }
    }
}

impl NonPathologicalBackground {
    /// Sets the exercise flag, seeding one blank activity the first time it turns on.
    pub fn set_does_exercise(&mut self, does_exercise: bool) {
        self.exercise.does_exercise = does_exercise;
        if does_exercise && self.exercise_activities.is_empty() {
            self.exercise_activities = self.exercise_activities.append_blank();
        }
    }

    /// Stores a days-per-week answer, clamped to `0..=7`. Blank input stays blank.
    pub fn set_days_per_week(&mut self, habit: HabitDays, input: &str) {
        let clamped = clamp_days_text(input);
        let slot = match habit {
            HabitDays::Exercise => &mut self.exercise.exercise_days_per_week,
            HabitDays::Tobacco => &mut self.consumption.tobacco_days_per_week,
            HabitDays::Alcohol => &mut self.consumption.alcohol_days_per_week,
            HabitDays::RecreationalDrugs => &mut self.consumption.recreational_drugs_days_per_week,
        };
        *slot = clamped;
    }

    /// Stores the flat hours-per-week answer, clamped to `0..=168`.
    pub fn set_exercise_hours_per_week(&mut self, input: &str) {
        self.exercise.exercise_hours_per_week = clamp_hours_per_week(input)
            .map(|hours| hours.to_string())
            .unwrap_or_default();
    }
}

impl Section for NonPathologicalBackground {
    const KIND: SectionKind = SectionKind::NonPathological;

    fn seed_flagged_lists(&mut self) {
        self.set_does_exercise(self.exercise.does_exercise);
    }
}

/// Flags that gate a repeated-entry list of the pathological section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathologicalFlag {
    PersonalDiseases,
    Medications,
    Hospitalizations,
    Traumatisms,
    Transfusions,
}

impl PathologicalFlag {
    pub const ALL: [PathologicalFlag; 5] = [
        PathologicalFlag::PersonalDiseases,
        PathologicalFlag::Medications,
        PathologicalFlag::Hospitalizations,
        PathologicalFlag::Traumatisms,
        PathologicalFlag::Transfusions,
    ];
}

/// Personal medical history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathologicalBackground {
    pub visual_disability: bool,
    pub hearing_disability: bool,
    pub motor_disability: bool,
    pub intellectual_disability: bool,
    pub disability_description: String,
    pub has_personal_diseases: bool,
    pub personal_diseases: EntryList<PersonalDisease>,
    pub takes_medications: bool,
    pub medications: EntryList<Medication>,
    pub has_hospitalizations: bool,
    pub hospitalizations: EntryList<Hospitalization>,
    pub surgeries: String,
    pub has_traumatisms: bool,
    pub traumatisms: EntryList<Traumatism>,
    pub has_transfusions: bool,
    pub transfusions: EntryList<Transfusion>,
    pub allergies: String,
    pub others: String,
}

impl PathologicalBackground {
    /// Sets a gating flag, seeding one blank record into its list the first time it turns on.
    ///
    /// Turning a flag off keeps the entries; they are simply not submitted.
    pub fn set_flag(&mut self, flag: PathologicalFlag, on: bool) {
        match flag {
            PathologicalFlag::PersonalDiseases => {
                self.has_personal_diseases = on;
                if on && self.personal_diseases.is_empty() {
                    self.personal_diseases = EntryList::seeded();
                }
            }
            PathologicalFlag::Medications => {
                self.takes_medications = on;
                if on && self.medications.is_empty() {
                    self.medications = EntryList::seeded();
                }
            }
            PathologicalFlag::Hospitalizations => {
                self.has_hospitalizations = on;
                if on && self.hospitalizations.is_empty() {
                    self.hospitalizations = EntryList::seeded();
                }
            }
            PathologicalFlag::Traumatisms => {
                self.has_traumatisms = on;
                if on && self.traumatisms.is_empty() {
                    self.traumatisms = EntryList::seeded();
                }
            }
            PathologicalFlag::Transfusions => {
                self.has_transfusions = on;
                if on && self.transfusions.is_empty() {
                    self.transfusions = EntryList::seeded();
                }
            }
        }
    }

    pub fn flag(&self, flag: PathologicalFlag) -> bool {
        match flag {
            PathologicalFlag::PersonalDiseases => self.has_personal_diseases,
            PathologicalFlag::Medications => self.takes_medications,
            PathologicalFlag::Hospitalizations => self.has_hospitalizations,
            PathologicalFlag::Traumatisms => self.has_traumatisms,
            PathologicalFlag::Transfusions => self.has_transfusions,
        }
    }
}

impl Section for PathologicalBackground {
    const KIND: SectionKind = SectionKind::Pathological;

    fn seed_flagged_lists(&mut self) {
        for flag in PathologicalFlag::ALL {
            self.set_flag(flag, self.flag(flag));
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyBackground {
    pub hypertension: bool,
    pub diabetes: bool,
    pub cancer: bool,
    pub heart_disease: bool,
    pub kidney_disease: bool,
    pub liver_disease: bool,
    pub mental_illness: bool,
    pub congenital_malformations: bool,
    pub others: String,
    pub hereditary_selections: HereditarySet,
}

impl Section for FamilyBackground {
    const KIND: SectionKind = SectionKind::Family;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GynecologicalBackground {
    pub menarche_age: String,
    pub pregnancies: String,
    pub births: String,
    pub c_sections: String,
    pub abortions: String,
    pub contraceptive_method: String,
    pub contraceptive_since: String,
    pub others: String,
}

impl Section for GynecologicalBackground {
    const KIND: SectionKind = SectionKind::Gynecological;
}

/// The complete editable record of one intake session.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IntakeModel {
    pub non_pathological_background: NonPathologicalBackground,
    pub pathological_background: PathologicalBackground,
    pub family_background: FamilyBackground,
    pub gynecological_background: GynecologicalBackground,
}

impl IntakeModel {
    /// A fresh model built from the section defaults.
    pub fn from_defaults() -> Self {
        Self::default()
    }
}
