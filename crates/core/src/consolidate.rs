//! Consolidation of the editable model into the outbound payload.
//!
//! [`consolidate`] is a pure function. Structured sub-records are folded into the descriptive
//! text columns the persistence API stores (see [`intake_types::Facts`] for the joining rules),
//! and every folded value that ends up empty is left absent.

use crate::constants::{CONSUME_TOKEN, CONTRACEPTIVE_NONE, HEREDITARY_LABEL, OTHER_OPTION};
use crate::entries::{EntryList, EntryRecord};
use crate::hereditary::HereditarySet;
use crate::model::{
    FamilyBackground, GynecologicalBackground, IntakeModel, NonPathologicalBackground,
    PathologicalBackground,
};
use crate::payload::{
    FamilyPayload, GynecologicalPayload, IntakePayload, NonPathologicalPayload,
    PathologicalPayload, QualityLevel, YesNo,
};
use crate::records::{
    EconomicActivity, EducationLevel, EducationRecord, ExerciseActivity, Hospitalization,
    Medication, PersonalDisease, Transfusion, Traumatism, TravelRecord,
};
use intake_types::{ordinal_blocks, present, Facts, ENTRY_SEPARATOR, LABEL_SEPARATOR};

/// Flattens the model into the payload submitted to the persistence API.
pub fn consolidate(model: &IntakeModel) -> IntakePayload {
    IntakePayload {
        non_pathological_background: non_pathological(&model.non_pathological_background),
        pathological_background: pathological(&model.pathological_background),
        family_background: family(&model.family_background),
        gynecological_background: gynecological(&model.gynecological_background),
    }
}

fn non_pathological(np: &NonPathologicalBackground) -> NonPathologicalPayload {
    let (academic_degree, other_education_info) = education(np);

    NonPathologicalPayload {
        sex: np.identity.sex.clone(),
        nationality: np.social.nationality.clone(),
        ethnic_group: np.identity.ethnic_group.clone(),
        languages: np.social.languages.clone(),
        blood_type: np.identity.blood_type.clone(),
        other_origin_info: present(origin(np)),
        address: present(address(np)),
        other_living_info: present(np.residence.residence_other_info.clone()),
        housing_type: present(np.social.housing_type.clone()),
        civil_status: present(np.social.civil_status.clone()),
        cohabitants: present(np.social.cohabitants.clone()),
        dependents: present(np.social.dependents.clone()),
        economic_activity: present(economic_activities(&np.economic_activities))
            .or_else(|| present(np.social.economic_activity.clone())),
        academic_degree,
        other_education_info,
        spiritual_practices: present(spiritual(np)),
        recent_travel: present(travel(np)),
        exercise_details: if np.exercise.does_exercise {
            present(exercise(np))
        } else {
            None
        },
        hygiene_quality: QualityLevel::from_label(&np.care.hygiene),
        other_hygiene_info: present(hygiene_notes(np)),
        hobbies: present(np.social.hobbies.clone()),
        other_recreational_info: present(social(np)),
        has_piercings: Some(YesNo::from(np.care.piercings)),
        has_tattoos: Some(YesNo::from(np.care.tattoos)),
        alcohol_use: habit(
            np.consumption.consume_alcohol,
            Facts::new()
                .labelled("Frecuencia", &np.consumption.alcohol_frequency)
                .labelled("Días/sem", &np.consumption.alcohol_days_per_week)
                .labelled("Tipo", &np.consumption.alcohol_type)
                .labelled("Cantidad", &np.consumption.alcohol_quantity),
        ),
        tobacco_use: habit(
            np.consumption.consume_tobacco,
            Facts::new()
                .labelled("Frecuencia", &np.consumption.tobacco_frequency)
                .labelled("Días/sem", &np.consumption.tobacco_days_per_week)
                .labelled("Cantidad", &np.consumption.tobacco_quantity),
        ),
        other_drug_use: habit(
            np.consumption.consume_recreational_drugs,
            Facts::new()
                .labelled("Frecuencia", &np.consumption.recreational_drugs_frequency)
                .labelled("Días/sem", &np.consumption.recreational_drugs_days_per_week)
                .labelled("Tipo", &np.consumption.recreational_drug_type)
                .labelled("Cantidad", &np.consumption.recreational_drugs_quantity),
        ),
        addictions: present(np.consumption.addictions.clone()),
        meals_per_day: count(&np.diet.meals_per_day),
        supplements: present(np.diet.diet_supplements.clone()),
        other_diet_info: present(
            Facts::new()
                .labelled("Comidas/día", &np.diet.meals_per_day)
                .labelled("Preferidos", &np.diet.favorite_foods)
                .labelled("Evita", &np.diet.foods_to_avoid)
                .join(),
        ),
    }
}

fn origin(np: &NonPathologicalBackground) -> String {
    let birth = &np.birth;
    Facts::new()
        .labelled("País", &birth.birth_country)
        .labelled("Estado", &birth.birth_state)
        .labelled("Ciudad", &birth.birth_city)
        .labelled("Colonia", &birth.birth_neighborhood)
        .labelled("Calle", &birth.birth_street)
        .labelled("No", &birth.birth_ext_int)
        .labelled("CP", &birth.birth_zip)
        .labelled("Otros", &birth.birth_other_info)
        .join()
}

fn address(np: &NonPathologicalBackground) -> String {
    let residence = &np.residence;
    Facts::new()
        .value(&residence.residence_street)
        .value(&residence.residence_ext_int)
        .value(&residence.residence_neighborhood)
        .value(&residence.residence_city)
        .value(&residence.residence_state)
        .value(&residence.residence_zip)
        .value(&residence.residence_country)
        .join_with(", ")
}

fn spiritual(np: &NonPathologicalBackground) -> String {
    let practice = &np.spiritual;
    Facts::new()
        .labelled("Tipo", &practice.spiritual_practice_type)
        .labelled("Frecuencia", &practice.spiritual_frequency)
        .labelled("Comunidad", &practice.spiritual_community)
        .labelled("Significado", &practice.spiritual_meaning)
        .labelled("Nota", &practice.spiritual_practices)
        .join()
}

fn social(np: &NonPathologicalBackground) -> String {
    let social = &np.social;
    let checked: Vec<&str> = [
        (social.social_volunteer, "Voluntariado"),
        (social.social_sports_club, "Club deportivo"),
        (social.social_cultural_events, "Eventos culturales"),
        (social.social_family_friends, "Reuniones familiares/amigos"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();

    Facts::new()
        .value(&checked.join(", "))
        .value(&social.social_activities)
        .join()
}

fn hygiene_notes(np: &NonPathologicalBackground) -> String {
    let care = &np.care;
    let mut facts = Facts::new();
    if care.tattoos {
        facts = facts.labelled("Zonas tatuadas", &care.tattoo_locations);
    }
    if care.piercings {
        facts = facts.labelled("Zonas perforadas", &care.piercing_locations);
    }
    facts.join()
}

fn habit(consumes: bool, details: Facts) -> Option<String> {
    if !consumes {
        return None;
    }
    if details.is_empty() {
        Some(CONSUME_TOKEN.to_owned())
    } else {
        Some(details.join())
    }
}

/// Folds each record into one ordinal block.
fn blocks<R, F>(list: &EntryList<R>, fold: F) -> String
where
    R: EntryRecord,
    F: Fn(&R) -> Facts,
{
    ordinal_blocks(list.records().map(|record| fold(record).join()))
}

/// Appends the section note after the folded entries.
fn with_note(folded: String, note: &str) -> String {
    Facts::new()
        .value(&folded)
        .labelled("Nota", note)
        .join_with(ENTRY_SEPARATOR)
}

fn economic_activity(activity: &EconomicActivity) -> Facts {
    Facts::new()
        .value(&activity.employment_type)
        .labelled("Ramo", activity.sector.as_text())
        .labelled("Puesto", &activity.role)
        .labelled_opt("Días/sem", activity.days_per_week)
}

fn economic_activities(list: &EntryList<EconomicActivity>) -> String {
    blocks(list, economic_activity)
}

fn exercise_activity(activity: &ExerciseActivity) -> Facts {
    Facts::new()
        .labelled("Tipo", &activity.kind)
        .labelled_opt("Días/sem", activity.days_per_week)
        .labelled_opt("Horas/sem", activity.hours_per_week)
        .labelled("Enfoque", &activity.focus)
        .labelled("Nota", &activity.note)
}

fn exercise(np: &NonPathologicalBackground) -> String {
    let habits = &np.exercise;
    let folded = blocks(&np.exercise_activities, exercise_activity);
    if !folded.is_empty() {
        return with_note(folded, &habits.exercise);
    }

    Facts::new()
        .labelled("Tipo", &habits.exercise_type)
        .labelled("Días/sem", &habits.exercise_days_per_week)
        .labelled("Horas/sem", &habits.exercise_hours_per_week)
        .labelled("Enfoque", &habits.exercise_focus)
        .labelled("Nota", &habits.exercise)
        .join()
}

fn travel_record(record: &TravelRecord) -> Facts {
    Facts::new()
        .labelled("Lugar", &record.place)
        .labelled("Fecha", &record.date)
        .labelled("Duración", &record.duration)
        .labelled("Motivo", &record.reason)
}

fn travel(np: &NonPathologicalBackground) -> String {
    let legacy = &np.travel;
    let folded = blocks(&np.travel_records, travel_record);
    if !folded.is_empty() {
        return with_note(folded, &legacy.recent_travels);
    }

    Facts::new()
        .labelled("Lugar", &legacy.recent_travel_place)
        .labelled("Fecha", &legacy.recent_travel_date)
        .labelled("Duración", &legacy.recent_travel_duration)
        .labelled("Motivo", &legacy.recent_travel_reason)
        .labelled("Nota", &legacy.recent_travels)
        .join()
}

/// `"level - degree_title (institution, year) | notes"`, leaving out missing parts.
fn education_record(record: &EducationRecord) -> Facts {
    let heading = Facts::new()
        .value(&record.level)
        .value(&record.degree_title)
        .join_with(" - ");
    let place = Facts::new()
        .value(&record.institution)
        .value(&record.year)
        .join_with(", ");

    let summary = match (heading.is_empty(), place.is_empty()) {
        (_, true) => heading,
        (true, false) => place,
        (false, false) => format!("{heading} ({place})"),
    };

    Facts::new().value(&summary).value(&record.notes)
}

/// Returns `(academic_degree, other_education_info)`.
fn education(np: &NonPathologicalBackground) -> (Option<String>, Option<String>) {
    let records = &np.education_records;

    let highest = records
        .records()
        .filter_map(|record| EducationLevel::parse(&record.level).map(|rank| (rank, &record.level)))
        .max_by_key(|(rank, _)| *rank)
        .map(|(_, label)| label.clone());
    let first_entered = || {
        records
            .records()
            .map(|record| record.level.clone())
            .find(|level| !level.is_empty())
    };
    let academic_degree = highest
        .or_else(first_entered)
        .or_else(|| present(np.social.education_level.clone()));

    let other_education_info = present(blocks(records, education_record))
        .or_else(|| present(np.social.education_details.clone()));

    (academic_degree, other_education_info)
}

fn pathological(p: &PathologicalBackground) -> PathologicalPayload {
    PathologicalPayload {
        visual_disability: p.visual_disability,
        hearing_disability: p.hearing_disability,
        motor_disability: p.motor_disability,
        intellectual_disability: p.intellectual_disability,
        disability_description: present(p.disability_description.clone()),
        has_personal_diseases: p.has_personal_diseases,
        personal_diseases_list: gated(p.has_personal_diseases, &p.personal_diseases),
        chronic_diseases: gated_text(p.has_personal_diseases, &p.personal_diseases, personal_disease),
        takes_medications: p.takes_medications,
        medications_list: gated(p.takes_medications, &p.medications),
        current_medications: gated_text(p.takes_medications, &p.medications, medication),
        has_hospitalizations: p.has_hospitalizations,
        hospitalizations_list: gated(p.has_hospitalizations, &p.hospitalizations),
        hospitalizations: gated_text(p.has_hospitalizations, &p.hospitalizations, hospitalization),
        surgeries: present(p.surgeries.clone()),
        has_traumatisms: p.has_traumatisms,
        traumatisms_list: gated(p.has_traumatisms, &p.traumatisms),
        accidents: gated_text(p.has_traumatisms, &p.traumatisms, traumatism),
        has_transfusions: p.has_transfusions,
        transfusions_list: gated(p.has_transfusions, &p.transfusions),
        transfusions: gated_text(p.has_transfusions, &p.transfusions, transfusion),
        allergies: present(p.allergies.clone()),
        others: present(p.others.clone()),
    }
}

/// The list when its flag is on, otherwise an empty list so the backend clears stored entries.
fn gated<R: EntryRecord>(on: bool, list: &EntryList<R>) -> EntryList<R> {
    if on {
        list.clone()
    } else {
        EntryList::new()
    }
}

fn gated_text<R, F>(on: bool, list: &EntryList<R>, fold: F) -> Option<String>
where
    R: EntryRecord,
    F: Fn(&R) -> Facts,
{
    if on {
        present(blocks(list, fold))
    } else {
        None
    }
}

fn personal_disease(record: &PersonalDisease) -> Facts {
    Facts::new()
        .value(&record.name)
        .labelled("Año de diagnóstico", &record.diagnosis_year)
        .labelled("Tratamiento", &record.treatment)
}

fn medication(record: &Medication) -> Facts {
    Facts::new()
        .value(&record.name)
        .labelled("Dosis", &record.dose)
        .labelled("Frecuencia", &record.frequency)
        .labelled("Motivo", &record.reason)
}

fn hospitalization(record: &Hospitalization) -> Facts {
    Facts::new()
        .labelled("Motivo", &record.reason)
        .labelled("Fecha", &record.date)
        .labelled("Duración", &record.duration)
}

fn traumatism(record: &Traumatism) -> Facts {
    Facts::new()
        .labelled("Tipo", &record.kind)
        .labelled("Fecha", &record.date)
        .labelled("Secuelas", &record.sequelae)
}

fn transfusion(record: &Transfusion) -> Facts {
    Facts::new()
        .labelled("Motivo", &record.reason)
        .labelled("Fecha", &record.date)
        .labelled("Reacciones", &record.reactions)
}

fn family(f: &FamilyBackground) -> FamilyPayload {
    FamilyPayload {
        hypertension: f.hypertension,
        diabetes: f.diabetes,
        cancer: f.cancer,
        heart_diseases: f.heart_disease,
        kidney_diseases: f.kidney_disease,
        liver_diseases: f.liver_disease,
        mental_illnesses: f.mental_illness,
        congenital_diseases: f.congenital_malformations,
        other_family_background_info: present(family_notes(&f.hereditary_selections, &f.others)),
    }
}

fn hereditary(selections: &HereditarySet) -> String {
    let blocks: Vec<String> = selections
        .iter()
        .map(|selection| {
            let disease = if selection.disease == OTHER_OPTION && !selection.other_name.is_empty()
            {
                &selection.other_name
            } else {
                &selection.disease
            };
            Facts::new()
                .labelled("Sistema", &selection.system)
                .labelled("Enfermedad", disease)
                .labelled("Portadores", &selection.carriers)
                .join()
        })
        .filter(|block| !block.is_empty())
        .collect();

    if blocks.is_empty() {
        String::new()
    } else {
        format!(
            "{HEREDITARY_LABEL}{LABEL_SEPARATOR}{}",
            blocks.join(ENTRY_SEPARATOR)
        )
    }
}

fn family_notes(selections: &HereditarySet, others: &str) -> String {
    Facts::new()
        .value(&hereditary(selections))
        .labelled("Notas", others)
        .join_with(ENTRY_SEPARATOR)
}

fn gynecological(g: &GynecologicalBackground) -> GynecologicalPayload {
    let method = g.contraceptive_method.trim();
    let uses_contraception = !method.is_empty() && method != CONTRACEPTIVE_NONE;

    GynecologicalPayload {
        menarche_age: count(&g.menarche_age),
        pregnancies: count(&g.pregnancies),
        births: count(&g.births),
        c_sections: count(&g.c_sections),
        abortions: count(&g.abortions),
        contraceptive_methods: present(g.contraceptive_method.clone()),
        contraceptive_since: if uses_contraception {
            present(g.contraceptive_since.clone())
        } else {
            None
        },
        other_gynecological_info: present(g.others.clone()),
    }
}

/// A whole count entered as text; blank or non-numeric input is absent.
fn count(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hereditary::SelectionField;
    use crate::model::PathologicalFlag;
    use crate::records::{EconomicActivityField, MedicationField};
    use serde_json::json;

    fn economic(employment: &str, sector: &str, role: &str, days: &str) -> EconomicActivity {
        EconomicActivity::default()
            .with_field(EconomicActivityField::EmploymentType, employment)
            .with_field(EconomicActivityField::Sector, sector)
            .with_field(EconomicActivityField::Role, role)
            .with_field(EconomicActivityField::DaysPerWeek, days)
    }

    #[test]
    fn economic_activities_fold_into_ordinal_blocks() {
        let mut model = IntakeModel::from_defaults();
        model.non_pathological_background.economic_activities = EntryList::new()
            .append(economic("Empleado", "Salud", "Enfermero", "5"))
            .append(economic("Negocio propio", "", "", ""));

        let payload = consolidate(&model);
        assert_eq!(
            payload.non_pathological_background.economic_activity.as_deref(),
            Some("1) Empleado | Ramo: Salud | Puesto: Enfermero | Días/sem: 5; 2) Negocio propio")
        );
    }

    #[test]
    fn stored_economic_activities_fold_the_same_way() {
        let model = IntakeModel::from_medical_file(&json!({
            "non_pathological_background": {
                "economic_activities": [
                    { "employment_type": "Empleado", "sector": "Salud", "role": "Enfermero", "days_per_week": 5 },
                    { "employment_type": "Negocio propio", "sector": "", "role": "", "days_per_week": "" },
                ]
            }
        }));

        let payload = consolidate(&model);
        assert_eq!(
            payload.non_pathological_background.economic_activity.as_deref(),
            Some("1) Empleado | Ramo: Salud | Puesto: Enfermero | Días/sem: 5; 2) Negocio propio")
        );
    }

    #[test]
    fn free_text_sector_is_submitted_verbatim() {
        let mut model = IntakeModel::from_defaults();
        model.non_pathological_background.economic_activities = EntryList::new().append(
            economic("Empleado", "Otro", "", "0")
                .with_field(EconomicActivityField::SectorOther, "Minería"),
        );

        let payload = consolidate(&model);
        assert_eq!(
            payload.non_pathological_background.economic_activity.as_deref(),
            Some("1) Empleado | Ramo: Minería | Días/sem: 0")
        );
    }

    #[test]
    fn blank_activities_fall_back_to_legacy_text() {
        let mut model = IntakeModel::from_defaults();
        model.non_pathological_background.social.economic_activity = "Comerciante".into();

        let payload = consolidate(&model);
        assert_eq!(
            payload.non_pathological_background.economic_activity.as_deref(),
            Some("Comerciante")
        );
    }

    #[test]
    fn hereditary_selections_fold_in_canonical_order() {
        let mut model = IntakeModel::from_defaults();
        model.family_background.hereditary_selections = HereditarySet::new()
            .toggle("Oncológico", "Otro")
            .toggle("Cardiovascular", "Hipertensión")
            .update_detail("Oncológico", "Otro", SelectionField::OtherName, "Linfoma")
            .update_detail("Oncológico", "Otro", SelectionField::Carriers, "Tíos")
            .update_detail("Cardiovascular", "Hipertensión", SelectionField::Carriers, "Padre");

        let payload = consolidate(&model);
        assert_eq!(
            payload.family_background.other_family_background_info.as_deref(),
            Some("Hereditario: Sistema: Cardiovascular | Enfermedad: Hipertensión | Portadores: Padre; Sistema: Oncológico | Enfermedad: Linfoma | Portadores: Tíos")
        );
    }

    #[test]
    fn family_notes_follow_hereditary_block() {
        let mut model = IntakeModel::from_defaults();
        model.family_background.others = "Abuela con asma".into();
        let payload = consolidate(&model);
        assert_eq!(
            payload.family_background.other_family_background_info.as_deref(),
            Some("Notas: Abuela con asma")
        );

        model.family_background.hereditary_selections =
            HereditarySet::new().toggle("Respiratorio", "Asma");
        let payload = consolidate(&model);
        assert_eq!(
            payload.family_background.other_family_background_info.as_deref(),
            Some("Hereditario: Sistema: Respiratorio | Enfermedad: Asma; Notas: Abuela con asma")
        );
    }

    #[test]
    fn bare_consumption_flag_yields_consume_token() {
        let mut model = IntakeModel::from_defaults();
        model.non_pathological_background.consumption.consume_tobacco = true;
        assert_eq!(
            consolidate(&model).non_pathological_background.tobacco_use.as_deref(),
            Some("consume")
        );

        model.non_pathological_background.consumption.consume_tobacco = false;
        assert_eq!(consolidate(&model).non_pathological_background.tobacco_use, None);
    }

    #[test]
    fn consumption_details_are_folded() {
        let mut model = IntakeModel::from_defaults();
        let consumption = &mut model.non_pathological_background.consumption;
        consumption.consume_alcohol = true;
        consumption.alcohol_frequency = "Ocasional".into();
        consumption.alcohol_type = "Cerveza".into();

        assert_eq!(
            consolidate(&model).non_pathological_background.alcohol_use.as_deref(),
            Some("Frecuencia: Ocasional | Tipo: Cerveza")
        );
    }

    #[test]
    fn exercise_is_omitted_unless_flagged() {
        let mut model = IntakeModel::from_defaults();
        let np = &mut model.non_pathological_background;
        np.exercise_activities = EntryList::new().append(
            ExerciseActivity::default()
                .with_field(crate::records::ExerciseActivityField::Kind, "Natación")
                .with_field(crate::records::ExerciseActivityField::HoursPerWeek, "2.5"),
        );
        np.exercise.exercise = "Con entrenador".into();
        assert_eq!(consolidate(&model).non_pathological_background.exercise_details, None);

        model.non_pathological_background.exercise.does_exercise = true;
        assert_eq!(
            consolidate(&model).non_pathological_background.exercise_details.as_deref(),
            Some("1) Tipo: Natación | Horas/sem: 2.5; Nota: Con entrenador")
        );
    }

    #[test]
    fn exercise_without_entries_uses_flat_fields() {
        let mut model = IntakeModel::from_defaults();
        let np = &mut model.non_pathological_background;
        np.set_does_exercise(true);
        np.exercise.exercise_type = "Caminata".into();
        np.exercise.exercise_days_per_week = "3".into();

        assert_eq!(
            consolidate(&model).non_pathological_background.exercise_details.as_deref(),
            Some("Tipo: Caminata | Días/sem: 3")
        );
    }

    #[test]
    fn travel_records_fold_with_note() {
        let mut model = IntakeModel::from_defaults();
        let np = &mut model.non_pathological_background;
        np.travel_records = EntryList::new()
            .append(TravelRecord {
                place: "Chiapas".into(),
                duration: "2 semanas".into(),
                ..TravelRecord::default()
            })
            .append(TravelRecord {
                place: "Lima".into(),
                reason: "Trabajo".into(),
                ..TravelRecord::default()
            });
        np.travel.recent_travels = "Zona con dengue".into();

        assert_eq!(
            consolidate(&model).non_pathological_background.recent_travel.as_deref(),
            Some("1) Lugar: Chiapas | Duración: 2 semanas; 2) Lugar: Lima | Motivo: Trabajo; Nota: Zona con dengue")
        );
    }

    #[test]
    fn education_reports_highest_level() {
        let mut model = IntakeModel::from_defaults();
        model.non_pathological_background.education_records = EntryList::new()
            .append(EducationRecord {
                level: "Licenciatura".into(),
                degree_title: "Enfermería".into(),
                institution: "UNAM".into(),
                year: "2015".into(),
                notes: String::new(),
            })
            .append(EducationRecord {
                level: "Preparatoria".into(),
                notes: "Turno vespertino".into(),
                ..EducationRecord::default()
            });

        let payload = consolidate(&model).non_pathological_background;
        assert_eq!(payload.academic_degree.as_deref(), Some("Licenciatura"));
        assert_eq!(
            payload.other_education_info.as_deref(),
            Some("1) Licenciatura - Enfermería (UNAM, 2015); 2) Preparatoria | Turno vespertino")
        );
    }

    #[test]
    fn education_falls_back_to_flat_fields() {
        let mut model = IntakeModel::from_defaults();
        model.non_pathological_background.social.education_level = "Secundaria".into();
        model.non_pathological_background.social.education_details = "Trunca".into();

        let payload = consolidate(&model).non_pathological_background;
        assert_eq!(payload.academic_degree.as_deref(), Some("Secundaria"));
        assert_eq!(payload.other_education_info.as_deref(), Some("Trunca"));
    }

    #[test]
    fn origin_and_address_fold_separately() {
        let mut model = IntakeModel::from_defaults();
        let np = &mut model.non_pathological_background;
        np.birth.birth_country = "México".into();
        np.birth.birth_city = "Oaxaca".into();
        np.birth.birth_zip = "68000".into();
        np.residence.residence_street = "Av. Juárez".into();
        np.residence.residence_ext_int = "12-B".into();
        np.residence.residence_city = "Puebla".into();

        let payload = consolidate(&model).non_pathological_background;
        assert_eq!(
            payload.other_origin_info.as_deref(),
            Some("País: México | Ciudad: Oaxaca | CP: 68000")
        );
        assert_eq!(payload.address.as_deref(), Some("Av. Juárez, 12-B, Puebla"));
    }

    #[test]
    fn defaults_consolidate_without_blank_strings() {
        let payload = consolidate(&IntakeModel::from_defaults());
        let value = serde_json::to_value(&payload).expect("serialize");

        let np = value["non_pathological_background"]
            .as_object()
            .expect("object");
        for (key, field) in np {
            let required = ["sex", "nationality", "ethnic_group", "languages", "blood_type"];
            if !required.contains(&key.as_str()) {
                assert_ne!(field, &json!(""), "{key} should be absent");
            }
        }
        assert_eq!(value["non_pathological_background"]["has_tattoos"], json!("no"));
        assert!(value["non_pathological_background"].get("hygiene_quality").is_none());
        assert!(value["family_background"].get("other_family_background_info").is_none());
    }

    #[test]
    fn hygiene_and_social_fold() {
        let mut model = IntakeModel::from_defaults();
        let np = &mut model.non_pathological_background;
        np.care.hygiene = "Buena".into();
        np.care.tattoos = true;
        np.care.tattoo_locations = "Brazo".into();
        np.care.piercing_locations = "Oreja".into();
        np.social.social_volunteer = true;
        np.social.social_family_friends = true;
        np.social.social_activities = "Coro".into();

        let payload = consolidate(&model).non_pathological_background;
        assert_eq!(payload.hygiene_quality, Some(QualityLevel::Good));
        assert_eq!(payload.other_hygiene_info.as_deref(), Some("Zonas tatuadas: Brazo"));
        assert_eq!(
            payload.other_recreational_info.as_deref(),
            Some("Voluntariado, Reuniones familiares/amigos | Coro")
        );
    }

    #[test]
    fn pathological_lists_follow_their_flags() {
        let mut model = IntakeModel::from_defaults();
        let pathological = &mut model.pathological_background;
        pathological.set_flag(PathologicalFlag::Medications, true);
        pathological.medications = pathological
            .medications
            .update_field(0, MedicationField::Name, "Metformina")
            .update_field(0, MedicationField::Dose, "850 mg");

        let payload = consolidate(&model).pathological_background;
        assert_eq!(payload.medications_list.len(), 1);
        assert_eq!(
            payload.current_medications.as_deref(),
            Some("1) Metformina | Dosis: 850 mg")
        );

        model
            .pathological_background
            .set_flag(PathologicalFlag::Medications, false);
        let payload = consolidate(&model).pathological_background;
        assert!(payload.medications_list.is_empty());
        assert_eq!(payload.current_medications, None);
        assert_eq!(model.pathological_background.medications.len(), 1);
    }

    #[test]
    fn contraceptive_since_requires_a_method() {
        let mut model = IntakeModel::from_defaults();
        let g = &mut model.gynecological_background;
        g.contraceptive_method = "Ninguno".into();
        g.contraceptive_since = "2020".into();
        g.pregnancies = "2".into();
        g.births = "dos".into();

        let payload = consolidate(&model).gynecological_background;
        assert_eq!(payload.contraceptive_since, None);
        assert_eq!(payload.contraceptive_methods.as_deref(), Some("Ninguno"));
        assert_eq!(payload.pregnancies, Some(2));
        assert_eq!(payload.births, None);

        model.gynecological_background.contraceptive_method = "DIU".into();
        let payload = consolidate(&model).gynecological_background;
        assert_eq!(payload.contraceptive_since.as_deref(), Some("2020"));
    }

    #[test]
    fn consolidation_is_repeatable() {
        let mut model = IntakeModel::from_defaults();
        model.non_pathological_background.diet.meals_per_day = "3".into();
        model.non_pathological_background.diet.foods_to_avoid = "Lácteos".into();

        let first = consolidate(&model);
        let second = consolidate(&model);
        assert_eq!(first, second);
        assert_eq!(first.non_pathological_background.meals_per_day, Some(3));
        assert_eq!(
            first.non_pathological_background.other_diet_info.as_deref(),
            Some("Comidas/día: 3 | Evita: Lácteos")
        );
    }
}
