//! Catalogs and fixed tokens used throughout the intake core.
//!
//! The catalogs mirror the option lists of the intake form. Their order is significant: the
//! hereditary catalog defines the canonical serialization order of selections.

/// Hereditary diseases grouped by body system, in canonical order.
pub const HEREDITARY_SYSTEMS: &[(&str, &[&str])] = &[
    (
        "Cardiovascular",
        &[
            "Hipertensión",
            "Cardiopatía isquémica",
            "Arritmias congénitas",
            "Insuficiencia cardiaca",
            "Otro",
        ],
    ),
    (
        "Endocrino",
        &["Diabetes tipo 1", "Diabetes tipo 2", "Trastorno tiroideo", "Otro"],
    ),
    (
        "Renal",
        &["Enfermedad renal crónica", "Poliquistosis renal", "Otro"],
    ),
    ("Hepático", &["Enfermedad hepática crónica", "Otro"]),
    (
        "Respiratorio",
        &["Asma", "EPOC", "Fibrosis quística", "Otro"],
    ),
    (
        "Neurológico",
        &["Epilepsia", "Alzheimer", "Parkinson", "Otro"],
    ),
    (
        "Hematológico",
        &["Anemia falciforme", "Hemofilia", "Talassemia", "Otro"],
    ),
    (
        "Oncológico",
        &[
            "Cáncer de mama",
            "Cáncer de colon",
            "Cáncer de próstata",
            "Cáncer de pulmón",
            "Otro",
        ],
    ),
];

/// Catalog value meaning "free text follows".
pub const OTHER_OPTION: &str = "Otro";

/// Label prefixed to the folded hereditary block.
pub const HEREDITARY_LABEL: &str = "Hereditario";

/// Token emitted for a positive consumption flag without any detail.
pub const CONSUME_TOKEN: &str = "consume";

/// Contraceptive method meaning "no method".
pub const CONTRACEPTIVE_NONE: &str = "Ninguno";

/// Upper bound for days-per-week answers.
pub const DAYS_PER_WEEK_MAX: u8 = 7;

/// Upper bound for hours-per-week answers.
pub const HOURS_PER_WEEK_MAX: f64 = 168.0;
