//! # Intake Core
//!
//! Data-consolidation core of the clinical intake form.
//!
//! This crate contains pure data operations:
//! - Normalization of partially populated stored records against canonical section defaults
//! - Repeated-entry lists with stable record identity and the hereditary selection set
//! - Consolidation of the editable model into the flat payload stored by the persistence API
//!
//! **No transport concerns**: HTTP clients, authentication and submission retries belong to the
//! caller. The only I/O here is the convenience loader that reads a medical file from disk.

pub mod config;
pub mod consolidate;
pub mod constants;
pub mod entries;
pub mod hereditary;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod payload;
pub mod records;
pub mod schema;
pub mod session;
pub mod validation;

mod error;

pub use config::{IntakeConfig, SubmissionKeyStyle};
pub use consolidate::consolidate;
pub use entries::{Entry, EntryList, EntryRecord};
pub use error::{IntakeError, IntakeResult};
pub use hereditary::{HereditarySelection, HereditarySet, SelectionField, SelectionKey};
pub use intake_uuid::RecordId;
pub use loader::{load_medical_file, read_record_file, PatientContext};
pub use model::IntakeModel;
pub use normalize::{normalize, normalize_section};
pub use payload::{render, IntakePayload, RenderFormat, SubmissionEnvelope};
pub use schema::{defaults, Section, SectionKind};
pub use session::IntakeSession;
