//! Copy-on-write intake session.
//!
//! The session owns the current snapshot of the model behind an `Arc`. Every edit clones the
//! snapshot, applies the change to the clone and swaps the `Arc`, so a reader holding an older
//! snapshot keeps a consistent view.

use crate::config::IntakeConfig;
use crate::consolidate::consolidate;
use crate::model::IntakeModel;
use crate::payload::{IntakePayload, SubmissionEnvelope};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct IntakeSession {
    snapshot: Arc<IntakeModel>,
    revision: u64,
}

impl Default for IntakeSession {
    fn default() -> Self {
        Self::from_defaults()
    }
}

impl IntakeSession {
    pub fn new(model: IntakeModel) -> Self {
        Self {
            snapshot: Arc::new(model),
            revision: 0,
        }
    }

    pub fn from_defaults() -> Self {
        Self::new(IntakeModel::from_defaults())
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<IntakeModel> {
        Arc::clone(&self.snapshot)
    }

    /// Number of edits applied since the session started.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies one edit and publishes the result as the new snapshot.
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut IntakeModel),
    {
        let mut next = IntakeModel::clone(&self.snapshot);
        edit(&mut next);
        self.snapshot = Arc::new(next);
        self.revision += 1;
        tracing::trace!(revision = self.revision, "intake snapshot replaced");
    }

    pub fn consolidate(&self) -> IntakePayload {
        consolidate(&self.snapshot)
    }

    /// Consolidates the current snapshot into a submission for `medical_file_id`.
    pub fn submission(&self, medical_file_id: u64, config: &IntakeConfig) -> SubmissionEnvelope {
        SubmissionEnvelope::new(medical_file_id, self.consolidate(), config)
    }

    /// Resets the session to defaults after the submission was accepted.
    pub fn complete_submission(&mut self) {
        self.snapshot = Arc::new(IntakeModel::from_defaults());
        self.revision += 1;
        tracing::info!(revision = self.revision, "intake submitted; session reset to defaults");
    }
}
