//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the submission
//! envelope explicitly. The core never reads process-wide environment variables itself.

use crate::{IntakeError, IntakeResult};

/// Environment variable selecting the pathological section key of outbound submissions.
pub const PATHOLOGICAL_KEY_ENV: &str = "INTAKE_PATHOLOGICAL_KEY";

/// Spelling of the pathological section key in the submission envelope.
///
/// Older persistence backends expect the misspelt `patological_background`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionKeyStyle {
    #[default]
    Canonical,
    Legacy,
}

impl SubmissionKeyStyle {
    /// The JSON key under which the pathological block is submitted.
    pub fn pathological_key(self) -> &'static str {
        match self {
            SubmissionKeyStyle::Canonical => "pathological_background",
            SubmissionKeyStyle::Legacy => "patological_background",
        }
    }
}

impl std::str::FromStr for SubmissionKeyStyle {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "canonical" => Ok(SubmissionKeyStyle::Canonical),
            "legacy" => Ok(SubmissionKeyStyle::Legacy),
            other => Err(IntakeError::InvalidInput(format!(
                "unknown pathological key style '{other}' (expected 'canonical' or 'legacy')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct IntakeConfig {
    submission_key_style: SubmissionKeyStyle,
}

impl IntakeConfig {
    pub fn new(submission_key_style: SubmissionKeyStyle) -> Self {
        Self {
            submission_key_style,
        }
    }

    pub fn submission_key_style(&self) -> SubmissionKeyStyle {
        self.submission_key_style
    }
}

/// Parse the submission key style from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`SubmissionKeyStyle::Canonical`].
pub fn submission_key_style_from_env_value(
    value: Option<String>,
) -> IntakeResult<SubmissionKeyStyle> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value
        .map(|v| v.parse::<SubmissionKeyStyle>())
        .transpose()?;

    Ok(parsed.unwrap_or_default())
}
