//! Joining present facts into descriptive strings.
//!
//! The persistence API stores most structured answers as one free-text column. The joining
//! rules are fixed:
//! - `": "` between a label and its value,
//! - `" | "` between sibling facts about one entry,
//! - `"; "` between entries, each prefixed by its 1-based ordinal (`"2) ..."`).
//!
//! Empty values are skipped, never rendered as a dangling label.

/// Separator between a label and its value.
pub const LABEL_SEPARATOR: &str = ": ";

/// Separator between sibling facts about one entry.
pub const FACT_SEPARATOR: &str = " | ";

/// Separator between entries of a multi-entry string.
pub const ENTRY_SEPARATOR: &str = "; ";

/// Ordered collection of the non-empty facts about one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facts {
    parts: Vec<String>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` as-is when it is non-empty.
    pub fn value(mut self, value: &str) -> Self {
        if !value.is_empty() {
            self.parts.push(value.to_owned());
        }
        self
    }

    /// Adds `label: value` when `value` is non-empty.
    pub fn labelled(mut self, label: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.parts.push(format!("{label}{LABEL_SEPARATOR}{value}"));
        }
        self
    }

    /// Adds `label: value` when `value` is present.
    pub fn labelled_opt(self, label: &str, value: Option<impl std::fmt::Display>) -> Self {
        match value {
            Some(v) => self.labelled(label, &v.to_string()),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Joins the facts with [`FACT_SEPARATOR`].
    pub fn join(&self) -> String {
        self.join_with(FACT_SEPARATOR)
    }

    /// Joins the facts with an arbitrary separator (addresses use `", "`).
    pub fn join_with(&self, separator: &str) -> String {
        self.parts.join(separator)
    }
}

/// Joins per-entry strings into one multi-entry string.
///
/// Each block is prefixed by the 1-based position of its entry in the source list. Blank
/// blocks are dropped without renumbering the others, so a blank first entry followed by a
/// filled one renders as `"2) ..."`.
pub fn ordinal_blocks<I>(blocks: I) -> String
where
    I: IntoIterator<Item = String>,
{
    blocks
        .into_iter()
        .enumerate()
        .filter(|(_, block)| !block.is_empty())
        .map(|(i, block)| format!("{}) {}", i + 1, block))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

/// Maps an empty string to `None`.
pub fn present(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
