//! Identity tokens for repeated intake entries.
//!
//! Every record inside a repeated-entry list (a medication, an economic activity, an education
//! record, ...) carries an opaque token assigned once when the record is created. The token is
//! what ties a record to its editing widgets across renders; list positions shift on removal,
//! tokens do not.
//!
//! ## Canonical token form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Notes:
//! - This is the same value you would get from `Uuid::new_v4().simple().to_string()`.
//! - Tokens read back from storage are only trusted when they are already canonical. Use
//!   [`RecordId::parse`] to validate an input string; non-canonical values (uppercase,
//!   hyphenated, wrong length, non-hex) are rejected and the caller assigns a fresh token.

mod token;

pub use token::RecordId;

/// Error type for identity token operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identity token operations.
pub type UuidResult<T> = Result<T, UuidError>;
