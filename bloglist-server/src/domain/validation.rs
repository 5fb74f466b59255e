//! Field-level validation, independent of the storage backend.
//!
//! Presence checks fail with [`DomainError::MalformedInput`] (400), business
//! rules fail with a [`FieldError`] (422) naming the offending field.

use crate::domain::DomainError;
use thiserror::Error;

pub const USERNAME_MIN_LENGTH: usize = 3;
pub const PASSWORD_MIN_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {problem}")]
pub struct FieldError {
    pub field: &'static str,
    pub problem: String,
}

impl FieldError {
    pub fn min_length(field: &'static str, min: usize) -> Self {
        Self {
            field,
            problem: format!("must be at least ({}) characters long", min),
        }
    }

    pub fn unique(field: &'static str) -> Self {
        Self {
            field,
            problem: "must be unique".to_string(),
        }
    }
}

/// Unwraps a required string field and trims it. Absent, `null` and blank
/// values all count as missing.
pub fn require(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    require_secret(field, value).map(|v| v.trim().to_string())
}

/// Like [`require`], but keeps surrounding whitespace, which is significant
/// in passwords.
pub fn require_secret(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::MalformedInput(format!("{} is required", field))),
    }
}

/// Surrounding whitespace does not count towards the length.
pub fn min_length(field: &'static str, value: &str, min: usize) -> Result<(), FieldError> {
    if value.trim().chars().count() < min {
        return Err(FieldError::min_length(field, min));
    }
    Ok(())
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), FieldError> {
    min_length("username", username, USERNAME_MIN_LENGTH)?;
    min_length("password", password, PASSWORD_MIN_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_missing_and_blank() {
        assert!(matches!(
            require("title", None),
            Err(DomainError::MalformedInput(msg)) if msg == "title is required"
        ));
        assert!(require("title", Some("   ".into())).is_err());
        assert_eq!(require("title", Some("Rust".into())).unwrap(), "Rust");
    }

    #[test]
    fn require_trims_but_secrets_keep_whitespace() {
        assert_eq!(require("username", Some("  root ".into())).unwrap(), "root");
        assert_eq!(
            require_secret("password", Some(" pw d ".into())).unwrap(),
            " pw d "
        );
        assert!(require_secret("password", Some("  ".into())).is_err());
    }

    #[test]
    fn min_length_counts_characters() {
        assert!(min_length("username", "äöü", 3).is_ok());
        assert!(min_length("username", " a ", 3).is_err());
        let err = min_length("username", "UM", 3).unwrap_err();
        assert_eq!(err.field, "username");
        assert_eq!(err.to_string(), "username must be at least (3) characters long");
    }

    #[test]
    fn credentials_report_first_offending_field() {
        assert!(validate_credentials("madara", "pw1").is_ok());
        assert_eq!(validate_credentials("UM", "pw").unwrap_err().field, "username");
        assert_eq!(validate_credentials("madara", "pw").unwrap_err().field, "password");
    }

    #[test]
    fn unique_message_names_field() {
        let msg = FieldError::unique("username").to_string();
        assert!(msg.contains("unique"));
        assert!(msg.contains("username"));
    }
}
