//! Input validation for travis-encrypt operations.
//!
//! Validates repository slugs, variable names and secret values before any
//! network or file work happens.

use crate::error::{Result, ValidationError};

/// Validate the two halves of an `owner/repository` slug.
///
/// Both parts must be non-empty and may not contain `/` or whitespace,
/// since they are spliced into the key lookup URL path.
///
/// # Errors
///
/// Returns `ValidationError::InvalidSlug` describing the first problem found.
pub fn validate_slug(owner: &str, repository: &str) -> Result<()> {
    let slug = format!("{}/{}", owner, repository);

    for (label, part) in [("username", owner), ("repository", repository)] {
        let reason = if part.is_empty() {
            Some(format!("{} cannot be empty", label))
        } else if part.contains('/') {
            Some(format!("{} cannot contain '/'", label))
        } else if part.chars().any(char::is_whitespace) {
            Some(format!("{} cannot contain whitespace", label))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(ValidationError::InvalidSlug { slug, reason }.into());
        }
    }

    Ok(())
}

/// Validate an environment variable name.
///
/// Names must be valid environment variable names:
/// - Only ASCII letters, digits, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if let Some(first_char) = key.chars().next() {
        if first_char.is_ascii_digit() {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: "cannot start with a digit".to_string(),
            }
            .into());
        }
    }

    for (i, ch) in key.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                    ch, i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Validate a secret value.
///
/// Secret values cannot be empty.
///
/// # Errors
///
/// Returns `ValidationError::EmptyValue` if the value is empty.
pub fn validate_value(key: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue(key.to_string()).into());
    }

    Ok(())
}
