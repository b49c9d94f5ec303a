//! Per-resource-kind storage name validators.

use super::error::NamingError;

/// Minimum storage name length.
pub(crate) const MIN_NAME_LEN: usize = 3;
/// Maximum storage name length.
pub(crate) const MAX_NAME_LEN: usize = 63;

/// Reserved words rejected for container names.
pub(crate) const RESERVED_CONTAINER_NAMES: &[&str] = &["containers"];
/// Reserved words rejected for table names.
pub(crate) const RESERVED_TABLE_NAMES: &[&str] = &["tables"];
/// Reserved words rejected for queue names.
pub(crate) const RESERVED_QUEUE_NAMES: &[&str] = &["queues"];

fn check_length(name: &str) -> Result<(), NamingError> {
    if name.len() < MIN_NAME_LEN {
        return Err(NamingError::TooShort {
            name: name.to_string(),
            min: MIN_NAME_LEN,
        });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(NamingError::TooLong {
            name: name.to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

fn check_reserved(name: &str, reserved: &[&str]) -> Result<(), NamingError> {
    if reserved.contains(&name) {
        return Err(NamingError::Reserved {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_hyphen_placement(name: &str) -> Result<(), NamingError> {
    if name.starts_with('-') || name.ends_with('-') || name.contains("--") {
        return Err(NamingError::HyphenPlacement {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Validate a blob container name.
///
/// Rules: 3-63 characters; starts with a lowercase letter or digit;
/// lowercase alphanumeric and single interior hyphens only; not reserved.
///
/// # Errors
///
/// Returns a [`NamingError`] identifying the violated rule.
pub fn validate_container_name(name: &str) -> Result<(), NamingError> {
    check_length(name)?;

    let first = name.chars().next().unwrap_or_default();
    if !is_lower_alnum(first) {
        return Err(NamingError::InvalidStart {
            name: name.to_string(),
            expected: "a lowercase letter or digit",
        });
    }

    for c in name.chars() {
        if !is_lower_alnum(c) && c != '-' {
            return Err(NamingError::InvalidCharacter {
                name: name.to_string(),
                character: c,
            });
        }
    }

    check_hyphen_placement(name)?;
    check_reserved(name, RESERVED_CONTAINER_NAMES)
}

/// Validate a table name.
///
/// Rules: 3-63 characters; starts with a letter; ASCII alphanumeric only;
/// not reserved.
///
/// # Errors
///
/// Returns a [`NamingError`] identifying the violated rule.
pub fn validate_table_name(name: &str) -> Result<(), NamingError> {
    check_length(name)?;

    let first = name.chars().next().unwrap_or_default();
    if !first.is_ascii_alphabetic() {
        return Err(NamingError::InvalidStart {
            name: name.to_string(),
            expected: "a letter",
        });
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() {
            return Err(NamingError::InvalidCharacter {
                name: name.to_string(),
                character: c,
            });
        }
    }

    check_reserved(name, RESERVED_TABLE_NAMES)
}

/// Validate a queue name.
///
/// Rules: 3-63 characters; starts with a lowercase letter or digit;
/// lowercase alphanumeric and single interior hyphens only; not reserved.
///
/// # Errors
///
/// Returns a [`NamingError`] identifying the violated rule.
pub fn validate_queue_name(name: &str) -> Result<(), NamingError> {
    check_length(name)?;

    let first = name.chars().next().unwrap_or_default();
    if !is_lower_alnum(first) {
        return Err(NamingError::InvalidStart {
            name: name.to_string(),
            expected: "a lowercase letter or digit",
        });
    }

    for c in name.chars() {
        if !is_lower_alnum(c) && c != '-' {
            return Err(NamingError::InvalidCharacter {
                name: name.to_string(),
                character: c,
            });
        }
    }

    check_hyphen_placement(name)?;
    check_reserved(name, RESERVED_QUEUE_NAMES)
}
