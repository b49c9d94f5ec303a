//! Best-effort storage name correction.
//!
//! Sanitizers never fail: for any input, the output satisfies the
//! corresponding validator.

use super::validate::{
    MAX_NAME_LEN, MIN_NAME_LEN, RESERVED_CONTAINER_NAMES, RESERVED_QUEUE_NAMES,
    RESERVED_TABLE_NAMES,
};

/// Padding character for names below the minimum length.
const PAD_CHAR: char = 'x';
/// Disambiguating character appended on reserved-word collisions.
const DISAMBIGUATOR: char = 'x';

struct SanitizePolicy {
    /// Whether interior hyphens are permitted.
    allow_hyphens: bool,
    /// Whether the first character must be a letter (vs letter-or-digit).
    require_letter_start: bool,
    /// Letter prefixed when the input yields an invalid start.
    prefix: char,
    /// Reserved words to disambiguate away from.
    reserved: &'static [&'static str],
}

fn sanitize(raw: &str, policy: &SanitizePolicy) -> String {
    // Lowercase and strip disallowed characters.
    let mut name: String = raw
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || (policy.allow_hyphens && *c == '-')
        })
        .collect();

    if policy.allow_hyphens {
        // Collapse runs of hyphens, then trim them from both ends.
        while name.contains("--") {
            name = name.replace("--", "-");
        }
        name = name.trim_matches('-').to_string();
    }

    // Prefix a letter when the result starts with a character the
    // resource kind does not permit (or is empty).
    let needs_prefix = match name.chars().next() {
        None => true,
        Some(first) if policy.require_letter_start => !first.is_ascii_lowercase(),
        Some(_) => false,
    };
    if needs_prefix {
        name.insert(0, policy.prefix);
    }

    // Pad short results, truncate long ones.
    while name.len() < MIN_NAME_LEN {
        name.push(PAD_CHAR);
    }
    if name.len() > MAX_NAME_LEN {
        name.truncate(MAX_NAME_LEN);
        if policy.allow_hyphens {
            name = name.trim_end_matches('-').to_string();
            while name.len() < MIN_NAME_LEN {
                name.push(PAD_CHAR);
            }
        }
    }

    // Disambiguate reserved-word collisions, truncating further if needed.
    while policy.reserved.contains(&name.as_str()) {
        if name.len() >= MAX_NAME_LEN {
            name.truncate(MAX_NAME_LEN - 1);
        }
        name.push(DISAMBIGUATOR);
    }

    name
}

/// Sanitize a blob container name.
///
/// The output always satisfies
/// [`validate_container_name`](super::validate_container_name).
#[must_use]
pub fn sanitize_container_name(raw: &str) -> String {
    sanitize(
        raw,
        &SanitizePolicy {
            allow_hyphens: true,
            require_letter_start: false,
            prefix: 'c',
            reserved: RESERVED_CONTAINER_NAMES,
        },
    )
}

/// Sanitize a table name.
///
/// The output always satisfies
/// [`validate_table_name`](super::validate_table_name).
#[must_use]
pub fn sanitize_table_name(raw: &str) -> String {
    sanitize(
        raw,
        &SanitizePolicy {
            allow_hyphens: false,
            require_letter_start: true,
            prefix: 't',
            reserved: RESERVED_TABLE_NAMES,
        },
    )
}

/// Sanitize a queue name.
///
/// The output always satisfies
/// [`validate_queue_name`](super::validate_queue_name).
#[must_use]
pub fn sanitize_queue_name(raw: &str) -> String {
    sanitize(
        raw,
        &SanitizePolicy {
            allow_hyphens: true,
            require_letter_start: false,
            prefix: 'q',
            reserved: RESERVED_QUEUE_NAMES,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::validate::{
        validate_container_name, validate_queue_name, validate_table_name,
    };

    #[test]
    fn test_sanitize_container_strips_and_lowercases() {
        assert_eq!(sanitize_container_name("Blog Images!"), "blogimages");
        assert_eq!(sanitize_container_name("blog--images"), "blog-images");
        assert_eq!(sanitize_container_name("-blog-"), "blog");
    }

    #[test]
    fn test_sanitize_pads_short_names() {
        assert_eq!(sanitize_container_name("a"), "axx");
        assert_eq!(sanitize_container_name(""), "cxx");
        assert_eq!(sanitize_table_name(""), "txx");
        assert_eq!(sanitize_queue_name("!"), "qxx");
    }

    #[test]
    fn test_sanitize_truncates_long_names() {
        let long = "a".repeat(100);
        assert_eq!(sanitize_container_name(&long).len(), 63);
    }

    #[test]
    fn test_sanitize_table_prefixes_digit_start() {
        assert_eq!(sanitize_table_name("1metadata"), "t1metadata");
    }

    #[test]
    fn test_sanitize_disambiguates_reserved() {
        assert_eq!(sanitize_container_name("containers"), "containersx");
        assert_eq!(sanitize_table_name("tables"), "tablesx");
        assert_eq!(sanitize_queue_name("queues"), "queuesx");
    }

    #[test]
    fn test_sanitized_output_validates() {
        for raw in ["", "a", "--", "Blog Images", "日本語", "containers"] {
            assert!(validate_container_name(&sanitize_container_name(raw)).is_ok());
            assert!(validate_table_name(&sanitize_table_name(raw)).is_ok());
            assert!(validate_queue_name(&sanitize_queue_name(raw)).is_ok());
        }
    }
}
