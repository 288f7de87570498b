//! Secret reference parsing.
//!
//! A secret reference names where a certificate is stored, either as a bare
//! `name` (resolved in the rule's own namespace downstream) or as an
//! explicit `namespace/name` pair.  The extractor uses this parser purely
//! as a validation gate; the raw string is what travels to the resolver.

use crate::{Error, Result};

/// Parse a secret reference of the form `name` or `namespace/name`.
///
/// Returns the name and, when present, the namespace.  Segments must be
/// valid object names: lowercase alphanumerics, `-` and `.`, starting and
/// ending with an alphanumeric character.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] when the input is empty,
/// contains more than one `/`, has an empty segment, or a segment carries
/// characters outside the allowed set.
pub fn parse_name_namespace(value: &str) -> Result<(String, Option<String>)> {
    let segments: Vec<&str> = value.split('/').collect();
    match segments.as_slice() {
        [name] => {
            validate_segment(value, name)?;
            Ok(((*name).to_owned(), None))
        }
        [namespace, name] => {
            validate_segment(value, namespace)?;
            validate_segment(value, name)?;
            Ok(((*name).to_owned(), Some((*namespace).to_owned())))
        }
        _ => Err(invalid(value, "expected 'name' or 'namespace/name'")),
    }
}

fn validate_segment(whole: &str, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(invalid(whole, "segment is empty"));
    }

    let valid_start_end = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let first = segment.chars().next().unwrap_or_default();
    let last = segment.chars().next_back().unwrap_or_default();
    if !valid_start_end(first) || !valid_start_end(last) {
        return Err(invalid(
            whole,
            "segments must start and end with a lowercase alphanumeric character",
        ));
    }

    if !segment
        .chars()
        .all(|c| valid_start_end(c) || c == '-' || c == '.')
    {
        return Err(invalid(
            whole,
            "segments may only contain lowercase alphanumerics, '-' and '.'",
        ));
    }

    Ok(())
}

fn invalid(value: &str, reason: &str) -> Error {
    Error::InvalidConfiguration(format!("invalid secret reference '{value}': {reason}"))
}
