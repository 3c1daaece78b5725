//! Version extraction from object keys

use regex::Regex;

use crate::version::error::VersionParseError;
use crate::version::value::VersionValue;

/// A catalog entry: an object key paired with the version extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The object key the version was extracted from.
    pub key: String,
    /// The parsed, comparable version.
    pub version: VersionValue,
    /// The raw captured substring, kept for logs and metadata.
    pub raw_version: String,
}

/// Extract the version embedded in `key` according to `pattern`.
///
/// A capturing group named `version` takes precedence over all other groups;
/// otherwise the first participating unnamed group is used.
///
/// # Returns
/// * `Ok(Some(extraction))` - the key matched and the capture parsed
/// * `Ok(None)` - the key did not match, or no capturing group participated
/// * `Err(VersionParseError)` - the capture is not a valid version (the
///   pattern matched, so this is fatal rather than a mere non-match)
pub fn extract(key: &str, pattern: &Regex) -> Result<Option<Extraction>, VersionParseError> {
    let Some(captures) = pattern.captures(key) else {
        return Ok(None);
    };

    let capture = captures
        .name("version")
        .or_else(|| (1..captures.len()).find_map(|i| captures.get(i)));
    let Some(capture) = capture else {
        return Ok(None);
    };

    let raw_version = capture.as_str();
    let version = VersionValue::parse(raw_version)?;

    Ok(Some(Extraction {
        key: key.to_string(),
        version,
        raw_version: raw_version.to_string(),
    }))
}

/// Derive the literal key prefix implied by `pattern`, used to narrow the
/// object listing.
///
/// The prefix is the longest leading run of `/`-separated pattern sections
/// containing no regex metacharacters. A partial run keeps its trailing `/`;
/// an all-literal pattern names a single key and is returned whole; a pattern
/// with no literal lead yields an empty prefix (list everything).
pub fn listing_prefix(pattern: &str) -> String {
    let sections: Vec<&str> = pattern.split('/').collect();
    let literal: Vec<&str> = sections
        .iter()
        .take_while(|section| is_literal_section(section))
        .copied()
        .collect();

    if literal.is_empty() {
        String::new()
    } else if literal.len() == sections.len() {
        literal.join("/")
    } else {
        format!("{}/", literal.join("/"))
    }
}

fn is_literal_section(section: &str) -> bool {
    // The metacharacters the regex syntax can give meaning to; '-' and '_'
    // stay literal outside character classes.
    !section.chars().any(|c| {
        matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        )
    })
}
