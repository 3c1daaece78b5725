//! Loosely-structured version values with a pinned total order

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::version::error::{ParseErrorReason, VersionParseError};

/// One dot-separated identifier within a version section.
///
/// Variant order is load-bearing: `Number` sorts before `Text`, so numeric
/// identifiers take lower precedence than textual ones (`1.0-1 < 1.0-alpha`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment {
    /// All-digit identifier, compared numerically.
    Number(u64),
    /// Identifier with at least one non-digit, compared lexically.
    Text(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Number(n) => write!(f, "{n}"),
            Segment::Text(s) => f.write_str(s),
        }
    }
}

/// A parsed, comparable version.
///
/// Follows the loose `release[-pre][+build]` convention rather than strict
/// SemVer: the release section may have any number of segments, so `"105"`,
/// `"1.0.5"` and `"1.0.6.1-rc7"` are all valid. Once constructed the value is
/// immutable.
///
/// Ordering rules:
/// - release segments compare first, element by element; with an equal prefix
///   the shorter section sorts lower (`1.0 < 1.0.0`; a missing segment is
///   absent, not zero)
/// - a pre-release suffix sorts before the bare release
///   (`1.0.0-rc1 < 1.0.0`), a build suffix after it (`1.0.0 < 1.0.0+dev`)
/// - suffix segments compare numerically when all digits, lexically otherwise
///
/// `Display` re-joins the parsed segments, so formatting round-trips up to
/// normalization (`"105"` → `"105"`, `"01"` → `"1"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionValue {
    release: Vec<Segment>,
    pre: Option<Vec<Segment>>,
    build: Option<Vec<Segment>>,
}

impl VersionValue {
    /// Parse a version string.
    ///
    /// # Examples
    ///
    /// - `"105"` -> release `[105]`
    /// - `"1.0.5"` -> release `[1, 0, 5]`
    /// - `"1.0.6.1-rc7"` -> release `[1, 0, 6, 1]`, pre-release `[rc7]`
    /// - `"2.3+build.7"` -> release `[2, 3]`, build `[build, 7]`
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        if input.is_empty() {
            return Err(VersionParseError::new(input, ParseErrorReason::Empty));
        }

        // The build suffix starts at the first '+', the pre-release suffix at
        // the first '-' left of it. Later '-' characters stay inside suffix
        // identifiers ("1.0-rc-2" has the single pre-release segment "rc-2").
        let (rest, build) = match input.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (input, None),
        };
        let (release, pre) = match rest.split_once('-') {
            Some((release, pre)) => (release, Some(pre)),
            None => (rest, None),
        };

        Ok(Self {
            release: parse_section(release, input)?,
            pre: pre.map(|s| parse_section(s, input)).transpose()?,
            build: build.map(|s| parse_section(s, input)).transpose()?,
        })
    }
}

fn parse_section(section: &str, input: &str) -> Result<Vec<Segment>, VersionParseError> {
    section
        .split('.')
        .map(|identifier| parse_identifier(identifier, input))
        .collect()
}

fn parse_identifier(identifier: &str, input: &str) -> Result<Segment, VersionParseError> {
    if identifier.is_empty() {
        return Err(VersionParseError::new(
            input,
            ParseErrorReason::EmptySegment,
        ));
    }
    if !identifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(VersionParseError::new(
            input,
            ParseErrorReason::InvalidCharacter,
        ));
    }
    if identifier.bytes().all(|b| b.is_ascii_digit()) {
        let number = identifier
            .parse::<u64>()
            .map_err(|_| VersionParseError::new(input, ParseErrorReason::NumberOverflow))?;
        Ok(Segment::Number(number))
    } else {
        Ok(Segment::Text(identifier.to_string()))
    }
}

impl FromStr for VersionValue {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for VersionValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.release
            .cmp(&other.release)
            .then_with(|| cmp_pre(self.pre.as_ref(), other.pre.as_ref()))
            .then_with(|| cmp_build(self.build.as_ref(), other.build.as_ref()))
    }
}

impl PartialOrd for VersionValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A pre-release suffix sorts before the bare release.
fn cmp_pre(a: Option<&Vec<Segment>>, b: Option<&Vec<Segment>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

/// A build suffix sorts after the bare release.
fn cmp_build(a: Option<&Vec<Segment>>, b: Option<&Vec<Segment>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_section(f, &self.release)?;
        if let Some(pre) = &self.pre {
            f.write_str("-")?;
            write_section(f, pre)?;
        }
        if let Some(build) = &self.build {
            f.write_str("+")?;
            write_section(f, build)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, segments: &[Segment]) -> fmt::Result {
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            f.write_str(".")?;
        }
        write!(f, "{segment}")?;
    }
    Ok(())
}
