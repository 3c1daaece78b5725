use thiserror::Error;

/// A captured substring could not be parsed as a version.
///
/// Distinct from "the key did not match the pattern": parse failures mean the
/// pattern matched but captured something that is not a version, which is
/// fatal to the resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version {input:?}: {reason}")]
pub struct VersionParseError {
    /// The string that failed to parse.
    pub input: String,
    /// What made it unparseable.
    pub reason: ParseErrorReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorReason {
    #[error("empty version string")]
    Empty,
    #[error("empty segment")]
    EmptySegment,
    #[error("segment contains invalid characters")]
    InvalidCharacter,
    #[error("numeric segment out of range")]
    NumberOverflow,
}

impl VersionParseError {
    pub(crate) fn new(input: &str, reason: ParseErrorReason) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}
