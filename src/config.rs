//! Source configuration and its validation

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::version::extract::listing_prefix;

/// Source configuration, supplied by the orchestrator with every request.
///
/// `regexp` and `versioned_file` select the addressing mode and are mutually
/// exclusive; [`Source::addressing_mode`] validates the raw fields into an
/// [`AddressingMode`] before anything touches the network.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Source {
    /// Bucket holding the release artifacts.
    pub bucket: String,
    /// Pattern whose capture identifies a release version in an object key.
    pub regexp: Option<String>,
    /// Single key whose native version history carries the releases.
    pub versioned_file: Option<String>,
    /// Key treated as already-released when the bucket has no matches yet.
    pub initial_path: Option<String>,
    /// Version id reported when the versioned file has no history yet.
    pub initial_version: Option<String>,
    /// Storage API endpoint override (self-hosted gateways, tests).
    pub endpoint: Option<String>,
    /// Static bearer token; unset means anonymous access.
    pub access_token: Option<String>,
}

/// Validated addressing mode: exactly one way of identifying releases.
#[derive(Debug, Clone)]
pub enum AddressingMode {
    /// Releases are distinct object keys, each matching the pattern whole.
    RegexPath {
        /// Anchored pattern; a key is a member only when it matches whole.
        pattern: Regex,
        /// Literal key prefix implied by the pattern, used to narrow listings.
        prefix: String,
        initial_path: Option<String>,
    },
    /// Releases are native versions of one fixed key.
    NativeVersioning {
        key: String,
        initial_version: Option<String>,
    },
}

/// Rejected source configurations.
///
/// Every variant fails the request before any storage call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("please specify the bucket")]
    MissingBucket,

    #[error("please specify one of regexp or versioned_file")]
    MissingMode,

    #[error("please specify only one of regexp or versioned_file")]
    AmbiguousMode,

    #[error("initial_path is only valid together with regexp")]
    InitialPathWithoutRegexp,

    #[error("initial_version is only valid together with versioned_file")]
    InitialVersionWithoutVersionedFile,

    #[error("invalid regexp: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("regexp needs at least one capturing group")]
    NoCaptureGroup,
}

impl Source {
    /// Validate this source into its addressing mode.
    ///
    /// Compiles the pattern once; the compiled value is owned by the returned
    /// mode and reused for every catalog entry of the request. The stored
    /// pattern is anchored at both ends, so membership means the whole key
    /// matches. Empty strings count as unset, matching how orchestrators
    /// template optional fields.
    pub fn addressing_mode(&self) -> Result<AddressingMode, ConfigError> {
        if self.bucket.is_empty() {
            return Err(ConfigError::MissingBucket);
        }

        let regexp = non_empty(self.regexp.as_deref());
        let versioned_file = non_empty(self.versioned_file.as_deref());

        match (regexp, versioned_file) {
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousMode),
            (None, None) => Err(ConfigError::MissingMode),
            (Some(regexp), None) => {
                if non_empty(self.initial_version.as_deref()).is_some() {
                    return Err(ConfigError::InitialVersionWithoutVersionedFile);
                }
                let pattern = Regex::new(regexp)?;
                // captures_len counts the implicit whole-match group.
                if pattern.captures_len() < 2 {
                    return Err(ConfigError::NoCaptureGroup);
                }
                // Membership is whole-key: anchored, a key merely containing
                // a match (a checksum neighbour, a wrapping directory) stays
                // out. The unanchored compile above keeps syntax errors
                // pointing at the pattern as written.
                let pattern = Regex::new(&format!("^(?:{regexp})$"))?;
                Ok(AddressingMode::RegexPath {
                    pattern,
                    prefix: listing_prefix(regexp),
                    initial_path: non_empty(self.initial_path.as_deref()).map(String::from),
                })
            }
            (None, Some(key)) => {
                if non_empty(self.initial_path.as_deref()).is_some() {
                    return Err(ConfigError::InitialPathWithoutRegexp);
                }
                Ok(AddressingMode::NativeVersioning {
                    key: key.to_string(),
                    initial_version: non_empty(self.initial_version.as_deref()).map(String::from),
                })
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
