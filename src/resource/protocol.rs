//! Request and response payloads of the resource protocol

use crate::config::Source;
use serde::{Deserialize, Serialize};

/// A single released version, in either addressing mode.
///
/// Path-addressed releases carry the full object key; natively versioned
/// releases carry the store's opaque version id. The two shapes never mix
/// within one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Version {
    Path { path: String },
    VersionId { version_id: String },
}

/// Payload of a check request: the source plus the last version the caller
/// has seen, if any.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
}

/// Payload of a fetch request: the source and the exact version to download.
#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub source: Source,
    pub version: Version,
}

/// Result of a fetch: the version that was materialized plus display
/// metadata for the caller's UI.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FetchResult {
    pub version: Version,
    pub metadata: Vec<MetadataField>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}
