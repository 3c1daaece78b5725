//! The check operation: everything released since a reference version

use crate::config::AddressingMode;
use crate::resource::error::CheckError;
use crate::resource::protocol::{CheckRequest, Version};
use crate::storage::ObjectStore;
use crate::version::extract::{self, Extraction};
use crate::version::resolver;
use crate::version::value::VersionValue;
use regex::Regex;
use tracing::{debug, warn};

/// Resolves the versions released since `request.version`.
///
/// The source is validated before the store is touched; a misconfigured
/// request never produces a network call. The response is chronological,
/// oldest first, with the reference itself included when it still exists.
pub async fn check(
    store: &dyn ObjectStore,
    request: &CheckRequest,
) -> Result<Vec<Version>, CheckError> {
    match request.source.addressing_mode()? {
        AddressingMode::RegexPath {
            pattern,
            prefix,
            initial_path,
        } => check_paths(store, request, &pattern, &prefix, initial_path.as_deref()).await,
        AddressingMode::NativeVersioning {
            key,
            initial_version,
        } => check_native(store, request, &key, initial_version.as_deref()).await,
    }
}

async fn check_paths(
    store: &dyn ObjectStore,
    request: &CheckRequest,
    pattern: &Regex,
    prefix: &str,
    initial_path: Option<&str>,
) -> Result<Vec<Version>, CheckError> {
    debug!(
        "listing keys under prefix {:?} for pattern {:?}",
        prefix,
        pattern.as_str()
    );
    let keys = store.list_keys(prefix).await?;

    let mut catalog = Vec::new();
    for key in &keys {
        if let Some(extraction) = extract::extract(key, pattern)? {
            catalog.push(extraction);
        }
    }

    if let Some(initial_path) = initial_path {
        match extract::extract(initial_path, pattern)? {
            Some(seed) => resolver::seed_catalog(&mut catalog, seed),
            None => warn!(
                "initial_path {:?} does not match the pattern and was ignored",
                initial_path
            ),
        }
    }

    let reference = reference_version(request, pattern)?;
    let newer = resolver::newer_paths(catalog, reference.as_ref());

    Ok(newer
        .into_iter()
        .map(|entry| Version::Path { path: entry.key })
        .collect())
}

/// Extracts the version bound from the request's reference, if usable.
///
/// A reference that no longer matches the pattern is treated as absent, so
/// the check degrades to reporting the latest version rather than failing.
/// A reference that matches but carries an unparsable version is an error:
/// that can only mean the pattern and the bucket contents disagree.
fn reference_version(
    request: &CheckRequest,
    pattern: &Regex,
) -> Result<Option<VersionValue>, CheckError> {
    let Some(reference) = &request.version else {
        return Ok(None);
    };
    let Version::Path { path } = reference else {
        warn!("reference carries a version id but the source matches paths; resolving from scratch");
        return Ok(None);
    };
    match extract::extract(path, pattern)? {
        Some(Extraction { version, .. }) => Ok(Some(version)),
        None => {
            debug!(
                "reference {:?} no longer matches the pattern; reporting the latest version",
                path
            );
            Ok(None)
        }
    }
}

async fn check_native(
    store: &dyn ObjectStore,
    request: &CheckRequest,
    key: &str,
    initial_version: Option<&str>,
) -> Result<Vec<Version>, CheckError> {
    let history = store.list_object_versions(key).await?;

    let reference = match &request.version {
        Some(Version::VersionId { version_id }) => Some(version_id.as_str()),
        Some(Version::Path { .. }) => {
            warn!("reference carries a path but the source is a versioned file; resolving from scratch");
            None
        }
        None => None,
    };

    let ids = resolver::newer_version_ids(&history, reference, initial_version);
    Ok(ids
        .into_iter()
        .map(|version_id| Version::VersionId { version_id })
        .collect())
}
