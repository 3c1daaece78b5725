//! New-version resolution over a catalog snapshot
//!
//! The functions here are pure: they take an already-fetched catalog (or
//! version history) plus the caller's last-known reference and decide which
//! entries count as new. All storage access happens before this layer, so
//! every branch of the decision logic is directly testable.

use crate::version::extract::Extraction;
use crate::version::value::VersionValue;

/// Resolve the new entries of a path-addressed catalog.
///
/// The catalog is sorted ascending by version (ties by key) and deduplicated
/// by key. Without a reference only the single latest entry is returned, so
/// a fresh poll starts from the newest release. With a reference, every
/// entry whose version is greater than *or equal to* it comes back in
/// ascending order: the reference re-appears as the first element when its
/// key is still present, which is how the orchestrator recognizes an
/// unbroken sequence.
///
/// An empty catalog resolves to an empty result, never an error. A reference
/// ahead of everything in the catalog also resolves to empty.
pub fn newer_paths(
    mut catalog: Vec<Extraction>,
    reference: Option<&VersionValue>,
) -> Vec<Extraction> {
    catalog.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.key.cmp(&b.key)));
    catalog.dedup_by(|a, b| a.key == b.key);

    if catalog.is_empty() {
        return Vec::new();
    }

    match reference {
        None => catalog.split_off(catalog.len() - 1),
        Some(reference) => {
            catalog.retain(|extraction| extraction.version >= *reference);
            catalog
        }
    }
}

/// Let a configured initial path participate in the catalog.
///
/// The seed joins only when the catalog is empty or when it orders strictly
/// before every real entry: it may stand in for history that predates the
/// bucket's current contents, but it must never displace a real release as
/// "the latest".
pub fn seed_catalog(catalog: &mut Vec<Extraction>, seed: Extraction) {
    if catalog.is_empty()
        || catalog
            .iter()
            .all(|extraction| seed.version < extraction.version)
    {
        catalog.push(seed);
    }
}

/// Resolve the new entries of a native version history.
///
/// `history` is newest-first, as the storage layer guarantees. Without a
/// reference only the newest id is returned. With a reference, the slice from
/// the newest id down to the reference (inclusive) is reversed to
/// chronological order, so the reference comes first and the newest id last.
/// A reference no longer present in the history (deleted upstream) degrades
/// to the newest id alone. An empty history yields the configured initial
/// version id if there is one, otherwise nothing.
pub fn newer_version_ids(
    history: &[String],
    reference: Option<&str>,
    initial_version: Option<&str>,
) -> Vec<String> {
    let Some(newest) = history.first() else {
        return initial_version
            .map(|id| vec![id.to_string()])
            .unwrap_or_default();
    };

    let Some(reference) = reference else {
        return vec![newest.clone()];
    };

    match history.iter().position(|id| id == reference) {
        Some(found) => history[..=found].iter().rev().cloned().collect(),
        None => vec![newest.clone()],
    }
}
