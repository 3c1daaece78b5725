//! The fetch operation: materialize one released version on disk

use crate::config::AddressingMode;
use crate::resource::error::FetchError;
use crate::resource::protocol::{FetchRequest, FetchResult, MetadataField, Version};
use crate::storage::ObjectStore;
use std::path::Path;
use tracing::info;

/// Downloads the requested version into `destination`.
///
/// The object lands under its own file name, directories in the key
/// stripped, and the result echoes the version back along with display
/// metadata. The version's shape has to agree with the source's addressing
/// mode; a path request against a versioned file is refused outright.
pub async fn fetch(
    store: &dyn ObjectStore,
    request: &FetchRequest,
    destination: &Path,
) -> Result<FetchResult, FetchError> {
    let mode = request.source.addressing_mode()?;

    let (key, version_id) = match (&mode, &request.version) {
        (AddressingMode::RegexPath { .. }, Version::Path { path }) => (path.as_str(), None),
        (AddressingMode::NativeVersioning { key, .. }, Version::VersionId { version_id }) => {
            (key.as_str(), Some(version_id.clone()))
        }
        _ => return Err(FetchError::VersionMismatch),
    };

    let file_name = match key.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(FetchError::EmptyFileName(key.to_string())),
    };

    let body = store.get_object(key, version_id).await?;

    tokio::fs::create_dir_all(destination).await?;
    tokio::fs::write(destination.join(file_name), &body).await?;
    info!("fetched {} ({} bytes)", file_name, body.len());

    Ok(FetchResult {
        version: request.version.clone(),
        metadata: vec![
            MetadataField {
                name: "filename".to_string(),
                value: file_name.to_string(),
            },
            MetadataField {
                name: "size".to_string(),
                value: body.len().to_string(),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Source;
    use crate::storage::{MockObjectStore, StorageError};

    fn path_request(path: &str) -> FetchRequest {
        FetchRequest {
            source: Source {
                bucket: "artifacts".to_string(),
                regexp: Some(r"builds/app-([0-9.]+)\.tgz".to_string()),
                ..Source::default()
            },
            version: Version::Path {
                path: path.to_string(),
            },
        }
    }

    fn native_request(key: &str, version_id: &str) -> FetchRequest {
        FetchRequest {
            source: Source {
                bucket: "artifacts".to_string(),
                versioned_file: Some(key.to_string()),
                ..Source::default()
            },
            version: Version::VersionId {
                version_id: version_id.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn fetch_writes_the_object_under_its_file_name() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .withf(|key, version_id| key == "builds/app-1.0.tgz" && version_id.is_none())
            .returning(|_, _| Ok(b"artifact bytes".to_vec()));

        let destination = tempfile::tempdir().unwrap();
        let request = path_request("builds/app-1.0.tgz");
        let result = fetch(&store, &request, destination.path()).await.unwrap();

        let written = std::fs::read(destination.path().join("app-1.0.tgz")).unwrap();
        assert_eq!(written, b"artifact bytes");
        assert_eq!(result.version, request.version);
        assert_eq!(
            result.metadata,
            vec![
                MetadataField {
                    name: "filename".to_string(),
                    value: "app-1.0.tgz".to_string(),
                },
                MetadataField {
                    name: "size".to_string(),
                    value: "14".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn fetch_requests_the_exact_native_version() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .withf(|key, version_id| {
                key == "state/latest.json" && version_id.as_deref() == Some("1700000000000300")
            })
            .returning(|_, _| Ok(br#"{"release": "2.0"}"#.to_vec()));

        let destination = tempfile::tempdir().unwrap();
        let request = native_request("state/latest.json", "1700000000000300");
        let result = fetch(&store, &request, destination.path()).await.unwrap();

        let written = std::fs::read(destination.path().join("latest.json")).unwrap();
        assert_eq!(written, br#"{"release": "2.0"}"#);
        assert_eq!(result.version, request.version);
    }

    #[tokio::test]
    async fn version_shape_must_agree_with_the_addressing_mode() {
        // No expectations set: any storage call would panic the test.
        let store = MockObjectStore::new();
        let request = FetchRequest {
            source: Source {
                bucket: "artifacts".to_string(),
                regexp: Some(r"app-([0-9.]+)\.tgz".to_string()),
                ..Source::default()
            },
            version: Version::VersionId {
                version_id: "1700000000000300".to_string(),
            },
        };

        let destination = tempfile::tempdir().unwrap();
        let result = fetch(&store, &request, destination.path()).await;

        assert!(matches!(result, Err(FetchError::VersionMismatch)));
    }

    #[tokio::test]
    async fn key_without_a_file_name_is_rejected() {
        let store = MockObjectStore::new();
        let request = path_request("builds/");

        let destination = tempfile::tempdir().unwrap();
        let result = fetch(&store, &request, destination.path()).await;

        assert!(matches!(result, Err(FetchError::EmptyFileName(_))));
    }

    #[tokio::test]
    async fn missing_object_propagates_not_found() {
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .returning(|_, _| Err(StorageError::NotFound("builds/app-9.9.tgz".to_string())));

        let destination = tempfile::tempdir().unwrap();
        let request = path_request("builds/app-9.9.tgz");
        let result = fetch(&store, &request, destination.path()).await;

        assert!(matches!(
            result,
            Err(FetchError::Storage(StorageError::NotFound(_)))
        ));
    }
}
