//! End-to-end fetches against a canned bucket

mod helper;

use bucket_resource::config::Source;
use bucket_resource::resource::{self, FetchError, FetchRequest, Version};
use helper::FakeStore;

fn path_request(regexp: &str, path: &str) -> FetchRequest {
    FetchRequest {
        source: Source {
            bucket: "artifacts".to_string(),
            regexp: Some(regexp.to_string()),
            ..Source::default()
        },
        version: Version::Path {
            path: path.to_string(),
        },
    }
}

fn native_request(key: &str, id: &str) -> FetchRequest {
    FetchRequest {
        source: Source {
            bucket: "artifacts".to_string(),
            versioned_file: Some(key.to_string()),
            ..Source::default()
        },
        version: Version::VersionId {
            version_id: id.to_string(),
        },
    }
}

#[tokio::test]
async fn fetch_places_the_artifact_under_its_base_name() {
    let store = FakeStore::new().with_object("builds/nested/app-1.0.tgz", None, b"artifact bytes");
    let destination = tempfile::tempdir().unwrap();

    let request = path_request(r"builds/nested/app-([0-9.]+)\.tgz", "builds/nested/app-1.0.tgz");
    let result = resource::fetch(&store, &request, destination.path())
        .await
        .unwrap();

    let written = std::fs::read(destination.path().join("app-1.0.tgz")).unwrap();
    assert_eq!(written, b"artifact bytes");
    assert_eq!(result.version, request.version);
    assert_eq!(result.metadata[0].value, "app-1.0.tgz");
}

#[tokio::test]
async fn fetch_downloads_the_requested_generation_not_the_newest() {
    let store = FakeStore::new()
        .with_object("state/latest.json", Some("1700000100"), b"{\"release\": \"1.0\"}")
        .with_object("state/latest.json", Some("1700000200"), b"{\"release\": \"2.0\"}");
    let destination = tempfile::tempdir().unwrap();

    let request = native_request("state/latest.json", "1700000100");
    resource::fetch(&store, &request, destination.path())
        .await
        .unwrap();

    let written = std::fs::read(destination.path().join("latest.json")).unwrap();
    assert_eq!(written, b"{\"release\": \"1.0\"}");
}

#[tokio::test]
async fn fetch_refuses_a_version_id_for_a_path_source() {
    let store = FakeStore::new();
    let destination = tempfile::tempdir().unwrap();

    let request = FetchRequest {
        source: Source {
            bucket: "artifacts".to_string(),
            regexp: Some(r"app-([0-9.]+)\.tgz".to_string()),
            ..Source::default()
        },
        version: Version::VersionId {
            version_id: "1700000100".to_string(),
        },
    };
    let result = resource::fetch(&store, &request, destination.path()).await;

    assert!(matches!(result, Err(FetchError::VersionMismatch)));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn fetch_surfaces_a_missing_object() {
    let store = FakeStore::new();
    let destination = tempfile::tempdir().unwrap();

    let request = path_request(r"app-([0-9.]+)\.tgz", "app-9.9.tgz");
    let result = resource::fetch(&store, &request, destination.path()).await;

    assert!(matches!(result, Err(FetchError::Storage(_))));
}
