//! Storage JSON API client

use crate::config::Source;
use crate::storage::ObjectStore;
use crate::storage::error::StorageError;
use serde::Deserialize;
use tracing::warn;

/// Default endpoint for the storage JSON API
const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

/// One page of an object listing
#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    items: Vec<ObjectRecord>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectRecord {
    name: String,
    generation: Option<String>,
}

/// [`ObjectStore`] implementation against the storage JSON API
pub struct BucketClient {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    access_token: Option<String>,
}

impl BucketClient {
    /// Creates a new BucketClient with a custom endpoint
    pub fn new(endpoint: &str, bucket: &str, access_token: Option<&str>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("bucket-resource")
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            access_token: access_token.map(String::from),
        }
    }

    /// Creates a client for the bucket a source points at
    pub fn from_source(source: &Source) -> Self {
        let endpoint = source
            .endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT);
        let token = source.access_token.as_deref().filter(|t| !t.is_empty());
        Self::new(endpoint, &source.bucket, token)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_page(
        &self,
        prefix: &str,
        versions: bool,
        page_token: Option<&str>,
    ) -> Result<ObjectList, StorageError> {
        let url = format!("{}/storage/v1/b/{}/o", self.endpoint, self.bucket);

        let mut params: Vec<(&str, &str)> = Vec::new();
        if !prefix.is_empty() {
            params.push(("prefix", prefix));
        }
        if versions {
            params.push(("versions", "true"));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let response = self.get(&url).query(&params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(self.bucket.clone()));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StorageError::Forbidden(self.bucket.clone()));
        }

        if !status.is_success() {
            warn!("Storage API returned status {}: {}", status, url);
            return Err(StorageError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse object listing: {}", e);
            StorageError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl ObjectStore for BucketClient {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(prefix, false, page_token.as_deref()).await?;
            keys.extend(page.items.into_iter().map(|o| o.name));
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => return Ok(keys),
            }
        }
    }

    async fn list_object_versions(&self, key: &str) -> Result<Vec<String>, StorageError> {
        let mut generations = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(key, true, page_token.as_deref()).await?;
            // The prefix listing also returns keys that merely start with the
            // requested one, so keep exact matches only.
            generations.extend(
                page.items
                    .into_iter()
                    .filter(|o| o.name == key)
                    .filter_map(|o| o.generation),
            );
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        // Generation ids are decimal integers; (length, value) order compares
        // them numerically without parsing. Newest first.
        generations.sort_by(|a, b| (b.len(), b).cmp(&(a.len(), a)));
        Ok(generations)
    }

    async fn get_object(
        &self,
        key: &str,
        version_id: Option<String>,
    ) -> Result<Vec<u8>, StorageError> {
        let url = format!(
            "{}/storage/v1/b/{}/o/{}",
            self.endpoint,
            self.bucket,
            encode_object_name(key)
        );

        let mut params = vec![("alt", "media")];
        if let Some(generation) = version_id.as_deref() {
            params.push(("generation", generation));
        }

        let response = self.get(&url).query(&params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(key.to_string()));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StorageError::Forbidden(key.to_string()));
        }

        if !status.is_success() {
            warn!("Storage API returned status {}: {}", status, url);
            return Err(StorageError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Percent-encodes an object name for use as a single path segment.
///
/// Everything outside the URI unreserved set is encoded, slashes included,
/// which is what the JSON API expects for names with directory-like keys.
fn encode_object_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
