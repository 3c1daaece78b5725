//! Object store test double

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use bucket_resource::storage::{ObjectStore, StorageError};

/// In-memory [`ObjectStore`] with canned listings and objects
#[derive(Default)]
pub struct FakeStore {
    keys: Vec<String>,
    histories: HashMap<String, Vec<String>>,
    objects: HashMap<(String, Option<String>), Vec<u8>>,
    calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(mut self, keys: Vec<&str>) -> Self {
        self.keys = keys.into_iter().map(String::from).collect();
        self
    }

    /// Registers a native version history for one key, newest first
    pub fn with_history(mut self, key: &str, versions: Vec<&str>) -> Self {
        self.histories.insert(
            key.to_string(),
            versions.into_iter().map(String::from).collect(),
        );
        self
    }

    pub fn with_object(mut self, key: &str, version_id: Option<&str>, body: &[u8]) -> Self {
        self.objects.insert(
            (key.to_string(), version_id.map(String::from)),
            body.to_vec(),
        );
        self
    }

    /// Number of storage calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .keys
            .iter()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn list_object_versions(&self, key: &str) -> Result<Vec<String>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.histories.get(key).cloned().unwrap_or_default())
    }

    async fn get_object(
        &self,
        key: &str,
        version_id: Option<String>,
    ) -> Result<Vec<u8>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.objects
            .get(&(key.to_string(), version_id))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }
}
