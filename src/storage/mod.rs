//! Bucket access behind a narrow trait
//!
//! The resource only ever needs three things from its backing store: the keys
//! under a prefix, the native version history of one key, and the bytes of one
//! object. [`ObjectStore`] captures exactly that, so the request handlers stay
//! testable without a network, and [`BucketClient`] implements it against the
//! storage JSON API.

#[cfg(test)]
use mockall::automock;

pub mod bucket;
pub mod error;

pub use bucket::BucketClient;
pub use error::StorageError;

/// Trait for the bucket operations the resource needs
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists the keys of all current objects whose name starts with `prefix`
    ///
    /// An empty prefix lists the whole bucket. Order is whatever the store
    /// returns; callers sort for themselves.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Lists the native version ids of one object, newest first
    ///
    /// Returns an empty list when the object has no history, including when
    /// it does not exist at all.
    async fn list_object_versions(&self, key: &str) -> Result<Vec<String>, StorageError>;

    /// Downloads one object, optionally a specific native version of it
    async fn get_object(
        &self,
        key: &str,
        version_id: Option<String>,
    ) -> Result<Vec<u8>, StorageError>;
}
