//! Storage provider trait for uploaded recipe files.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for blob storage backends.
///
/// Paths are relative keys such as `recipes/{recipe}/{file}`; providers
/// decide how they map onto their medium.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is usable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a stored object into memory.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Write bytes at the given path, replacing any previous object.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete the object at the given path. Missing objects are not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Delete a directory and everything below it. Missing directories are
    /// not an error.
    async fn delete_dir(&self, path: &str) -> AppResult<()>;

    /// Check whether an object exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
