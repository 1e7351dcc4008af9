use async_trait::async_trait;

use crate::error::StorageError;

/// Storage for uploaded post images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the bytes under a generated name and return the reference path
    /// (a leading `/` followed by the generated file name).
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError>;
}
