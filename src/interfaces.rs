use crate::errors::StorageError;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use mockall::automock;

/// Capabilities needed from an object store, kept small so tests can
/// substitute a mock or an in-memory double for the S3 client
#[automock]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// `Ok(false)` only when the backend reports the bucket as absent
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError>;

    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    /// Store `body` under `key`, replacing any existing object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
    ) -> Result<(), StorageError>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream, StorageError>;

    /// Keys in the order the backend reports them
    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, StorageError>;
}
