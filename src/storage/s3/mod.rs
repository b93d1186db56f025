pub mod bucket;
pub mod client;
pub mod download;
pub mod list;
pub mod models;
pub mod upload;

pub use bucket::is_missing_bucket;
pub use models::S3StorageClient;

use crate::errors::StorageError;
use crate::interfaces::ObjectStore;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

#[async_trait]
impl ObjectStore for S3StorageClient {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        self.head_bucket(bucket).await
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.create_bucket_in_region(bucket).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
    ) -> Result<(), StorageError> {
        self.put_stream(bucket, key, body).await
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream, StorageError> {
        self.get_stream(bucket, key).await
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, StorageError> {
        self.list_keys(bucket).await
    }
}
