use crate::errors::StorageError;
use crate::storage::s3::models::S3StorageClient;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;

impl S3StorageClient {
    /// PutObject with the whole body in a single request
    pub(crate) async fn put_stream(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
    ) -> Result<(), StorageError> {
        tracing::debug!(bucket, key, "S3 upload request");

        let response = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|err| {
                if err.code() == Some("NoSuchBucket") {
                    StorageError::BucketNotFound(bucket.to_string())
                } else {
                    StorageError::remote("PutObject", DisplayErrorContext(&err))
                }
            })?;

        tracing::debug!(bucket, key, e_tag = ?response.e_tag(), "S3 upload complete");
        Ok(())
    }
}
