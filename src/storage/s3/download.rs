use crate::errors::StorageError;
use crate::storage::s3::models::S3StorageClient;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::primitives::ByteStream;

impl S3StorageClient {
    /// GetObject, returning the still-unread body stream
    pub(crate) async fn get_stream(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<ByteStream, StorageError> {
        tracing::debug!(bucket, key, "S3 download request");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    StorageError::ObjectNotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else if err.code() == Some("NoSuchBucket") {
                    StorageError::BucketNotFound(bucket.to_string())
                } else {
                    StorageError::remote("GetObject", DisplayErrorContext(&err))
                }
            })?;

        tracing::debug!(
            bucket,
            key,
            content_length = ?response.content_length(),
            e_tag = ?response.e_tag(),
            "S3 download response received"
        );

        Ok(response.body)
    }
}
