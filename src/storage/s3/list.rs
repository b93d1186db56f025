use crate::errors::StorageError;
use crate::storage::s3::models::S3StorageClient;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};

impl S3StorageClient {
    /// ListObjectsV2 across every page; keys keep the service's order
    pub(crate) async fn list_keys(&self, bucket: &str) -> Result<Vec<String>, StorageError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| {
                if err.code() == Some("NoSuchBucket") {
                    StorageError::BucketNotFound(bucket.to_string())
                } else {
                    StorageError::remote("ListObjectsV2", DisplayErrorContext(&err))
                }
            })?;

            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );
        }

        tracing::debug!(bucket, count = keys.len(), "listed objects");
        Ok(keys)
    }
}
