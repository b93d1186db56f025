use crate::config::MissingBucketDetection;
use crate::errors::StorageError;
use crate::storage::s3::models::S3StorageClient;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

/// Error codes that mean the bucket is absent
const MISSING_BUCKET_CODES: [&str; 2] = ["NotFound", "NoSuchBucket"];

/// Decide whether a failed HeadBucket means "absent".
///
/// `modeled_not_found` is the SDK's typed NotFound variant; `code` and
/// `status` come from the raw error metadata and response.
pub fn is_missing_bucket(
    modeled_not_found: bool,
    code: Option<&str>,
    status: Option<u16>,
    detection: MissingBucketDetection,
) -> bool {
    if modeled_not_found || code.is_some_and(|c| MISSING_BUCKET_CODES.contains(&c)) {
        return true;
    }
    detection == MissingBucketDetection::ServiceCodeOrStatus && status == Some(404)
}

impl S3StorageClient {
    /// HeadBucket, with absence mapped to `Ok(false)`
    pub(crate) async fn head_bucket(&self, bucket: &str) -> Result<bool, StorageError> {
        let err = match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => return Ok(true),
            Err(err) => err,
        };

        let modeled_not_found = err.as_service_error().is_some_and(|e| e.is_not_found());
        let status = err.raw_response().map(|r| r.status().as_u16());

        if is_missing_bucket(
            modeled_not_found,
            err.code(),
            status,
            self.config.missing_bucket_detection,
        ) {
            tracing::debug!(bucket, ?status, "bucket does not exist");
            return Ok(false);
        }

        Err(StorageError::remote("HeadBucket", DisplayErrorContext(&err)))
    }

    /// CreateBucket, treating "already owned by you" as success
    pub(crate) async fn create_bucket_in_region(&self, bucket: &str) -> Result<(), StorageError> {
        let mut request = self.client.create_bucket().bucket(bucket);

        if self.config.needs_location_constraint() {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(
                        self.config.region.as_str(),
                    ))
                    .build(),
            );
        }

        match request.send().await {
            Ok(_) => {
                tracing::info!(bucket, "bucket created");
                Ok(())
            }
            Err(err) => match err.as_service_error() {
                // Another request provisioned it first
                Some(e) if e.is_bucket_already_owned_by_you() => {
                    tracing::debug!(bucket, "bucket already owned by this account");
                    Ok(())
                }
                Some(e) if e.is_bucket_already_exists() => {
                    Err(StorageError::BucketConflict(bucket.to_string()))
                }
                _ => Err(StorageError::remote(
                    "CreateBucket",
                    DisplayErrorContext(&err),
                )),
            },
        }
    }
}
