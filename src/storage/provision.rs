use crate::errors::StorageError;
use crate::interfaces::ObjectStore;

/// Outcome of provisioning a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketState {
    AlreadyPresent,
    Created,
}

/// Ensure `bucket` exists, creating it if the store reports it absent.
///
/// Idempotent. Any failure of the existence check other than "absent"
/// is returned unchanged and no creation is attempted.
pub async fn ensure_bucket(
    store: &dyn ObjectStore,
    bucket: &str,
) -> Result<BucketState, StorageError> {
    if store.bucket_exists(bucket).await? {
        return Ok(BucketState::AlreadyPresent);
    }

    tracing::info!(bucket, "bucket doesn't exist, creating it");
    store.create_bucket(bucket).await?;
    Ok(BucketState::Created)
}
