use crate::errors::{StorageError, TransferError};
use crate::interfaces::ObjectStore;
use crate::storage::provision::{BucketState, ensure_bucket};
use std::sync::Arc;

/// Default bucket used when a request names none
pub const DEFAULT_BUCKET: &str = "wepgcomp-bucket";

/// Entry point for bucket, transfer and listing operations against one store.
///
/// Every data operation provisions its bucket first, so callers never see
/// a "bucket not found" failure.
#[derive(Clone)]
pub struct Gateway {
    pub(crate) store: Arc<dyn ObjectStore>,
    pub(crate) default_bucket: String,
}

impl Gateway {
    pub fn new(store: Arc<dyn ObjectStore>, default_bucket: impl Into<String>) -> Self {
        Self {
            store,
            default_bucket: default_bucket.into(),
        }
    }

    pub(crate) fn bucket_or_default<'a>(&'a self, bucket: Option<&'a str>) -> &'a str {
        bucket.unwrap_or(&self.default_bucket)
    }

    /// Make sure the bucket exists, creating it when absent
    pub async fn ensure_bucket(&self, bucket: Option<&str>) -> Result<BucketState, StorageError> {
        ensure_bucket(self.store.as_ref(), self.bucket_or_default(bucket)).await
    }

    /// Object keys of the bucket, in the order the store reports them
    pub async fn list(&self, bucket: Option<&str>) -> Result<Vec<String>, TransferError> {
        let bucket = self.bucket_or_default(bucket);
        ensure_bucket(self.store.as_ref(), bucket).await?;

        let keys = self
            .store
            .list_objects(bucket)
            .await
            .inspect_err(|e| tracing::error!(bucket, error = %e, "Failed to list files"))?;

        tracing::info!(
            bucket,
            "\nHere's a list of files in the bucket:\n{}\n",
            keys.join("\n")
        );
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::MockObjectStore;
    use mockall::Sequence;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn list_provisions_before_listing() {
        let mut seq = Sequence::new();
        let mut store = MockObjectStore::new();
        store
            .expect_bucket_exists()
            .with(eq(DEFAULT_BUCKET))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        store
            .expect_create_bucket()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        store
            .expect_list_objects()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Vec::new()));

        let gateway = Gateway::new(Arc::new(store), DEFAULT_BUCKET);
        assert!(gateway.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_keeps_store_order() {
        let mut store = MockObjectStore::new();
        store.expect_bucket_exists().returning(|_| Ok(true));
        store
            .expect_list_objects()
            .with(eq("other"))
            .returning(|_| Ok(vec!["b".into(), "a".into(), "c".into()]));

        let gateway = Gateway::new(Arc::new(store), DEFAULT_BUCKET);
        let keys = gateway.list(Some("other")).await.unwrap();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn list_failure_is_wrapped() {
        let mut store = MockObjectStore::new();
        store.expect_bucket_exists().returning(|_| Ok(true));
        store
            .expect_list_objects()
            .returning(|_| Err(StorageError::remote("ListObjectsV2", "timed out")));

        let gateway = Gateway::new(Arc::new(store), DEFAULT_BUCKET);
        let err = gateway.list(None).await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn explicit_ensure_reports_state() {
        let mut store = MockObjectStore::new();
        store.expect_bucket_exists().returning(|_| Ok(true));

        let gateway = Gateway::new(Arc::new(store), DEFAULT_BUCKET);
        assert_eq!(
            gateway.ensure_bucket(None).await.unwrap(),
            BucketState::AlreadyPresent
        );
    }
}
