use crate::errors::StorageError;
use crate::interfaces::ObjectStore;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory object store for tests.
///
/// Buckets must be created before use, like a real backend: data calls on
/// an unknown bucket fail with `BucketNotFound`. Keys list in lexical order.
#[derive(Default)]
pub struct InMemoryStore {
    buckets: Mutex<HashMap<String, BTreeMap<String, Vec<u8>>>>,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn has_bucket(&self, bucket: &str) -> bool {
        self.buckets.lock().unwrap().contains_key(bucket)
    }

    /// Raw object content, bypassing the call counter
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.buckets
            .lock()
            .unwrap()
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        self.count();
        Ok(self.has_bucket(bucket))
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.count();
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default();
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: ByteStream,
    ) -> Result<(), StorageError> {
        self.count();
        let data = body
            .collect()
            .await
            .map_err(|e| StorageError::Body(e.to_string()))?
            .into_bytes()
            .to_vec();

        let mut buckets = self.buckets.lock().unwrap();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))?;
        objects.insert(key.to_string(), data);
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream, StorageError> {
        self.count();
        let buckets = self.buckets.lock().unwrap();
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))?;
        let data = objects
            .get(key)
            .ok_or_else(|| StorageError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;
        Ok(ByteStream::from(data.clone()))
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, StorageError> {
        self.count();
        let buckets = self.buckets.lock().unwrap();
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| StorageError::BucketNotFound(bucket.to_string()))?;
        Ok(objects.keys().cloned().collect())
    }
}
