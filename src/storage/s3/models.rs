use crate::config::StorageConfig;
use aws_sdk_s3::Client;

/// S3-compatible storage client.
///
/// Holds one configured SDK client; cloning is cheap and clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct S3StorageClient {
    pub(crate) client: Client,
    pub(crate) config: StorageConfig,
}
