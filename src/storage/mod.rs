pub mod gateway;
pub mod provision;
pub mod s3;
pub mod transfer;

// Re-export types for convenient access from other modules
pub use gateway::{DEFAULT_BUCKET, Gateway};
pub use provision::{BucketState, ensure_bucket};
pub use s3::S3StorageClient;
pub use transfer::{DownloadReceipt, UploadReceipt};
