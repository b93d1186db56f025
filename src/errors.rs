use thiserror::Error;

/// Failures reported by an object store backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Object '{key}' not found in bucket '{bucket}'")]
    ObjectNotFound { bucket: String, key: String },

    #[error("Bucket '{0}' already exists and is owned by another account")]
    BucketConflict(String),

    #[error("Storage request '{operation}' failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    #[error("Failed to read object body: {0}")]
    Body(String),
}

impl StorageError {
    pub fn remote(operation: &'static str, err: impl std::fmt::Display) -> Self {
        StorageError::Remote {
            operation,
            message: err.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::BucketNotFound(_) | StorageError::ObjectNotFound { .. }
        )
    }
}

/// Failures of an upload, download or listing request
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Local file does not exist: {0}")]
    LocalFileMissing(String),

    #[error("Cannot derive an object key from path: {0}")]
    InvalidKey(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems found while reading process configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is set but {1} is not; provide both or neither")]
    IncompleteCredentials(&'static str, &'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
