use crate::errors::TransferError;
use crate::storage::gateway::Gateway;
use crate::storage::provision::{BucketState, ensure_bucket};
use crate::utils::path_utils::object_key_for;
use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Result of a completed upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub bucket: String,
    pub key: String,
    pub bytes: u64,
    pub bucket_state: BucketState,
}

/// Result of a completed download; the file is fully on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadReceipt {
    pub bucket: String,
    pub key: String,
    pub path: PathBuf,
    pub bytes: u64,
}

impl Gateway {
    /// Upload a local file, keyed by its base name.
    ///
    /// A missing local file fails before the store is contacted. Files with
    /// the same name in different directories map to the same key and
    /// overwrite each other.
    pub async fn upload(
        &self,
        local_path: impl AsRef<Path>,
        bucket: Option<&str>,
    ) -> Result<UploadReceipt, TransferError> {
        let local_path = local_path.as_ref();
        let bucket = self.bucket_or_default(bucket);

        let bytes = match tokio::fs::metadata(local_path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => {
                tracing::error!(path = %local_path.display(), "File does not exist");
                return Err(TransferError::LocalFileMissing(
                    local_path.display().to_string(),
                ));
            }
        };

        let key = object_key_for(local_path)
            .ok_or_else(|| TransferError::InvalidKey(local_path.display().to_string()))?;

        let result = async {
            let bucket_state = ensure_bucket(self.store.as_ref(), bucket).await?;

            // Streams from disk; the file is never loaded whole into memory
            let body = ByteStream::from_path(local_path)
                .await
                .map_err(std::io::Error::other)?;
            self.store.put_object(bucket, &key, body).await?;

            Ok::<_, TransferError>(bucket_state)
        }
        .await;

        match result {
            Ok(bucket_state) => {
                tracing::info!(bucket, key = %key, bytes, "File uploaded successfully");
                Ok(UploadReceipt {
                    bucket: bucket.to_string(),
                    key,
                    bytes,
                    bucket_state,
                })
            }
            Err(e) => {
                tracing::error!(bucket, key = %key, error = %e, "Failed to upload file");
                Err(e)
            }
        }
    }

    /// Download an object to `save_as`, creating parent directories.
    ///
    /// Returns once every byte is flushed and the file is in place. The body
    /// is staged in a temporary file next to `save_as` and renamed over it,
    /// so a failed or concurrent download never leaves a partial file there.
    pub async fn download(
        &self,
        key: &str,
        save_as: impl AsRef<Path>,
        bucket: Option<&str>,
    ) -> Result<DownloadReceipt, TransferError> {
        let save_as = save_as.as_ref();
        let bucket = self.bucket_or_default(bucket);

        let result = async {
            ensure_bucket(self.store.as_ref(), bucket).await?;
            let body = self.store.get_object(bucket, key).await?;
            let bytes = write_stream_to_file(body, save_as).await?;
            Ok::<_, TransferError>(bytes)
        }
        .await;

        match result {
            Ok(bytes) => {
                tracing::info!(
                    bucket,
                    key,
                    path = %save_as.display(),
                    bytes,
                    "File downloaded successfully"
                );
                Ok(DownloadReceipt {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    path: save_as.to_path_buf(),
                    bytes,
                })
            }
            Err(e) => {
                tracing::error!(bucket, key, error = %e, "Failed to download file");
                Err(e)
            }
        }
    }
}

/// Copy `body` into `dest` via a sibling temporary file and an atomic rename
async fn write_stream_to_file(body: ByteStream, dest: &Path) -> std::io::Result<u64> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent).await?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".download-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Mode requested by a plain create; the umask still applies
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let staged = builder.tempfile_in(&parent)?;

    // Overwriting keeps the existing file's mode
    if let Ok(existing) = tokio::fs::metadata(dest).await {
        staged.as_file().set_permissions(existing.permissions())?;
    }

    let mut file = tokio::fs::File::from_std(staged.as_file().try_clone()?);
    let reader = body.into_async_read();
    tokio::pin!(reader);
    let bytes = tokio::io::copy(&mut reader, &mut file).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    staged.persist(dest).map_err(|e| e.error)?;
    Ok(bytes)
}
