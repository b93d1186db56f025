use std::{path::PathBuf, sync::Arc};

use crate::args::Args;
use crate::config::StorageConfig;
use crate::errors::{StorageError, TransferError};
use crate::storage::{DownloadReceipt, Gateway, S3StorageClient};
use crate::utils::path_utils::is_plain_file_name;
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const GREETING: &str = "Hello AWS S3!";

#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub staging_dir: PathBuf,
}

/// Connect to storage and serve HTTP until Ctrl-C
pub async fn run(args: &Args, storage: StorageConfig) -> Result<()> {
    let client = S3StorageClient::connect(storage).await;
    let state = Arc::new(AppState {
        gateway: Gateway::new(Arc::new(client), args.bucket.clone()),
        staging_dir: args.staging_dir.clone(),
    });

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .context("failed to bind listen socket")?;

    info!(
        addr = %args.listen,
        bucket = %args.bucket,
        staging_dir = %args.staging_dir.display(),
        "s3-file-gateway listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server exited")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/list", get(list_files))
        .route("/upload/:filename", get(upload_file))
        .route("/download/:filename", get(download_file))
        .with_state(state)
}

async fn hello() -> &'static str {
    GREETING
}

async fn list_files(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let keys = state
        .gateway
        .list(None)
        .await
        .map_err(|e| ApiError::transfer("Failed to list files", e))?;
    Ok(Json(keys))
}

/// Responds `true`/`false`; the failure cause only goes to the log
async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let local = staged_path(&state, &filename)?;
    let uploaded = state.gateway.upload(&local, None).await.is_ok();
    Ok(Json(uploaded))
}

async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<DownloadReceipt>, ApiError> {
    let save_as = staged_path(&state, &filename)?;
    let receipt = state
        .gateway
        .download(&filename, &save_as, None)
        .await
        .map_err(|e| ApiError::transfer("Failed to download file", e))?;
    Ok(Json(receipt))
}

fn staged_path(state: &AppState, filename: &str) -> Result<PathBuf, ApiError> {
    if !is_plain_file_name(filename) {
        return Err(ApiError::InvalidFileName(filename.to_string()));
    }
    Ok(state.staging_dir.join(filename))
}

#[derive(Debug)]
enum ApiError {
    InvalidFileName(String),
    Transfer {
        context: &'static str,
        source: TransferError,
    },
}

impl ApiError {
    fn transfer(context: &'static str, source: TransferError) -> Self {
        ApiError::Transfer { context, source }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
            ApiError::Transfer { source, .. } => match source {
                // Upload-only variants; `/upload` answers `false` instead of an error
                TransferError::LocalFileMissing(_) | TransferError::InvalidKey(_) => {
                    StatusCode::BAD_REQUEST
                }
                TransferError::Storage(e) if e.is_not_found() => StatusCode::NOT_FOUND,
                TransferError::Storage(StorageError::BucketConflict(_)) => StatusCode::CONFLICT,
                TransferError::Storage(_) => StatusCode::BAD_GATEWAY,
                TransferError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::InvalidFileName(name) => format!("Invalid file name: {name:?}"),
            ApiError::Transfer { context, source } => format!("{context}: {source}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(%status, error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::MockObjectStore;
    use crate::testing::InMemoryStore;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    const BUCKET: &str = "test-bucket";

    fn setup_test_app() -> (Arc<InMemoryStore>, Router, tempfile::TempDir) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Arc::new(InMemoryStore::new());
        let state = Arc::new(AppState {
            gateway: Gateway::new(store.clone(), BUCKET),
            staging_dir: tmp.path().to_path_buf(),
        });
        (store, build_router(state), tmp)
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        let response = router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn root_returns_greeting() {
        let (_store, router, _tmp) = setup_test_app();
        let (status, body) = get(&router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, GREETING.as_bytes());
    }

    #[tokio::test]
    async fn list_on_fresh_store_is_empty_and_provisions() {
        let (store, router, _tmp) = setup_test_app();
        let (status, body) = get(&router, "/list").await;
        assert_eq!(status, StatusCode::OK);
        let keys: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert!(keys.is_empty());
        assert!(store.has_bucket(BUCKET));
    }

    #[tokio::test]
    async fn upload_then_list_then_download() {
        let (store, router, tmp) = setup_test_app();
        std::fs::write(tmp.path().join("report.txt"), b"hello").unwrap();

        let (status, body) = get(&router, "/upload/report.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<bool>(&body).unwrap(), true);
        assert_eq!(store.object(BUCKET, "report.txt").unwrap(), b"hello");

        let (_, body) = get(&router, "/list").await;
        let keys: Vec<String> = serde_json::from_slice(&body).unwrap();
        assert_eq!(keys, ["report.txt"]);

        std::fs::remove_file(tmp.path().join("report.txt")).unwrap();
        let (status, body) = get(&router, "/download/report.txt").await;
        assert_eq!(status, StatusCode::OK);
        let receipt: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(receipt["key"], "report.txt");
        assert_eq!(receipt["bytes"], 5);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("report.txt")).unwrap(),
            "hello"
        );
    }

    #[tokio::test]
    async fn upload_of_missing_file_is_false() {
        let (store, router, _tmp) = setup_test_app();
        let (status, body) = get(&router, "/upload/absent.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<bool>(&body).unwrap(), false);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn download_of_missing_object_is_404() {
        let (_store, router, tmp) = setup_test_app();
        let (status, body) = get(&router, "/download/ghost.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: Value = serde_json::from_slice(&body).unwrap();
        assert!(
            err["error"]
                .as_str()
                .unwrap()
                .starts_with("Failed to download file:")
        );
        assert!(!tmp.path().join("ghost.txt").exists());
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let (store, router, _tmp) = setup_test_app();
        for uri in ["/upload/..", "/download/..", "/upload/.", "/download/a%2Fb"] {
            let (status, _) = get(&router, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn storage_outage_maps_to_bad_gateway() {
        let mut store = MockObjectStore::new();
        store
            .expect_bucket_exists()
            .returning(|_| Err(StorageError::remote("HeadBucket", "connection refused")));
        let tmp = tempfile::tempdir().unwrap();
        let router = build_router(Arc::new(AppState {
            gateway: Gateway::new(Arc::new(store), BUCKET),
            staging_dir: tmp.path().to_path_buf(),
        }));

        let (status, body) = get(&router, "/list").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let err: Value = serde_json::from_slice(&body).unwrap();
        assert!(err["error"].as_str().unwrap().contains("connection refused"));
    }
}
