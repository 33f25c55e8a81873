//! HTTP surface for Unredactor.
//!
//! This module exposes a compact Axum router:
//!
//! - `POST /extract` – Multipart upload with one or more `files` parts. Each request gets its
//!   own directory under the upload root; uploads are stored there with a sanitized name, run
//!   through the extraction pipeline, and removed once the response is built.
//!   Returns `{ "results": { "<name>": [{ "unit_index", "snippet", "is_error" }] } }` in
//!   submission order.
//! - `GET /formats` – Accepted format vocabulary and the snippet budget.
//! - `GET /metrics` – Batch, document, and unit counters.
//!
//! Request bodies above the configured upload limit are rejected before extraction starts.

use crate::extraction::{
    BatchError, BatchResult, Document, ExtractionApi, FormatTag, sanitize::sanitize_filename,
};
use crate::metrics::MetricsSnapshot;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// Name of the multipart field carrying uploaded documents.
pub const UPLOAD_FIELD: &str = "files";

/// Shared handler state: the pipeline plus the upload root owned by the storage layer.
struct AppState<S> {
    service: Arc<S>,
    upload_dir: Arc<PathBuf>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            upload_dir: Arc::clone(&self.upload_dir),
        }
    }
}

/// Build the HTTP router exposing the extraction API surface.
pub fn create_router<S>(service: Arc<S>, upload_dir: PathBuf, max_upload_bytes: usize) -> Router
where
    S: ExtractionApi + 'static,
{
    let state = AppState {
        service,
        upload_dir: Arc::new(upload_dir),
    };
    Router::new()
        .route("/extract", post(extract_documents::<S>))
        .route("/formats", get(get_formats::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Success response for `POST /extract`.
#[derive(Serialize)]
struct ExtractResponse {
    results: BatchResult,
}

/// Persist every uploaded file and extract snippets for the batch.
///
/// Parts without a filename, or whose name sanitizes to nothing, are ignored. When no usable
/// upload remains the request fails with `400` and `no documents submitted`. Two requests
/// uploading the same filename never see each other's bytes.
async fn extract_documents<S>(
    State(state): State<AppState<S>>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError>
where
    S: ExtractionApi,
{
    tokio::fs::create_dir_all(state.upload_dir.as_path()).await?;
    let request_dir = tempfile::Builder::new()
        .prefix("batch-")
        .tempdir_in(state.upload_dir.as_path())?;

    let mut documents = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(id) = field.file_name().and_then(sanitize_filename) else {
            tracing::debug!(filename = ?field.file_name(), "Skipping upload without usable name");
            continue;
        };
        let bytes = field.bytes().await?;

        let path = request_dir.path().join(&id);
        tokio::fs::write(&path, &bytes).await?;
        tracing::debug!(document = %id, bytes = bytes.len(), "Stored upload");
        documents.push(Document::from_path(id, path));
    }

    let submitted = documents.len();
    let results = state.service.extract_batch(documents).await?;
    tracing::info!(
        submitted,
        documents = results.len(),
        "Extract request completed"
    );
    Ok(Json(ExtractResponse { results }))
}

/// Response body for `GET /formats`.
#[derive(Serialize)]
struct FormatsResponse {
    formats: Vec<FormatTag>,
    snippet_chars: usize,
}

/// Report which formats are routed to an extractor and the snippet budget.
async fn get_formats<S>(State(state): State<AppState<S>>) -> Json<FormatsResponse>
where
    S: ExtractionApi,
{
    let config = state.service.extraction_config();
    Json(FormatsResponse {
        formats: config.allowed_formats.iter().copied().collect(),
        snippet_chars: config.snippet_chars,
    })
}

/// Return the current extraction counters.
async fn get_metrics<S>(State(state): State<AppState<S>>) -> Json<MetricsSnapshot>
where
    S: ExtractionApi,
{
    Json(state.service.metrics_snapshot())
}

enum AppError {
    Batch(BatchError),
    Upload(MultipartError),
    Storage(std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Batch(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Upload(err) => (err.status(), err.body_text()),
            Self::Storage(err) => {
                tracing::error!(error = %err, "Failed to store upload");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to store upload: {err}"),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<BatchError> for AppError {
    fn from(inner: BatchError) -> Self {
        Self::Batch(inner)
    }
}

impl From<MultipartError> for AppError {
    fn from(inner: MultipartError) -> Self {
        Self::Upload(inner)
    }
}

impl From<std::io::Error> for AppError {
    fn from(inner: std::io::Error) -> Self {
        Self::Storage(inner)
    }
}
