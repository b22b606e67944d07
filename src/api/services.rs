use axum::{
    Form, Json,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::collections::BTreeMap;
use tracing::warn;

use super::{
    error::ApiError,
    models::{DownloadCounters, DownloadForm, HealthResponse},
    state::AppState,
    utils::{file_attachment, resolve_download_path},
    validation::is_valid_url,
};
use crate::downloader::{DownloadError, DownloadRequest};

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Landing page with the URL form (GET /)
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Download endpoint (POST /download)
///
/// ## Flow:
/// 1. Read the `url` form field; a missing field or unreadable form is an invalid URL
/// 2. Validate the URL syntactically
/// 3. Hand off to the [`Downloader`](crate::downloader::Downloader), which
///    picks a tool, runs it and finds the produced file
/// 4. Stream that file back as an attachment
///
/// The tool runs while the request waits; there is no job queue.
pub async fn download(
    State(state): State<AppState>,
    form: Result<Form<DownloadForm>, FormRejection>,
) -> Result<Response, ApiError> {
    state.metrics.download_requested();

    let url = form.ok().and_then(|Form(form)| form.url).unwrap_or_default();

    if !is_valid_url(&url) {
        warn!(url = %url, "Invalid URL");
        state.metrics.download_rejected();
        return Err(ApiError::InvalidUrl);
    }

    let request = DownloadRequest::new(url);

    let file = match state.downloader.fetch(&request).await {
        Ok(file) => file,
        Err(err @ DownloadError::UnsupportedSource) => {
            state.metrics.download_rejected();
            return Err(err.into());
        }
        Err(err) => {
            state.metrics.download_failed();
            return Err(err.into());
        }
    };

    let response = file_attachment(&file.path, &file.file_name).await;
    match &response {
        Ok(_) => state.metrics.download_succeeded(),
        Err(_) => state.metrics.download_failed(),
    }

    response
}

/// Direct file access (GET /downloads/{*path})
///
/// Off unless `downloads.serve_files` is set. Paths are resolved with
/// [`resolve_download_path`] so they cannot leave the output directory.
pub async fn serve_download(
    State(state): State<AppState>,
    Path(requested): Path<String>,
) -> Result<Response, ApiError> {
    if !state.config.downloads.serve_files {
        return Err(ApiError::FileServingDisabled);
    }

    let root = state
        .downloader
        .output()
        .root()
        .ok_or(ApiError::Download(DownloadError::ServiceUnavailable))?;

    let path = resolve_download_path(root, &requested).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(ApiError::NotFound)?;

    file_attachment(&path, &file_name).await
}

/// Health check endpoint (GET /health)
///
/// Returns 503 Service Unavailable while the download directory is unusable,
/// 200 OK otherwise.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let output = state.downloader.output();

    let mut components = BTreeMap::new();
    components.insert("api".to_string(), "healthy".to_string());
    components.insert(
        "download_dir".to_string(),
        if output.is_available() {
            "healthy"
        } else {
            "unavailable"
        }
        .to_string(),
    );
    components.insert(
        "isolation".to_string(),
        if output.isolates_requests() {
            "per_request"
        } else {
            "shared"
        }
        .to_string(),
    );

    let (status_code, status) = if output.is_available() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let snapshot = state.metrics.snapshot();
    let response = HealthResponse {
        status: status.to_string(),
        components,
        downloads: DownloadCounters {
            requested: snapshot.downloads_requested,
            succeeded: snapshot.downloads_succeeded,
            failed: snapshot.downloads_failed,
            rejected: snapshot.downloads_rejected,
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status_code, Json(response))
}
