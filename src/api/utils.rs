//! API utility functions
//!
//! Helpers for turning files on disk into HTTP attachments and for mapping
//! a requested download name onto the output directory without escaping it.

use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use tokio_util::io::ReaderStream;

use crate::api::error::ApiError;

/// Deepest path accepted by `/downloads/...`: `<request_id>/<file>`
const MAX_DOWNLOAD_PATH_DEPTH: usize = 2;

/// Builds a `Content-Disposition: attachment` value
///
/// The quoted `filename` is an ASCII-only fallback; the exact name goes into
/// the RFC 5987 `filename*` parameter.
pub fn content_disposition(file_name: &str) -> HeaderValue {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    );

    // Only visible ASCII and spaces remain at this point
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Streams `path` back as an attachment named `file_name`
pub async fn file_attachment(path: &Path, file_name: &str) -> Result<Response, ApiError> {
    let file = tokio::fs::File::open(path).await.map_err(|err| {
        ApiError::Internal(format!("failed to open {}: {}", path.display(), err))
    })?;
    let length = file
        .metadata()
        .await
        .map_err(|err| ApiError::Internal(format!("failed to stat {}: {}", path.display(), err)))?
        .len();

    let content_type = HeaderValue::from_str(mime::APPLICATION_OCTET_STREAM.as_ref())
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, content_disposition(file_name)),
            (header::CONTENT_LENGTH, HeaderValue::from(length)),
        ],
        body,
    )
        .into_response())
}

/// Resolves a requested download path to a regular file under `root`
///
/// Accepts `<file>` or `<request_id>/<file>`. Rejects parent/absolute
/// components, backslashes and NUL, and anything whose canonical form
/// (after following symlinks) leaves the canonical root. All rejections
/// are reported as [`ApiError::NotFound`].
pub async fn resolve_download_path(root: &Path, requested: &str) -> Result<PathBuf, ApiError> {
    if requested.is_empty() || requested.contains(['\\', '\0']) {
        return Err(ApiError::NotFound);
    }

    let relative = Path::new(requested);
    let mut depth = 0;
    for component in relative.components() {
        match component {
            Component::Normal(_) => depth += 1,
            _ => return Err(ApiError::NotFound),
        }
    }
    if depth == 0 || depth > MAX_DOWNLOAD_PATH_DEPTH {
        return Err(ApiError::NotFound);
    }

    let root = tokio::fs::canonicalize(root).await.map_err(|err| {
        ApiError::Internal(format!("failed to resolve {}: {}", root.display(), err))
    })?;
    let candidate = tokio::fs::canonicalize(root.join(relative))
        .await
        .map_err(|_| ApiError::NotFound)?;

    if !candidate.starts_with(&root) {
        return Err(ApiError::NotFound);
    }

    let metadata = tokio::fs::metadata(&candidate)
        .await
        .map_err(|_| ApiError::NotFound)?;
    if !metadata.is_file() {
        return Err(ApiError::NotFound);
    }

    Ok(candidate)
}
