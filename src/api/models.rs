//! Request and response bodies for the HTTP surface.
//!
//! - `POST /download` takes a [`DownloadForm`] (`application/x-www-form-urlencoded`)
//!   and answers with the file itself or an [`ErrorResponse`]
//! - `GET /health` answers with a [`HealthResponse`]
//!
//! Error bodies are always a single field:
//!
//! ```json
//! { "error": "No suitable downloader found for this URL" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: BTreeMap<String, String>,
    pub downloads: DownloadCounters,
    pub version: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadCounters {
    pub requested: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub rejected: u64,
}
