use std::path::PathBuf;
use uuid::Uuid;

/// One `POST /download` submission
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub request_id: Uuid,
    pub url: String,
}

impl DownloadRequest {
    /// New request with a time-sortable UUIDv7 identifier
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            url: url.into(),
        }
    }
}

/// Fully expanded command line for a single tool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Tool identifier, e.g. `yt-dlp`
    pub tool: String,
    pub program: String,
    pub args: Vec<String>,
    pub url: String,
    /// Directory the tool was told to write into
    pub output_dir: PathBuf,
}

/// Captured result of a finished tool process
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub success: bool,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// The file handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub file_name: String,
}
