use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub downloads: DownloadsConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Upper bound for the `POST /download` form body
    #[serde(default = "default_max_form_bytes")]
    pub max_form_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_form_bytes: default_max_form_bytes(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_max_form_bytes() -> usize {
    16 * 1024
}

/// Output directory configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadsConfig {
    /// Directory the downloader tools write into
    #[serde(default = "default_download_dir")]
    pub dir: PathBuf,
    /// Give every request its own `<dir>/<request_id>` subdirectory.
    /// When false all requests share `dir` and may pick up each other's files.
    #[serde(default = "default_isolate_requests")]
    pub isolate_requests: bool,
    /// Enable `GET /downloads/{*path}`
    #[serde(default)]
    pub serve_files: bool,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
            isolate_requests: default_isolate_requests(),
            serve_files: false,
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("/app/downloads")
}

fn default_isolate_requests() -> bool {
    true
}

/// External downloader tools
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default = "default_yt_dlp")]
    pub yt_dlp: ToolConfig,
    #[serde(default = "default_gallery_dl")]
    pub gallery_dl: ToolConfig,
    /// Kill the tool and fail the request after this many seconds.
    /// Unset means wait forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ToolsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            yt_dlp: default_yt_dlp(),
            gallery_dl: default_gallery_dl(),
            timeout_secs: None,
        }
    }
}

fn default_yt_dlp() -> ToolConfig {
    ToolConfig {
        program: "yt-dlp".to_string(),
    }
}

fn default_gallery_dl() -> ToolConfig {
    ToolConfig {
        program: "gallery-dl".to_string(),
    }
}

/// A single downloader executable
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Program name (looked up on PATH) or absolute path
    pub program: String,
}
