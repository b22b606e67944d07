//! The directory downloader tools write into.
//!
//! Startup never fails because of it: if the root cannot be created the
//! service keeps running with downloads disabled.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::DownloadsConfig;

#[derive(Debug, Clone)]
pub struct OutputRoot {
    root: Option<PathBuf>,
    isolate_requests: bool,
}

impl OutputRoot {
    /// Create the root directory if needed, degrading instead of failing
    pub fn prepare(config: &DownloadsConfig) -> Self {
        info!(dir = %config.dir.display(), "Download directory");

        let root = match std::fs::create_dir_all(&config.dir) {
            Ok(()) => Some(config.dir.clone()),
            Err(err) => {
                error!(
                    dir = %config.dir.display(),
                    error = %err,
                    "Failed to create download directory, downloads disabled"
                );
                None
            }
        };

        Self {
            root,
            isolate_requests: config.isolate_requests,
        }
    }

    /// An output root with downloads disabled
    pub fn unavailable() -> Self {
        Self {
            root: None,
            isolate_requests: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.root.is_some()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn isolates_requests(&self) -> bool {
        self.isolate_requests
    }

    /// Directory a single request's tool should write into.
    ///
    /// Isolated mode creates `<root>/<request_id>`; shared mode returns the root.
    /// Callers must check [`OutputRoot::is_available`] first.
    pub async fn allocate(&self, request_id: Uuid) -> io::Result<PathBuf> {
        let root = self.root.as_ref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "download directory not available")
        })?;

        if !self.isolate_requests {
            return Ok(root.clone());
        }

        let dir = root.join(request_id.to_string());
        tokio::fs::create_dir(&dir).await?;
        Ok(dir)
    }

    /// Remove a request directory left empty by a failed download.
    ///
    /// No-op in shared mode. Non-empty directories are kept.
    pub async fn release(&self, dir: &Path) {
        if !self.isolate_requests || self.root.as_deref() == Some(dir) {
            return;
        }

        if let Err(err) = tokio::fs::remove_dir(dir).await {
            warn!(dir = %dir.display(), error = %err, "Failed to remove request directory");
        }
    }
}
