use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::DownloadError;
use super::collector;
use super::output::OutputRoot;
use super::rules::{ToolSelector, ToolSpec};
use super::runner::{RunnerError, ToolRunner};
use super::types::{DownloadRequest, DownloadedFile};
use uuid::Uuid;

/// Runs one download end to end: select, allocate, run, collect
#[derive(Clone)]
pub struct Downloader {
    selector: Arc<ToolSelector>,
    runner: Arc<dyn ToolRunner>,
    output: Arc<OutputRoot>,
}

impl Downloader {
    pub fn new(selector: ToolSelector, runner: Arc<dyn ToolRunner>, output: OutputRoot) -> Self {
        Self {
            selector: Arc::new(selector),
            runner,
            output: Arc::new(output),
        }
    }

    pub fn output(&self) -> &OutputRoot {
        &self.output
    }

    /// Download `request.url`, which must already be a syntactically valid URL
    pub async fn fetch(&self, request: &DownloadRequest) -> Result<DownloadedFile, DownloadError> {
        let url = request.url.as_str();
        let request_id = request.request_id;

        if !self.output.is_available() {
            return Err(DownloadError::ServiceUnavailable);
        }

        let Some(tool) = self.selector.select(url) else {
            warn!(%request_id, url, "No suitable downloader found");
            return Err(DownloadError::UnsupportedSource);
        };

        let output_dir = self.output.allocate(request_id).await.map_err(|err| {
            DownloadError::Internal(format!("failed to prepare output directory: {err}"))
        })?;

        let result = self.run_tool(request_id, url, tool, &output_dir).await;
        if result.is_err() {
            self.output.release(&output_dir).await;
        }
        result
    }

    async fn run_tool(
        &self,
        request_id: Uuid,
        url: &str,
        tool: &ToolSpec,
        output_dir: &Path,
    ) -> Result<DownloadedFile, DownloadError> {
        let invocation = tool.invocation(url, output_dir);
        info!(%request_id, tool = %invocation.tool, url, "Downloading");

        let output = self.runner.run(&invocation).await.map_err(|err| match err {
            RunnerError::NotFound { program } => {
                error!(%request_id, tool = %invocation.tool, %program, "Downloader is not installed");
                DownloadError::ToolNotFound {
                    tool: invocation.tool.clone(),
                }
            }
            RunnerError::TimedOut(limit) => DownloadError::TimedOut(limit),
            other => DownloadError::Internal(other.to_string()),
        })?;

        if !output.success {
            error!(
                %request_id,
                tool = %invocation.tool,
                exit_code = ?output.exit_code,
                stderr = %output.stderr,
                "Download failed"
            );
            return Err(DownloadError::ToolExecutionFailed {
                stderr: output.stderr,
            });
        }

        let file = collector::first_file(output_dir).await.map_err(|err| {
            DownloadError::Internal(format!(
                "failed to list {}: {err}",
                output_dir.display()
            ))
        })?;

        match file {
            Some(file) => {
                info!(%request_id, path = %file.path.display(), "Download successful");
                Ok(file)
            }
            None => {
                warn!(%request_id, "Download successful, but no files were created");
                Err(DownloadError::NoOutputProduced)
            }
        }
    }
}
