//! Download pipeline
//!
//! A submitted URL is matched against an ordered [`ToolSelector`], the chosen
//! external tool is run by a [`ToolRunner`] with its output pointed at a
//! directory from [`OutputRoot`], and the first file found there is returned.
//!
//! ## Key Components
//!
//! - [`Downloader`] - Orchestrates a single request
//! - [`ToolSelector`] / [`DomainRule`] / [`ToolSpec`] - Domain substring rule table
//! - [`ToolRunner`] / [`ProcessRunner`] - Child process execution
//! - [`OutputRoot`] - Shared or per-request output directories
//! - [`collector`] - Picks the resulting file

pub mod collector;
mod output;
mod rules;
mod runner;
mod service;
mod types;

pub use output::OutputRoot;
pub use rules::{DomainRule, ToolSelector, ToolSpec};
pub use runner::{ProcessRunner, RunnerError, ToolRunner};
pub use service::Downloader;
pub use types::{DownloadRequest, DownloadedFile, ToolInvocation, ToolOutput};

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("No suitable downloader found for this URL")]
    UnsupportedSource,
    #[error("Download directory not available")]
    ServiceUnavailable,
    #[error("Download failed: {stderr}")]
    ToolExecutionFailed { stderr: String },
    #[error("Download tool '{tool}' is not installed or not on PATH")]
    ToolNotFound { tool: String },
    #[error("Download timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
    #[error("Download successful, but no files were created")]
    NoOutputProduced,
    #[error("internal error: {0}")]
    Internal(String),
}
