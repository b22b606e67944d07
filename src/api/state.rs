use std::sync::Arc;

use crate::config::Config;
use crate::downloader::{Downloader, OutputRoot, ProcessRunner, ToolRunner, ToolSelector};
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub downloader: Downloader,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, downloader: Downloader) -> Self {
        Self {
            config: Arc::new(config),
            downloader,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Wire the production pipeline from configuration.
    ///
    /// Prepares the output directory, so this touches the filesystem.
    pub fn from_config(config: Config) -> Self {
        let runner: Arc<dyn ToolRunner> = Arc::new(ProcessRunner::new(config.tools.timeout()));
        Self::with_runner(config, runner)
    }

    /// Same as [`AppState::from_config`] with a custom tool runner
    pub fn with_runner(config: Config, runner: Arc<dyn ToolRunner>) -> Self {
        let selector = ToolSelector::with_defaults(&config.tools);
        let output = OutputRoot::prepare(&config.downloads);
        let downloader = Downloader::new(selector, runner, output);
        Self::new(config, downloader)
    }
}
