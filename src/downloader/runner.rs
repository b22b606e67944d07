use async_trait::async_trait;
use std::io;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use super::types::{ToolInvocation, ToolOutput};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("executable '{program}' not found")]
    NotFound { program: String },

    #[error("process timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Executes a downloader and waits for it to exit
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, RunnerError>;
}

/// Runs tools as child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, RunnerError> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Without a timeout the tool outlives a dropped request
            .kill_on_drop(self.timeout.is_some());

        debug!(
            program = %invocation.program,
            args = ?invocation.args,
            "Spawning downloader"
        );

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, command.output()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        program = %invocation.program,
                        timeout_secs = limit.as_secs(),
                        "Downloader timed out, killing"
                    );
                    return Err(RunnerError::TimedOut(limit));
                }
            },
            None => command.output().await,
        }
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => RunnerError::NotFound {
                program: invocation.program.clone(),
            },
            _ => RunnerError::Io {
                program: invocation.program.clone(),
                source,
            },
        })?;

        Ok(ToolOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shell(script: &str) -> ToolInvocation {
        ToolInvocation {
            tool: "sh".to_string(),
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            url: "https://youtu.be/test".to_string(),
            output_dir: PathBuf::from("/tmp"),
        }
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let runner = ProcessRunner::default();

        let output = runner.run(&shell("echo hello")).await.unwrap();

        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_non_zero_exit_keeps_stderr() {
        let runner = ProcessRunner::default();

        let output = runner
            .run(&shell("echo 'network error' >&2; exit 1"))
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(1));
        assert_eq!(output.stderr.trim(), "network error");
    }

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let runner = ProcessRunner::default();
        let mut invocation = shell("true");
        invocation.program = "clipfetch-definitely-not-installed".to_string();

        let err = runner.run(&invocation).await.unwrap_err();

        assert!(matches!(
            err,
            RunnerError::NotFound { ref program } if program == "clipfetch-definitely-not-installed"
        ));
    }

    #[tokio::test]
    async fn test_slow_process_times_out() {
        let runner = ProcessRunner::new(Some(Duration::from_millis(200)));

        let err = runner.run(&shell("exec sleep 5")).await.unwrap_err();

        assert!(matches!(err, RunnerError::TimedOut(_)));
    }

    #[tokio::test]
    async fn test_dropped_run_without_timeout_lets_tool_finish() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let marker = temp_dir.path().join("finished");
        let runner = ProcessRunner::default();
        let invocation = shell(&format!("sleep 1; touch '{}'", marker.display()));

        // Abandon the run the way a disconnected client does
        let abandoned =
            tokio::time::timeout(Duration::from_millis(200), runner.run(&invocation)).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(1800)).await;
        assert!(marker.exists());
    }
}
