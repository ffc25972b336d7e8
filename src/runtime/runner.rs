use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::debug;

use crate::commands::{GitCommand, RawOutput};
use crate::config::GitOptions;
use crate::error::GitError;

/// 外部进程执行接口
///
/// The only I/O boundary of the engine: run one command, report raw output
/// or the failure verbatim.
#[async_trait]
pub trait ProcessRunner: Send + Sync + Debug {
    async fn run(&self, command: &GitCommand) -> Result<RawOutput, GitError>;
}

/// Spawns the real git binary with `tokio::process`.
#[derive(Debug)]
pub struct GitProcessRunner {
    binary: String,
    base_dir: PathBuf,
    config: Vec<String>,
    env: HashMap<String, String>,
    timeout: Option<Duration>,
    permits: Arc<Semaphore>,
}

impl GitProcessRunner {
    pub fn new(options: &GitOptions) -> Self {
        Self {
            binary: options.binary.clone(),
            base_dir: options.base_dir.clone(),
            config: options.config.clone(),
            env: options.env.clone(),
            timeout: options.timeout(),
            permits: Arc::new(Semaphore::new(options.max_concurrent_processes.max(1))),
        }
    }

    fn build(&self, command: &GitCommand) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.current_dir(&self.base_dir)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for pair in &self.config {
            cmd.arg("-c").arg(pair);
        }
        cmd.args(command.as_args());
        cmd
    }
}

#[async_trait]
impl ProcessRunner for GitProcessRunner {
    async fn run(&self, command: &GitCommand) -> Result<RawOutput, GitError> {
        let cmdline = command.to_string();
        let _permit = self.permits.acquire().await.map_err(|_| GitError::QueueClosed)?;

        debug!(command = %cmdline, cwd = ?self.base_dir, "Spawning git");
        let mut cmd = self.build(command);
        let child = cmd.output();

        let output = match self.timeout {
            Some(limit) => timeout(limit, child).await.map_err(|_| GitError::Timeout {
                command: cmdline.clone(),
                timeout: limit,
            })?,
            None => child.await,
        }
        .map_err(|source| GitError::Spawn {
            command: cmdline.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code().unwrap_or(-1);

        if output.status.success() {
            Ok(RawOutput {
                stdout: output.stdout,
                stderr,
                exit_code,
            })
        } else {
            let message = if stderr.trim().is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            Err(GitError::Execution {
                command: cmdline,
                exit_code,
                message,
            })
        }
    }
}
