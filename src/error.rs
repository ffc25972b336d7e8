use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::runtime::task::TaskId;

/// Errors produced while running git tasks.
///
/// A failing task and every queued descendant it takes down with it share
/// one instance through [`SharedError`].
#[derive(Error, Debug)]
pub enum GitError {
    /// The process ran but exited unsuccessfully.
    #[error("`{command}` failed (exit code {exit_code}): {message}")]
    Execution {
        command: String,
        exit_code: i32,
        message: String,
    },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// The process succeeded but its output could not be turned into a result.
    #[error("failed to parse output of `{command}`: {reason:#}")]
    Parse {
        command: String,
        reason: anyhow::Error,
    },

    #[error("parser for `{command}` panicked: {message}")]
    ParserPanicked { command: String, message: String },

    #[error("base directory {} does not exist or is not a directory", .0.display())]
    InvalidBaseDir(PathBuf),

    #[error("no tokio runtime is running; create the git handle inside a runtime")]
    NoRuntime,

    #[error("task queue has shut down")]
    QueueClosed,

    #[error("task {0} was dropped before it settled")]
    Abandoned(TaskId),
}

impl GitError {
    /// The command line this error was raised for, when there is one.
    pub fn command(&self) -> Option<&str> {
        match self {
            GitError::Execution { command, .. }
            | GitError::Spawn { command, .. }
            | GitError::Timeout { command, .. }
            | GitError::Parse { command, .. }
            | GitError::ParserPanicked { command, .. } => Some(command),
            _ => None,
        }
    }
}

/// Error handle shared by a failed task and its skipped descendants.
pub type SharedError = Arc<GitError>;

/// What every chain node eventually settles with.
pub type TaskResult<T> = std::result::Result<T, SharedError>;
