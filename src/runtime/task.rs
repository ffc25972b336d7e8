use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::commands::{GitCommand, RawOutput};

/// Process-wide task numbering. Starts at 1 when the process starts and is
/// never reset.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    fn next() -> Self {
        TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Queued,
    Running,
    Succeeded,
    Failed,
    /// Never executed because an ancestor in its chain failed.
    Skipped,
}

impl TaskState {
    pub fn is_settled(self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed | TaskState::Skipped)
    }
}

/// Turns successful raw output into a domain value.
pub type Parser<T> = Box<dyn FnOnce(RawOutput) -> anyhow::Result<T> + Send>;

/// One unit of work: the command to run and how to read its output.
pub struct Task<T> {
    id: TaskId,
    command: GitCommand,
    parser: Parser<T>,
}

impl<T> Task<T> {
    pub fn new<F>(command: GitCommand, parser: F) -> Self
    where
        F: FnOnce(RawOutput) -> anyhow::Result<T> + Send + 'static,
    {
        Self {
            id: TaskId::next(),
            command,
            parser: Box::new(parser),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn command(&self) -> &GitCommand {
        &self.command
    }

    pub fn into_parts(self) -> (TaskId, GitCommand, Parser<T>) {
        (self.id, self.command, self.parser)
    }
}

impl<T> fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}
