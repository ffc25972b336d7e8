use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::GitError;
use crate::runtime::runner::ProcessRunner;
use crate::runtime::task::Task;

/// Runs a single task: the process first, then the parser on success.
#[derive(Debug, Clone)]
pub struct Executor {
    runner: Arc<dyn ProcessRunner>,
}

impl Executor {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &Arc<dyn ProcessRunner> {
        &self.runner
    }

    pub async fn execute<T>(&self, task: Task<T>) -> Result<T, GitError> {
        let (_, command, parser) = task.into_parts();
        let output = self.runner.run(&command).await?;

        // A panicking parser is a failure of this task only; the queue keeps going.
        match panic::catch_unwind(AssertUnwindSafe(|| parser(output))) {
            Ok(parsed) => parsed.map_err(|reason| GitError::Parse {
                command: command.to_string(),
                reason,
            }),
            Err(payload) => Err(GitError::ParserPanicked {
                command: command.to_string(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
