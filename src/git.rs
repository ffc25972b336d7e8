use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;
use uuid::Uuid;

use crate::chain::Chainable;
use crate::config::GitOptions;
use crate::error::GitError;
use crate::runtime::executor::Executor;
use crate::runtime::node::ChainNode;
use crate::runtime::queue::QueueHandle;
use crate::runtime::runner::{GitProcessRunner, ProcessRunner};
use crate::runtime::task::Task;

/// Root handle for one repository.
///
/// Owns a single task queue. Every operation called directly on it starts
/// an independent chain; clones share the queue.
#[derive(Debug, Clone)]
pub struct Git {
    queue: Arc<QueueHandle>,
    runner: Arc<dyn ProcessRunner>,
}

impl Git {
    /// Must be called from within a tokio runtime.
    pub fn new(options: GitOptions) -> Result<Self, GitError> {
        if !options.base_dir.is_dir() {
            return Err(GitError::InvalidBaseDir(options.base_dir));
        }
        Self::with_runner(Arc::new(GitProcessRunner::new(&options)))
    }

    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self, GitError> {
        Self::new(GitOptions::default().base_dir(base_dir))
    }

    /// Builds a root around any runner, e.g. a scripted one in tests.
    pub fn with_runner(runner: Arc<dyn ProcessRunner>) -> Result<Self, GitError> {
        let runtime = Handle::try_current().map_err(|_| GitError::NoRuntime)?;
        let queue = QueueHandle::spawn(Executor::new(runner.clone()), runtime);
        debug!(queue_id = %queue.id(), "Created git root");
        Ok(Self { queue, runner })
    }

    /// A new root with its own queue over the same runner, so it runs
    /// concurrently with this one but shares the process limit.
    pub fn sibling(&self) -> Git {
        let queue = QueueHandle::spawn(
            Executor::new(self.runner.clone()),
            self.queue.runtime().clone(),
        );
        Git {
            queue,
            runner: self.runner.clone(),
        }
    }

    pub fn queue_id(&self) -> Uuid {
        self.queue.id()
    }
}

impl Chainable for Git {
    fn chain<U>(&self, task: Task<U>) -> ChainNode<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        ChainNode::spawn(&self.queue, task, None)
    }
}
