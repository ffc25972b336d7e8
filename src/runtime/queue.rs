use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::commands::GitCommand;
use crate::error::{GitError, SharedError};
use crate::runtime::executor::Executor;
use crate::runtime::outcome::Outcome;
use crate::runtime::task::{Task, TaskId, TaskState};

/// 队列中的待执行任务 (类型擦除)
#[async_trait]
pub(crate) trait QueuedTask: Send {
    fn id(&self) -> TaskId;
    fn parent(&self) -> Option<TaskId>;
    fn command(&self) -> &GitCommand;
    /// Executes the task. Only success is recorded here; on failure the error
    /// is handed back and the outcome stays open until the worker has decided
    /// which queued tasks go down with it.
    async fn run(&mut self, executor: &Executor) -> Option<SharedError>;
    fn fail(&self, error: SharedError);
    fn skip(&self, error: SharedError);
}

struct Scheduled<T> {
    id: TaskId,
    command: GitCommand,
    task: Option<Task<T>>,
    parent: Option<TaskId>,
    outcome: Arc<Outcome<T>>,
}

#[async_trait]
impl<T> QueuedTask for Scheduled<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn id(&self) -> TaskId {
        self.id
    }

    fn parent(&self) -> Option<TaskId> {
        self.parent
    }

    fn command(&self) -> &GitCommand {
        &self.command
    }

    async fn run(&mut self, executor: &Executor) -> Option<SharedError> {
        let task = self.task.take()?;
        self.outcome.mark_running();
        match executor.execute(task).await {
            Ok(value) => {
                self.outcome.settle(TaskState::Succeeded, Ok(value));
                None
            }
            Err(e) => Some(Arc::new(e)),
        }
    }

    fn fail(&self, error: SharedError) {
        self.outcome.settle(TaskState::Failed, Err(error));
    }

    fn skip(&self, error: SharedError) {
        self.outcome.settle(TaskState::Skipped, Err(error));
    }
}

// A task dropped without a result (worker gone mid-run, channel torn down)
// still releases whoever is waiting on it.
impl<T> Drop for Scheduled<T> {
    fn drop(&mut self) {
        if !self.outcome.is_settled() {
            self.outcome
                .settle(TaskState::Failed, Err(Arc::new(GitError::Abandoned(self.id))));
        }
    }
}

/// Sending side of one root's queue. Held by the root and by every chain
/// node spawned from it; the worker stops once all handles are gone.
#[derive(Debug)]
pub struct QueueHandle {
    id: Uuid,
    sender: mpsc::UnboundedSender<Box<dyn QueuedTask>>,
    runtime: Handle,
}

impl QueueHandle {
    /// Starts a worker for a fresh queue on the given runtime.
    pub fn spawn(executor: Executor, runtime: Handle) -> Arc<Self> {
        let id = Uuid::new_v4();
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = QueueWorker {
            id,
            receiver,
            pending: VecDeque::new(),
            executor,
        };
        runtime.spawn(worker.run());
        Arc::new(Self {
            id,
            sender,
            runtime,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Appends a task to the queue. Enqueueing order is execution order.
    pub(crate) fn enqueue<T>(&self, task: Task<T>, parent: Option<TaskId>) -> Arc<Outcome<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        let outcome = Arc::new(Outcome::new(task.id()));
        let scheduled: Box<dyn QueuedTask> = Box::new(Scheduled {
            id: task.id(),
            command: task.command().clone(),
            task: Some(task),
            parent,
            outcome: outcome.clone(),
        });
        if let Err(mpsc::error::SendError(rejected)) = self.sender.send(scheduled) {
            warn!(queue_id = %self.id, task_id = %rejected.id(), "Queue closed, rejecting task");
            rejected.skip(Arc::new(GitError::QueueClosed));
        }
        outcome
    }
}

struct QueueWorker {
    id: Uuid,
    receiver: mpsc::UnboundedReceiver<Box<dyn QueuedTask>>,
    pending: VecDeque<Box<dyn QueuedTask>>,
    executor: Executor,
}

impl QueueWorker {
    async fn run(mut self) {
        info!(queue_id = %self.id, "Queue worker started");

        loop {
            if self.pending.is_empty() {
                match self.receiver.recv().await {
                    Some(task) => self.pending.push_back(task),
                    None => break,
                }
            }
            self.absorb();

            let Some(mut task) = self.pending.pop_front() else {
                continue;
            };
            let task_id = task.id();
            let command = task.command().to_string();

            debug!(queue_id = %self.id, task_id = %task_id, command = %command, "Running task");
            match task.run(&self.executor).await {
                None => {
                    debug!(queue_id = %self.id, task_id = %task_id, "Task succeeded");
                }
                Some(error) => {
                    warn!(queue_id = %self.id, task_id = %task_id, command = %command, error = %error, "Task failed");
                    // Pick up anything chained while the task was running, and
                    // fix the skip set before anyone can observe the failure.
                    self.absorb();
                    let skipped = self.take_descendants(task_id);
                    task.fail(error.clone());
                    if !skipped.is_empty() {
                        info!(queue_id = %self.id, task_id = %task_id, skipped = skipped.len(), "Skipping descendants of failed task");
                    }
                    for descendant in skipped {
                        descendant.skip(error.clone());
                    }
                }
            }
        }

        info!(queue_id = %self.id, "Queue worker stopped");
    }

    /// Moves everything already sent into the local pending list.
    fn absorb(&mut self) {
        while let Ok(task) = self.receiver.try_recv() {
            self.pending.push_back(task);
        }
    }

    /// Removes every queued descendant of `failed` from the pending list.
    ///
    /// Descendants always sit behind their ancestor in the queue, so a single
    /// forward pass that grows the failed lineage as it goes finds all of them.
    fn take_descendants(&mut self, failed: TaskId) -> Vec<Box<dyn QueuedTask>> {
        let mut lineage = HashSet::from([failed]);
        let mut kept = VecDeque::with_capacity(self.pending.len());
        let mut skipped = Vec::new();

        for task in self.pending.drain(..) {
            match task.parent() {
                Some(parent) if lineage.contains(&parent) => {
                    lineage.insert(task.id());
                    skipped.push(task);
                }
                _ => kept.push_back(task),
            }
        }
        self.pending = kept;
        skipped
    }
}
