use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use uuid::Uuid;

use crate::chain::Chainable;
use crate::commands::GitCommand;
use crate::error::TaskResult;
use crate::runtime::outcome::Outcome;
use crate::runtime::queue::QueueHandle;
use crate::runtime::task::{Task, TaskId, TaskState};

/// 链式节点
///
/// Handle to one enqueued task. It can be chained further (the new task
/// becomes part of this node's chain and is skipped if this one fails) and
/// it can be awaited or given a callback to read the result.
pub struct ChainNode<T> {
    id: TaskId,
    parent: Option<TaskId>,
    command: GitCommand,
    outcome: Arc<Outcome<T>>,
    queue: Arc<QueueHandle>,
}

impl<T> ChainNode<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn spawn(queue: &Arc<QueueHandle>, task: Task<T>, parent: Option<TaskId>) -> Self {
        let id = task.id();
        let command = task.command().clone();
        let outcome = queue.enqueue(task, parent);
        Self {
            id,
            parent,
            command,
            outcome,
            queue: queue.clone(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// The node this one was chained from, or `None` for a chain started at
    /// the root.
    pub fn parent_id(&self) -> Option<TaskId> {
        self.parent
    }

    pub fn command(&self) -> &GitCommand {
        &self.command
    }

    pub fn queue_id(&self) -> Uuid {
        self.queue.id()
    }

    pub fn state(&self) -> TaskState {
        self.outcome.state()
    }

    /// The result if the task has settled already.
    pub fn try_result(&self) -> Option<TaskResult<T>> {
        self.outcome.try_result()
    }

    /// Waits for the result. Can be called any number of times; every call
    /// sees the same value or the same error instance.
    pub async fn result(&self) -> TaskResult<T> {
        self.outcome.wait().await
    }

    /// Registers a callback that runs once, on the runtime, when the task
    /// settles. Returns the node so the chain can continue.
    pub fn on_settled<F>(self, callback: F) -> Self
    where
        F: FnOnce(TaskResult<T>) + Send + 'static,
    {
        let outcome = self.outcome.clone();
        self.queue.runtime().spawn(async move {
            callback(outcome.wait().await);
        });
        self
    }
}

impl<T> Chainable for ChainNode<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn chain<U>(&self, task: Task<U>) -> ChainNode<U>
    where
        U: Clone + Send + Sync + 'static,
    {
        ChainNode::spawn(&self.queue, task, Some(self.id))
    }
}

impl<T> IntoFuture for ChainNode<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = TaskResult<T>;
    type IntoFuture = Pin<Box<dyn Future<Output = TaskResult<T>> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.outcome.wait().await })
    }
}

impl<T> Clone for ChainNode<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            parent: self.parent,
            command: self.command.clone(),
            outcome: self.outcome.clone(),
            queue: self.queue.clone(),
        }
    }
}

impl<T> fmt::Debug for ChainNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainNode")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("command", &self.command.to_string())
            .field("queue", &self.queue.id())
            .finish()
    }
}
