use tokio::sync::watch;
use tracing::warn;

use crate::error::{GitError, TaskResult};
use crate::runtime::task::{TaskId, TaskState};

#[derive(Debug)]
struct Snapshot<T> {
    state: TaskState,
    result: Option<TaskResult<T>>,
}

/// 单次结算、多方通知的结果单元
///
/// Written only by the queue worker. Any number of observers can wait on it,
/// before or after it settles, and all of them see the same value.
#[derive(Debug)]
pub struct Outcome<T> {
    task_id: TaskId,
    sender: watch::Sender<Snapshot<T>>,
}

impl<T> Outcome<T> {
    pub fn new(task_id: TaskId) -> Self {
        let (sender, _) = watch::channel(Snapshot {
            state: TaskState::Queued,
            result: None,
        });
        Self { task_id, sender }
    }

    pub fn state(&self) -> TaskState {
        self.sender.borrow().state
    }

    pub fn is_settled(&self) -> bool {
        self.sender.borrow().result.is_some()
    }

    pub(crate) fn mark_running(&self) {
        self.sender.send_if_modified(|snapshot| {
            if snapshot.state != TaskState::Queued {
                return false;
            }
            snapshot.state = TaskState::Running;
            true
        });
    }

    /// Records the final result. Returns false if the cell had already settled,
    /// in which case the earlier result is kept.
    pub(crate) fn settle(&self, state: TaskState, result: TaskResult<T>) -> bool {
        let settled = self.sender.send_if_modified(|snapshot| {
            if snapshot.result.is_some() {
                return false;
            }
            snapshot.state = state;
            snapshot.result = Some(result);
            true
        });
        if !settled {
            warn!(task_id = %self.task_id, "Ignoring second settlement of task");
        }
        settled
    }
}

impl<T: Clone> Outcome<T> {
    pub fn try_result(&self) -> Option<TaskResult<T>> {
        self.sender.borrow().result.clone()
    }

    /// Waits until the task settles and returns a copy of its result.
    pub async fn wait(&self) -> TaskResult<T> {
        let mut receiver = self.sender.subscribe();
        let result = {
            let snapshot = receiver
                .wait_for(|snapshot| snapshot.result.is_some())
                .await
                .map_err(|_| GitError::Abandoned(self.task_id))?;
            snapshot.result.clone()
        };
        match result {
            Some(result) => result,
            None => Err(GitError::Abandoned(self.task_id).into()),
        }
    }
}
