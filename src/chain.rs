use std::ffi::OsStr;

use crate::commands::branch::{self, BranchSummary};
use crate::commands::commit::{self, CommitResult};
use crate::commands::log::{self, LogEntry};
use crate::commands::status::{self, StatusSummary};
use crate::commands::version::{self, Version};
use crate::commands::{self, basic, basic::InitResult, basic::TagList};
use crate::error::TaskResult;
use crate::runtime::node::ChainNode;
use crate::runtime::task::Task;

/// Shared operation surface of the root handle and of every chain node.
///
/// On [`Git`](crate::Git) each call starts a new, independent chain. On a
/// [`ChainNode`] each call extends that node's chain: if any earlier step of
/// the chain fails, the new step is skipped and settles with the same error.
pub trait Chainable {
    fn chain<U>(&self, task: Task<U>) -> ChainNode<U>
    where
        U: Clone + Send + Sync + 'static;

    /// Chains `task` and hands its result to `callback` once it settles.
    fn chain_with<U, F>(&self, task: Task<U>, callback: F) -> ChainNode<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(TaskResult<U>) + Send + 'static,
    {
        self.chain(task).on_settled(callback)
    }

    fn raw<I, S>(&self, args: I) -> ChainNode<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.chain(commands::raw(args))
    }

    fn version(&self) -> ChainNode<Version> {
        self.chain(version::task())
    }

    fn init(&self) -> ChainNode<InitResult> {
        self.chain(basic::init(false))
    }

    fn init_bare(&self) -> ChainNode<InitResult> {
        self.chain(basic::init(true))
    }

    fn status(&self) -> ChainNode<StatusSummary> {
        self.chain(status::task())
    }

    fn add<I, S>(&self, paths: I) -> ChainNode<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.chain(basic::add(paths))
    }

    fn commit(&self, message: &str) -> ChainNode<CommitResult> {
        self.chain(commit::task(message))
    }

    fn checkout(&self, what: &str) -> ChainNode<String> {
        self.chain(basic::checkout(what))
    }

    fn checkout_local_branch(&self, name: &str) -> ChainNode<String> {
        self.chain(basic::checkout_local_branch(name))
    }

    fn branch_local(&self) -> ChainNode<BranchSummary> {
        self.chain(branch::local_task())
    }

    fn tags(&self) -> ChainNode<TagList> {
        self.chain(basic::tags())
    }

    fn add_tag(&self, name: &str) -> ChainNode<String> {
        self.chain(basic::add_tag(name))
    }

    fn log(&self, max_count: Option<usize>) -> ChainNode<Vec<LogEntry>> {
        self.chain(log::task(max_count))
    }

    fn revparse<I, S>(&self, args: I) -> ChainNode<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.chain(basic::revparse(args))
    }

    fn show_buffer(&self, object: &str) -> ChainNode<Vec<u8>> {
        self.chain(basic::show_buffer(object))
    }

    fn add_config(&self, key: &str, value: &str) -> ChainNode<String> {
        self.chain(basic::add_config(key, value))
    }

    fn list_config(&self) -> ChainNode<Vec<(String, String)>> {
        self.chain(basic::list_config())
    }
}
