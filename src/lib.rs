//! Chainable, queue-backed wrapper around the `git` executable.
//!
//! Each root [`Git`] handle owns one sequential task queue. Operations called
//! on the root start independent chains; operations called on a returned
//! [`ChainNode`] extend that chain, and a failure anywhere in a chain settles
//! the rest of it with the same error without running it.

pub mod chain;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod runtime;
pub mod script;

pub use chain::Chainable;
pub use commands::{GitCommand, RawOutput};
pub use config::GitOptions;
pub use error::{GitError, SharedError, TaskResult};
pub use git::Git;
pub use runtime::node::ChainNode;
pub use runtime::runner::{GitProcessRunner, ProcessRunner};
pub use runtime::task::{Task, TaskId, TaskState};
