pub mod task;
pub mod outcome;
pub mod executor;
pub mod runner;
pub mod queue;
pub mod node;
