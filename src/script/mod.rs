pub mod loader;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chain::Chainable;
use crate::git::Git;
use crate::runtime::node::ChainNode;
use crate::runtime::task::TaskState;

/// 脚本：一组相互独立的命令链
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Script {
    pub name: String,
    pub chains: Vec<ChainSpec>,
}

/// Steps of one atomic chain, each a git argument list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub chain: usize,
    pub step: usize,
    pub command: String,
    pub state: TaskState,
    pub output: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub name: String,
    pub steps: Vec<StepReport>,
    pub failed: usize,
}

impl ScriptReport {
    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Enqueues every chain of the script on `git`, then waits for all steps.
///
/// The first step of each chain is spawned from the root and every later
/// step from the step before it.
pub async fn run(git: &Git, script: &Script) -> ScriptReport {
    let mut nodes: Vec<(usize, usize, ChainNode<String>)> = Vec::new();

    for (chain_index, chain) in script.chains.iter().enumerate() {
        let mut previous: Option<ChainNode<String>> = None;
        for (step_index, args) in chain.steps.iter().enumerate() {
            let node = match &previous {
                Some(parent) => parent.raw(args),
                None => git.raw(args),
            };
            nodes.push((chain_index, step_index, node.clone()));
            previous = Some(node);
        }
    }
    info!(script = %script.name, steps = nodes.len(), "Script enqueued");

    let mut steps = Vec::with_capacity(nodes.len());
    for (chain, step, node) in nodes {
        let (output, error) = match node.result().await {
            Ok(output) => (Some(output), None),
            Err(e) => (None, Some(e.to_string())),
        };
        steps.push(StepReport {
            chain,
            step,
            command: node.command().to_string(),
            state: node.state(),
            output,
            error,
        });
    }

    let failed = steps.iter().filter(|s| s.error.is_some()).count();
    ScriptReport {
        name: script.name.clone(),
        steps,
        failed,
    }
}
