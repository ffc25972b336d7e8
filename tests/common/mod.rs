#![allow(dead_code)]

use async_trait::async_trait;
use gitchain::{GitCommand, GitError, ProcessRunner, RawOutput};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory stand-in for the git binary.
///
/// `errors`, `failed` and `blah` fail like an unknown git subcommand would;
/// `explode` panics inside the runner; everything else succeeds. Every
/// invocation is recorded.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every invocation of `subcommand` take `delay`.
    pub fn with_delay(mut self, subcommand: &str, delay: Duration) -> Self {
        self.delays.insert(subcommand.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ran(&self, command: &str) -> bool {
        self.calls().iter().any(|c| c == command)
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, command: &GitCommand) -> Result<RawOutput, GitError> {
        self.calls.lock().unwrap().push(command.to_string());

        let subcommand = command.subcommand().unwrap_or_default().to_string();
        if let Some(delay) = self.delays.get(&subcommand) {
            tokio::time::sleep(*delay).await;
        }

        match subcommand.as_str() {
            "errors" | "failed" | "blah" => Err(GitError::Execution {
                command: command.to_string(),
                exit_code: 1,
                message: format!(
                    "git: '{}' is not a git command. See 'git --help'.",
                    subcommand
                ),
            }),
            "explode" => panic!("runner blew up on {}", command),
            "--version" | "version" => Ok(RawOutput::from_stdout("git version 2.43.0\n")),
            "init" => Ok(RawOutput::from_stdout(
                "Initialized empty Git repository in /repo/.git/\n",
            )),
            "status" => Ok(RawOutput::from_stdout("## main\n M src/lib.rs\n?? notes.txt\n")),
            "garbage" => Ok(RawOutput::from_stdout("not a version string")),
            _ => Ok(RawOutput::from_stdout(format!("ran {}\n", command))),
        }
    }
}
