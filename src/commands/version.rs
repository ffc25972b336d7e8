use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::commands::GitCommand;
use crate::runtime::task::Task;

/// Parsed `git --version` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    /// Whatever follows the numeric part, e.g. `windows.1` or `(Apple Git-146)`.
    pub agent: String,
}

impl Version {
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

pub fn task() -> Task<Version> {
    Task::new(GitCommand::new("--version"), |output| parse_version(&output.text()))
}

pub fn parse_version(text: &str) -> Result<Version> {
    let rest = text
        .trim()
        .strip_prefix("git version ")
        .ok_or_else(|| anyhow!("unexpected version output: {:?}", text.trim()))?;

    let (number, trailing) = match rest.split_once(char::is_whitespace) {
        Some((number, trailing)) => (number, trailing.trim()),
        None => (rest, ""),
    };

    let mut parts = number.split('.');
    let mut numeric = |name: &str| -> Result<u32> {
        match parts.next() {
            Some(part) => part
                .parse()
                .map_err(|_| anyhow!("invalid {} version component {:?}", name, part)),
            None => Ok(0),
        }
    };
    let major = numeric("major")?;
    let minor = numeric("minor")?;
    let patch = numeric("patch")?;

    let suffix = parts.collect::<Vec<_>>().join(".");
    let agent = match (suffix.is_empty(), trailing.is_empty()) {
        (true, _) => trailing.to_string(),
        (false, true) => suffix,
        (false, false) => format!("{} {}", suffix, trailing),
    };

    Ok(Version {
        major,
        minor,
        patch,
        agent,
    })
}
