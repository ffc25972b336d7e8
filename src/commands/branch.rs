use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::commands::GitCommand;
use crate::runtime::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchEntry {
    pub name: String,
    pub commit: String,
    pub label: String,
    pub current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchSummary {
    pub current: Option<String>,
    pub detached: bool,
    pub all: Vec<String>,
    pub branches: Vec<BranchEntry>,
}

pub fn local_task() -> Task<BranchSummary> {
    Task::new(
        GitCommand::new("branch").args(["--list", "-v", "--no-abbrev"]),
        |output| parse_branches(&output.text()),
    )
}

/// Parses `git branch -v --no-abbrev` lines such as
/// `* main 1f2e3d... message` or `* (HEAD detached at 1f2e3d4) 1f2e3d... message`.
pub fn parse_branches(text: &str) -> Result<BranchSummary> {
    let mut summary = BranchSummary::default();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let current = line.starts_with('*');
        let rest = line.get(2..).unwrap_or_default().trim_start();

        let (name, rest) = if rest.starts_with('(') {
            let end = rest
                .find(')')
                .ok_or_else(|| anyhow!("unterminated branch name in {:?}", line))?;
            (&rest[..=end], &rest[end + 1..])
        } else {
            rest.split_once(char::is_whitespace).unwrap_or((rest, ""))
        };

        let rest = rest.trim_start();
        let (commit, label) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));

        if current {
            summary.current = Some(name.to_string());
            summary.detached = name.starts_with('(');
        }
        summary.all.push(name.to_string());
        summary.branches.push(BranchEntry {
            name: name.to_string(),
            commit: commit.to_string(),
            label: label.trim().to_string(),
            current,
        });
    }

    Ok(summary)
}
