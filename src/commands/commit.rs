use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::commands::GitCommand;
use crate::runtime::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitResult {
    pub branch: String,
    pub commit: String,
    pub root: bool,
    pub changes: u32,
    pub insertions: u32,
    pub deletions: u32,
}

pub fn task(message: &str) -> Task<CommitResult> {
    Task::new(GitCommand::new("commit").arg("-m").arg(message), |output| {
        parse_commit(&output.text())
    })
}

/// Reads the `[branch (root-commit) abc1234] subject` header and the
/// `N files changed, X insertions(+), Y deletions(-)` line.
pub fn parse_commit(text: &str) -> Result<CommitResult> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| anyhow!("empty commit output"))?;
    let inner = header
        .strip_prefix('[')
        .and_then(|h| h.split_once(']'))
        .map(|(inner, _)| inner)
        .ok_or_else(|| anyhow!("unexpected commit header: {:?}", header))?;

    let (branch, commit) = inner
        .rsplit_once(' ')
        .ok_or_else(|| anyhow!("commit header without a hash: {:?}", header))?;
    let root = branch.contains("(root-commit)");
    let branch = branch.replace("(root-commit)", "").trim().to_string();

    let mut result = CommitResult {
        branch,
        commit: commit.to_string(),
        root,
        ..CommitResult::default()
    };

    if let Some(stats) = lines.find(|l| l.contains("changed")) {
        for part in stats.split(',') {
            let part = part.trim();
            let Some((count, label)) = part.split_once(' ') else {
                continue;
            };
            let count: u32 = count.parse().unwrap_or(0);
            if label.starts_with("file") {
                result.changes = count;
            } else if label.starts_with("insertion") {
                result.insertions = count;
            } else if label.starts_with("deletion") {
                result.deletions = count;
            }
        }
    }

    Ok(result)
}
