use anyhow::{Result, bail};
use serde::Serialize;

use crate::commands::GitCommand;
use crate::runtime::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    pub path: String,
    /// Original path of a rename or copy.
    pub from: Option<String>,
    pub index: char,
    pub working_dir: char,
}

/// Summary of `git status --porcelain -b`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub current: Option<String>,
    pub tracking: Option<String>,
    pub ahead: u32,
    pub behind: u32,
    pub detached: bool,
    pub files: Vec<FileStatus>,
    pub not_added: Vec<String>,
    pub conflicted: Vec<String>,
    pub created: Vec<String>,
    pub deleted: Vec<String>,
    pub modified: Vec<String>,
    pub renamed: Vec<(String, String)>,
    pub staged: Vec<String>,
}

impl StatusSummary {
    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }
}

pub fn task() -> Task<StatusSummary> {
    Task::new(
        GitCommand::new("status").args(["--porcelain", "-b", "-u"]),
        |output| parse_status(&output.text()),
    )
}

const CONFLICT_CODES: [&str; 7] = ["DD", "AU", "UD", "UA", "DU", "AA", "UU"];

pub fn parse_status(text: &str) -> Result<StatusSummary> {
    let mut summary = StatusSummary::default();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        if let Some(header) = line.strip_prefix("## ") {
            parse_branch_header(header, &mut summary);
            continue;
        }

        let mut codes = line.chars();
        let (Some(index), Some(working_dir)) = (codes.next(), codes.next()) else {
            bail!("unexpected status line: {:?}", line);
        };
        let Some(path) = line.get(3..).filter(|p| !p.is_empty()) else {
            bail!("status line without a path: {:?}", line);
        };

        let (from, path) = match path.split_once(" -> ") {
            Some((from, to)) if matches!(index, 'R' | 'C') => (Some(from.to_string()), to.to_string()),
            _ => (None, path.to_string()),
        };

        let code = format!("{}{}", index, working_dir);
        if code == "!!" {
            continue;
        }
        if code == "??" {
            summary.not_added.push(path.clone());
        } else if CONFLICT_CODES.contains(&code.as_str()) {
            summary.conflicted.push(path.clone());
        } else {
            match index {
                'A' => summary.created.push(path.clone()),
                'D' => summary.deleted.push(path.clone()),
                'M' => summary.modified.push(path.clone()),
                'R' => {
                    if let Some(from) = &from {
                        summary.renamed.push((from.clone(), path.clone()));
                    }
                }
                _ => {}
            }
            match working_dir {
                'M' if index != 'M' => summary.modified.push(path.clone()),
                'D' if index != 'D' => summary.deleted.push(path.clone()),
                _ => {}
            }
            if matches!(index, 'M' | 'A' | 'D' | 'R' | 'C') {
                summary.staged.push(path.clone());
            }
        }

        summary.files.push(FileStatus {
            path,
            from,
            index,
            working_dir,
        });
    }

    Ok(summary)
}

fn parse_branch_header(header: &str, summary: &mut StatusSummary) {
    for prefix in ["No commits yet on ", "Initial commit on "] {
        if let Some(branch) = header.strip_prefix(prefix) {
            summary.current = Some(branch.trim().to_string());
            return;
        }
    }
    if header.starts_with("HEAD (no branch)") {
        summary.detached = true;
        summary.current = Some("HEAD".to_string());
        return;
    }

    let (refs, counts) = match header.split_once(" [") {
        Some((refs, counts)) => (refs, Some(counts.trim_end_matches(']'))),
        None => (header.trim(), None),
    };

    match refs.split_once("...") {
        Some((current, tracking)) => {
            summary.current = Some(current.to_string());
            summary.tracking = Some(tracking.to_string());
        }
        None => summary.current = Some(refs.to_string()),
    }

    for count in counts.into_iter().flat_map(|c| c.split(", ")) {
        if let Some(n) = count.strip_prefix("ahead ") {
            summary.ahead = n.trim().parse().unwrap_or(0);
        } else if let Some(n) = count.strip_prefix("behind ") {
            summary.behind = n.trim().parse().unwrap_or(0);
        }
    }
}
