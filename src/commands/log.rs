use anyhow::{Result, bail};
use serde::Serialize;

use crate::commands::GitCommand;
use crate::runtime::task::Task;

const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';
const FORMAT: &str = "--pretty=format:%H%x1f%aI%x1f%s%x1f%an%x1f%ae%x1e";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub hash: String,
    pub date: String,
    pub message: String,
    pub author_name: String,
    pub author_email: String,
}

pub fn task(max_count: Option<usize>) -> Task<Vec<LogEntry>> {
    let mut command = GitCommand::new("log").arg(FORMAT);
    if let Some(max) = max_count {
        command = command.arg(format!("--max-count={}", max));
    }
    Task::new(command, |output| parse_log(&output.text()))
}

pub fn parse_log(text: &str) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();
    for record in text.split(RECORD_SEP) {
        let record = record.trim_matches(|c| c == '\n' || c == '\r');
        if record.is_empty() {
            continue;
        }
        let fields: Vec<&str> = record.split(FIELD_SEP).collect();
        let [hash, date, message, author_name, author_email] = fields.as_slice() else {
            bail!("expected 5 log fields, got {}: {:?}", fields.len(), record);
        };
        entries.push(LogEntry {
            hash: hash.to_string(),
            date: date.to_string(),
            message: message.to_string(),
            author_name: author_name.to_string(),
            author_email: author_email.to_string(),
        });
    }
    Ok(entries)
}
