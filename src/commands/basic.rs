//! Small commands whose output needs little or no interpretation.

use std::ffi::OsStr;

use serde::Serialize;

use crate::commands::GitCommand;
use crate::runtime::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitResult {
    pub bare: bool,
    /// True when git reported `Reinitialized existing Git repository`.
    pub existing: bool,
    pub git_dir: Option<String>,
}

pub fn init(bare: bool) -> Task<InitResult> {
    let mut command = GitCommand::new("init");
    if bare {
        command = command.arg("--bare");
    }
    Task::new(command, move |output| Ok(parse_init(bare, &output.text())))
}

pub fn parse_init(bare: bool, text: &str) -> InitResult {
    let line = text.trim();
    let git_dir = line
        .split_once(" repository in ")
        .map(|(_, dir)| dir.trim().to_string());
    InitResult {
        bare,
        existing: line.starts_with("Reinitialized"),
        git_dir,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagList {
    pub all: Vec<String>,
    pub latest: Option<String>,
}

pub fn tags() -> Task<TagList> {
    Task::new(
        GitCommand::new("tag").args(["-l", "--sort=version:refname"]),
        |output| Ok(parse_tags(&output.text())),
    )
}

pub fn parse_tags(text: &str) -> TagList {
    let all: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    TagList {
        latest: all.last().cloned(),
        all,
    }
}

pub fn add_tag(name: &str) -> Task<String> {
    let tag = name.to_string();
    Task::new(GitCommand::new("tag").arg(name), move |_| Ok(tag))
}

pub fn add<I, S>(paths: I) -> Task<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Task::new(GitCommand::new("add").arg("--").args(paths), |output| {
        Ok(output.text())
    })
}

pub fn checkout(what: &str) -> Task<String> {
    Task::new(GitCommand::new("checkout").arg(what), |output| {
        Ok(output.text())
    })
}

pub fn checkout_local_branch(name: &str) -> Task<String> {
    Task::new(GitCommand::new("checkout").args(["-b", name]), |output| {
        Ok(output.text())
    })
}

pub fn revparse<I, S>(args: I) -> Task<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Task::new(GitCommand::new("rev-parse").args(args), |output| {
        Ok(output.trimmed())
    })
}

/// `git show <object>` as raw bytes, for blobs that are not text.
pub fn show_buffer(object: &str) -> Task<Vec<u8>> {
    Task::new(GitCommand::new("show").arg(object), |output| {
        Ok(output.stdout)
    })
}

pub fn add_config(key: &str, value: &str) -> Task<String> {
    Task::new(
        GitCommand::new("config").args(["--local", key, value]),
        |output| Ok(output.trimmed()),
    )
}

pub fn list_config() -> Task<Vec<(String, String)>> {
    Task::new(GitCommand::new("config").arg("--list"), |output| {
        Ok(parse_config_list(&output.text()))
    })
}

pub fn parse_config_list(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
