use std::ffi::OsStr;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::runtime::task::Task;

pub mod basic;
pub mod branch;
pub mod commit;
pub mod log;
pub mod status;
pub mod version;

/// Argument vector for one git invocation, without the leading binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommand {
    args: Vec<String>,
}

impl GitCommand {
    pub fn new<S: AsRef<OsStr>>(subcommand: S) -> Self {
        Self::default().arg(subcommand)
    }

    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self::default().args(args)
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string_lossy().into_owned()));
        self
    }

    pub fn as_args(&self) -> &[String] {
        &self.args
    }

    /// First argument, usually the git subcommand.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("git")?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a successful git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
    pub exit_code: i32,
}

impl RawOutput {
    pub fn from_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// Stdout decoded lossily, untrimmed.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn trimmed(&self) -> String {
        self.text().trim().to_string()
    }
}

/// Runs arbitrary arguments and yields stdout as text.
pub fn raw<I, S>(args: I) -> Task<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Task::new(GitCommand::from_args(args), |output| Ok(output.text()))
}
