use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};

/// How the git binary is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitOptions {
    /// Working directory for every command.
    pub base_dir: PathBuf,
    pub binary: String,
    /// Per-process timeout. Unset means wait forever.
    pub timeout_secs: Option<u64>,
    /// Upper bound on git processes alive at once across all handles that
    /// share a runner.
    pub max_concurrent_processes: usize,
    /// `key=value` pairs, each passed as `-c key=value`.
    pub config: Vec<String>,
    pub env: HashMap<String, String>,
}

impl Default for GitOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            binary: "git".to_string(),
            timeout_secs: None,
            max_concurrent_processes: 5,
            config: Vec::new(),
            env: HashMap::new(),
        }
    }
}

impl GitOptions {
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn max_concurrent_processes(mut self, max: usize) -> Self {
        self.max_concurrent_processes = max;
        self
    }

    pub fn config(mut self, key: &str, value: &str) -> Self {
        self.config.push(format!("{}={}", key, value));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to deserialize git options")
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid options in {}", path.display()))
    }
}
