use anyhow::{Result, Context as AnyhowContext};
use std::fs;
use crate::script::Script;

pub fn load_script_from_yaml(file_path: &str) -> Result<Script> {
    let yaml_content = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read YAML file from {}", file_path))?;

    parse_script(&yaml_content)
        .with_context(|| format!("Failed to deserialize YAML content from {}", file_path))
}

pub fn parse_script(yaml: &str) -> Result<Script> {
    let script: Script = serde_yaml::from_str(yaml)?;
    if let Some(index) = script.chains.iter().position(|c| c.steps.is_empty()) {
        anyhow::bail!("chain {} of script '{}' has no steps", index, script.name);
    }
    Ok(script)
}
