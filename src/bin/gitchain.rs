use clap::{Parser, Subcommand};
use gitchain::script::{self, loader::load_script_from_yaml};
use gitchain::{ChainNode, Chainable, Git, GitOptions};
use anyhow::{Result, bail};
use std::path::PathBuf;
use tracing::{info, error};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML file with git options
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Repository directory (overrides the options file)
    #[arg(long, short = 'C', global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single git command and print its output
    Exec {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },

    /// Run steps as one chain; a failing step skips the rest
    Chain {
        /// One step, e.g. --step "add -A" (repeatable)
        #[arg(long = "step", short, required = true)]
        steps: Vec<String>,
    },

    /// Print the parsed status summary as JSON
    Status,

    /// Run a chain script and print the JSON report
    Script {
        /// Path to the script YAML file
        file: PathBuf,
    },
}

fn load_options(cli: &Cli) -> Result<GitOptions> {
    let mut options = match &cli.config {
        Some(path) => GitOptions::from_yaml_file(path)?,
        None => GitOptions::default(),
    };
    if let Some(dir) = &cli.dir {
        options.base_dir = dir.clone();
    }
    Ok(options)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let options = load_options(&cli)?;
    info!("Using repository at {:?}", options.base_dir);
    let git = Git::new(options)?;

    match &cli.command {
        Commands::Exec { args } => {
            let output = git.raw(args).await?;
            print!("{}", output);
        }
        Commands::Chain { steps } => {
            let mut nodes: Vec<ChainNode<String>> = Vec::with_capacity(steps.len());
            for step in steps {
                let args: Vec<&str> = step.split_whitespace().collect();
                let node = match nodes.last() {
                    Some(previous) => previous.raw(args),
                    None => git.raw(args),
                };
                nodes.push(node);
            }

            let mut failed = false;
            for node in nodes {
                match node.result().await {
                    Ok(output) => {
                        println!("$ {}", node.command());
                        print!("{}", output);
                    }
                    Err(e) => {
                        error!(task_id = %node.id(), state = ?node.state(), "{}", e);
                        failed = true;
                    }
                }
            }
            if failed {
                bail!("chain did not complete");
            }
        }
        Commands::Status => {
            let summary = git.status().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Script { file } => {
            let script = load_script_from_yaml(&file.to_string_lossy())?;
            info!("Loaded script: {}", script.name);

            let report = script::run(&git, &script).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.succeeded() {
                bail!("{} step(s) failed", report.failed);
            }
        }
    }

    Ok(())
}
