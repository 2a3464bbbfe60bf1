//! ghx CLI
//!
//! Turns a GitHub Actions workflow into a local script and either prints
//! it or runs it.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ghx_core::WorkspaceConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// ghx - run GitHub Actions workflows locally
#[derive(Parser)]
#[command(name = "ghx")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log filter (e.g. `ghx_codegen=debug`)
    #[arg(long, env = "GHX_LOG", global = true)]
    log: Option<String>,

    /// Workflow to run when no subcommand is given
    workflow: Option<String>,

    #[command(flatten)]
    script: ScriptArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by `dry` and `run`
#[derive(Args, Debug, Clone, Copy)]
struct ScriptArgs {
    /// Emit a Windows batch script (implied on Windows unless --wsl is given)
    #[arg(long, env = "GHX_CMD")]
    cmd: bool,

    /// Emit a shell script and run it through WSL
    #[arg(long, env = "GHX_WSL", conflicts_with = "cmd")]
    wsl: bool,

    /// Keep only the first matrix combination of each job
    #[arg(short = '1', long, env = "GHX_ONCE")]
    once: bool,
}

impl ScriptArgs {
    fn use_cmd(&self) -> bool {
        self.cmd || (cfg!(windows) && !self.wsl)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated script without running it
    Dry {
        /// Workflow name or file under .github/workflows
        workflow: String,

        #[command(flatten)]
        script: ScriptArgs,
    },

    /// Generate the script and run it
    Run {
        /// Workflow name or file under .github/workflows
        workflow: String,

        #[command(flatten)]
        script: ScriptArgs,
    },

    /// Create a new workflow from the template
    New {
        /// Workflow name or file under .github/workflows
        workflow: String,
    },

    /// Wait for a number of seconds
    Sleep {
        /// Seconds to wait
        seconds: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for the script
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if let Some(directives) = cli.log.as_deref() {
        EnvFilter::try_new(directives).context("Invalid --log filter")?
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let workspace = WorkspaceConfig::default();

    let exit_code = match cli.command {
        Some(Commands::Dry { workflow, script }) => {
            commands::dry::run(&workspace, &workflow, script.use_cmd(), script.once).await?;
            0
        }
        Some(Commands::Run { workflow, script }) => {
            commands::run::run(
                &workspace,
                &workflow,
                script.use_cmd(),
                script.wsl,
                script.once,
            )
            .await?
        }
        Some(Commands::New { workflow }) => {
            commands::new::run(&workspace, &workflow).await?;
            0
        }
        Some(Commands::Sleep { seconds }) => {
            commands::sleep::run(seconds).await?;
            0
        }
        None => {
            let workflow = cli
                .workflow
                .context("No workflow given. Usage: ghx [OPTIONS] <WORKFLOW>")?;
            let script = cli.script;
            commands::run::run(
                &workspace,
                &workflow,
                script.use_cmd(),
                script.wsl,
                script.once,
            )
            .await?
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
