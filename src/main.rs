mod cli;
mod mcp;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "code_editor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            allow,
            ignore_vcs,
            max_projects,
            budget,
        } => {
            cli::run_mcp_server(allow, ignore_vcs, max_projects, budget).await?;
        }
        Commands::Detect {
            allow,
            ignore_vcs,
            max_projects,
        } => {
            cli::detect_project(allow, ignore_vcs, max_projects)?;
        }
        Commands::Check {
            path,
            offset,
            budget,
        } => {
            cli::check_documentation(&path, offset, budget)?;
        }
    }

    Ok(())
}
