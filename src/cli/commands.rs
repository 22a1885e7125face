use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use code_editor::error::{EditorError, Result};
use code_editor::{PathAuthorizer, Paginator, ProjectDetector, DEFAULT_BUDGET_CHARS};

use crate::mcp::EditorServer;

#[derive(Parser)]
#[command(name = "code-editor")]
#[command(about = "CLI tool and MCP server for session-scoped, path-authorized code editing")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Serve MCP over stdio, allowing edits under two directories
    code-editor serve --allow ~/work --allow ~/scratch

    # Allow plain directories (no version control marker) as projects
    code-editor serve --allow ~/work --ignore-vcs

    # Show which project would be considered current
    code-editor detect --allow ~/work

    # Scan a project for documentation issues
    code-editor check ~/work/app
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start MCP server
    Serve {
        /// Directory the server may operate under (repeatable)
        #[arg(long = "allow", required = true)]
        allow: Vec<PathBuf>,

        /// Accept project directories without a version-control marker
        #[arg(long)]
        ignore_vcs: bool,

        /// Cap on current + recent projects reported by detection
        #[arg(long, default_value_t = 100)]
        max_projects: usize,

        /// Response size budget in characters for paginated tools
        #[arg(long, default_value_t = DEFAULT_BUDGET_CHARS)]
        budget: usize,
    },

    /// Run project detection over the allowed directories
    Detect {
        /// Directory to consider (repeatable)
        #[arg(long = "allow", required = true)]
        allow: Vec<PathBuf>,

        /// Accept project directories without a version-control marker
        #[arg(long)]
        ignore_vcs: bool,

        /// Cap on current + recent projects reported
        #[arg(long, default_value_t = 100)]
        max_projects: usize,
    },

    /// Scan a directory for documentation issues
    Check {
        /// Directory or file to scan
        path: PathBuf,

        /// Number of priority-ranked issues already delivered
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Response size budget in characters
        #[arg(long, default_value_t = DEFAULT_BUDGET_CHARS)]
        budget: usize,
    },
}

pub async fn run_mcp_server(
    allow: Vec<PathBuf>,
    ignore_vcs: bool,
    max_projects: usize,
    budget: usize,
) -> Result<()> {
    use rmcp::ServiceExt;

    let authorizer = Arc::new(PathAuthorizer::new(allow)?);
    let server = EditorServer::new(authorizer, ignore_vcs, max_projects, budget)?;

    tracing::info!("starting MCP server on stdio");

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server
        .serve(transport)
        .await
        .map_err(|e| EditorError::Mcp(e.to_string()))?;
    service
        .waiting()
        .await
        .map_err(|e| EditorError::Mcp(e.to_string()))?;

    Ok(())
}

pub fn detect_project(
    allow: Vec<PathBuf>,
    ignore_vcs: bool,
    max_projects: usize,
) -> Result<()> {
    let authorizer = Arc::new(PathAuthorizer::new(allow)?);
    let detection = ProjectDetector::new(authorizer)
        .with_require_vcs(!ignore_vcs)
        .with_max_projects(max_projects)
        .detect()?;

    println!(
        "{}",
        serde_json::to_string_pretty(&detection).unwrap_or_default()
    );
    Ok(())
}

pub fn check_documentation(path: &Path, offset: usize, budget: usize) -> Result<()> {
    let scan = code_editor::ops::check_documentation(path)?;
    let page = Paginator::new(budget)?.paginate(&scan.issues, offset)?;

    println!("{}", serde_json::to_string_pretty(&page).unwrap_or_default());
    for warning in &scan.warnings {
        tracing::warn!("{warning}");
    }
    Ok(())
}
