mod commands;

pub use commands::{check_documentation, detect_project, run_mcp_server, Cli, Commands};
