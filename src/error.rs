use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid or expired session token")]
    InvalidSession,

    #[error("access denied: path not allowed: {}", .0.display())]
    AccessDenied(PathBuf),

    #[error("no allowed paths configured")]
    NoAllowedPaths,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("request canceled")]
    Canceled,

    #[error("MCP error: {0}")]
    Mcp(String),
}

pub type Result<T> = std::result::Result<T, EditorError>;
