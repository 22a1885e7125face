//! Project context detection.
//!
//! Given the allowed roots, decides which directory is the "current"
//! project and ranks the remaining candidates by recency.

pub mod detector;

use serde::Serialize;
use std::path::PathBuf;

pub use detector::ProjectDetector;

/// A discovered project candidate
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    /// Directory base name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Newest immediate-file modification time, seconds since epoch
    pub last_modified: u64,
}

/// Result of one detection pass. Recomputed fresh on every call.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetection {
    /// Best candidate, absent when nothing qualifies
    pub current_project: Option<ProjectInfo>,
    /// Remaining candidates, most recent first; never contains the
    /// current project's path
    pub recent_projects: Vec<ProjectInfo>,
    /// True when the top recent candidate is within 24 hours of the
    /// current project, so the caller should not silently assume
    /// `current_project` is the right one
    pub requires_choice: bool,
    /// Per-candidate stat failures that did not abort detection
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
