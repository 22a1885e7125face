//! Project candidate enumeration and ranking.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use crate::authz::PathAuthorizer;
use crate::error::{EditorError, Result};

use super::{ProjectDetection, ProjectInfo};

/// Two candidates closer than this are considered ambiguous.
const AMBIGUITY_WINDOW_SECS: u64 = 24 * 60 * 60;

const DEFAULT_MAX_PROJECTS: usize = 100;

/// Detects the current project among the allowed roots
pub struct ProjectDetector {
    authorizer: Arc<PathAuthorizer>,
    require_vcs: bool,
    max_projects: usize,
}

impl ProjectDetector {
    pub fn new(authorizer: Arc<PathAuthorizer>) -> Self {
        Self {
            authorizer,
            require_vcs: true,
            max_projects: DEFAULT_MAX_PROJECTS,
        }
    }

    /// Accept subdirectories without a version-control marker as long
    /// as they contain at least one regular file
    pub fn with_require_vcs(mut self, require_vcs: bool) -> Self {
        self.require_vcs = require_vcs;
        self
    }

    /// Cap on current + recent projects reported per detection
    pub fn with_max_projects(mut self, max_projects: usize) -> Self {
        self.max_projects = max_projects.max(1);
        self
    }

    /// Run one detection pass over the allowed roots
    pub fn detect(&self) -> Result<ProjectDetection> {
        let roots = self.authorizer.roots();
        if roots.is_empty() {
            return Err(EditorError::NoAllowedPaths);
        }

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();

        for root in roots {
            self.collect_candidates(root, &mut candidates, &mut warnings);
        }

        // Most recent first; names break ties so repeated runs over an
        // unchanged tree are identical.
        candidates.sort_by(|a: &ProjectInfo, b: &ProjectInfo| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| a.name.cmp(&b.name))
        });

        let mut iter = candidates.into_iter();
        let current_project = iter.next();
        let mut recent_projects: Vec<ProjectInfo> = iter.collect();
        recent_projects.truncate(self.max_projects.saturating_sub(1));

        let requires_choice = match (&current_project, recent_projects.first()) {
            (Some(current), Some(top_recent)) => {
                current.last_modified.saturating_sub(top_recent.last_modified)
                    < AMBIGUITY_WINDOW_SECS
            }
            _ => false,
        };

        Ok(ProjectDetection {
            current_project,
            recent_projects,
            requires_choice,
            warnings,
        })
    }

    fn collect_candidates(
        &self,
        root: &Path,
        candidates: &mut Vec<ProjectInfo>,
        warnings: &mut Vec<String>,
    ) {
        // A root that is itself under version control is the project;
        // otherwise its immediate subdirectories are the candidates.
        if root.join(".git").is_dir() {
            candidates.push(self.candidate_info(root, warnings));
            return;
        }

        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                warnings.push(format!("{}: {}", root.display(), e));
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            if self.qualifies(&path) {
                candidates.push(self.candidate_info(&path, warnings));
            }
        }
    }

    fn qualifies(&self, dir: &Path) -> bool {
        if dir.join(".git").is_dir() {
            return true;
        }
        if self.require_vcs {
            return false;
        }
        has_regular_file(dir)
    }

    fn candidate_info(&self, dir: &Path, warnings: &mut Vec<String>) -> ProjectInfo {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());

        ProjectInfo {
            name,
            path: dir.to_path_buf(),
            last_modified: newest_file_mtime(dir, warnings),
        }
    }
}

fn has_regular_file(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .any(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        })
        .unwrap_or(false)
}

/// Newest modification time among the directory's immediate regular
/// files. The directory's own mtime is deliberately not consulted: it
/// does not update on nested edits. A candidate without readable files
/// ranks as epoch-old.
fn newest_file_mtime(dir: &Path, warnings: &mut Vec<String>) -> u64 {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(format!("{}: {}", dir.display(), e));
            return 0;
        }
    };

    let mut newest = 0u64;
    for entry in entries.flatten() {
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => {
                let secs = modified
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs();
                newest = newest.max(secs);
            }
            Err(e) => {
                warnings.push(format!("{}: {}", entry.path().display(), e));
            }
        }
    }
    newest
}
