//! Documentation coverage scan.
//!
//! Walks the source files under a directory and reports what is
//! missing documentation, from the most actionable finding down:
//! undocumented declarations, then files without a leading doc
//! comment, then project-level gaps. The resulting list is ordered
//! deterministically so pagination offsets stay stable across calls.

use std::path::Path;

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::error::{EditorError, Result};
use crate::REGISTRY;

use super::replace::declaration_name;
use super::{parse_source, ParsedSource};

const README_NAMES: &[&str] = &["README.md", "README", "README.rst", "README.txt"];

/// Severity class, ascending: declarations sort before file-level
/// findings, which sort before project-level ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Declaration,
    File,
    Project,
}

impl IssueSeverity {
    pub fn class(&self) -> u8 {
        match self {
            IssueSeverity::Declaration => 0,
            IssueSeverity::File => 1,
            IssueSeverity::Project => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocIssue {
    pub severity: IssueSeverity,
    pub file: String,
    /// 1-based line; 0 for project-level findings
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub message: String,
}

/// Scan result: the ordered issues plus per-file failures that did not
/// abort the scan
#[derive(Debug, Clone, Serialize)]
pub struct DocScan {
    pub issues: Vec<DocIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Deterministic priority order: severity class, then file path, then
/// line
pub fn sort_issues(issues: &mut [DocIssue]) {
    issues.sort_by(|a, b| {
        a.severity
            .class()
            .cmp(&b.severity.class())
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.line.cmp(&b.line))
    });
}

pub fn check_documentation(root: &Path) -> Result<DocScan> {
    if !root.exists() {
        return Err(EditorError::FileNotFound(root.display().to_string()));
    }

    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if root.is_file() {
        scan_source_file(root, &mut issues, &mut warnings);
        sort_issues(&mut issues);
        return Ok(DocScan { issues, warnings });
    }

    if !README_NAMES.iter().any(|name| root.join(name).is_file()) {
        issues.push(DocIssue {
            severity: IssueSeverity::Project,
            file: root.display().to_string(),
            line: 0,
            symbol: None,
            message: "project has no README".to_string(),
        });
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warnings.push(e.to_string());
                continue;
            }
        };
        if entry.file_type().is_file() {
            scan_source_file(entry.path(), &mut issues, &mut warnings);
        }
    }

    sort_issues(&mut issues);
    Ok(DocScan { issues, warnings })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

fn scan_source_file(path: &Path, issues: &mut Vec<DocIssue>, warnings: &mut Vec<String>) {
    let Some(grammar) = REGISTRY.get_for_file(path) else {
        return;
    };

    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            warnings.push(format!("{}: {}", path.display(), e));
            return;
        }
    };

    let parsed = match parse_source(&source, grammar) {
        Ok(parsed) => parsed,
        Err(e) => {
            warnings.push(format!("{}: {}", path.display(), e));
            return;
        }
    };

    let file = path.display().to_string();

    if !has_file_doc(&parsed) {
        issues.push(DocIssue {
            severity: IssueSeverity::File,
            file: file.clone(),
            line: 1,
            symbol: None,
            message: "file has no leading documentation comment".to_string(),
        });
    }

    let mut stack = vec![parsed.root_node()];
    while let Some(node) = stack.pop() {
        let kind_label = if parsed.grammar.function_kinds().contains(&node.kind()) {
            Some("function")
        } else if parsed.grammar.type_kinds().contains(&node.kind()) {
            Some("type")
        } else {
            None
        };

        if let Some(kind_label) = kind_label {
            if !is_documented(&parsed, node) {
                let name = declaration_name(&parsed, node).unwrap_or_else(|| "?".to_string());
                issues.push(DocIssue {
                    severity: IssueSeverity::Declaration,
                    file: file.clone(),
                    line: node.start_position().row as u32 + 1,
                    message: format!("{kind_label} '{name}' has no documentation comment"),
                    symbol: Some(name),
                });
            }
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push(child);
        }
    }
}

fn has_file_doc(parsed: &ParsedSource) -> bool {
    let first_line = parsed
        .source
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty())
        .unwrap_or("");

    parsed
        .grammar
        .file_doc_prefixes()
        .iter()
        .any(|prefix| first_line.starts_with(prefix))
}

fn is_documented(parsed: &ParsedSource, node: tree_sitter::Node) -> bool {
    if parsed.grammar.doc_is_inner() {
        return has_docstring(parsed, node);
    }

    let Some(prev) = node.prev_sibling() else {
        return false;
    };
    if !prev.kind().contains("comment") {
        return false;
    }
    let text = parsed.node_text(&prev);
    parsed
        .grammar
        .doc_comment_prefixes()
        .iter()
        .any(|prefix| text.starts_with(prefix))
}

/// Docstring convention: the first statement of the body is a string
/// expression
fn has_docstring(parsed: &ParsedSource, node: tree_sitter::Node) -> bool {
    let Some(body) = node.child_by_field_name("body") else {
        return false;
    };
    let Some(first) = body.named_child(0) else {
        return false;
    };
    if first.kind() != "expression_statement" {
        return false;
    }
    matches!(first.named_child(0), Some(expr) if expr.kind() == "string")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::write_file;
    use super::*;

    #[test]
    fn test_undocumented_rust_function_reported() {
        let temp = TempDir::new().unwrap();
        write_file(&temp.path().join("README.md"), "# app").unwrap();
        write_file(
            &temp.path().join("lib.rs"),
            "//! Library docs.\n\nfn helper() {}\n",
        )
        .unwrap();

        let scan = check_documentation(temp.path()).unwrap();
        assert_eq!(scan.issues.len(), 1);
        assert_eq!(scan.issues[0].severity, IssueSeverity::Declaration);
        assert_eq!(scan.issues[0].symbol.as_deref(), Some("helper"));
    }

    #[test]
    fn test_documented_rust_function_clean() {
        let temp = TempDir::new().unwrap();
        write_file(&temp.path().join("README.md"), "# app").unwrap();
        write_file(
            &temp.path().join("lib.rs"),
            "//! Library docs.\n\n/// Does the thing.\nfn helper() {}\n",
        )
        .unwrap();

        let scan = check_documentation(temp.path()).unwrap();
        assert!(scan.issues.is_empty(), "{:?}", scan.issues);
    }

    #[test]
    fn test_missing_file_doc_and_readme() {
        let temp = TempDir::new().unwrap();
        write_file(&temp.path().join("lib.rs"), "/// Doc.\nfn helper() {}\n").unwrap();

        let scan = check_documentation(temp.path()).unwrap();
        let severities: Vec<IssueSeverity> =
            scan.issues.iter().map(|i| i.severity).collect();
        assert_eq!(severities, vec![IssueSeverity::File, IssueSeverity::Project]);
    }

    #[test]
    fn test_python_docstring_recognized() {
        let temp = TempDir::new().unwrap();
        write_file(&temp.path().join("README.md"), "# app").unwrap();
        write_file(
            &temp.path().join("app.py"),
            "\"\"\"Module docs.\"\"\"\n\ndef documented():\n    \"\"\"Doc.\"\"\"\n    return 1\n\ndef bare():\n    return 2\n",
        )
        .unwrap();

        let scan = check_documentation(temp.path()).unwrap();
        assert_eq!(scan.issues.len(), 1);
        assert_eq!(scan.issues[0].symbol.as_deref(), Some("bare"));
    }

    #[test]
    fn test_hidden_directories_skipped() {
        let temp = TempDir::new().unwrap();
        write_file(&temp.path().join("README.md"), "# app").unwrap();
        write_file(
            &temp.path().join(".vendor/junk.rs"),
            "fn undocumented() {}\n",
        )
        .unwrap();

        let scan = check_documentation(temp.path()).unwrap();
        assert!(scan.issues.is_empty());
    }

    #[test]
    fn test_ordering_is_severity_then_file_then_line() {
        let mut issues = vec![
            DocIssue {
                severity: IssueSeverity::Project,
                file: "a".into(),
                line: 0,
                symbol: None,
                message: String::new(),
            },
            DocIssue {
                severity: IssueSeverity::Declaration,
                file: "b.rs".into(),
                line: 9,
                symbol: None,
                message: String::new(),
            },
            DocIssue {
                severity: IssueSeverity::Declaration,
                file: "b.rs".into(),
                line: 3,
                symbol: None,
                message: String::new(),
            },
            DocIssue {
                severity: IssueSeverity::File,
                file: "a.rs".into(),
                line: 1,
                symbol: None,
                message: String::new(),
            },
        ];
        sort_issues(&mut issues);

        let order: Vec<(u8, &str, u32)> = issues
            .iter()
            .map(|i| (i.severity.class(), i.file.as_str(), i.line))
            .collect();
        assert_eq!(
            order,
            vec![(0, "b.rs", 3), (0, "b.rs", 9), (1, "a.rs", 1), (2, "a", 0)]
        );
    }
}
