//! Syntax validation via tree-sitter error nodes.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::languages::LanguageGrammar;

use super::{grammar_for, parse_source};

#[derive(Debug, Clone, Serialize)]
pub struct SyntaxErrorInfo {
    /// 1-based line
    pub line: u32,
    /// 0-based column
    pub column: u32,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyntaxReport {
    pub language: String,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SyntaxErrorInfo>,
}

pub fn validate_syntax(path: &Path, language: Option<&str>) -> Result<SyntaxReport> {
    let grammar = grammar_for(path, language)?;
    let source = super::read_file(path)?;
    validate_source(&source, grammar)
}

pub fn validate_source(
    source: &str,
    grammar: Arc<dyn LanguageGrammar>,
) -> Result<SyntaxReport> {
    let parsed = parse_source(source, grammar)?;
    let mut errors = Vec::new();

    let mut stack = vec![parsed.root_node()];
    while let Some(node) = stack.pop() {
        if node.is_error() {
            let snippet: String = parsed.node_text(&node).chars().take(40).collect();
            errors.push(SyntaxErrorInfo {
                line: node.start_position().row as u32 + 1,
                column: node.start_position().column as u32,
                message: format!("unexpected input near '{}'", snippet.trim()),
            });
            continue;
        }
        if node.is_missing() {
            errors.push(SyntaxErrorInfo {
                line: node.start_position().row as u32 + 1,
                column: node.start_position().column as u32,
                message: format!("missing {}", node.kind()),
            });
            continue;
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push(child);
        }
    }

    errors.sort_by_key(|e| (e.line, e.column));

    Ok(SyntaxReport {
        language: parsed.grammar.name().to_string(),
        valid: errors.is_empty(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use crate::REGISTRY;

    use super::*;

    #[test]
    fn test_valid_rust() {
        let grammar = REGISTRY.get_by_name("rust").unwrap();
        let report = validate_source("fn main() { println!(\"ok\"); }", grammar).unwrap();
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_broken_rust() {
        let grammar = REGISTRY.get_by_name("rust").unwrap();
        let report = validate_source("fn main( {", grammar).unwrap();
        assert!(!report.valid);
        assert!(!report.errors.is_empty());
        assert!(report.errors[0].line >= 1);
    }

    #[test]
    fn test_valid_python() {
        let grammar = REGISTRY.get_by_name("python").unwrap();
        let report = validate_source("def f(x):\n    return x\n", grammar).unwrap();
        assert!(report.valid);
    }

    #[test]
    fn test_broken_python() {
        let grammar = REGISTRY.get_by_name("python").unwrap();
        let report = validate_source("def f(:\n", grammar).unwrap();
        assert!(!report.valid);
    }
}
