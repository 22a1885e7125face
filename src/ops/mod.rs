//! Operation handlers.
//!
//! Every handler takes path arguments that already passed admission;
//! none of them touch session or authorization state.

pub mod doc_check;
pub mod file_ops;
pub mod replace;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use crate::error::{EditorError, Result};
use crate::languages::LanguageGrammar;
use crate::REGISTRY;

pub use doc_check::{check_documentation, sort_issues, DocIssue, DocScan, IssueSeverity};
pub use file_ops::{delete_file, read_file, write_file};
pub use replace::{replace_part, replace_pattern, PartKind, PartReplaceOutcome, ReplaceOutcome};
pub use validate::{validate_source, validate_syntax, SyntaxErrorInfo, SyntaxReport};

/// A parsed source buffer plus the grammar that parsed it
pub struct ParsedSource {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub grammar: Arc<dyn LanguageGrammar>,
}

impl ParsedSource {
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn node_text(&self, node: &tree_sitter::Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

/// Resolve a grammar from an explicit language name or, failing that,
/// the file extension
pub fn grammar_for(path: &Path, language: Option<&str>) -> Result<Arc<dyn LanguageGrammar>> {
    match language {
        Some(name) => REGISTRY
            .get_by_name(name)
            .ok_or_else(|| EditorError::UnsupportedLanguage(name.to_string())),
        None => REGISTRY
            .get_for_file(path)
            .ok_or_else(|| EditorError::UnsupportedLanguage(path.display().to_string())),
    }
}

pub fn parse_source(source: &str, grammar: Arc<dyn LanguageGrammar>) -> Result<ParsedSource> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&grammar.language())
        .map_err(|e| EditorError::Parse(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| EditorError::Parse("Failed to parse source".to_string()))?;

    Ok(ParsedSource {
        tree,
        source: source.to_string(),
        grammar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_for_explicit_language() {
        let grammar = grammar_for(Path::new("whatever.txt"), Some("rust")).unwrap();
        assert_eq!(grammar.name(), "rust");
    }

    #[test]
    fn test_grammar_for_extension_fallback() {
        let grammar = grammar_for(Path::new("src/app.py"), None).unwrap();
        assert_eq!(grammar.name(), "python");
    }

    #[test]
    fn test_grammar_for_unknown() {
        assert!(grammar_for(Path::new("a.zig"), None).is_err());
        assert!(grammar_for(Path::new("a.rs"), Some("cobol")).is_err());
    }

    #[test]
    fn test_parse_source_rust() {
        let grammar = REGISTRY.get_by_name("rust").unwrap();
        let parsed = parse_source("fn main() {}", grammar).unwrap();
        assert!(!parsed.root_node().has_error());
    }
}
