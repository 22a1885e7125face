//! In-place content replacement: regex patterns and named
//! declarations.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::error::{EditorError, Result};

use super::{grammar_for, parse_source, ParsedSource};

/// Result of a pattern replacement
#[derive(Debug, Clone, Serialize)]
pub struct ReplaceOutcome {
    pub replacements: usize,
}

/// Replace regex matches in the file. Zero matches is a success with
/// `replacements: 0`; an invalid pattern is an error.
pub fn replace_pattern(
    path: &Path,
    pattern: &str,
    replacement: &str,
    all: bool,
) -> Result<ReplaceOutcome> {
    let source = super::read_file(path)?;
    let regex = Regex::new(pattern)?;

    let matches = regex.find_iter(&source).count();
    let replacements = if all { matches } else { matches.min(1) };
    if replacements == 0 {
        return Ok(ReplaceOutcome { replacements: 0 });
    }

    let updated = if all {
        regex.replace_all(&source, replacement)
    } else {
        regex.replace(&source, replacement)
    };
    fs::write(path, updated.as_ref())?;

    Ok(ReplaceOutcome { replacements })
}

/// Which kind of named declaration to replace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Function,
    Type,
}

impl PartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::Function => "function",
            PartKind::Type => "type",
        }
    }
}

/// Result of a declaration replacement
#[derive(Debug, Clone, Serialize)]
pub struct PartReplaceOutcome {
    pub name: String,
    pub kind: String,
    /// 1-based line range the declaration occupied before the edit
    pub start_line: u32,
    pub end_line: u32,
}

/// Replace the named function or type declaration with `replacement`.
///
/// The declaration is located by parsing the file with tree-sitter and
/// matching the grammar's declaration node kinds by name; the
/// replacement text is spliced over the declaration's exact byte span.
pub fn replace_part(
    path: &Path,
    language: Option<&str>,
    kind: PartKind,
    name: &str,
    replacement: &str,
) -> Result<PartReplaceOutcome> {
    let grammar = grammar_for(path, language)?;
    let source = super::read_file(path)?;
    let parsed = parse_source(&source, grammar)?;

    let kinds = match kind {
        PartKind::Function => parsed.grammar.function_kinds(),
        PartKind::Type => parsed.grammar.type_kinds(),
    };

    let node = find_declaration(&parsed, kinds, name).ok_or_else(|| {
        EditorError::SymbolNotFound(format!(
            "{} '{}' in {}",
            kind.as_str(),
            name,
            path.display()
        ))
    })?;

    let start_line = node.start_position().row as u32 + 1;
    let end_line = node.end_position().row as u32 + 1;

    let mut updated = String::with_capacity(source.len() + replacement.len());
    updated.push_str(&source[..node.start_byte()]);
    updated.push_str(replacement);
    updated.push_str(&source[node.end_byte()..]);
    fs::write(path, updated)?;

    Ok(PartReplaceOutcome {
        name: name.to_string(),
        kind: kind.as_str().to_string(),
        start_line,
        end_line,
    })
}

fn find_declaration<'a>(
    parsed: &'a ParsedSource,
    kinds: &[&str],
    name: &str,
) -> Option<tree_sitter::Node<'a>> {
    let mut stack = vec![parsed.root_node()];
    while let Some(node) = stack.pop() {
        if kinds.contains(&node.kind()) && declaration_name(parsed, node).as_deref() == Some(name) {
            return Some(node);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            stack.push(child);
        }
    }
    None
}

/// A declaration's name lives in its `name` field, except for wrapper
/// nodes (Go's `type_declaration` holds `type_spec` children) where it
/// is one level down.
pub(super) fn declaration_name(parsed: &ParsedSource, node: tree_sitter::Node) -> Option<String> {
    if let Some(name_node) = node.child_by_field_name("name") {
        return Some(parsed.node_text(&name_node).to_string());
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(name_node) = child.child_by_field_name("name") {
            return Some(parsed.node_text(&name_node).to_string());
        }
    }
    None
}
