//! Language grammar support for the tree-sitter based operations.
//!
//! Each grammar names the declaration node kinds the editing and
//! documentation tools care about; the registry maps language names
//! and file extensions to grammars.

pub mod go;
pub mod java;
pub mod python;
pub mod rust;
pub mod typescript;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub trait LanguageGrammar: Send + Sync {
    fn name(&self) -> &'static str;
    fn file_extensions(&self) -> &[&'static str];
    fn language(&self) -> tree_sitter::Language;

    /// Node kinds that declare a function or method
    fn function_kinds(&self) -> &[&'static str];

    /// Node kinds that declare a type
    fn type_kinds(&self) -> &[&'static str];

    /// Prefixes that mark a doc comment preceding a declaration
    fn doc_comment_prefixes(&self) -> &[&'static str];

    /// Prefixes that mark a file-level doc comment on the first
    /// non-empty line
    fn file_doc_prefixes(&self) -> &[&'static str];

    /// Whether documentation lives inside the declaration body
    /// (docstrings) rather than in a preceding comment
    fn doc_is_inner(&self) -> bool {
        false
    }
}

pub struct LanguageRegistry {
    languages: HashMap<String, Arc<dyn LanguageGrammar>>,
    extension_map: HashMap<String, String>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
        };

        registry.register(Arc::new(rust::RustGrammar));
        registry.register(Arc::new(python::PythonGrammar));
        registry.register(Arc::new(go::GoGrammar));
        registry.register(Arc::new(typescript::TypeScriptGrammar));
        registry.register(Arc::new(java::JavaGrammar));

        registry
    }

    pub fn register(&mut self, grammar: Arc<dyn LanguageGrammar>) {
        let name = grammar.name().to_string();
        for ext in grammar.file_extensions() {
            self.extension_map.insert(ext.to_string(), name.clone());
        }
        self.languages.insert(name, grammar);
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn LanguageGrammar>> {
        self.languages.get(name).cloned()
    }

    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn LanguageGrammar>> {
        self.extension_map
            .get(ext)
            .and_then(|name| self.languages.get(name))
            .cloned()
    }

    pub fn get_for_file(&self, path: &Path) -> Option<Arc<dyn LanguageGrammar>> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get_by_extension(ext))
    }

    pub fn supported_languages(&self) -> Vec<&str> {
        self.languages.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_new() {
        let registry = LanguageRegistry::new();
        assert!(registry.get_by_name("rust").is_some());
        assert!(registry.get_by_name("python").is_some());
        assert!(registry.get_by_name("go").is_some());
        assert!(registry.get_by_name("typescript").is_some());
        assert!(registry.get_by_name("java").is_some());
    }

    #[test]
    fn test_get_by_extension() {
        let registry = LanguageRegistry::new();
        assert_eq!(registry.get_by_extension("rs").unwrap().name(), "rust");
        assert_eq!(registry.get_by_extension("py").unwrap().name(), "python");
        assert_eq!(
            registry.get_by_extension("tsx").unwrap().name(),
            "typescript"
        );
        assert!(registry.get_by_extension("zig").is_none());
    }

    #[test]
    fn test_get_for_file() {
        let registry = LanguageRegistry::new();
        let grammar = registry.get_for_file(Path::new("src/main.rs")).unwrap();
        assert_eq!(grammar.name(), "rust");
        assert!(registry.get_for_file(Path::new("README.md")).is_none());
    }
}
