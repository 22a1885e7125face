use super::LanguageGrammar;

pub struct TypeScriptGrammar;

impl LanguageGrammar for TypeScriptGrammar {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["ts", "tsx"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    }

    fn function_kinds(&self) -> &[&'static str] {
        &["function_declaration", "method_definition"]
    }

    fn type_kinds(&self) -> &[&'static str] {
        &[
            "class_declaration",
            "interface_declaration",
            "enum_declaration",
            "type_alias_declaration",
        ]
    }

    fn doc_comment_prefixes(&self) -> &[&'static str] {
        &["/**", "//"]
    }

    fn file_doc_prefixes(&self) -> &[&'static str] {
        &["//", "/*"]
    }
}
