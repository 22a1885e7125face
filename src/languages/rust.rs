use super::LanguageGrammar;

pub struct RustGrammar;

impl LanguageGrammar for RustGrammar {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["rs"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_rust::LANGUAGE.into()
    }

    fn function_kinds(&self) -> &[&'static str] {
        &["function_item"]
    }

    fn type_kinds(&self) -> &[&'static str] {
        &["struct_item", "enum_item", "trait_item", "type_item", "union_item"]
    }

    fn doc_comment_prefixes(&self) -> &[&'static str] {
        &["///", "/**"]
    }

    fn file_doc_prefixes(&self) -> &[&'static str] {
        &["//!", "/*!"]
    }
}
