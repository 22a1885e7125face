use super::LanguageGrammar;

pub struct GoGrammar;

impl LanguageGrammar for GoGrammar {
    fn name(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["go"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn function_kinds(&self) -> &[&'static str] {
        &["function_declaration", "method_declaration"]
    }

    fn type_kinds(&self) -> &[&'static str] {
        &["type_declaration"]
    }

    fn doc_comment_prefixes(&self) -> &[&'static str] {
        &["//"]
    }

    fn file_doc_prefixes(&self) -> &[&'static str] {
        &["//"]
    }
}
