use super::LanguageGrammar;

pub struct JavaGrammar;

impl LanguageGrammar for JavaGrammar {
    fn name(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["java"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }

    fn function_kinds(&self) -> &[&'static str] {
        &["method_declaration", "constructor_declaration"]
    }

    fn type_kinds(&self) -> &[&'static str] {
        &["class_declaration", "interface_declaration", "enum_declaration"]
    }

    fn doc_comment_prefixes(&self) -> &[&'static str] {
        &["/**"]
    }

    fn file_doc_prefixes(&self) -> &[&'static str] {
        &["//", "/*"]
    }
}
