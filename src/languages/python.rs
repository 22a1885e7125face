use super::LanguageGrammar;

pub struct PythonGrammar;

impl LanguageGrammar for PythonGrammar {
    fn name(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["py"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn function_kinds(&self) -> &[&'static str] {
        &["function_definition"]
    }

    fn type_kinds(&self) -> &[&'static str] {
        &["class_definition"]
    }

    fn doc_comment_prefixes(&self) -> &[&'static str] {
        &["#"]
    }

    fn file_doc_prefixes(&self) -> &[&'static str] {
        &["\"\"\"", "'''", "#"]
    }

    // PEP 257: documentation is a docstring in the body
    fn doc_is_inner(&self) -> bool {
        true
    }
}
