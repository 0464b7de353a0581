//! Label resolution: display name, number and link for a label id.

use std::collections::HashMap;

use crate::store::LabelRegistry;

/// Placeholder shown for labels missing from the registry.
pub const UNRESOLVED: &str = "??";

pub const HTML_EXTENSION: &str = ".html";

const DEFAULT_CLASS_NAMES: &[(&str, &str)] = &[
    ("theorem", "Theorem"),
    ("lemma", "Lemma"),
    ("corollary", "Corollary"),
    ("proposition", "Proposition"),
    ("claim", "Claim"),
    ("definition", "Definition"),
    ("remark", "Remark"),
    ("example", "Example"),
    ("exercise", "Exercise"),
    ("proof", "Proof"),
    ("figure", "Figure"),
    ("table", "Table"),
    ("equation", "Equation"),
    ("chapter", "Chapter"),
    ("section", "Section"),
    ("subsection", "Section"),
    ("subsubsection", "Section"),
    ("paragraph", "Paragraph"),
    ("subparagraph", "Paragraph"),
];

/// Python-style capitalization: first character upper-cased, rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Display names of label classes.
#[derive(Debug, Clone)]
pub struct ClassNames {
    names: HashMap<String, String>,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            names: DEFAULT_CLASS_NAMES
                .iter()
                .map(|(class, name)| (class.to_string(), name.to_string()))
                .collect(),
        }
    }
}

impl ClassNames {
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    pub fn with(mut self, class: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(class.into(), name.into());
        self
    }

    pub fn name(&self, class: &str) -> String {
        self.names
            .get(class)
            .cloned()
            .unwrap_or_else(|| capitalize(class))
    }
}

/// Decomposed resolution of a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullLabel {
    pub name: String,
    pub number: String,
    /// Target file, empty when the label lives in the current document.
    pub file: String,
}

impl FullLabel {
    fn unresolved() -> Self {
        Self {
            name: UNRESOLVED.to_string(),
            number: UNRESOLVED.to_string(),
            file: String::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.name != UNRESOLVED || self.number != UNRESOLVED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLabel {
    /// e.g. `Theorem 3.2`
    pub text: String,
    /// e.g. `chapter3.html#thm:main`
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct Resolver {
    registry: LabelRegistry,
    class_names: ClassNames,
    current_file: String,
}

impl Resolver {
    pub fn new(registry: LabelRegistry, current_file: impl Into<String>) -> Self {
        Self {
            registry,
            class_names: ClassNames::default(),
            current_file: current_file.into(),
        }
    }

    pub fn with_class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    pub fn registry(&self) -> &LabelRegistry {
        &self.registry
    }

    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    pub fn current_file(&self) -> &str {
        &self.current_file
    }

    pub fn full_label(&self, label: &str) -> FullLabel {
        let Some(record) = self.registry.get(label) else {
            return FullLabel::unresolved();
        };
        let file = if record.file == self.current_file {
            String::new()
        } else {
            format!("{}{}", record.file, HTML_EXTENSION)
        };
        FullLabel {
            name: self.class_names.name(&record.class),
            number: record.number.clone(),
            file,
        }
    }

    pub fn resolve(&self, label: &str) -> ResolvedLabel {
        let full = self.full_label(label);
        ResolvedLabel {
            text: format!("{} {}", full.name, full.number),
            link: format!("{}#{}", full.file, label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{parse_aux_str, LabelRecord};
    use pretty_assertions::assert_eq;

    fn registry() -> LabelRegistry {
        [
            (
                "thm:main".to_string(),
                LabelRecord::new("chapter3", "theorem", "3.2"),
            ),
            ("intro".to_string(), LabelRecord::new("chapter1", "chapter", "")),
            ("fig:x".to_string(), LabelRecord::new("chapter1", "widget", "1.4")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("theorem"), "Theorem");
        assert_eq!(capitalize("subSection"), "Subsection");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_class_name_fallback() {
        let names = ClassNames::empty().with("thm", "Theorem");
        assert_eq!(names.name("thm"), "Theorem");
        assert_eq!(names.name("widget"), "Widget");
    }

    #[test]
    fn test_unknown_label_placeholder() {
        let resolver = Resolver::new(registry(), "chapter1");
        let full = resolver.full_label("nope");
        assert_eq!(
            (full.name.as_str(), full.number.as_str(), full.file.as_str()),
            ("??", "??", "")
        );
        assert!(!full.is_resolved());
        assert_eq!(resolver.resolve("nope").text, "?? ??");
    }

    #[test]
    fn test_same_document_link_is_local() {
        let resolver = Resolver::new(registry(), "chapter1");
        assert_eq!(resolver.full_label("fig:x").file, "");
        assert_eq!(resolver.resolve("fig:x").link, "#fig:x");
        assert_eq!(resolver.resolve("fig:x").text, "Widget 1.4");
    }

    #[test]
    fn test_other_document_link() {
        let resolver = Resolver::new(registry(), "chapter1");
        let resolved = resolver.resolve("thm:main");
        assert_eq!(resolved.text, "Theorem 3.2");
        assert_eq!(resolved.link, "chapter3.html#thm:main");
    }

    #[test]
    fn test_empty_number() {
        let resolver = Resolver::new(registry(), "chapter9");
        let full = resolver.full_label("intro");
        assert_eq!(full.name, "Chapter");
        assert_eq!(full.number, "");
        assert_eq!(full.file, "chapter1.html");
    }

    #[test]
    fn test_aux_record_resolves_with_class_table() {
        let registry = parse_aux_str(
            "chapter3",
            r"\newlabel{thm:main@pref}{{[Theorem][3][2,1. ]3.2}{}}",
        );
        let resolver = Resolver::new(registry, "chapter1")
            .with_class_names(ClassNames::empty().with("theorem", "Theorem"));
        let resolved = resolver.resolve("thm:main");
        assert_eq!(resolved.text, "Theorem 3.2");
        assert!(!resolved.link.is_empty());
        assert!(resolved.link.starts_with("chapter3.html"));
    }
}
