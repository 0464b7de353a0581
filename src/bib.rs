//! Minimal BibTeX loading: citation key to entry type and fields.
//!
//! Formatting citations is left to LaTeX and the HTML renderer; the filter
//! only needs to know which keys exist and what they point at.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

use crate::utils::FilterResult;

lazy_static! {
    static ref ENTRY_START: Regex = Regex::new(r"@([A-Za-z]+)\s*\{").unwrap();
    static ref FIELD_NAME: Regex =
        Regex::new(r"^[\s,]*([A-Za-z][A-Za-z0-9_:.+-]*)\s*=\s*").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    /// Lower-cased entry type (`article`, `book`, ...).
    pub kind: String,
    /// Lower-cased field names in source order.
    pub fields: IndexMap<String, String>,
}

impl BibEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bibliography {
    entries: IndexMap<String, BibEntry>,
}

impl Bibliography {
    pub fn parse(text: &str) -> Self {
        let mut entries = IndexMap::new();
        let mut pos = 0;
        while let Some(caps) = ENTRY_START.captures(&text[pos..]) {
            let (Some(head), Some(kind)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let kind = kind.as_str().to_ascii_lowercase();
            let open = pos + head.end() - 1;
            let close = closing_brace(text, open);
            if close.is_none() {
                warn!("unterminated @{} entry in bibliography", kind);
            }
            let body = &text[open + 1..close.unwrap_or(text.len())];
            pos = close.map_or(text.len(), |c| c + 1);

            if matches!(kind.as_str(), "comment" | "string" | "preamble") {
                continue;
            }
            let (key, fields) = body.split_once(',').unwrap_or((body, ""));
            let key = key.trim();
            if key.is_empty() {
                warn!("@{} entry without a citation key", kind);
                continue;
            }
            entries.insert(
                key.to_string(),
                BibEntry {
                    kind,
                    fields: parse_fields(fields),
                },
            );
        }
        Self { entries }
    }

    /// Load a `.bib` file. A missing file yields an empty bibliography.
    pub fn load(path: &Path) -> FilterResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("bibliography {} not found", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let bib = Self::parse(&text);
        info!("loaded {} bibliography entries from {}", bib.len(), path.display());
        Ok(bib)
    }

    pub fn get(&self, key: &str) -> Option<&BibEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Byte offset of the `}` matching the `{` at `open`.
fn closing_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// `name = value` pairs separated by commas. Values are brace groups of any
/// depth, quoted strings, or bare words.
fn parse_fields(mut rest: &str) -> IndexMap<String, String> {
    let mut fields = IndexMap::new();
    while let Some(caps) = FIELD_NAME.captures(rest) {
        let (Some(head), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let name = name.as_str().to_ascii_lowercase();
        let after = &rest[head.end()..];
        let Some((value, len)) = field_value(after) else {
            warn!("unterminated value for bibliography field {}", name);
            break;
        };
        fields.insert(name, value);

        // String concatenation (`"a" # b`) keeps only its first part.
        let tail = after[len..].trim_start();
        rest = if tail.is_empty() || tail.starts_with(',') {
            tail
        } else {
            tail.find(',').map_or("", |i| &tail[i..])
        };
    }
    fields
}

/// The value at the start of `s` and the number of bytes it spans.
fn field_value(s: &str) -> Option<(String, usize)> {
    match s.as_bytes().first().copied() {
        Some(b'{') => {
            let close = closing_brace(s, 0)?;
            Some((s[1..close].trim().to_string(), close + 1))
        }
        Some(b'"') => {
            let mut depth = 0usize;
            for (i, b) in s.bytes().enumerate().skip(1) {
                match b {
                    b'{' => depth += 1,
                    b'}' => depth = depth.saturating_sub(1),
                    b'"' if depth == 0 => return Some((s[1..i].trim().to_string(), i + 1)),
                    _ => {}
                }
            }
            None
        }
        _ => {
            let end = s.find(',').unwrap_or(s.len());
            Some((s[..end].trim().to_string(), end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
@comment{generated}
@Article{knuth84,
  author = {Donald E. Knuth},
  title = {Literate {P}rogramming},
  journal = "The Computer Journal",
  year = 1984,
}

@book{lamport94, title={{\LaTeX}: A Document Preparation System}, year={1994}}
"#;

    #[test]
    fn test_parse_entries() {
        let bib = Bibliography::parse(SAMPLE);
        assert_eq!(bib.len(), 2);

        let knuth = bib.get("knuth84").unwrap();
        assert_eq!(knuth.kind, "article");
        assert_eq!(knuth.field("author"), Some("Donald E. Knuth"));
        assert_eq!(knuth.field("title"), Some("Literate {P}rogramming"));
        assert_eq!(knuth.field("journal"), Some("The Computer Journal"));
        assert_eq!(knuth.field("year"), Some("1984"));

        let lamport = bib.get("lamport94").unwrap();
        assert_eq!(lamport.kind, "book");
        assert_eq!(lamport.field("year"), Some("1994"));
    }

    #[test]
    fn test_string_macro_does_not_leak_into_previous_entry() {
        let bib = Bibliography::parse("@article{a, title={T}}\n@string{jcp = \"J. Comp.\"}");
        assert_eq!(bib.len(), 1);
        let a = bib.get("a").unwrap();
        assert_eq!(a.fields.len(), 1);
        assert_eq!(a.field("title"), Some("T"));
    }

    #[test]
    fn test_deeply_nested_braces_are_kept() {
        let bib = Bibliography::parse("@book{b, title = {The {\\em {deep}} one}, year = 1999}");
        let b = bib.get("b").unwrap();
        assert_eq!(b.field("title"), Some("The {\\em {deep}} one"));
        assert_eq!(b.field("year"), Some("1999"));
    }

    #[test]
    fn test_quoted_value_with_braces_and_concatenation() {
        let bib = Bibliography::parse(
            "@misc{c,\n  note = \"see {\"}quotes{\"}\",\n  howpublished = \"web\" # jcp,\n  year = {2001}\n}\n@misc{empty}",
        );
        let c = bib.get("c").unwrap();
        assert_eq!(c.field("note"), Some("see {\"}quotes{\"}"));
        assert_eq!(c.field("howpublished"), Some("web"));
        assert_eq!(c.field("year"), Some("2001"));
        assert!(bib.get("empty").unwrap().fields.is_empty());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let bib = Bibliography::load(&dir.path().join("refs.bib")).unwrap();
        assert!(bib.is_empty());
    }
}
