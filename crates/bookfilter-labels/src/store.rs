//! Label registry built from LaTeX `.aux` files.
//!
//! A compiled book leaves one `.aux` file per chapter. Every
//! `\newlabel{ID@pref}{{[CLASS][..][..]NUMBER}..}` record in them tells us
//! which file defines a label, what kind of object it is and how it is
//! numbered. The merged registry is persisted as YAML so that the filter can
//! run without the LaTeX build tree at hand.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{LabelError, LabelResult};

/// Suffix identifying auxiliary files in a build directory.
pub const AUX_SUFFIX: &str = ".aux";

pub const DEFAULT_REGISTRY_PATH: &str = "bookaux.yaml";

lazy_static! {
    static ref NEWLABEL: Regex = Regex::new(concat!(
        r"^\\newlabel\{([A-Za-z0-9_:-]+)@pref\}",
        r"\{\{\[([A-Za-z ]+)\]\[([A-Za-z0-9 ]*)\]",
        r"\[([A-Za-z0-9,. ]*)\]([A-Za-z0-9,. ]*)\}.*\}",
    ))
    .unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    /// Defining file, without extension.
    pub file: String,
    pub class: String,
    #[serde(default)]
    pub number: String,
}

impl LabelRecord {
    pub fn new(
        file: impl Into<String>,
        class: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            class: class.into(),
            number: number.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelRegistry {
    labels: BTreeMap<String, LabelRecord>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<&LabelRecord> {
        self.labels.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    pub fn insert(&mut self, label: impl Into<String>, record: LabelRecord) -> Option<LabelRecord> {
        self.labels.insert(label.into(), record)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, LabelRecord> {
        self.labels.iter()
    }

    /// Merge `other` into `self`. Entries of `other` win on duplicate ids;
    /// the overwritten ids are returned.
    pub fn merge(&mut self, other: LabelRegistry) -> Vec<String> {
        let mut overwritten = Vec::new();
        for (label, record) in other.labels {
            if let Some(previous) = self.labels.insert(label.clone(), record) {
                debug!("label {} redefined (was in {})", label, previous.file);
                overwritten.push(label);
            }
        }
        overwritten
    }
}

impl FromIterator<(String, LabelRecord)> for LabelRegistry {
    fn from_iter<I: IntoIterator<Item = (String, LabelRecord)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LabelRegistry {
    type Item = (&'a String, &'a LabelRecord);
    type IntoIter = btree_map::Iter<'a, String, LabelRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

/// Parse the text of one `.aux` file. Lines that are not `\newlabel`
/// records of the expected shape are skipped.
pub fn parse_aux_str(source_file: &str, text: &str) -> LabelRegistry {
    let mut registry = LabelRegistry::new();
    for line in text.lines() {
        let Some(caps) = NEWLABEL.captures(line) else {
            continue;
        };
        registry.insert(
            &caps[1],
            LabelRecord::new(source_file, &caps[2], &caps[5]),
        );
    }
    registry
}

pub fn parse_aux_file(path: &Path) -> LabelResult<LabelRegistry> {
    let text = fs::read_to_string(path).map_err(|e| LabelError::io(path, e))?;
    let source_file = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_aux_str(&source_file, &text))
}

fn is_aux_name(name: &str) -> bool {
    name.len() > AUX_SUFFIX.len() && name.ends_with(AUX_SUFFIX)
}

/// Parse and merge every `.aux` file directly inside `dir`.
///
/// Files are merged in directory enumeration order and later files win on
/// duplicate ids. A missing directory yields an empty registry.
pub fn load_all_aux_files(dir: &Path) -> LabelResult<LabelRegistry> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("aux directory {} not found", dir.display());
            return Ok(LabelRegistry::new());
        }
        Err(e) => return Err(LabelError::io(dir, e)),
    };

    let mut registry = LabelRegistry::new();
    for entry in entries {
        let entry = entry.map_err(|e| LabelError::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name();
        if !is_aux_name(&name.to_string_lossy()) || !path.is_file() {
            continue;
        }
        let parsed = parse_aux_file(&path)?;
        debug!("{}: {} labels", path.display(), parsed.len());
        for label in registry.merge(parsed) {
            warn!("label {} defined again in {}", label, path.display());
        }
    }
    info!("collected {} labels from {}", registry.len(), dir.display());
    Ok(registry)
}

/// Load a YAML registry. A missing or empty file is an empty registry.
pub fn load_registry(path: &Path) -> LabelResult<LabelRegistry> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("label registry {} not found, starting empty", path.display());
            return Ok(LabelRegistry::new());
        }
        Err(e) => return Err(LabelError::io(path, e)),
    };
    if text.trim().is_empty() {
        return Ok(LabelRegistry::new());
    }
    let registry: LabelRegistry =
        serde_yaml::from_str(&text).map_err(|e| LabelError::yaml(path, e))?;
    info!("loaded {} labels from {}", registry.len(), path.display());
    Ok(registry)
}

pub fn save_registry(registry: &LabelRegistry, path: &Path) -> LabelResult<()> {
    let text = serde_yaml::to_string(registry).map_err(|e| LabelError::yaml(path, e))?;
    fs::write(path, text).map_err(|e| LabelError::io(path, e))
}
