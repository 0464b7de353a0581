//! Run configuration read from the document metadata.

use std::path::{Path, PathBuf};

use bookfilter_labels::DEFAULT_REGISTRY_PATH;
use indexmap::IndexMap;

pub const DEFAULT_SOURCE_DIR: &str = "content/";
pub const DEFAULT_CHAPTER: &str = "99";
pub const DEFAULT_LOG_DIR: &str = "log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Identity of the current document, without extension.
    pub filename: String,
    pub source_dir: PathBuf,
    pub chapter: String,
    pub bibfile: Option<String>,
    pub log_dir: PathBuf,
    pub auxfile: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            filename: String::new(),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            chapter: DEFAULT_CHAPTER.to_string(),
            bibfile: None,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            auxfile: PathBuf::from(DEFAULT_REGISTRY_PATH),
        }
    }
}

impl RunConfig {
    /// Recognized keys: `filename`, `sourcedir`, `chapternum`, `bibfile`,
    /// `logdir`, `auxfile`. Unknown keys are ignored.
    pub fn from_meta(meta: &IndexMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_meta(meta);
        config
    }

    pub fn apply_meta(&mut self, meta: &IndexMap<String, String>) {
        for (key, value) in meta {
            match key.as_str() {
                "filename" => self.filename = value.clone(),
                "sourcedir" => self.source_dir = PathBuf::from(value),
                "chapternum" => self.chapter = value.clone(),
                "bibfile" if !value.is_empty() => self.bibfile = Some(value.clone()),
                "logdir" => self.log_dir = PathBuf::from(value),
                "auxfile" => self.auxfile = PathBuf::from(value),
                _ => {}
            }
        }
    }

    /// Bibliography path, resolved against the source directory.
    pub fn bib_path(&self) -> Option<PathBuf> {
        self.bibfile
            .as_deref()
            .map(|name| self.source_dir.join(Path::new(name)))
    }
}
