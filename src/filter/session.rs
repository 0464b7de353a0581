//! Per-run state threaded through every handler.

use std::io::Write;

use bookfilter_labels::{load_registry, LabelRegistry, Resolver};
use indexmap::IndexMap;
use log::{debug, info};

use super::Target;
use crate::bib::Bibliography;
use crate::config::RunConfig;
use crate::utils::{log_file_path, FilterResult, LogSink};

const STRUCTURAL_UNITS: [&str; 6] = [
    "chapter",
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// Heading level to LaTeX sectioning unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingTable {
    units: [&'static str; 6],
}

impl Default for HeadingTable {
    fn default() -> Self {
        Self {
            units: STRUCTURAL_UNITS,
        }
    }
}

impl HeadingTable {
    /// Unit for a 1-based heading level, `None` when unmapped.
    pub fn unit(&self, level: u8) -> Option<&'static str> {
        let idx = usize::from(level).checked_sub(1)?;
        self.units.get(idx).copied()
    }
}

#[derive(Debug)]
pub struct Session {
    pub target: Target,
    pub config: RunConfig,
    pub headings: HeadingTable,
    pub resolver: Resolver,
    /// Label id to the display name of what it labels, filled during the walk.
    pub label_descriptions: IndexMap<String, String>,
    pub bibliography: Bibliography,
    pub log: LogSink,
}

impl Session {
    pub fn new(target: Target, config: RunConfig, registry: LabelRegistry) -> Self {
        let resolver = Resolver::new(registry, config.filename.clone());
        Self {
            target,
            config,
            headings: HeadingTable::default(),
            resolver,
            label_descriptions: IndexMap::new(),
            bibliography: Bibliography::default(),
            log: LogSink::discard(),
        }
    }

    /// Set up a run from its configuration: label registry, bibliography and
    /// log file. Missing registry or bibliography files leave them empty.
    pub fn prepare(
        target: Target,
        config: RunConfig,
        meta: &IndexMap<String, String>,
        args: &[String],
    ) -> FilterResult<Self> {
        let registry = load_registry(&config.auxfile)?;
        let bibliography = match config.bib_path() {
            Some(path) => Bibliography::load(&path)?,
            None => Bibliography::default(),
        };
        let log_path = log_file_path(&config.log_dir, &config.filename);
        let mut log = LogSink::create(&log_path)?;
        log.write_header(args, meta, target.as_str())?;
        info!(
            "{} run for '{}' ({} labels, log {})",
            target,
            config.filename,
            registry.len(),
            log_path.display()
        );

        Ok(Self::new(target, config, registry)
            .with_bibliography(bibliography)
            .with_log(log))
    }

    pub fn with_log(mut self, log: LogSink) -> Self {
        self.log = log;
        self
    }

    pub fn with_bibliography(mut self, bibliography: Bibliography) -> Self {
        self.bibliography = bibliography;
        self
    }

    pub fn is_latex(&self) -> bool {
        self.target == Target::Latex
    }

    pub fn describe(&mut self, label: impl Into<String>, description: impl Into<String>) {
        let label = label.into();
        let description = description.into();
        debug!("label {} describes a {}", label, description);
        self.label_descriptions.insert(label, description);
    }

    /// Flush the run log. The session is consumed; dropping it also releases
    /// the log file.
    pub fn finish(mut self) -> FilterResult<IndexMap<String, String>> {
        self.log.flush()?;
        Ok(self.label_descriptions)
    }
}
