//! Per-run log file.
//!
//! Besides the `log` facade (routed to stderr by the binaries), each run
//! writes a small plain-text trace next to the book sources so that a
//! chapter's last run can be inspected after the fact.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use indexmap::IndexMap;

pub const FALLBACK_LOG_NAME: &str = "book-filter.log";

enum Sink {
    File(BufWriter<File>),
    Memory(Vec<u8>),
    Discard,
}

pub struct LogSink {
    sink: Sink,
    path: Option<PathBuf>,
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.sink {
            Sink::File(_) => "file",
            Sink::Memory(_) => "memory",
            Sink::Discard => "discard",
        };
        f.debug_struct("LogSink")
            .field("kind", &kind)
            .field("path", &self.path)
            .finish()
    }
}

/// Log file for a document: `LOGDIR/<basename>.log`. A missing `logdir`
/// means the current directory. Documents without a file name always log to
/// the fallback name in the current directory.
pub fn log_file_path(logdir: &Path, filename: &str) -> PathBuf {
    if filename.is_empty() {
        return PathBuf::from(FALLBACK_LOG_NAME);
    }
    let dir = if logdir.is_dir() {
        logdir.to_path_buf()
    } else {
        PathBuf::new()
    };
    let base = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());
    dir.join(format!("{}.log", base))
}

impl LogSink {
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = File::create(&path)?;
        Ok(Self {
            sink: Sink::File(BufWriter::new(file)),
            path: Some(path),
        })
    }

    pub fn memory() -> Self {
        Self {
            sink: Sink::Memory(Vec::new()),
            path: None,
        }
    }

    pub fn discard() -> Self {
        Self {
            sink: Sink::Discard,
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run header: timestamp, command line, metadata and target.
    pub fn write_header(
        &mut self,
        args: &[String],
        meta: &IndexMap<String, String>,
        target: &str,
    ) -> io::Result<()> {
        writeln!(self, "Created at {}", Local::now().format("%m/%d/%Y %H:%M:%S"))?;
        writeln!(self, "LOG: argv:{:?}", args)?;
        writeln!(self, "Metadata:")?;
        for (key, value) in meta {
            writeln!(self, "  {}: {}", key, value)?;
        }
        writeln!(self, "{}", target)
    }

    /// Append one line; failures are reported through `log` only.
    pub fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self, "{}", text) {
            log::warn!("could not write to run log: {}", e);
        }
    }

    /// Contents written so far, for in-memory sinks.
    pub fn contents(&self) -> Option<String> {
        match &self.sink {
            Sink::Memory(buf) => Some(String::from_utf8_lossy(buf).into_owned()),
            _ => None,
        }
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.sink {
            Sink::File(file) => file.write(buf),
            Sink::Memory(mem) => mem.write(buf),
            Sink::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::File(file) => file.flush(),
            _ => Ok(()),
        }
    }
}
