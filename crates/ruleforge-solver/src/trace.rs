//! Progress trace of a search.
//!
//! A [`TraceSink`] receives a [`TraceRecord`] on every improvement of the
//! best objective, optionally every few popped nodes, and once at the end.
//! File sinks write one JSON object per line.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ruleforge_core::Result;
use serde::Serialize;

/// Why a record was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Improvement,
    Periodic,
    Summary,
}

/// Snapshot of the search at one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    pub kind: TraceKind,
    pub elapsed_secs: f64,
    pub num_nodes: usize,
    pub num_evaluated: u64,
    pub objective: f64,
    pub queue_len: usize,
    /// Queued node count per prefix length, when size tracking is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_lengths: Option<Vec<usize>>,
}

/// JSON-lines trace file.
///
/// Write errors do not interrupt the search; the first one is kept and
/// reported by [`TraceSink::finish`].
pub struct FileTrace {
    path: PathBuf,
    writer: BufWriter<File>,
    error: Option<io::Error>,
}

impl FileTrace {
    fn write(&mut self, record: &TraceRecord) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.writer, record)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.writer));
        if let Err(e) = result {
            self.error = Some(e);
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Destination for trace records.
#[derive(Default)]
pub enum TraceSink {
    #[default]
    None,
    File(FileTrace),
    Callback(Box<dyn FnMut(&TraceRecord)>),
}

impl TraceSink {
    /// Creates (or truncates) a JSON-lines trace file.
    ///
    /// # Errors
    ///
    /// Returns [`RuleForgeError::Io`](ruleforge_core::RuleForgeError::Io)
    /// if the file cannot be created.
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(TraceSink::File(FileTrace {
            path,
            writer: BufWriter::new(file),
            error: None,
        }))
    }

    /// Calls `f` with every record.
    pub fn callback(f: impl FnMut(&TraceRecord) + 'static) -> Self {
        TraceSink::Callback(Box::new(f))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TraceSink::None)
    }

    /// Delivers one record.
    pub fn record(&mut self, record: &TraceRecord) {
        match self {
            TraceSink::None => {}
            TraceSink::File(file) => file.write(record),
            TraceSink::Callback(f) => f(record),
        }
    }

    /// Flushes buffered output and returns the first write error, if any.
    pub fn finish(&mut self) -> io::Result<()> {
        match self {
            TraceSink::File(file) => {
                if let Some(e) = file.error.take() {
                    return Err(e);
                }
                file.writer.flush()
            }
            TraceSink::None | TraceSink::Callback(_) => Ok(()),
        }
    }
}

impl fmt::Debug for TraceSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceSink::None => write!(f, "TraceSink::None"),
            TraceSink::File(file) => write!(f, "TraceSink::File({})", file.path.display()),
            TraceSink::Callback(_) => write!(f, "TraceSink::Callback(..)"),
        }
    }
}
