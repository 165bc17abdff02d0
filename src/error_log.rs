//! Diagnostic sink for anomalies that should not interrupt the report.
//!
//! Entries go to an injected [`ErrorLog`]; the command line uses
//! [`FileErrorLog`], which appends to `error.log` and closes the file after
//! every entry.

use chrono::Local;
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "error_log";

pub const DEFAULT_ERROR_LOG: &str = "error.log";

pub trait ErrorLog {
    fn record(&self, event: &str);
}

#[derive(Debug, Clone)]
pub struct FileErrorLog {
    path: PathBuf,
}

impl FileErrorLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl Default for FileErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG)
    }
}

impl ErrorLog for FileErrorLog {
    fn record(&self, event: &str) {
        let line = format_entry(event);
        if let Err(e) = self.append(&line) {
            log::warn!(target: LOG_TARGET, "Could not write to '{}': {e}", self.path.display());
        }
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryErrorLog {
    entries: RefCell<Vec<String>>,
}

impl MemoryErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ErrorLog for MemoryErrorLog {
    fn record(&self, event: &str) {
        self.entries.borrow_mut().push(event.to_string());
    }
}

fn format_entry(event: &str) -> String {
    let event = event.trim_end_matches('\n');
    format!("{}: \t {}\n", Local::now().format("%Y-%m-%d %H:%M:%S%.6f"), event)
}
