//! Finding log files under the paths given on the command line.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DigestError, DigestResult};

/// `server.log`, `server.log.3`, ...
pub fn is_log_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    if name.ends_with(".log") {
        return true;
    }
    match name.rsplit_once('.') {
        Some((stem, suffix)) => {
            !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) && stem.ends_with(".log")
        }
        None => false,
    }
}

/// Expands directories recursively (files first, then subdirectories, both by
/// name) and keeps log files. Explicitly named files must also look like logs.
pub fn collect_sources<P: AsRef<Path>>(paths: &[P]) -> DigestResult<Vec<PathBuf>> {
    let mut sources = Vec::new();
    for path in paths {
        visit(path.as_ref(), &mut sources)?;
    }
    Ok(sources)
}

fn visit(path: &Path, sources: &mut Vec<PathBuf>) -> DigestResult<()> {
    if path.is_dir() {
        let entries = fs::read_dir(path).map_err(|source| DigestError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry?;
            let child = entry.path();
            if child.is_dir() {
                dirs.push(child);
            } else {
                files.push(child);
            }
        }
        files.sort();
        dirs.sort();
        for file in files.iter().chain(dirs.iter()) {
            visit(file, sources)?;
        }
    } else if path.is_file() {
        if is_log_file(path) {
            sources.push(path.to_path_buf());
        }
    } else {
        log::warn!("neither a folder nor a file: {}", path.display());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Digested,
    /// Zero-length file.
    Empty,
    /// Readable, but not one action or settlement could be decoded.
    NoUsableEvents,
}

impl SourceStatus {
    /// Sources worth deleting during housekeeping.
    pub fn is_prunable(self) -> bool {
        matches!(self, SourceStatus::Empty | SourceStatus::NoUsableEvents)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceStatus::Digested => "digested",
            SourceStatus::Empty => "empty",
            SourceStatus::NoUsableEvents => "no usable events",
        }
    }
}

impl fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-line tallies for one source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub lines: usize,
    pub events: usize,
    pub decoded: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    pub path: PathBuf,
    pub status: SourceStatus,
    pub stats: LineStats,
    pub actions: usize,
    pub settlements: usize,
    pub contributions: usize,
    pub pruned: bool,
}

impl SourceReport {
    pub fn empty(path: &Path) -> SourceReport {
        SourceReport {
            path: path.to_path_buf(),
            status: SourceStatus::Empty,
            stats: LineStats::default(),
            actions: 0,
            settlements: 0,
            contributions: 0,
            pruned: false,
        }
    }
}

pub fn prune(path: &Path) -> DigestResult<()> {
    fs::remove_file(path).map_err(|source| DigestError::PruneFailed {
        path: path.to_path_buf(),
        source,
    })
}
