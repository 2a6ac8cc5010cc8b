//! The reference list: ordered, deduplicated artist names.
//!
//! The resource is a flat file with one name per line. It is read through the
//! `csv` reader so that lines carrying several comma-separated cells are
//! flattened in row order, the same way the original resource was consumed.
//! Loading happens once; afterwards the list is read-only.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info};

/// Errors from loading the reference list.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference list not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read reference list {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed reference list: {0}")]
    Malformed(#[from] csv::Error),
}

/// Ordered sequence of unique names. Earlier entries rank higher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceList {
    names: Vec<String>,
}

impl ReferenceList {
    /// Build from in-memory names, trimming, skipping blanks, and keeping the
    /// first occurrence of each value.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut dropped = 0usize;
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if seen.insert(name.to_string()) {
                kept.push(name.to_string());
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!(dropped, "dropped duplicate reference entries");
        }
        Self { names: kept }
    }

    /// Parse a reference resource from any reader.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, ReferenceError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut cells = Vec::new();
        for record in csv.records() {
            let record = record?;
            cells.extend(record.iter().map(str::to_string));
        }
        Ok(Self::from_names(cells))
    }

    /// Load the reference resource from disk.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let file = std::fs::File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReferenceError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ReferenceError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let list = Self::from_reader(file)?;
        info!(path = %path.display(), entries = list.len(), "reference list loaded");
        Ok(list)
    }

    /// Load the reference resource, degrading to an empty list on failure.
    ///
    /// An empty list makes every roll return the empty string, so the host
    /// keeps running with a logged error instead of crashing.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(list) => list,
            Err(e) => {
                error!(error = %e, "reference list unavailable; continuing with an empty list");
                Self::default()
            }
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
