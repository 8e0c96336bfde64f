use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the processed-folder ledger.
///
/// Ledger failures are fatal to the run: correctness of future resumption
/// depends on every append reaching disk.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to open ledger {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to append to ledger {path}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Append-only durable log of folder paths already finalized.
///
/// Plain text, one absolute path per line, never rewritten or reordered.
/// The full file is loaded into an in-memory exclusion set at startup;
/// within a run this process is the only writer.
pub struct ProcessedLedger {
    path: PathBuf,
    file: File,
    seen: HashSet<PathBuf>,
}

impl ProcessedLedger {
    /// Open the ledger, creating the file if it does not exist yet.
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(|e| LedgerError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut seen = HashSet::new();
        let reader = BufReader::new(&file);
        for line in reader.lines() {
            let line = line.map_err(|e| LedgerError::Open {
                path: path.to_path_buf(),
                source: e,
            })?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                seen.insert(PathBuf::from(trimmed));
            }
        }

        info!(path = ?path, entries = seen.len(), "Ledger loaded");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            seen,
        })
    }

    /// Whether a folder path has already been finalized.
    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Record a finalized folder path.
    ///
    /// The record is flushed and synced before returning, so a crash
    /// immediately after a successful append never loses it.
    pub fn append(&mut self, path: &Path) -> Result<(), LedgerError> {
        let map_err = |e: std::io::Error| LedgerError::Append {
            path: self.path.clone(),
            source: e,
        };

        writeln!(self.file, "{}", path.display()).map_err(map_err)?;
        self.file.flush().map_err(map_err)?;
        self.file.sync_data().map_err(map_err)?;

        debug!(path = ?path, "Ledger record appended");
        self.seen.insert(path.to_path_buf());

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
