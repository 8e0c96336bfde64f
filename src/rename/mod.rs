mod name_builder;

pub use name_builder::{build_folder_name, display_year, sanitize_segment};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while renaming a folder.
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Destination already exists: {0}")]
    Conflict(PathBuf),

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    Io {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
}

/// Rename a folder to `TITLE (YEAR) [id-EXTERNALID]` within its parent.
///
/// The sanitized segment is joined onto the original parent directory and
/// applied as a single atomic move. Fails with [`RenameError::Conflict`]
/// when the destination already exists and [`RenameError::Io`] on any other
/// filesystem failure; the source folder is untouched in both cases.
pub fn rename_folder(
    original: &Path,
    title: &str,
    year: &str,
    external_id: u64,
) -> Result<PathBuf, RenameError> {
    let segment = build_folder_name(title, year, external_id);

    let destination = original
        .parent()
        .map(|p| p.join(&segment))
        .unwrap_or_else(|| PathBuf::from(&segment));

    if destination == original {
        // Folder already carries the canonical name; nothing to move.
        return Ok(destination);
    }

    if destination.exists() {
        return Err(RenameError::Conflict(destination));
    }

    fs::rename(original, &destination).map_err(|e| RenameError::Io {
        from: original.display().to_string(),
        to: destination.display().to_string(),
        source: e,
    })?;

    info!(from = ?original, to = ?destination, "Folder renamed");

    Ok(destination)
}
