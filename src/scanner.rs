use crate::api::MediaKind;
use crate::engine::FolderTask;
use crate::ledger::ProcessedLedger;
use std::fs;
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// Build the work queue: every immediate subdirectory of every root that is
/// not already in the ledger.
///
/// Roots are visited in their configured order; within a root, entries keep
/// whatever order the filesystem listing yields. Roots that do not exist
/// (or are not directories) are skipped silently, not an error. No
/// recursion below one level.
pub fn scan_roots(roots: &[impl AsRef<Path>], ledger: &ProcessedLedger) -> Vec<FolderTask> {
    let mut tasks = Vec::new();

    for root in roots {
        let root = root.as_ref();

        if !root.is_dir() {
            debug!(root = ?root, "Root missing or not a directory, skipping");
            continue;
        }

        let kind = MediaKind::from_root_path(root);
        debug!(root = ?root, kind = kind.description(), "Scanning root");

        let read_dir = match fs::read_dir(root) {
            Ok(rd) => rd,
            Err(e) => {
                warn!(root = ?root, error = %e, "Failed to read root, skipping");
                continue;
            }
        };

        for entry in read_dir {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(root = ?root, error = %e, "Failed to read entry, skipping");
                    continue;
                }
            };

            let path = entry.path();

            if !path.is_dir() {
                trace!(path = ?path, "Skipping non-directory");
                continue;
            }

            if ledger.contains(&path) {
                trace!(path = ?path, "Already processed, excluding");
                continue;
            }

            info!(path = ?path, "Adding folder for processing");
            tasks.push(FolderTask::new(path, kind));
        }
    }

    debug!(count = tasks.len(), "Scan complete");

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn empty_ledger(dir: &Path) -> ProcessedLedger {
        ProcessedLedger::open(&dir.join("ledger.log")).unwrap()
    }

    #[test]
    fn test_scan_empty_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("movies");
        fs::create_dir(&root).unwrap();

        let ledger = empty_ledger(dir.path());
        let tasks = scan_roots(&[&root], &ledger);

        assert!(tasks.is_empty());
    }

    #[test]
    fn test_scan_finds_subdirectories_only() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("movies");
        fs::create_dir(&root).unwrap();
        fs::create_dir(root.join("Heat")).unwrap();
        fs::write(root.join("notes.txt"), "not a folder").unwrap();

        let ledger = empty_ledger(dir.path());
        let tasks = scan_roots(&[&root], &ledger);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].path, root.join("Heat"));
    }

    #[test]
    fn test_missing_root_skipped_silently() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("movies");
        fs::create_dir(&existing).unwrap();
        fs::create_dir(existing.join("Heat")).unwrap();

        let ledger = empty_ledger(dir.path());
        let roots = [PathBuf::from("/nonexistent/root"), existing.clone()];
        let tasks = scan_roots(&roots, &ledger);

        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_no_recursion_below_one_level() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("movies");
        fs::create_dir_all(root.join("Heat").join("Extras")).unwrap();

        let ledger = empty_ledger(dir.path());
        let tasks = scan_roots(&[&root], &ledger);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].path, root.join("Heat"));
    }

    #[test]
    fn test_ledger_paths_excluded() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("movies");
        fs::create_dir(&root).unwrap();
        for name in ["a", "b", "c", "d"] {
            fs::create_dir(root.join(name)).unwrap();
        }

        let mut ledger = empty_ledger(dir.path());
        ledger.append(&root.join("b")).unwrap();
        ledger.append(&root.join("d")).unwrap();

        let tasks = scan_roots(&[&root], &ledger);

        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.path != root.join("b")));
        assert!(tasks.iter().all(|t| t.path != root.join("d")));
    }

    #[test]
    fn test_exclusion_preserves_relative_order() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("movies");
        fs::create_dir(&root).unwrap();
        for i in 0..10 {
            fs::create_dir(root.join(format!("film-{}", i))).unwrap();
        }

        // Learn the filesystem's listing order from a full scan, then
        // exclude three and check the remainder keeps its relative order.
        let ledger = empty_ledger(dir.path());
        let full: Vec<PathBuf> = scan_roots(&[&root], &ledger)
            .into_iter()
            .map(|t| t.path)
            .collect();
        assert_eq!(full.len(), 10);

        let mut ledger = ProcessedLedger::open(&dir.path().join("ledger2.log")).unwrap();
        ledger.append(&full[1]).unwrap();
        ledger.append(&full[4]).unwrap();
        ledger.append(&full[8]).unwrap();

        let remaining: Vec<PathBuf> = scan_roots(&[&root], &ledger)
            .into_iter()
            .map(|t| t.path)
            .collect();

        let expected: Vec<PathBuf> = full
            .iter()
            .filter(|p| !ledger.contains(p))
            .cloned()
            .collect();

        assert_eq!(remaining.len(), 7);
        assert_eq!(remaining, expected);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("shows");
        fs::create_dir(&root).unwrap();
        for name in ["x", "y", "z"] {
            fs::create_dir(root.join(name)).unwrap();
        }

        let ledger = empty_ledger(dir.path());
        let first: Vec<PathBuf> = scan_roots(&[&root], &ledger)
            .into_iter()
            .map(|t| t.path)
            .collect();
        let second: Vec<PathBuf> = scan_roots(&[&root], &ledger)
            .into_iter()
            .map(|t| t.path)
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_roots_visited_in_configured_order() {
        let dir = tempdir().unwrap();
        let shows = dir.path().join("shows");
        let movies = dir.path().join("movies");
        fs::create_dir(&shows).unwrap();
        fs::create_dir(&movies).unwrap();
        fs::create_dir(shows.join("Severance")).unwrap();
        fs::create_dir(movies.join("Heat")).unwrap();

        let ledger = empty_ledger(dir.path());
        let tasks = scan_roots(&[&shows, &movies], &ledger);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].path, shows.join("Severance"));
        assert_eq!(tasks[1].path, movies.join("Heat"));
    }

    #[test]
    fn test_kind_hint_derived_from_root() {
        let dir = tempdir().unwrap();
        let shows = dir.path().join("shows");
        let movies = dir.path().join("movies");
        fs::create_dir(&shows).unwrap();
        fs::create_dir(&movies).unwrap();
        fs::create_dir(shows.join("Severance")).unwrap();
        fs::create_dir(movies.join("Heat")).unwrap();

        let ledger = empty_ledger(dir.path());
        let tasks = scan_roots(&[&shows, &movies], &ledger);

        assert_eq!(tasks[0].kind, MediaKind::Series);
        assert_eq!(tasks[1].kind, MediaKind::Film);
    }
}
