use crate::api::{Candidate, MediaKind};
use crate::ledger::LedgerError;
use crate::rename::RenameError;
use std::path::PathBuf;
use thiserror::Error;

/// Lifecycle of one folder awaiting resolution.
///
/// `Pending -> Searching -> AwaitingSelection -> {Committed | Skipped}`.
/// `AwaitingSelection` may loop back to `Searching` via a manual re-query.
/// A task reaches a terminal state at most once and is never requeued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Searching,
    AwaitingSelection,
    Committed,
    Skipped,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Committed | TaskState::Skipped)
    }
}

/// One directory awaiting resolution.
#[derive(Debug, Clone)]
pub struct FolderTask {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub state: TaskState,
}

impl FolderTask {
    pub fn new(path: PathBuf, kind: MediaKind) -> Self {
        Self {
            path,
            kind,
            state: TaskState::Pending,
        }
    }

    /// Base name of the folder, used as the initial search query.
    pub fn folder_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Operator-facing command set consumed by the workflow engine.
///
/// The presentation layer is a pure adapter: it translates user gestures
/// into these commands and renders the returned [`EngineView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Select(u64),
    MarkProcessed,
    Skip,
    ManualSearch(String),
}

/// Snapshot of engine state returned by every command, rendered by the
/// presentation layer.
#[derive(Debug, Clone)]
pub enum EngineView {
    /// Candidates are in, waiting for the operator to pick one.
    AwaitingSelection {
        folder: String,
        kind: MediaKind,
        candidates: Vec<Candidate>,
    },
    /// The query returned nothing (or failed); the operator decides between
    /// a manual re-search and a skip.
    NoMatches { folder: String, kind: MediaKind },
    /// Queue exhausted; the batch is complete.
    Finished,
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// Rename failed; the task stays in AwaitingSelection for retry or skip.
    #[error(transparent)]
    Rename(#[from] RenameError),

    /// Ledger write failed; fatal, resumption can no longer be trusted.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("No candidate with id {0} in the current list")]
    UnknownCandidate(u64),

    #[error("Command not valid in the current state: {0}")]
    InvalidCommand(&'static str),
}

impl EngineError {
    /// Whether this error must abort the whole run rather than be routed to
    /// a per-task operator decision.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Ledger(_))
    }
}
