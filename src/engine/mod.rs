mod types;

pub use types::{Command, EngineError, EngineView, FolderTask, TaskState};

use crate::api::{Candidate, MediaKind, MetadataClient};
use crate::ledger::ProcessedLedger;
use crate::rename::{display_year, rename_folder};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// The folder-processing workflow engine.
///
/// Owns the FIFO task queue, drives the per-task state machine, invokes the
/// metadata client and the rename engine, and commits finalized paths to
/// the processed ledger. Strictly sequential: exactly one task is live and
/// at most one query is in flight at any time.
pub struct WorkflowEngine<C: MetadataClient> {
    queue: VecDeque<FolderTask>,
    current: Option<FolderTask>,
    candidates: Vec<Candidate>,
    client: C,
    ledger: ProcessedLedger,
}

impl<C: MetadataClient> WorkflowEngine<C> {
    pub fn new(tasks: Vec<FolderTask>, client: C, ledger: ProcessedLedger) -> Self {
        Self {
            queue: tasks.into(),
            current: None,
            candidates: Vec::new(),
            client,
            ledger,
        }
    }

    /// Dispatch an operator command.
    pub fn apply(&mut self, command: Command) -> Result<EngineView, EngineError> {
        match command {
            Command::Next => self.next(),
            Command::Select(id) => self.select(id),
            Command::MarkProcessed => self.mark_processed(),
            Command::Skip => self.skip(),
            Command::ManualSearch(text) => self.manual_search(&text, None),
        }
    }

    /// Advance to the head of the queue and search for it.
    ///
    /// Returns [`EngineView::Finished`] once the queue is exhausted.
    pub fn next(&mut self) -> Result<EngineView, EngineError> {
        // A finished task is dropped here; tasks are never requeued.
        self.current = None;
        self.candidates.clear();

        let task = match self.queue.pop_front() {
            Some(task) => task,
            None => {
                info!("All folders have been processed");
                return Ok(EngineView::Finished);
            }
        };

        debug!(path = ?task.path, "Task dequeued");
        let query = task.folder_name();
        let kind = task.kind;
        self.current = Some(task);

        self.run_search(&query, kind)
    }

    /// Re-query with operator-supplied text, keeping the current task and
    /// its queue position. The kind hint defaults to the one derived from
    /// the task's root unless overridden.
    pub fn manual_search(
        &mut self,
        text: &str,
        kind: Option<MediaKind>,
    ) -> Result<EngineView, EngineError> {
        let kind = match (&self.current, kind) {
            (None, _) => return Err(EngineError::InvalidCommand("manual search without a task")),
            (Some(_), Some(kind)) => kind,
            (Some(task), None) => task.kind,
        };

        self.run_search(text, kind)
    }

    /// Commit the current task to the chosen candidate: rename the folder,
    /// record the new path in the ledger, and advance.
    ///
    /// A rename failure leaves the task in AwaitingSelection with its
    /// candidate list intact and writes nothing to the ledger; a ledger
    /// failure is fatal.
    pub fn select(&mut self, candidate_id: u64) -> Result<EngineView, EngineError> {
        let task = match &self.current {
            Some(task) if task.state == TaskState::AwaitingSelection => task,
            _ => return Err(EngineError::InvalidCommand("select without candidates")),
        };

        let candidate = self
            .candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .ok_or(EngineError::UnknownCandidate(candidate_id))?;

        let year = display_year(candidate.release_date.as_deref());
        let new_path = rename_folder(&task.path, &candidate.title, &year, candidate.id)?;

        info!(from = ?task.path, to = ?new_path, id = candidate.id, "Folder committed");

        // Rename before append: a crash between the two leaves the folder
        // correctly named but unrecorded, which a later scan cannot
        // double-rename because the original path no longer exists.
        self.ledger.append(&new_path)?;

        if let Some(task) = self.current.as_mut() {
            task.state = TaskState::Committed;
        }
        self.next()
    }

    /// Record the current path as processed without renaming, then advance.
    /// Used when the operator judges the existing name already correct.
    pub fn mark_processed(&mut self) -> Result<EngineView, EngineError> {
        let task = match &mut self.current {
            Some(task) if !task.state.is_terminal() => task,
            _ => return Err(EngineError::InvalidCommand("mark processed without a task")),
        };

        info!(path = ?task.path, "Marked processed without rename");
        let path = task.path.clone();
        self.ledger.append(&path)?;

        if let Some(task) = self.current.as_mut() {
            task.state = TaskState::Committed;
        }
        self.next()
    }

    /// Abandon the current task: no rename, no ledger write, advance.
    pub fn skip(&mut self) -> Result<EngineView, EngineError> {
        let task = match &mut self.current {
            Some(task) if !task.state.is_terminal() => task,
            _ => return Err(EngineError::InvalidCommand("skip without a task")),
        };

        info!(path = ?task.path, "Task skipped");
        task.state = TaskState::Skipped;
        self.next()
    }

    /// Re-render the current decision point without advancing.
    pub fn current_view(&self) -> EngineView {
        match &self.current {
            None => EngineView::Finished,
            Some(task) if task.state == TaskState::AwaitingSelection => {
                EngineView::AwaitingSelection {
                    folder: task.folder_name(),
                    kind: task.kind,
                    candidates: self.candidates.clone(),
                }
            }
            Some(task) => EngineView::NoMatches {
                folder: task.folder_name(),
                kind: task.kind,
            },
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn ledger(&self) -> &ProcessedLedger {
        &self.ledger
    }

    fn run_search(&mut self, query: &str, kind: MediaKind) -> Result<EngineView, EngineError> {
        let (folder, task_kind) = match self.current.as_mut() {
            Some(task) => {
                task.state = TaskState::Searching;
                (task.folder_name(), task.kind)
            }
            None => return Err(EngineError::InvalidCommand("search without a task")),
        };

        debug!(query = %query, kind = kind.description(), "Querying catalog");
        self.candidates = self.client.query(query, kind);

        if self.candidates.is_empty() {
            warn!(folder = %folder, query = %query, "No candidates found");
            Ok(EngineView::NoMatches {
                folder,
                kind: task_kind,
            })
        } else {
            if let Some(task) = self.current.as_mut() {
                task.state = TaskState::AwaitingSelection;
            }
            Ok(EngineView::AwaitingSelection {
                folder,
                kind: task_kind,
                candidates: self.candidates.clone(),
            })
        }
    }
}
