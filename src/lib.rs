pub mod api;
pub mod cli;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod rename;
pub mod scanner;
pub mod ui;

pub use api::{ApiConfig, ApiError, Candidate, MediaKind, MetadataClient, TmdbClient};
pub use engine::{Command, EngineError, EngineView, FolderTask, TaskState, WorkflowEngine};
pub use error::{AppError, ExitCode};
pub use ledger::{LedgerError, ProcessedLedger};
pub use rename::{build_folder_name, display_year, rename_folder, sanitize_segment, RenameError};
pub use scanner::scan_roots;
