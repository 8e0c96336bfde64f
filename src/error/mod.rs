mod codes;

pub use codes::ExitCode;

use crate::api::ApiError;
use crate::engine::EngineError;
use crate::ledger::LedgerError;
use crate::rename::RenameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("TMDB API error: {0}")]
    Api(#[from] ApiError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Rename(#[from] RenameError),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::Api(_) => ExitCode::ApiError,
            AppError::Ledger(_) => ExitCode::LedgerError,
            AppError::Rename(_) => ExitCode::RenameError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::Api(ApiError::NotConfigured) => {
                "TMDB API key is not configured.\n\n\
                 Set the TMDB_API_KEY environment variable or add it to a .env \
                 file in the working directory. Keys are issued for free at \
                 https://www.themoviedb.org/settings/api."
                    .to_string()
            }

            AppError::Api(err) => {
                format!(
                    "Failed to reach the TMDB API:\n  {}\n\n\
                     This could be due to:\n\
                     - Network connectivity issues\n\
                     - TMDB rate limiting\n\
                     - An invalid or revoked API key\n\n\
                     Try again later or check your internet connection.",
                    err
                )
            }

            AppError::Ledger(err) => {
                format!(
                    "Processed-folder ledger failure:\n  {}\n\n\
                     The run was stopped because resumability can no longer \
                     be guaranteed. Check permissions and free space on the \
                     ledger file, then run again.",
                    err
                )
            }

            AppError::Rename(err) => {
                format!(
                    "Failed to rename directory:\n  {}\n\n\
                     Check file permissions and ensure no files are open.",
                    err
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Ledger(e) => AppError::Ledger(e),
            EngineError::Rename(e) => AppError::Rename(e),
            EngineError::UnknownCandidate(id) => {
                AppError::Other(format!("No candidate with id {}", id))
            }
            EngineError::InvalidCommand(msg) => AppError::Other(msg.to_string()),
        }
    }
}
