use std::path::Path;
use thiserror::Error;

/// Coarse media classification used to scope a TMDB search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Series,
    Film,
}

impl MediaKind {
    /// Derive a kind hint from the root directory a folder was found under.
    ///
    /// A root path mentioning "shows" (case-insensitive) implies Series,
    /// everything else implies Film. This is a best-effort heuristic, not a
    /// classifier; misclassification is expected and manual search is the
    /// correction path.
    pub fn from_root_path(root: &Path) -> Self {
        let lowered = root.to_string_lossy().to_lowercase();
        if lowered.contains("shows") {
            MediaKind::Series
        } else {
            MediaKind::Film
        }
    }

    /// TMDB search endpoint segment for this kind.
    pub fn search_path(&self) -> &'static str {
        match self {
            MediaKind::Series => "tv",
            MediaKind::Film => "movie",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MediaKind::Series => "series",
            MediaKind::Film => "film",
        }
    }
}

/// One TMDB record proposed as a possible identity for a local folder.
///
/// Produced fresh by each search, held only while the operator decides,
/// never persisted.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: String,
    /// Opaque poster reference; carried for presentation layers, unused here.
    pub poster_path: Option<String>,
}

/// API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Errors that can occur when talking to the TMDB API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("API key rejected by TMDB")]
    InvalidKey,

    #[error("Rate limited by TMDB")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("API returned error: {0}")]
    ServerError(String),

    #[error("Client not configured: TMDB_API_KEY must be set")]
    NotConfigured,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::ParseError(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}
