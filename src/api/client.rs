use super::types::{ApiConfig, ApiError, Candidate, MediaKind};
use super::MetadataClient;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Raw search row as returned by TMDB.
///
/// TV results carry `name`/`first_air_date`, movie results carry
/// `title`/`release_date`; everything is optional so a sparse row never
/// fails deserialization.
#[derive(Debug, Deserialize)]
struct SearchRow {
    id: u64,
    name: Option<String>,
    title: Option<String>,
    first_air_date: Option<String>,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchRow>,
}

impl SearchRow {
    fn into_candidate(self) -> Candidate {
        let title = self
            .name
            .or(self.title)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown Title".to_string());

        let release_date = self
            .first_air_date
            .or(self.release_date)
            .filter(|d| !d.is_empty());

        Candidate {
            id: self.id,
            title,
            release_date,
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
        }
    }
}

/// TMDB HTTP API client
pub struct TmdbClient {
    client: Client,
    config: ApiConfig,
}

impl TmdbClient {
    /// Create a new TMDB client with the given configuration
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        if !config.is_configured() {
            return Err(ApiError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .user_agent(concat!("tmdb2folder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Search TMDB for candidates matching a free-text query.
    pub fn search(&self, text: &str, kind: MediaKind) -> Result<Vec<Candidate>, ApiError> {
        let url = format!("{}/search/{}", API_BASE_URL, kind.search_path());

        debug!(url = %url, query = %text, "Searching TMDB");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str()), ("query", text)])
            .send()?;

        let status = response.status();
        debug!(status = %status, "TMDB response");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::InvalidKey);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited);
        }
        if !status.is_success() {
            return Err(ApiError::ServerError(format!("HTTP {}", status)));
        }

        let body: SearchResponse = response
            .json()
            .map_err(|e| ApiError::ParseError(e.to_string()))?;

        let candidates: Vec<Candidate> = body
            .results
            .into_iter()
            .map(SearchRow::into_candidate)
            .collect();

        info!(
            query = %text,
            kind = kind.description(),
            count = candidates.len(),
            "Search complete"
        );

        Ok(candidates)
    }
}

impl MetadataClient for TmdbClient {
    /// Query TMDB, downgrading every failure to an empty candidate list.
    ///
    /// The workflow engine treats "no results" uniformly regardless of
    /// cause; transport and provider errors are logged here and surface to
    /// the operator as the no-match decision point.
    fn query(&self, text: &str, kind: MediaKind) -> Vec<Candidate> {
        match self.search(text, kind) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(query = %text, error = %e, "TMDB query failed, treating as no results");
                Vec::new()
            }
        }
    }
}
