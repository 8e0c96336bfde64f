mod client;
mod types;

pub use client::TmdbClient;
pub use types::{ApiConfig, ApiError, Candidate, MediaKind};

use std::env;

/// Environment variable holding the TMDB API key
pub const ENV_TMDB_API_KEY: &str = "TMDB_API_KEY";

/// The metadata catalog boundary consumed by the workflow engine.
///
/// `query` must never raise: on transport or provider failure, or when the
/// provider reports zero matches, implementations return an empty sequence
/// so the engine treats "no results" uniformly regardless of cause.
pub trait MetadataClient {
    fn query(&self, text: &str, kind: MediaKind) -> Vec<Candidate>;
}

/// Load API configuration from the environment.
///
/// Requires `TMDB_API_KEY`, which can also be supplied via a `.env` file in
/// the working directory.
pub fn config_from_env() -> ApiConfig {
    let api_key = env::var(ENV_TMDB_API_KEY).unwrap_or_default();
    ApiConfig::new(api_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to serialize env var tests (they share global state)
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_config_from_env_default() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::remove_var(ENV_TMDB_API_KEY);

        let config = config_from_env();

        assert!(config.api_key.is_empty());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_config_from_env_with_key() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        env::set_var(ENV_TMDB_API_KEY, "testkey");

        let config = config_from_env();

        assert_eq!(config.api_key, "testkey");
        assert!(config.is_configured());

        env::remove_var(ENV_TMDB_API_KEY);
    }
}
