use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key (v3 auth)
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Directory holding the persisted watchlist
    #[serde(default = "default_watchlist_dir")]
    pub watchlist_dir: PathBuf,

    /// Timeout applied to each catalog search, in seconds
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_watchlist_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("movie-watchlist"))
        .unwrap_or_else(|| PathBuf::from(".movie-watchlist"))
}

fn default_search_timeout_secs() -> u64 {
    15
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Not validated here: callers apply their overrides first, then call
    /// [`Config::validate`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Overrides from the command line; `None` keeps the environment value
    pub fn with_overrides(
        mut self,
        watchlist_dir: Option<PathBuf>,
        search_timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(dir) = watchlist_dir {
            self.watchlist_dir = dir;
        }
        if let Some(timeout) = search_timeout_secs {
            self.search_timeout_secs = timeout;
        }
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb_api_key.trim().is_empty() {
            anyhow::bail!("TMDB_API_KEY must not be empty");
        }
        if self.search_timeout_secs == 0 {
            anyhow::bail!("SEARCH_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}
