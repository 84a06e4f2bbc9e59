use reqwest::StatusCode;

/// Errors raised on the catalog search path
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// Network failure, connection refused or timeout
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Catalog answered with a non-2xx status
    #[error("Catalog returned status {status}: {response}")]
    Server { status: u16, response: String },

    /// Body was not a valid search result page
    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),
}

impl SearchError {
    /// True when the catalog rejected the credential or the quota is exhausted.
    ///
    /// These must be shown to the user as a configuration problem, never as
    /// an empty result list.
    pub fn is_credential_problem(&self) -> bool {
        matches!(
            self,
            SearchError::Server { status, .. }
                if *status == StatusCode::UNAUTHORIZED.as_u16()
                    || *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
        )
    }
}

/// Errors raised by the watchlist store
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("No movie with id {0} in the watchlist")]
    NotFound(i64),

    /// Persisted list exists but could not be parsed
    #[error("Persisted watchlist is corrupt: {0}")]
    PersistenceDecode(#[source] serde_json::Error),

    #[error("Failed to read persisted watchlist: {0}")]
    PersistenceRead(#[source] std::io::Error),

    /// The medium rejected the write; in-memory state is still current
    #[error("Failed to persist watchlist: {0}")]
    PersistenceWrite(#[source] std::io::Error),
}

/// Application-level errors surfaced to the presentation layer
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Short message suitable for a transient notice in the UI
    pub fn user_message(&self) -> String {
        match self {
            AppError::Search(e) if e.is_credential_problem() => {
                format!("{} (check TMDB_API_KEY or try again later)", e)
            }
            other => other.to_string(),
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
pub type StoreResult<T> = Result<T, StoreError>;
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_problem_statuses() {
        let unauthorized = SearchError::Server {
            status: 401,
            response: "Invalid API key".to_string(),
        };
        let rate_limited = SearchError::Server {
            status: 429,
            response: String::new(),
        };
        let unavailable = SearchError::Server {
            status: 503,
            response: String::new(),
        };

        assert!(unauthorized.is_credential_problem());
        assert!(rate_limited.is_credential_problem());
        assert!(!unavailable.is_credential_problem());
        assert!(!SearchError::InvalidRequest("x".to_string()).is_credential_problem());
    }

    #[test]
    fn test_user_message_mentions_api_key() {
        let err = AppError::from(SearchError::Server {
            status: 401,
            response: "denied".to_string(),
        });
        assert!(err.user_message().contains("TMDB_API_KEY"));

        let err = AppError::from(StoreError::NotFound(42));
        assert_eq!(err.user_message(), "No movie with id 42 in the watchlist");
    }
}
