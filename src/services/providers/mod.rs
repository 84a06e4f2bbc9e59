/// Movie catalog abstraction
///
/// The watchlist core only needs free-text search from a catalog. The trait
/// keeps the HTTP client swappable so sessions and controllers can be driven
/// by a fake catalog in tests or by a different backend later.
use crate::{error::SearchResult, models::SearchResultPage};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Trait for remote movie catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Search the catalog for movies matching `query`
    ///
    /// Returns the first results page in catalog order. One attempt only; the
    /// caller decides whether to retry.
    async fn search(&self, query: &str) -> SearchResult<SearchResultPage>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
