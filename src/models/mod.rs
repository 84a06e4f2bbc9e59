use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::MovieRecord;

// ============================================================================
// TMDB Search Types
// ============================================================================

/// One page of results from the catalog search endpoint
///
/// Transient: handed to the search session and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultPage {
    pub page: u32,
    /// Catalog order is preserved
    pub results: Vec<MovieRecord>,
    pub total_pages: u32,
    pub total_results: u32,
}
