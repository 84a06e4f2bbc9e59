use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    error::{SearchError, SearchResult},
    models::{MovieRecord, SearchResultPage},
};

/// Handle for one issued search
///
/// Only the ticket with the most recent token may write results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: u64,
    pub query: String,
}

/// What happened when a completed search was handed back to the session
#[derive(Debug)]
pub enum Completion {
    /// Results replaced the session's list
    Applied { results: usize },
    /// The search failed; results were cleared
    Failed(SearchError),
    /// A newer search was issued or the session ended first
    Stale,
}

/// Transient state for an active search interaction
#[derive(Debug, Default)]
pub struct SearchSession {
    is_active: bool,
    results: Vec<MovieRecord>,
    latest_token: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn results(&self) -> &[MovieRecord] {
        &self.results
    }

    pub fn result_at(&self, index: usize) -> Option<&MovieRecord> {
        self.results.get(index)
    }

    /// Starts a search, superseding any search still in flight
    ///
    /// Results from the previous query are cleared right away so the list
    /// never shows rows for a query the user has moved on from.
    pub fn begin(&mut self, query: &str) -> SearchTicket {
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.is_active = true;
        self.results.clear();

        tracing::debug!(token, query = %query, "Search session started");

        SearchTicket {
            token,
            query: query.to_string(),
        }
    }

    /// Applies the outcome of the search identified by `ticket`
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        outcome: SearchResult<SearchResultPage>,
    ) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!(
                token = ticket.token,
                latest = self.latest_token.load(Ordering::SeqCst),
                query = %ticket.query,
                "Discarding stale search response"
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(page) => {
                self.results = page.results;
                Completion::Applied {
                    results: self.results.len(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %ticket.query, "Search failed");
                self.results.clear();
                Completion::Failed(e)
            }
        }
    }

    /// Dismisses the search UI without accepting a result
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Closes the session after a result was accepted or the UI was dismissed
    pub fn end(&mut self) {
        self.reset();
    }

    fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.is_active && ticket.token == self.latest_token.load(Ordering::SeqCst)
    }

    // Bumping the token makes any in-flight response stale
    fn reset(&mut self) {
        self.latest_token.fetch_add(1, Ordering::SeqCst);
        self.is_active = false;
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(titles: &[(i64, &str)]) -> SearchResultPage {
        SearchResultPage {
            page: 1,
            results: titles
                .iter()
                .map(|(id, title)| MovieRecord::new(*id, *title))
                .collect(),
            total_pages: 1,
            total_results: titles.len() as u32,
        }
    }

    #[test]
    fn test_begin_activates_session() {
        let mut session = SearchSession::new();
        assert!(!session.is_active());

        let ticket = session.begin("Inception");
        assert!(session.is_active());
        assert_eq!(ticket.query, "Inception");
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_complete_replaces_results() {
        let mut session = SearchSession::new();
        let ticket = session.begin("Inception");

        let completion = session.complete(&ticket, Ok(page(&[(27205, "Inception")])));

        assert!(matches!(completion, Completion::Applied { results: 1 }));
        assert_eq!(session.results()[0].id, 27205);
    }

    #[test]
    fn test_late_response_for_older_query_is_discarded() {
        let mut session = SearchSession::new();
        let cat = session.begin("Cat");
        let dog = session.begin("Dog");

        let dog_completion = session.complete(&dog, Ok(page(&[(2, "Dog Day Afternoon")])));
        let cat_completion = session.complete(&cat, Ok(page(&[(1, "Cat People")])));

        assert!(matches!(dog_completion, Completion::Applied { .. }));
        assert!(matches!(cat_completion, Completion::Stale));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].title, "Dog Day Afternoon");
    }

    #[test]
    fn test_failure_leaves_results_empty() {
        let mut session = SearchSession::new();
        let ticket = session.begin("Heat");

        let completion = session.complete(
            &ticket,
            Err(SearchError::Server {
                status: 500,
                response: "oops".to_string(),
            }),
        );

        assert!(matches!(
            completion,
            Completion::Failed(SearchError::Server { status: 500, .. })
        ));
        assert!(session.results().is_empty());
        assert!(session.is_active());
    }

    #[test]
    fn test_cancel_clears_and_invalidates_in_flight_search() {
        let mut session = SearchSession::new();
        let ticket = session.begin("Alien");
        session.cancel();

        assert!(!session.is_active());
        let completion = session.complete(&ticket, Ok(page(&[(348, "Alien")])));
        assert!(matches!(completion, Completion::Stale));
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_end_resets_session() {
        let mut session = SearchSession::new();
        let ticket = session.begin("Up");
        session.complete(&ticket, Ok(page(&[(14160, "Up")])));

        session.end();

        assert!(!session.is_active());
        assert!(session.results().is_empty());
        assert!(session.result_at(0).is_none());
    }
}
