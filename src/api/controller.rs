use std::sync::Arc;

use crate::{
    api::ViewUpdate,
    db::{KeyValueStore, WatchlistStore},
    error::{AppError, SearchResult, StoreError},
    models::{MovieRecord, SearchResultPage},
    services::{CatalogSearch, Completion, SearchSession, SearchTicket},
};

/// A search issued by the controller but not yet applied
///
/// May be driven on any task; hand the resulting [`SearchCompletion`] back
/// to [`WatchlistController::finish_search`] on the owning context.
pub struct PendingSearch {
    ticket: SearchTicket,
    catalog: Arc<dyn CatalogSearch>,
}

impl PendingSearch {
    pub fn ticket(&self) -> &SearchTicket {
        &self.ticket
    }

    pub async fn run(self) -> SearchCompletion {
        let outcome = self.catalog.search(&self.ticket.query).await;
        SearchCompletion {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// Result of a [`PendingSearch`], not yet applied to the session
pub struct SearchCompletion {
    pub ticket: SearchTicket,
    pub outcome: SearchResult<SearchResultPage>,
}

/// Entry point for any rendering layer
///
/// Owns the watchlist and the search session. Each callback returns the
/// list to display plus any error worth showing.
pub struct WatchlistController {
    catalog: Arc<dyn CatalogSearch>,
    store: WatchlistStore,
    session: SearchSession,
}

impl WatchlistController {
    pub fn new(catalog: Arc<dyn CatalogSearch>, store: WatchlistStore) -> Self {
        Self {
            catalog,
            store,
            session: SearchSession::new(),
        }
    }

    /// Builds a controller over `backend` and loads the persisted watchlist
    ///
    /// A load problem is returned for display; the controller is usable
    /// either way, starting from an empty list.
    pub fn open(
        catalog: Arc<dyn CatalogSearch>,
        backend: Arc<dyn KeyValueStore>,
    ) -> (Self, Option<StoreError>) {
        let mut store = WatchlistStore::new(backend);
        let load_error = store.load().err();
        (Self::new(catalog, store), load_error)
    }

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.store
    }

    pub fn is_searching(&self) -> bool {
        self.session.is_active()
    }

    /// Search results while searching, the watchlist otherwise
    pub fn display_list(&self) -> &[MovieRecord] {
        if self.session.is_active() {
            self.session.results()
        } else {
            self.store.movies()
        }
    }

    pub fn view(&self) -> ViewUpdate {
        self.view_with(None)
    }

    /// Starts a search for `query`; blank queries are ignored
    pub fn start_search(&mut self, query: &str) -> Option<PendingSearch> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let ticket = self.session.begin(query);
        tracing::info!(
            token = ticket.token,
            query = %query,
            provider = self.catalog.name(),
            "Search submitted"
        );

        Some(PendingSearch {
            ticket,
            catalog: Arc::clone(&self.catalog),
        })
    }

    /// Applies a finished search; stale completions leave the view unchanged
    pub fn finish_search(&mut self, completion: SearchCompletion) -> ViewUpdate {
        match self.session.complete(&completion.ticket, completion.outcome) {
            Completion::Applied { .. } | Completion::Stale => self.view(),
            Completion::Failed(e) => self.view_with(Some(e.into())),
        }
    }

    /// Runs a search to completion on the current task
    pub async fn on_search_submit(&mut self, query: &str) -> ViewUpdate {
        match self.start_search(query) {
            Some(pending) => {
                let completion = pending.run().await;
                self.finish_search(completion)
            }
            None => self.view(),
        }
    }

    pub fn on_search_cancel(&mut self) -> ViewUpdate {
        self.session.cancel();
        self.view()
    }

    /// Adds the search result at `index` to the watchlist and closes the search
    pub fn on_result_selected(&mut self, index: usize) -> ViewUpdate {
        if !self.session.is_active() {
            return self.view_with(Some(AppError::InvalidInput(
                "No search results are displayed".to_string(),
            )));
        }

        let record = match self.session.result_at(index) {
            Some(record) => record.clone(),
            None => {
                return self.view_with(Some(AppError::InvalidInput(format!(
                    "No search result at row {}",
                    index
                ))))
            }
        };

        self.session.end();
        let error = self.store.add(record).err().map(AppError::from);
        self.view_with(error)
    }

    /// Toggles the watched flag of the watchlist row at `index`
    pub fn on_watchlist_row_tapped(&mut self, index: usize) -> ViewUpdate {
        if self.session.is_active() {
            return self.view_with(Some(AppError::InvalidInput(
                "The watchlist is not displayed".to_string(),
            )));
        }

        let Some(id) = self.store.id_at(index) else {
            return self.view_with(Some(AppError::InvalidInput(format!(
                "No watchlist entry at row {}",
                index
            ))));
        };

        let error = self.store.toggle_watched(id).err().map(AppError::from);
        self.view_with(error)
    }

    fn view_with(&self, error: Option<AppError>) -> ViewUpdate {
        ViewUpdate {
            searching: self.session.is_active(),
            items: self.display_list().to_vec(),
            error,
        }
    }
}
