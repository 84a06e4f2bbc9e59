use std::sync::Arc;

use crate::{
    db::KeyValueStore,
    error::{StoreError, StoreResult},
    models::MovieRecord,
};

/// Key the serialized list is stored under
pub const WATCHLIST_KEY: &str = "watchlist";

/// The user's persisted watchlist
///
/// Insertion order is display order, oldest first. Ids are unique.
/// Persistence failures never undo an in-memory change; memory stays
/// authoritative until the next successful save.
pub struct WatchlistStore {
    backend: Arc<dyn KeyValueStore>,
    movies: Vec<MovieRecord>,
}

impl WatchlistStore {
    /// Creates an empty store; call [`WatchlistStore::load`] to read persisted data
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            movies: Vec::new(),
        }
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&MovieRecord> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    pub fn is_watched(&self, id: i64) -> Option<bool> {
        self.get(id).map(MovieRecord::is_watched)
    }

    /// Id of the row at `index` in display order
    pub fn id_at(&self, index: usize) -> Option<i64> {
        self.movies.get(index).map(|movie| movie.id)
    }

    /// Appends `record` unless a movie with the same id is already listed
    ///
    /// Returns `Ok(true)` when appended and `Ok(false)` for a duplicate. The
    /// stored copy starts with `has_watched` unset. A `PersistenceWrite`
    /// error means the movie was added in memory but not saved.
    pub fn add(&mut self, record: MovieRecord) -> StoreResult<bool> {
        if self.contains(record.id) {
            tracing::debug!(movie_id = record.id, "Movie already in watchlist");
            return Ok(false);
        }

        tracing::info!(movie_id = record.id, title = %record.title, "Adding movie to watchlist");
        self.movies.push(record.to_watchlist_entry());
        self.save()?;
        Ok(true)
    }

    /// Flips the watched flag of movie `id` and returns the new state
    ///
    /// Unset counts as false, so the first toggle marks a movie watched.
    pub fn toggle_watched(&mut self, id: i64) -> StoreResult<bool> {
        let movie = self
            .movies
            .iter_mut()
            .find(|movie| movie.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let watched = !movie.is_watched();
        movie.has_watched = Some(watched);

        tracing::info!(movie_id = id, watched, "Toggled watched state");
        self.save()?;
        Ok(watched)
    }

    /// Replaces the in-memory list with the persisted one
    ///
    /// Missing data yields an empty list. Corrupt or unreadable data also
    /// yields an empty list, and the problem is returned for reporting.
    pub fn load(&mut self) -> StoreResult<()> {
        self.movies.clear();

        let data = match self.backend.get(WATCHLIST_KEY) {
            Ok(Some(data)) if !data.iter().all(u8::is_ascii_whitespace) => data,
            // A zero-byte record reads the same as no record
            Ok(_) => {
                tracing::debug!("No persisted watchlist, starting empty");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted watchlist, starting empty");
                return Err(StoreError::PersistenceRead(e));
            }
        };

        let movies: Vec<MovieRecord> = serde_json::from_slice(&data).map_err(|e| {
            tracing::warn!(error = %e, "Persisted watchlist is corrupt, starting empty");
            StoreError::PersistenceDecode(e)
        })?;

        self.movies = dedup_by_id(movies);
        tracing::info!(movies = self.movies.len(), "Loaded watchlist");
        Ok(())
    }

    /// Writes the full list to the backend in one atomic set
    pub fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_vec(&self.movies).map_err(|e| {
            StoreError::PersistenceWrite(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        self.backend.set(WATCHLIST_KEY, &json).map_err(|e| {
            tracing::error!(error = %e, movies = self.movies.len(), "Failed to persist watchlist");
            StoreError::PersistenceWrite(e)
        })?;

        tracing::debug!(movies = self.movies.len(), "Saved watchlist");
        Ok(())
    }
}

// Hand-edited files may repeat an id; the first occurrence wins
fn dedup_by_id(movies: Vec<MovieRecord>) -> Vec<MovieRecord> {
    let mut unique: Vec<MovieRecord> = Vec::with_capacity(movies.len());
    for movie in movies {
        if unique.iter().any(|existing| existing.id == movie.id) {
            tracing::warn!(movie_id = movie.id, "Dropping duplicate persisted entry");
            continue;
        }
        unique.push(movie);
    }
    unique
}
