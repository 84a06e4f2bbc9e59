pub mod kv;
pub mod watchlist;

pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use watchlist::{WatchlistStore, WATCHLIST_KEY};
