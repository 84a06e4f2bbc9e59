pub mod controller;
pub mod view;

pub use controller::{PendingSearch, SearchCompletion, WatchlistController};
pub use view::ViewUpdate;
