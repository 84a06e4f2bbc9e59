pub mod providers;
pub mod search_session;

pub use providers::{CatalogSearch, TmdbClient};
pub use search_session::{Completion, SearchSession, SearchTicket};
