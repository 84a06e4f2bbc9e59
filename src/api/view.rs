use crate::{error::AppError, models::MovieRecord};

/// What the rendering layer needs after any callback
#[derive(Debug)]
pub struct ViewUpdate {
    /// True while search results are displayed instead of the watchlist
    pub searching: bool,
    /// Rows to render, in display order
    pub items: Vec<MovieRecord>,
    /// Transient problem to show alongside the rows
    pub error: Option<AppError>,
}

impl ViewUpdate {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn notice(&self) -> Option<String> {
        self.error.as_ref().map(AppError::user_message)
    }
}
