use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Format of `release_date` on the wire and in storage
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A movie from the catalog plus the local watched flag
///
/// The same shape is used for catalog results and for persisted watchlist
/// entries. Watchlist deduplication compares `id` only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    /// Catalog identifier, unique within the watchlist
    pub id: i64,
    pub title: String,
    /// Synopsis; the catalog sends null or omits it for some titles
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub poster_path: Option<String>,
    /// `YYYY-MM-DD`, absent when unknown
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    /// Local only. `None` means never set, which reads as not watched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_watched: Option<bool>,
}

impl MovieRecord {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            has_watched: None,
        }
    }

    /// Watched state with unset treated as false
    pub fn is_watched(&self) -> bool {
        self.has_watched.unwrap_or(false)
    }

    pub fn release_date_parsed(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT).ok())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date_parsed().map(|date| date.year())
    }

    /// Row label: "Title (Year)" when the year is known
    pub fn display_label(&self) -> String {
        match self.release_year() {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }

    /// Copy taken when a search result is accepted into the watchlist
    pub fn to_watchlist_entry(&self) -> Self {
        Self {
            has_watched: None,
            ..self.clone()
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// TMDB sends "" for unknown dates and images
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
