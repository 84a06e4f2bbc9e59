/// TMDB (The Movie Database) search provider
///
/// API Flow:
/// 1. Search: /search/movie?api_key=..&query=.. → first page of movie results
///
/// Requests always go to the network: no response caching here, and
/// `no-cache` headers ask intermediaries to revalidate.
use crate::{
    config::Config,
    error::{SearchError, SearchResult},
    models::SearchResultPage,
    services::providers::CatalogSearch,
};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::{Client as HttpClient, Url};
use std::time::Duration;

const PROVIDER_NAME: &str = "tmdb";

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    /// Creates a client with an explicit request timeout
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> SearchResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let http_client = HttpClient::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    pub fn from_config(config: &Config) -> SearchResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.search_timeout(),
        )
    }

    /// Builds the search URL with the credential and the percent-encoded query
    fn search_url(&self, query: &str) -> SearchResult<Url> {
        let base = format!("{}/search/movie", self.api_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)
            .map_err(|e| SearchError::InvalidRequest(format!("{}: {}", base, e)))?;

        if url.cannot_be_a_base() {
            return Err(SearchError::InvalidRequest(format!(
                "{} is not a usable base URL",
                base
            )));
        }

        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("query", query);

        Ok(url)
    }
}

/// URL safe to log: the credential value is masked
fn redacted_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api_key" { "REDACTED".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Strips the request URL (which carries the key) before anything sees the error
fn transport_error(e: reqwest::Error, query: &str) -> SearchError {
    let e = e.without_url();
    tracing::warn!(error = %e, query = %query, "Catalog request failed");
    SearchError::Transport(e)
}

#[async_trait::async_trait]
impl CatalogSearch for TmdbClient {
    async fn search(&self, query: &str) -> SearchResult<SearchResultPage> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidRequest(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = self.search_url(query)?;

        tracing::debug!(
            url = %redacted_url(&url),
            query = %query,
            provider = PROVIDER_NAME,
            "Issuing catalog search"
        );

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(e, query))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                query = %query,
                provider = PROVIDER_NAME,
                "Catalog returned error status"
            );
            return Err(SearchError::Server {
                status: status.as_u16(),
                response: body,
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| transport_error(e, query))?;

        let page: SearchResultPage = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            SearchError::Decode(e)
        })?;

        tracing::info!(
            query = %query,
            results = page.results.len(),
            total_results = page.total_results,
            provider = PROVIDER_NAME,
            "Catalog search completed"
        );

        Ok(page)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
