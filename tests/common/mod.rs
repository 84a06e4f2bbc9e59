#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::Query,
    http::{header::CACHE_CONTROL, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use movie_watchlist::services::TmdbClient;

pub const API_KEY: &str = "test_key";

/// Serves a TMDB-shaped `/3/search/movie` on an ephemeral port
///
/// Returns the base URL to hand to `TmdbClient`.
pub async fn spawn_fake_catalog() -> String {
    let router = Router::new().route("/3/search/movie", get(search_movie));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}/3", addr)
}

pub fn client(api_url: &str) -> TmdbClient {
    client_with_timeout(api_url, Duration::from_secs(5))
}

pub fn client_with_timeout(api_url: &str, timeout: Duration) -> TmdbClient {
    TmdbClient::new(API_KEY.to_string(), api_url.to_string(), timeout).unwrap()
}

fn page(results: Vec<Value>) -> Value {
    let total_results = results.len();
    let total_pages = usize::from(total_results > 0);
    json!({
        "page": 1,
        "results": results,
        "total_pages": total_pages,
        "total_results": total_results
    })
}

fn movie(id: i64, title: &str, release_date: &str) -> Value {
    json!({
        "adult": false,
        "id": id,
        "title": title,
        "original_title": title,
        "overview": format!("Overview of {}", title),
        "poster_path": null,
        "release_date": release_date,
        "popularity": 12.5
    })
}

async fn search_movie(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "status_code": 7,
                "status_message": "Invalid API key: You must be granted a valid key.",
                "success": false
            })),
        )
            .into_response();
    }

    let no_cache = headers
        .get(CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        == Some("no-cache");
    if !no_cache {
        return (StatusCode::BAD_REQUEST, "expected Cache-Control: no-cache").into_response();
    }

    let query = params.get("query").cloned().unwrap_or_default();
    match query.as_str() {
        "Inception" => Json(page(vec![movie(27205, "Inception", "2010-07-15")])).into_response(),
        "Matrix" => Json(page(vec![
            movie(603, "The Matrix", "1999-03-30"),
            movie(604, "The Matrix Reloaded", "2003-05-15"),
            movie(605, "The Matrix Revolutions", "2003-11-05"),
        ]))
        .into_response(),
        "broken" => (StatusCode::OK, "<html>down for maintenance</html>").into_response(),
        "quota" => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"status_code": 25, "status_message": "Rate limit exceeded"})),
        )
            .into_response(),
        "explode" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream failure").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(page(vec![])).into_response()
        }
        // Echo anything else back as a title so callers can check encoding
        other => Json(page(vec![movie(1, other, "")])).into_response(),
    }
}
