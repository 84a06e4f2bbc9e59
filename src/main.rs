mod terminal;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use movie_watchlist::{
    api::WatchlistController, config::Config, db::FileKeyValueStore, services::TmdbClient,
    telemetry,
};

/// Search TMDB and keep a personal movie watchlist
#[derive(Debug, Parser)]
#[command(name = "movie-watchlist", version)]
struct Cli {
    /// Directory holding the watchlist (overrides WATCHLIST_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Search timeout in seconds (overrides SEARCH_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let config = Config::from_env()?.with_overrides(cli.data_dir, cli.timeout);
    config.validate()?;

    tracing::info!(
        watchlist_dir = %config.watchlist_dir.display(),
        api_url = %config.tmdb_api_url,
        "Starting movie watchlist"
    );

    let catalog = Arc::new(TmdbClient::from_config(&config).context("Failed to build TMDB client")?);
    let backend = Arc::new(FileKeyValueStore::new(&config.watchlist_dir));
    let (controller, load_error) = WatchlistController::open(catalog, backend);

    if let Some(e) = load_error {
        terminal::print_notice(&e.to_string());
    }

    terminal::run(controller).await
}
