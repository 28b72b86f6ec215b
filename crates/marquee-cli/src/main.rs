//! marquee - terminal browser for the TMDB movie catalog.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use crate::tui::run_browser;
use crate::tui::search::filter_results;
use marquee_api::catalog::{CatalogApi, CatalogClient, SearchParams};

/// Environment variable holding the API key; overrides the config file.
const API_KEY_ENV: &str = "MARQUEE_TMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run (defaults to `browse`).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively.
    Browse,
    /// Search movies and TV series by name.
    Search(SearchArgs),
    /// List movie genres.
    Genres,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "blade runner").
    #[arg(long, required = true)]
    query: String,

    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Loads the app config for the given directory override.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Resolves the API key: environment first, then the config file. May
/// be empty; callers decide how to treat that.
fn resolve_api_key(config: &AppConfig) -> String {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| config.catalog.api_key.clone())
}

/// Builds a `CatalogClient` from config and environment.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
fn build_catalog_client(config: &AppConfig) -> Result<CatalogClient> {
    CatalogClient::builder()
        .api_key(resolve_api_key(config))
        .language(&config.catalog.language)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build catalog client")
}

/// Ensures an API key is configured before a headless request.
fn require_api_key(config: &AppConfig) -> Result<()> {
    anyhow::ensure!(
        !resolve_api_key(config).is_empty(),
        "no API key configured: set {API_KEY_ENV} or [catalog] api_key in config.toml"
    );
    Ok(())
}

/// Runs the `browse` subcommand (the default).
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    if resolve_api_key(&config).is_empty() {
        tracing::warn!("no API key configured; every fetch will fail until one is set");
    }
    let client = build_catalog_client(&config)?;

    run_browser(Arc::new(client)).await
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if no API key is configured or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    require_api_key(&config)?;
    let client = build_catalog_client(&config)?;

    let params = SearchParams::new(&args.query).page(args.page);
    let page = client
        .search_multi(&params)
        .await
        .context("search/multi request failed")?;

    let results = filter_results(page.results);
    tracing::info!("Total results: {}", page.total_results);
    tracing::info!("ID\tKind\tTitle\t\t\tYear\tRating");
    for item in &results {
        tracing::info!(
            "{}\t{}\t{}\t{}\t{}",
            item.id,
            item.kind().as_str(),
            item.display_title(),
            item.release_year().unwrap_or("-"),
            item.rating()
                .map_or_else(|| String::from("-"), |r| format!("{r:.1}")),
        );
    }

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if no API key is configured or the request fails.
#[instrument(skip_all)]
async fn run_genres(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    require_api_key(&config)?;
    let client = build_catalog_client(&config)?;

    let list = client.genres().await.context("genre list request failed")?;

    tracing::info!("ID\tName");
    for genre in &list.genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }
    tracing::info!("Total: {} genres", list.genres.len());

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        None | Some(Commands::Browse) => run_browse(cli.dir.as_ref()).await,
        Some(Commands::Search(args)) => run_search(&args, cli.dir.as_ref()).await,
        Some(Commands::Genres) => run_genres(cli.dir.as_ref()).await,
    }
}
