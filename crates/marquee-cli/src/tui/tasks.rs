//! Background fetch tasks.
//!
//! Every catalog fetch runs as its own task and reports back through an
//! unbounded channel, so the interface stays responsive while requests
//! are in flight and sections render in whatever order their responses
//! arrive. A failed fetch is logged and swallowed; the section it was
//! feeding keeps its previous contents.

use std::sync::Arc;

use marquee_api::catalog::{CatalogApi, CatalogItem, Genre, SearchParams};
use tokio::sync::mpsc;

/// Messages sent from background fetch tasks to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// Trending list arrived; feeds the hero carousel.
    TrendingLoaded(Vec<CatalogItem>),
    /// Genre index arrived.
    GenresLoaded(Vec<Genre>),
    /// Top-rated list arrived.
    TopRatedLoaded(Vec<CatalogItem>),
    /// Upcoming list arrived.
    UpcomingLoaded(Vec<CatalogItem>),
    /// Now-playing list arrived.
    NowPlayingLoaded(Vec<CatalogItem>),
    /// Search results arrived for the given query.
    SearchLoaded {
        /// Query that produced the results.
        query: String,
        /// Raw, unfiltered result entries.
        items: Vec<CatalogItem>,
    },
}

/// Spawns the five initial section loads. Each runs independently and
/// sends its event when done; none blocks the others.
pub fn spawn_section_loaders<A>(api: Arc<A>, tx: mpsc::UnboundedSender<AppEvent>)
where
    A: CatalogApi + Send + Sync + 'static,
{
    {
        let api = Arc::clone(&api);
        let tx = tx.clone();
        tokio::spawn(async move {
            match api.trending_today().await {
                Ok(page) => {
                    let _ = tx.send(AppEvent::TrendingLoaded(page.results));
                }
                Err(error) => tracing::error!(%error, "trending load failed"),
            }
        });
    }

    {
        let api = Arc::clone(&api);
        let tx = tx.clone();
        tokio::spawn(async move {
            match api.genres().await {
                Ok(list) => {
                    let _ = tx.send(AppEvent::GenresLoaded(list.genres));
                }
                Err(error) => tracing::error!(%error, "genre load failed"),
            }
        });
    }

    {
        let api = Arc::clone(&api);
        let tx = tx.clone();
        tokio::spawn(async move {
            match api.top_rated(1).await {
                Ok(page) => {
                    let _ = tx.send(AppEvent::TopRatedLoaded(page.results));
                }
                Err(error) => tracing::error!(%error, "top rated load failed"),
            }
        });
    }

    {
        let api = Arc::clone(&api);
        let tx = tx.clone();
        tokio::spawn(async move {
            match api.upcoming(1).await {
                Ok(page) => {
                    let _ = tx.send(AppEvent::UpcomingLoaded(page.results));
                }
                Err(error) => tracing::error!(%error, "upcoming load failed"),
            }
        });
    }

    tokio::spawn(async move {
        match api.now_playing(1).await {
            Ok(page) => {
                let _ = tx.send(AppEvent::NowPlayingLoaded(page.results));
            }
            Err(error) => tracing::error!(%error, "now playing load failed"),
        }
    });
}

/// Spawns a single search request for `query`.
pub fn spawn_search<A>(api: Arc<A>, tx: mpsc::UnboundedSender<AppEvent>, query: String)
where
    A: CatalogApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let params = SearchParams::new(query.clone());
        match api.search_multi(&params).await {
            Ok(page) => {
                let _ = tx.send(AppEvent::SearchLoaded {
                    query,
                    items: page.results,
                });
            }
            Err(error) => tracing::error!(%error, "search load failed"),
        }
    });
}
