//! TMDB catalog API client module.
//!
//! Handles HTTP requests to the TMDB v3 endpoints backing the browse
//! screen: curated movie lists, the genre index, and multi-type search.

mod api;
mod client;
mod error;
mod images;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder};
pub use error::{FetchError, FetchResult};
pub use images::{backdrop_url, page_url, poster_url};
pub use types::{ApiErrorBody, CatalogItem, Genre, GenreList, ListPage, MediaKind, SearchParams};
