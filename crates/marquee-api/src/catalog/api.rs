//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchResult;
use super::types::{GenreList, ListPage, SearchParams};

/// Catalog API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches the movie genre index.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the request, the response status, or
    /// JSON decoding fails.
    async fn genres(&self) -> FetchResult<GenreList>;

    /// Fetches the movies trending today.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the request, the response status, or
    /// JSON decoding fails.
    async fn trending_today(&self) -> FetchResult<ListPage>;

    /// Fetches one page of the top-rated movie list.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the request, the response status, or
    /// JSON decoding fails.
    async fn top_rated(&self, page: u32) -> FetchResult<ListPage>;

    /// Fetches one page of the upcoming movie list.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the request, the response status, or
    /// JSON decoding fails.
    async fn upcoming(&self, page: u32) -> FetchResult<ListPage>;

    /// Fetches one page of the now-playing movie list.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the request, the response status, or
    /// JSON decoding fails.
    async fn now_playing(&self, page: u32) -> FetchResult<ListPage>;

    /// Searches movies, TV series, and people in one query.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` if the request, the response status, or
    /// JSON decoding fails.
    async fn search_multi(&self, params: &SearchParams) -> FetchResult<ListPage>;
}
