//! Catalog API response types and search parameters.

use serde::Deserialize;

// --- Media kinds ---

/// Media kind discriminator carried by `search/multi` results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Movie entry.
    Movie,
    /// TV series entry.
    Tv,
    /// Person entry (cast and crew).
    Person,
    /// Any kind this crate does not know about.
    #[serde(other)]
    Other,
}

impl MediaKind {
    /// Lowercase label as the wire format spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Person => "person",
            Self::Other => "other",
        }
    }
}

// --- List responses ---

/// One page of results from a list endpoint (`trending/movie/day`,
/// `movie/top_rated`, `movie/upcoming`, `movie/now_playing`,
/// `search/multi`).
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage {
    /// Current page number.
    pub page: u32,
    /// Result entries.
    pub results: Vec<CatalogItem>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// A single catalog entry.
///
/// The movie list endpoints and `search/multi` share this shape; fields
/// an endpoint does not send stay `None`. Person entries from
/// `search/multi` carry neither dates nor ratings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogItem {
    /// TMDB ID.
    pub id: u64,
    /// Media kind (`search/multi` and trending carry it; the movie list
    /// endpoints omit it).
    pub media_type: Option<MediaKind>,
    /// Movie title.
    pub title: Option<String>,
    /// TV series or person name.
    pub name: Option<String>,
    /// Movie release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// TV series first air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Vote average (0.0 when unrated).
    pub vote_average: Option<f64>,
    /// Vote count.
    pub vote_count: Option<u32>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
}

impl CatalogItem {
    /// Display title: the movie title, else the TV/person name, else
    /// `"Untitled"`. Empty strings count as absent.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("Untitled")
    }

    /// Release year: the first four characters of the release date, else
    /// of the first air date. `None` when the entry carries no date.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        let date = self
            .release_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.first_air_date.as_deref().filter(|s| !s.is_empty()))?;
        Some(date.get(..4).unwrap_or(date))
    }

    /// Vote average, `None` when absent or zero (unrated).
    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.vote_average.filter(|v| *v > 0.0)
    }

    /// Overview text, `None` when absent or empty.
    #[must_use]
    pub fn synopsis(&self) -> Option<&str> {
        self.overview.as_deref().filter(|s| !s.is_empty())
    }

    /// Media kind, defaulting to movie: the movie list endpoints return
    /// movies without a discriminator.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        match self.media_type {
            Some(kind) => kind,
            None => MediaKind::Movie,
        }
    }

    /// Whether the entry carries a poster or a backdrop. Empty paths
    /// count as absent.
    #[must_use]
    pub fn has_imagery(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|s| !s.is_empty())
            || self.backdrop_path.as_deref().is_some_and(|s| !s.is_empty())
    }
}

// --- Genres ---

/// Response from the `genre/movie/list` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    /// All movie genres.
    pub genres: Vec<Genre>,
}

/// A single genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    /// TMDB genre ID.
    pub id: u32,
    /// Display name.
    pub name: String,
}

// --- Errors ---

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Service-specific error code.
    pub status_code: u32,
    /// Human-readable message.
    pub status_message: String,
    /// Always `false` on errors.
    pub success: bool,
}

// --- Search parameters ---

/// Parameters for the `search/multi` endpoint.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Search query (required).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the include-adult flag.
    #[must_use]
    pub const fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn movie_item() -> CatalogItem {
        serde_json::from_str(
            r#"{
                "id": 278,
                "media_type": "movie",
                "title": "The Shawshank Redemption",
                "release_date": "1994-09-23",
                "overview": "Imprisoned in the 1940s for the double murder of his wife and her lover.",
                "vote_average": 8.7,
                "vote_count": 28000,
                "popularity": 170.1,
                "poster_path": "/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg",
                "backdrop_path": "/kXfqcdQKsToO0OUXHcrrNCHDBzO.jpg",
                "genre_ids": [18, 80],
                "adult": false
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_movie_entry() {
        // Arrange & Act
        let item = movie_item();

        // Assert
        assert_eq!(item.id, 278);
        assert_eq!(item.kind(), MediaKind::Movie);
        assert_eq!(item.display_title(), "The Shawshank Redemption");
        assert_eq!(item.release_year(), Some("1994"));
        assert!(item.has_imagery());
    }

    #[test]
    fn test_parse_person_entry_with_sparse_fields() {
        // Arrange
        let json = r#"{"id": 31, "media_type": "person", "name": "Tom Hanks"}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.kind(), MediaKind::Person);
        assert_eq!(item.display_title(), "Tom Hanks");
        assert_eq!(item.release_year(), None);
        assert_eq!(item.rating(), None);
        assert!(!item.has_imagery());
        assert!(item.genre_ids.is_empty());
    }

    #[test]
    fn test_unknown_media_kind_maps_to_other() {
        // Arrange
        let json = r#"{"id": 1, "media_type": "collection"}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.kind(), MediaKind::Other);
    }

    #[test]
    fn test_missing_media_kind_defaults_to_movie() {
        // Arrange
        let json = r#"{"id": 2, "title": "Some List Entry"}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.kind(), MediaKind::Movie);
    }

    #[test]
    fn test_display_title_falls_back_to_untitled() {
        // Arrange
        let json = r#"{"id": 3, "title": "", "name": ""}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.display_title(), "Untitled");
    }

    #[test]
    fn test_release_year_prefers_release_date() {
        // Arrange
        let json = r#"{"id": 4, "release_date": "2019-05-30", "first_air_date": "2008-01-20"}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.release_year(), Some("2019"));
    }

    #[test]
    fn test_release_year_keeps_short_dates_whole() {
        // Arrange
        let json = r#"{"id": 5, "release_date": "20"}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.release_year(), Some("20"));
    }

    #[test]
    fn test_zero_vote_average_counts_as_unrated() {
        // Arrange
        let json = r#"{"id": 6, "vote_average": 0.0}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.rating(), None);
    }

    #[test]
    fn test_empty_overview_counts_as_absent() {
        // Arrange
        let json = r#"{"id": 7, "overview": ""}"#;

        // Act
        let item: CatalogItem = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(item.synopsis(), None);
    }

    #[test]
    fn test_media_kind_labels() {
        // Arrange & Act & Assert
        assert_eq!(MediaKind::Movie.as_str(), "movie");
        assert_eq!(MediaKind::Tv.as_str(), "tv");
        assert_eq!(MediaKind::Person.as_str(), "person");
        assert_eq!(MediaKind::Other.as_str(), "other");
    }

    #[test]
    fn test_search_params_defaults() {
        // Arrange & Act
        let params = SearchParams::new("batman");

        // Assert
        assert_eq!(params.query, "batman");
        assert_eq!(params.page, 1);
        assert!(!params.include_adult);
    }

    #[test]
    fn test_search_params_builder() {
        // Arrange & Act
        let params = SearchParams::new("batman").page(3).include_adult(true);

        // Assert
        assert_eq!(params.page, 3);
        assert!(params.include_adult);
    }
}
