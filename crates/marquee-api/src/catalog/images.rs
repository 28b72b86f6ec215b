//! Artwork and site URL helpers.
//!
//! The API returns bare image paths (`/abc123.jpg`); these helpers turn
//! them into full CDN URLs at the two sizes the browse screen uses.

use super::types::MediaKind;

/// CDN base for poster-sized (w500) artwork.
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// CDN base for full-resolution backdrop artwork.
const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/original";

/// Placeholder image for entries without a poster.
const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Public site base, for opening an entry in the browser.
const SITE_BASE: &str = "https://www.themoviedb.org";

/// Full poster URL at w500, or the fixed placeholder when the path is
/// absent or empty.
#[must_use]
pub fn poster_url(path: Option<&str>) -> String {
    path.filter(|p| !p.is_empty())
        .map_or_else(|| String::from(POSTER_PLACEHOLDER), |p| format!("{POSTER_BASE}{p}"))
}

/// Full backdrop URL at original size. `None` when the path is absent
/// or empty; backdrops have no placeholder.
#[must_use]
pub fn backdrop_url(path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{BACKDROP_BASE}{p}"))
}

/// Public site URL for an entry. `None` for kinds the site has no
/// detail page for.
#[must_use]
pub fn page_url(kind: MediaKind, id: u64) -> Option<String> {
    let segment = match kind {
        MediaKind::Movie => "movie",
        MediaKind::Tv => "tv",
        MediaKind::Person => "person",
        MediaKind::Other => return None,
    };
    Some(format!("{SITE_BASE}/{segment}/{id}"))
}
