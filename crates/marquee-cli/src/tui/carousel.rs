//! Hero carousel state.
//!
//! Holds the featured trending entries and the rotation position, and
//! projects the current entry into the fields the hero panel renders.

use marquee_api::catalog::{CatalogItem, backdrop_url};

/// Maximum number of featured entries the carousel rotates through.
pub const MAX_FEATURED: usize = 6;

/// Synopsis shown when an entry has no overview text.
pub const SYNOPSIS_FALLBACK: &str = "No synopsis available.";

/// What the hero panel renders for the current entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroView {
    /// Backdrop image URL, falling back to the poster. `None` clears
    /// the background.
    pub background: Option<String>,
    /// Title line.
    pub title: String,
    /// Synopsis paragraph.
    pub overview: String,
}

/// Rotating featured-entry carousel.
///
/// While any entries are loaded the position always points at one of
/// them; stepping past either end wraps around.
#[derive(Debug, Default)]
pub struct Carousel {
    items: Vec<CatalogItem>,
    index: usize,
    loaded: bool,
}

impl Carousel {
    /// Replaces the featured entries and resets the position to the
    /// first one. Input beyond [`MAX_FEATURED`] is dropped. Marks the
    /// carousel loaded even when the fetch came back empty.
    pub fn load(&mut self, mut items: Vec<CatalogItem>) {
        items.truncate(MAX_FEATURED);
        self.items = items;
        self.index = 0;
        self.loaded = true;
    }

    /// Whether no entries are held.
    #[allow(dead_code)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a load has completed. Distinguishes a carousel still
    /// waiting on its fetch from one whose fetch returned nothing.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of loaded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Current position (0-based).
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Steps to the next entry, wrapping from the last to the first.
    /// No-op while empty.
    #[allow(clippy::arithmetic_side_effects)] // guarded by the empty check
    pub fn advance(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.items.len();
    }

    /// Steps to the previous entry, wrapping from the first to the
    /// last. No-op while empty.
    #[allow(clippy::arithmetic_side_effects)] // guarded by the empty check
    pub fn retreat(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.index = (self.index + self.items.len() - 1) % self.items.len();
    }

    /// Currently featured entry, if any.
    #[must_use]
    pub fn current(&self) -> Option<&CatalogItem> {
        self.items.get(self.index)
    }

    /// Projects the current entry into what the hero panel shows.
    /// Returns `None` while empty.
    #[must_use]
    pub fn project(&self) -> Option<HeroView> {
        let item = self.current()?;
        let background = backdrop_url(item.backdrop_path.as_deref())
            .or_else(|| backdrop_url(item.poster_path.as_deref()));
        Some(HeroView {
            background,
            title: String::from(item.display_title()),
            overview: String::from(item.synopsis().unwrap_or(SYNOPSIS_FALLBACK)),
        })
    }
}
