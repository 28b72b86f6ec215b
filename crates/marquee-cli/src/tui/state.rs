//! Browse screen state management.

use marquee_api::catalog::{CatalogItem, Genre};

use super::carousel::Carousel;
use super::search::SearchState;
use super::tasks::AppEvent;

/// Number of genres the strip shows.
pub const MAX_GENRES: usize = 12;

/// Focusable regions of the browse screen, in vertical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Hero carousel panel.
    #[default]
    Hero,
    /// Top-rated rail.
    TopRated,
    /// Upcoming rail.
    Upcoming,
    /// Now-playing rail.
    NowPlaying,
}

impl Focus {
    /// Region below this one, wrapping back to the top.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Hero => Self::TopRated,
            Self::TopRated => Self::Upcoming,
            Self::Upcoming => Self::NowPlaying,
            Self::NowPlaying => Self::Hero,
        }
    }

    /// Region above this one, wrapping down to the bottom.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Hero => Self::NowPlaying,
            Self::TopRated => Self::Hero,
            Self::Upcoming => Self::TopRated,
            Self::NowPlaying => Self::Upcoming,
        }
    }
}

/// Header tab the interface is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Browse screen.
    Home,
    /// Search overlay.
    Search,
}

/// A horizontally scrolling card rail.
///
/// The cursor stops at both ends (no wrap, unlike the hero carousel)
/// and the visible window follows it.
#[derive(Debug, Default)]
pub struct Rail {
    items: Vec<CatalogItem>,
    cursor: usize,
    offset: usize,
    loaded: bool,
}

impl Rail {
    /// Replaces the rail contents and rewinds to the start. Marks the
    /// rail loaded even when the fetch came back empty.
    pub fn load(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
        self.cursor = 0;
        self.offset = 0;
        self.loaded = true;
    }

    /// Whether a load has completed. Distinguishes a rail still waiting
    /// on its fetch from one whose fetch returned nothing.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All entries, render order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Focused entry index.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// First visible entry index.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Focused entry, if any.
    #[must_use]
    pub fn current(&self) -> Option<&CatalogItem> {
        self.items.get(self.cursor)
    }

    /// Moves the cursor one card left, stopping at the first.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        }
    }

    /// Moves the cursor one card right, stopping at the last. `visible`
    /// is how many cards fit on screen; the window scrolls to keep the
    /// cursor in view.
    pub fn move_right(&mut self, visible: usize) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        if self.cursor < last {
            self.cursor = self.cursor.saturating_add(1);
        }
        let visible = visible.max(1);
        let window_end = self.offset.saturating_add(visible);
        if self.cursor >= window_end {
            self.offset = self.cursor.saturating_add(1).saturating_sub(visible);
        }
    }
}

/// Top-level state for the browse screen.
#[derive(Debug, Default)]
pub struct App {
    /// Hero carousel fed by the trending list.
    pub carousel: Carousel,
    /// Genre strip entries (first [`MAX_GENRES`]).
    pub genres: Vec<Genre>,
    /// Top-rated rail.
    pub top_rated: Rail,
    /// Upcoming rail.
    pub upcoming: Rail,
    /// Now-playing rail.
    pub now_playing: Rail,
    /// Search overlay.
    pub search: SearchState,
    /// Focused region of the browse screen.
    pub focus: Focus,
    /// Detail popup contents, when open.
    pub detail: Option<CatalogItem>,
    /// Set when the user asks to quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an empty app; sections fill in as loads complete.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a finished background fetch to the section it belongs
    /// to. The other sections are untouched.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::TrendingLoaded(items) => self.carousel.load(items),
            AppEvent::GenresLoaded(mut genres) => {
                genres.truncate(MAX_GENRES);
                self.genres = genres;
            }
            AppEvent::TopRatedLoaded(items) => self.top_rated.load(items),
            AppEvent::UpcomingLoaded(items) => self.upcoming.load(items),
            AppEvent::NowPlayingLoaded(items) => self.now_playing.load(items),
            AppEvent::SearchLoaded { query, items } => self.search.apply(&query, items),
        }
    }

    /// Header tab to highlight.
    #[must_use]
    pub const fn active_page(&self) -> Page {
        if self.search.is_open() {
            Page::Search
        } else {
            Page::Home
        }
    }

    /// Moves focus to the next region down.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves focus to the previous region up.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Steps the focused region left: the hero retreats (wrapping), a
    /// rail moves its cursor.
    pub fn move_left(&mut self) {
        match self.focus {
            Focus::Hero => self.carousel.retreat(),
            Focus::TopRated => self.top_rated.move_left(),
            Focus::Upcoming => self.upcoming.move_left(),
            Focus::NowPlaying => self.now_playing.move_left(),
        }
    }

    /// Steps the focused region right: the hero advances (wrapping), a
    /// rail moves its cursor within `rail_capacity` visible cards.
    pub fn move_right(&mut self, rail_capacity: usize) {
        match self.focus {
            Focus::Hero => self.carousel.advance(),
            Focus::TopRated => self.top_rated.move_right(rail_capacity),
            Focus::Upcoming => self.upcoming.move_right(rail_capacity),
            Focus::NowPlaying => self.now_playing.move_right(rail_capacity),
        }
    }

    /// Entry the focused region currently points at.
    #[must_use]
    pub fn current_item(&self) -> Option<&CatalogItem> {
        match self.focus {
            Focus::Hero => self.carousel.current(),
            Focus::TopRated => self.top_rated.current(),
            Focus::Upcoming => self.upcoming.current(),
            Focus::NowPlaying => self.now_playing.current(),
        }
    }

    /// Opens the detail popup for the focused entry, if there is one.
    pub fn open_detail(&mut self) {
        self.detail = self.current_item().cloned();
    }

    /// Closes the detail popup.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}
