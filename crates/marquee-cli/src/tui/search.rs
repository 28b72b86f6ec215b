//! Search overlay state and keystroke debouncing.
//!
//! Keystrokes do not hit the network directly: they schedule a dispatch
//! on a single-slot [`Debouncer`], and only the query present when the
//! timer fires is sent. Responses are matched against the input at
//! arrival time, so a stale response never overwrites a newer query's
//! view.

use std::time::Duration;

use marquee_api::catalog::{CatalogItem, MediaKind};
use tokio::time::Instant;
use unicode_normalization::UnicodeNormalization;

/// Delay between the last keystroke and the dispatched search.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(450);

/// Minimum trimmed query length that triggers a search.
pub const MIN_QUERY_LEN: usize = 2;

/// Single-slot debounce timer.
///
/// `schedule` replaces any pending query and restarts the delay, so a
/// burst of calls produces exactly one dispatch carrying the last
/// query. `expiry` pends forever while nothing is scheduled, which
/// lets it sit in a `select!` arm.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    pending: Option<String>,
}

impl Debouncer {
    /// Creates a debouncer with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            pending: None,
        }
    }

    /// Schedules `query`, replacing any pending one and restarting the
    /// delay.
    pub fn schedule(&mut self, query: impl Into<String>) {
        self.pending = Some(query.into());
        self.deadline = Instant::now().checked_add(self.delay);
    }

    /// Drops the pending dispatch, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    /// Whether a dispatch is scheduled.
    #[allow(dead_code)]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves once the deadline passes; pends forever while idle.
    /// The returned future does not borrow the debouncer.
    pub fn expiry(&self) -> impl Future<Output = ()> + use<> {
        let deadline = self.deadline;
        async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        }
    }

    /// Takes the pending query, clearing the timer.
    pub fn take(&mut self) -> Option<String> {
        self.deadline = None;
        self.pending.take()
    }
}

/// Outcome of a dispatched search, as the overlay renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Displayable entries after filtering.
    Results(Vec<CatalogItem>),
    /// Nothing displayable; the message echoes the query verbatim.
    Empty {
        /// Message line shown in the results panel.
        message: String,
    },
}

/// Search overlay state: the input line, the debounce timer, and the
/// latest rendered outcome.
#[derive(Debug)]
pub struct SearchState {
    open: bool,
    input: String,
    debounce: Debouncer,
    outcome: Option<SearchOutcome>,
}

impl SearchState {
    /// Creates a closed overlay with the default debounce delay.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open: false,
            input: String::new(),
            debounce: Debouncer::new(DEBOUNCE_DELAY),
            outcome: None,
        }
    }

    /// Whether the overlay is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Current input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Latest outcome, `None` until a dispatch lands.
    #[must_use]
    pub const fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Opens the overlay.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the overlay, clearing the input, the pending dispatch,
    /// and the rendered outcome.
    pub fn close(&mut self) {
        self.open = false;
        self.input.clear();
        self.debounce.cancel();
        self.outcome = None;
    }

    /// Appends a typed character. Control characters are dropped so
    /// terminal sequences cannot reach the display.
    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        self.input.push(c);
        self.edited();
    }

    /// Appends pasted text after sanitizing it.
    pub fn paste(&mut self, text: &str) {
        self.input.push_str(&sanitize_fragment(text));
        self.edited();
    }

    /// Removes the last character.
    pub fn backspace(&mut self) {
        self.input.pop();
        self.edited();
    }

    /// Dispatches immediately with the current input, bypassing the
    /// debounce. Returns `None` (and clears the outcome) for queries
    /// below the minimum length.
    pub fn submit(&mut self) -> Option<String> {
        self.debounce.cancel();
        if Self::qualifies(&self.input) {
            Some(self.input.clone())
        } else {
            self.outcome = None;
            None
        }
    }

    /// Future that resolves when the debounce deadline passes.
    pub fn expiry(&self) -> impl Future<Output = ()> + use<> {
        self.debounce.expiry()
    }

    /// Takes the query whose debounce delay has elapsed.
    pub fn take_due_query(&mut self) -> Option<String> {
        self.debounce.take()
    }

    /// Accepts a finished search if it still matches the current input;
    /// stale responses are dropped. Filters the raw entries and renders
    /// either results or the empty-state message.
    pub fn apply(&mut self, query: &str, items: Vec<CatalogItem>) {
        if !self.open || query != self.input {
            tracing::debug!(%query, "dropping stale search response");
            return;
        }
        let filtered = filter_results(items);
        self.outcome = if filtered.is_empty() {
            Some(SearchOutcome::Empty {
                message: no_results_message(query),
            })
        } else {
            Some(SearchOutcome::Results(filtered))
        };
    }

    /// Renormalizes the line to NFC (typed and pasted input store the
    /// same bytes) and reschedules or cancels the debounce.
    fn edited(&mut self) {
        self.input = self.input.nfc().collect();
        if Self::qualifies(&self.input) {
            self.debounce.schedule(self.input.clone());
        } else {
            self.debounce.cancel();
            self.outcome = None;
        }
    }

    fn qualifies(input: &str) -> bool {
        input.trim().chars().count() >= MIN_QUERY_LEN
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps entries the overlay can render: movies and TV series that
/// carry at least one image.
#[must_use]
pub fn filter_results(items: Vec<CatalogItem>) -> Vec<CatalogItem> {
    items
        .into_iter()
        .filter(|item| {
            matches!(item.media_type, Some(MediaKind::Movie | MediaKind::Tv))
                && item.has_imagery()
        })
        .collect()
}

/// Empty-state message, echoing the query verbatim. The overlay renders
/// it as raw span text, so markup in the query stays inert.
#[must_use]
pub fn no_results_message(query: &str) -> String {
    format!("No results for \"{query}\".")
}

/// Normalizes typed or pasted text: strips control and escape
/// characters and applies NFC so composed and decomposed input compare
/// equal.
#[must_use]
pub fn sanitize_fragment(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).nfc().collect()
}
