//! TUI module for the interactive catalog browser.
//!
//! One `tokio::select!` loop multiplexes terminal input, finished
//! background fetches, and the search debounce deadline on a single
//! thread. Section loads spawn at startup and report back through a
//! channel, so the screen renders immediately and fills in as
//! responses arrive.

/// Hero carousel state.
pub mod carousel;
/// Search overlay state and debouncing.
pub mod search;
/// Browse screen state types.
pub mod state;
/// Background fetch tasks and their events.
pub mod tasks;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEventKind,
    KeyModifiers,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use marquee_api::catalog::{CatalogApi, page_url};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use self::state::App;
use self::tasks::AppEvent;

/// Runs the catalog browser TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing, or event handling fails.
pub async fn run_browser<A>(api: Arc<A>) -> Result<()>
where
    A: CatalogApi + Send + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new();
    tasks::spawn_section_loaders(Arc::clone(&api), tx.clone());

    let result = run_event_loop(&mut terminal, &mut app, &api, &tx, rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: &Arc<A>,
    tx: &mpsc::UnboundedSender<AppEvent>,
    mut rx: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()>
where
    A: CatalogApi + Send + Sync + 'static,
{
    let mut events = EventStream::new();
    let mut rail_capacity: usize = 1;

    while !app.should_quit {
        terminal
            .draw(|frame| {
                rail_capacity = ui::draw(frame, app);
            })
            .context("failed to draw TUI")?;

        tokio::select! {
            // Terminal input
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => handle_event(app, api, tx, event, rail_capacity),
                    Some(Err(error)) => {
                        return Err(error).context("failed to read terminal event");
                    }
                    None => break,
                }
            }

            // Finished background fetch
            Some(app_event) = rx.recv() => {
                app.apply_event(app_event);
            }

            // Debounce deadline passed
            () = app.search.expiry() => {
                if let Some(query) = app.search.take_due_query() {
                    tasks::spawn_search(Arc::clone(api), tx.clone(), query);
                }
            }
        }
    }

    Ok(())
}

/// Routes one terminal event to the surface that owns the input:
/// the search overlay, the detail popup, or the browse screen.
fn handle_event<A>(
    app: &mut App,
    api: &Arc<A>,
    tx: &mpsc::UnboundedSender<AppEvent>,
    event: Event,
    rail_capacity: usize,
) where
    A: CatalogApi + Send + Sync + 'static,
{
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if app.search.is_open() {
                handle_search_input(app, api, tx, key.code, key.modifiers);
            } else if app.detail.is_some() {
                handle_detail_input(app, key.code);
            } else {
                handle_browse_input(app, key.code, key.modifiers, rail_capacity);
            }
        }
        Event::Paste(text) => {
            if app.search.is_open() {
                app.search.paste(&text);
            }
        }
        _ => {}
    }
}

/// Handles key input on the browse screen.
fn handle_browse_input(
    app: &mut App,
    key: KeyCode,
    modifiers: KeyModifiers,
    rail_capacity: usize,
) {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        KeyCode::Char('/') | KeyCode::Char('s') => app.search.open(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => app.focus_prev(),
        KeyCode::Left | KeyCode::Char('h') => app.move_left(),
        KeyCode::Right | KeyCode::Char('l') => app.move_right(rail_capacity),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('o') => open_site_page(app),
        _ => {}
    }
}

/// Handles key input while the search overlay is open.
fn handle_search_input<A>(
    app: &mut App,
    api: &Arc<A>,
    tx: &mpsc::UnboundedSender<AppEvent>,
    key: KeyCode,
    modifiers: KeyModifiers,
) where
    A: CatalogApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Esc => app.search.close(),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        KeyCode::Enter => {
            if let Some(query) = app.search.submit() {
                tasks::spawn_search(Arc::clone(api), tx.clone(), query);
            }
        }
        KeyCode::Backspace => app.search.backspace(),
        KeyCode::Char(c) => app.search.push_char(c),
        _ => {}
    }
}

/// Handles key input while the detail popup is open.
fn handle_detail_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => app.close_detail(),
        KeyCode::Char('o') => open_site_page(app),
        _ => {}
    }
}

/// Opens the catalog site page for the focused entry in the default
/// browser.
fn open_site_page(app: &App) {
    let Some(item) = app.detail.as_ref().or_else(|| app.current_item()) else {
        return;
    };
    if let Some(url) = page_url(item.kind(), item.id) {
        let _ = open::that(&url);
    }
}
