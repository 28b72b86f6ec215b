//! TUI rendering logic for the catalog browser.

use marquee_api::catalog::{CatalogItem, backdrop_url, poster_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::carousel::SYNOPSIS_FALLBACK;
use super::search::SearchOutcome;
use super::state::{App, Focus, Page, Rail};

/// Width of one rail card, borders included.
const CARD_WIDTH: u16 = 24;

/// Draws the browser UI. Returns how many cards fit in a rail, for
/// cursor window calculations.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, app: &App) -> usize {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header tabs
            Constraint::Length(7), // hero
            Constraint::Length(3), // genre strip
            Constraint::Min(12),   // rails
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);
    draw_hero(frame, chunks[1], app);
    draw_genres(frame, chunks[2], app);
    let rail_capacity = draw_rails(frame, chunks[3], app);
    draw_footer(frame, chunks[4], app);

    if let Some(item) = &app.detail {
        draw_detail(frame, frame.area(), item);
    }
    if app.search.is_open() {
        draw_search(frame, frame.area(), app);
    }

    rail_capacity
}

/// Draws the header tab bar.
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let active = app.active_page();
    let tab = |page: Page, label: &'static str| {
        if active == page {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
        } else {
            Span::raw(label)
        }
    };

    let line = Line::from(vec![
        tab(Page::Home, "Home"),
        Span::raw("   "),
        tab(Page::Search, "Search"),
    ]);
    let header =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" marquee "));
    frame.render_widget(header, area);
}

/// Draws the hero panel for the featured entry.
fn draw_hero(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Hero {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let Some(view) = app.carousel.project() else {
        let placeholder = if app.carousel.is_loaded() {
            "Nothing trending."
        } else {
            "Loading trending..."
        };
        let empty = Paragraph::new(placeholder).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Featured "),
        );
        frame.render_widget(empty, area);
        return;
    };

    let position = format!(
        "{} / {}",
        app.carousel.index().saturating_add(1),
        app.carousel.len()
    );

    let mut lines = vec![
        Line::from(Span::styled(
            view.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(view.overview),
    ];
    if let Some(background) = view.background {
        lines.push(Line::from(Span::styled(
            background,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let hero = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Featured {position} ")),
    );
    frame.render_widget(hero, area);
}

/// Draws the genre strip.
fn draw_genres(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for genre in &app.genres {
        spans.push(Span::styled(
            format!(" {} ", genre.name),
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::raw(" "));
    }

    let strip = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Genres "));
    frame.render_widget(strip, area);
}

/// Draws the three card rails. Returns the per-rail card capacity.
#[allow(clippy::arithmetic_side_effects)]
#[allow(clippy::indexing_slicing)]
fn draw_rails(frame: &mut Frame, area: Rect, app: &App) -> usize {
    let rail_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let capacity = usize::from(area.width / CARD_WIDTH).max(1);

    draw_rail(
        frame,
        rail_chunks[0],
        " Top Rated ",
        &app.top_rated,
        app.focus == Focus::TopRated,
        capacity,
    );
    draw_rail(
        frame,
        rail_chunks[1],
        " Upcoming ",
        &app.upcoming,
        app.focus == Focus::Upcoming,
        capacity,
    );
    draw_rail(
        frame,
        rail_chunks[2],
        " Now Playing ",
        &app.now_playing,
        app.focus == Focus::NowPlaying,
        capacity,
    );

    capacity
}

/// Draws one horizontally scrolling rail of cards.
fn draw_rail(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rail: &Rail,
    is_active: bool,
    capacity: usize,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if rail.items().is_empty() {
        let placeholder = if rail.is_loaded() {
            "Nothing to show."
        } else {
            "Loading..."
        };
        frame.render_widget(Paragraph::new(placeholder), inner);
        return;
    }

    let end = rail
        .offset()
        .saturating_add(capacity)
        .min(rail.items().len());
    let visible = rail.items().get(rail.offset()..end).unwrap_or_default();

    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CARD_WIDTH); visible.len()])
        .split(inner);

    for (i, item) in visible.iter().enumerate() {
        let Some(card_area) = card_chunks.get(i) else {
            continue;
        };
        let selected = is_active && rail.offset().saturating_add(i) == rail.cursor();
        draw_card(frame, *card_area, item, selected);
    }
}

/// Draws one card: title over a year/rating sub-line.
fn draw_card(frame: &mut Frame, area: Rect, item: &CatalogItem, selected: bool) {
    let style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(Span::styled(String::from(item.display_title()), style)),
        Line::from(Span::raw(card_sub(item))),
    ];
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style),
    );
    frame.render_widget(card, area);
}

/// Card sub-line: year and rating with placeholder dashes.
fn card_sub(item: &CatalogItem) -> String {
    let year = item.release_year().unwrap_or("\u{2014}");
    let rating = item
        .rating()
        .map_or_else(|| String::from("\u{2014}"), |r| format!("{r:.1}"));
    format!("{year} \u{2022} \u{2605} {rating}")
}

/// Draws the search overlay centered over the screen.
#[allow(clippy::indexing_slicing)]
fn draw_search(frame: &mut Frame, area: Rect, app: &App) {
    let popup = popup_area(area, 70, 70);
    frame.render_widget(Clear, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(3),    // results
        ])
        .split(popup);

    let input = Paragraph::new(app.search.input())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    frame.render_widget(input, chunks[0]);

    draw_search_results(frame, chunks[1], app);
}

/// Draws the search results panel. Before the first dispatch only the
/// frame is shown.
fn draw_search_results(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Results ");
    match app.search.outcome() {
        None => frame.render_widget(block, area),
        Some(SearchOutcome::Empty { message }) => {
            let empty = Paragraph::new(Span::raw(message.as_str())).block(block);
            frame.render_widget(empty, area);
        }
        Some(SearchOutcome::Results(items)) => {
            let rows: Vec<ListItem> = items
                .iter()
                .map(|item| ListItem::new(search_row(item)))
                .collect();
            frame.render_widget(List::new(rows).block(block), area);
        }
    }
}

/// One search result row: kind tag, title, year, rating. The title is
/// a raw span, so markup typed into the query stays inert.
fn search_row(item: &CatalogItem) -> Line<'static> {
    let year = item
        .release_year()
        .map_or_else(String::new, |y| format!(" ({y})"));
    let rating = item
        .rating()
        .map_or_else(String::new, |r| format!("  \u{2605} {r:.1}"));
    Line::from(vec![
        Span::styled(
            format!("[{}]", item.kind().as_str()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(" {}{year}{rating}", item.display_title())),
    ])
}

/// Draws the detail popup for one entry.
fn draw_detail(frame: &mut Frame, area: Rect, item: &CatalogItem) {
    let popup = popup_area(area, 60, 60);
    frame.render_widget(Clear, popup);

    let detail = Paragraph::new(detail_lines(item))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", item.display_title())),
        );
    frame.render_widget(detail, popup);
}

/// Builds the detail popup body.
fn detail_lines(item: &CatalogItem) -> Vec<Line<'static>> {
    let rating = item
        .rating()
        .map_or_else(|| String::from("\u{2014}"), |r| format!("{r:.1}"));

    let mut lines = vec![Line::from(format!(
        "[{}]  \u{2605} {rating}  {} votes",
        item.kind().as_str(),
        item.vote_count.unwrap_or(0),
    ))];
    if let Some(date) = formatted_release_date(item) {
        lines.push(Line::from(format!("Released: {date}")));
    }
    lines.push(Line::default());
    lines.push(Line::from(String::from(
        item.synopsis().unwrap_or(SYNOPSIS_FALLBACK),
    )));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Poster: {}", poster_url(item.poster_path.as_deref())),
        Style::default().fg(Color::DarkGray),
    )));
    if let Some(backdrop) = backdrop_url(item.backdrop_path.as_deref()) {
        lines.push(Line::from(Span::styled(
            format!("Backdrop: {backdrop}"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

/// Formats the release date for display (e.g. "2024-02-27" -> "Feb 27, 2024").
fn formatted_release_date(item: &CatalogItem) -> Option<String> {
    let date = item
        .release_date
        .as_deref()
        .or(item.first_air_date.as_deref())?;
    let parsed = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(parsed.format("%b %-d, %Y").to_string())
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.search.is_open() {
        "Type to search | Enter: search now | Esc: close"
    } else if app.detail.is_some() {
        "o: open in browser  Esc: close"
    } else {
        "\u{2190}\u{2192}/h/l: step  \u{2191}\u{2193}/j/k: section  /: search  Enter: details  o: open  q: quit"
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Centers a popup taking the given percentages of the screen.
#[allow(clippy::arithmetic_side_effects)]
#[allow(clippy::indexing_slicing)]
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(100u16.saturating_sub(percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(100u16.saturating_sub(percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
