use comfy_table::{Attribute, Cell, Color, Table};
use filmhorizon_core::{AppState, ImageResolver, ListingKind, PaginationControls, Route};
use filmhorizon_models::{MovieDetail, MovieSummary, WatchlistEntry};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

/// Cast members shown on the detail view
pub const TOP_CAST: usize = 8;

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

/// `Watchlist (3)`; the count is left off when the list is empty.
pub fn watchlist_badge(count: usize) -> String {
    if count == 0 {
        "Watchlist".to_string()
    } else {
        format!("Watchlist ({})", count)
    }
}

pub fn title_bar(state: &AppState, route: &Route) -> String {
    format!(
        "{}  {}  {}",
        "FilmHorizon".bright_cyan().bold(),
        route.to_string().dimmed(),
        watchlist_badge(state.watchlist.len()).bright_yellow()
    )
}

pub fn listing_heading(kind: ListingKind, query: &str) -> String {
    match kind {
        ListingKind::Popular => "Popular Movies".to_string(),
        ListingKind::Search => format!("Results for \"{}\"", query),
    }
}

pub fn pagination_line(controls: &PaginationControls) -> String {
    let prev = if controls.can_prev { "« Prev" } else { "  ----" };
    let next = if controls.can_next { "Next »" } else { "----  " };
    format!(
        "{}  Page {} of {}  {}",
        prev, controls.current_page, controls.total_pages, next
    )
}

pub fn movie_table(movies: &[MovieSummary], state: &AppState, images: &ImageResolver) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("ID"), header("Title"), header("Poster"), header("Saved")]);
    for movie in movies {
        let saved = if state.in_watchlist(movie.id) { "★" } else { "" };
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(images.poster(movie.poster_path.as_deref()).as_display()),
            Cell::new(saved).fg(Color::Yellow),
        ]);
    }
    table
}

pub fn listing_json(
    kind: ListingKind,
    query: &str,
    movies: &[MovieSummary],
    controls: &PaginationControls,
    state: &AppState,
    images: &ImageResolver,
) -> Value {
    let movies: Vec<Value> = movies
        .iter()
        .map(|m| {
            json!({
                "id": m.id,
                "title": m.title,
                "poster": images.poster(m.poster_path.as_deref()).as_display(),
                "in_watchlist": state.in_watchlist(m.id),
            })
        })
        .collect();
    json!({
        "listing": kind,
        "query": query,
        "pagination": controls,
        "watchlist_count": state.watchlist.len(),
        "movies": movies,
    })
}

fn runtime_label(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => "-".to_string(),
    }
}

fn rating_label(vote: Option<f64>) -> String {
    match vote {
        Some(v) if v > 0.0 => format!("{:.1}/10", v),
        _ => "-".to_string(),
    }
}

pub fn detail_table(detail: &MovieDetail, images: &ImageResolver, in_watchlist: bool) -> Table {
    let title = match detail.release_year() {
        Some(year) => format!("{} ({})", detail.title, year),
        None => detail.title.clone(),
    };
    let genres = detail
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let action = if in_watchlist { "Remove from Watchlist" } else { "Add to Watchlist" };

    let mut table = styled_table();
    table.set_header(vec![header(&title), Cell::new("")]);
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        table.add_row(vec![Cell::new("Tagline"), Cell::new(tagline).add_attribute(Attribute::Italic)]);
    }
    table.add_row(vec![Cell::new("Overview"), Cell::new(detail.overview.as_deref().unwrap_or("-"))]);
    table.add_row(vec![Cell::new("Genres"), Cell::new(if genres.is_empty() { "-" } else { genres.as_str() })]);
    table.add_row(vec![
        Cell::new("Language"),
        Cell::new(detail.original_language.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![Cell::new("Runtime"), Cell::new(runtime_label(detail.runtime))]);
    table.add_row(vec![Cell::new("Rating"), Cell::new(rating_label(detail.vote_average))]);
    table.add_row(vec![
        Cell::new("Poster"),
        Cell::new(images.poster(detail.poster_path.as_deref()).as_display()),
    ]);
    table.add_row(vec![Cell::new("Watchlist"), Cell::new(action).fg(Color::Yellow)]);
    table
}

pub fn cast_table(detail: &MovieDetail, images: &ImageResolver) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("Cast"), header("Character"), header("Photo")]);
    for member in detail.top_billed_cast(TOP_CAST) {
        table.add_row(vec![
            Cell::new(&member.name),
            Cell::new(member.character.as_deref().unwrap_or("")),
            Cell::new(images.profile(member.profile_path.as_deref()).as_display()),
        ]);
    }
    table
}

pub fn detail_json(detail: &MovieDetail, images: &ImageResolver, in_watchlist: bool) -> Value {
    let cast: Vec<Value> = detail
        .top_billed_cast(TOP_CAST)
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "character": c.character,
                "profile": images.profile(c.profile_path.as_deref()).as_display(),
            })
        })
        .collect();
    json!({
        "id": detail.id,
        "title": detail.title,
        "release_year": detail.release_year(),
        "overview": detail.overview,
        "tagline": detail.tagline,
        "genres": detail.genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
        "original_language": detail.original_language,
        "runtime": detail.runtime,
        "vote_average": detail.vote_average,
        "poster": images.poster(detail.poster_path.as_deref()).as_display(),
        "cast": cast,
        "in_watchlist": in_watchlist,
    })
}

pub fn watchlist_table(entries: &[WatchlistEntry], images: &ImageResolver) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("ID"), header("Title"), header("Poster")]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(&entry.title),
            Cell::new(images.poster(entry.poster_path.as_deref()).as_display()),
        ]);
    }
    table
}

pub fn watchlist_json(entries: &[WatchlistEntry], images: &ImageResolver) -> Value {
    let entries: Vec<Value> = entries
        .iter()
        .map(|e| {
            json!({
                "id": e.id,
                "title": e.title,
                "poster": images.poster(e.poster_path.as_deref()).as_display(),
            })
        })
        .collect();
    json!({ "count": entries.len(), "watchlist": entries })
}
