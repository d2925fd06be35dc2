//! Terminal rendering for the search results, the detail pane and the watched list.
//!
//! Everything here turns state into text; nothing here mutates state.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use popcorn_core::{DetailState, SearchState};
use popcorn_models::{MovieDetail, SearchResult, WatchedEntry, WatchedSummary};
use std::io::IsTerminal;
use std::time::Duration;

pub fn logo() -> String {
    format!("🍿 {}", "usePopcorn".bold())
}

pub fn num_results(count: usize) -> String {
    format!("Found {} results", count)
}

/// Header line: logo on the left, result counter on the right
pub fn nav_bar(result_count: usize) -> String {
    format!("{}    {}", logo(), num_results(result_count))
}

/// "▾"/"▸" marker for a collapsible pane
pub fn pane_heading(title: &str, open: bool) -> String {
    let marker = if open { "▾" } else { "▸" };
    format!("{} {}", marker, title.bold())
}

pub fn error_message(message: &str) -> String {
    format!("{} 🩻 ...", message)
}

pub fn query_too_short(query: &str) -> String {
    format!("'{}' is too short to search; type at least a few more characters", query.trim())
}

pub fn loader_text() -> &'static str {
    "loading ...."
}

/// Filled and empty stars for a rating on a `max`-step scale
pub fn rating_stars(rating: Option<u8>, max: u8) -> String {
    let filled = rating.unwrap_or(0).min(max) as usize;
    let empty = max as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// Labels for the rating input, one per step
pub fn rating_choices(max: u8) -> Vec<String> {
    (1..=max)
        .map(|step| format!("{} {}", rating_stars(Some(step), max), step))
        .collect()
}

pub fn results_table(results: &[SearchResult]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "📆 Year", "Id"]);

    for (index, movie) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(&movie.id),
        ]);
    }

    table.to_string()
}

/// The results pane body: loader, error, or the list
pub fn results_pane(state: &SearchState) -> String {
    if state.is_loading {
        return loader_text().to_string();
    }
    if let Some(error) = &state.error {
        return error_message(error);
    }
    if state.results.is_empty() {
        return "Search for a movie to get started.".dimmed().to_string();
    }
    results_table(&state.results)
}

pub fn summary(summary: &WatchedSummary) -> String {
    format!(
        "{}\n#️⃣  {} movies   ⭐️ {:.1}   🌟 {:.1}   ⏳ {:.1} min",
        "Movies you watched".bold(),
        summary.count,
        summary.avg_imdb_rating,
        summary.avg_user_rating,
        summary.avg_runtime
    )
}

pub fn watched_table(entries: &[WatchedEntry]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "⭐️ IMDb", "🌟 Yours", "⏳ Runtime", "Id"]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(format!("{:.1}", entry.imdb_rating)),
            Cell::new(entry.user_rating),
            Cell::new(format!("{} min", entry.runtime_minutes)),
            Cell::new(&entry.id),
        ]);
    }

    table.to_string()
}

/// Summary plus list; an empty list gets a hint instead of an empty table
pub fn watched_pane(summary_stats: &WatchedSummary, entries: &[WatchedEntry]) -> String {
    if entries.is_empty() {
        return format!("{}\n{}", summary(summary_stats), "Nothing rated yet.".dimmed());
    }
    format!("{}\n{}", summary(summary_stats), watched_table(entries))
}

/// Rating section of the detail pane
pub fn rating_section(existing: Option<u8>, draft: Option<u8>, max: u8) -> String {
    match existing {
        Some(rating) => format!("You rated this movie {} 🌟", rating),
        None => match draft {
            Some(rating) => format!("Your rating: {} ({}/{})", rating_stars(Some(rating), max), rating, max),
            None => format!("Your rating: {}", rating_stars(None, max)),
        },
    }
}

pub fn movie_detail(movie: &MovieDetail, existing: Option<u8>, draft: Option<u8>, max: u8) -> String {
    let mut lines = vec![
        format!("⬅️  {}", movie.title.bold()),
        format!("   {} • {}", movie.release_date, movie.runtime),
        format!("   {}", movie.genre),
        format!("   ⭐ {:.1} IMDb rating", movie.imdb_rating),
        format!("   🖼  {}", movie.poster_url),
        String::new(),
        format!("   {}", rating_section(existing, draft, max)),
        String::new(),
    ];
    if !movie.plot.is_empty() {
        lines.push(format!("   {}", movie.plot.italic()));
    }
    lines.push(format!("   Starring {}", movie.actors));
    lines.push(format!("   Directed by {}", movie.director));
    lines.join("\n")
}

/// The detail pane body: loader, error, or the movie
pub fn detail_pane(state: &DetailState, existing: Option<u8>, max: u8) -> String {
    if state.is_loading {
        return loader_text().to_string();
    }
    if let Some(error) = &state.error {
        return error_message(error);
    }
    match &state.movie {
        Some(movie) => movie_detail(movie, existing, state.rating.rating(), max),
        None => loader_text().to_string(),
    }
}

/// Spinner shown while a catalog request is in flight. Hidden when stdout is not a terminal.
pub struct Loader {
    bar: Option<ProgressBar>,
}

impl Loader {
    pub fn start(enabled: bool) -> Self {
        if !enabled || !std::io::stdout().is_terminal() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map(|style| style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
        {
            bar.set_style(style);
        }
        bar.set_message(loader_text());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
