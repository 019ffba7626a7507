//! Human and JSON rendering of search results, details and the watched list

use crate::output::Output;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use popcorn_core::{SearchState, WatchedSummary};
use popcorn_models::{MovieDetail, MovieSummary, UserRating, WatchedEntry};
use serde_json::json;

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(title: &str) -> Cell {
    Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or("N/A").to_string()
}

fn format_rating(rating: Option<f64>) -> String {
    rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "N/A".to_string())
}

fn format_runtime(minutes: Option<u32>) -> String {
    minutes.map(|m| format!("{} min", m)).unwrap_or_else(|| "N/A".to_string())
}

pub fn results_table(results: &[MovieSummary]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("#"), header("Title"), header("Year"), header("IMDb id")]);
    for (index, movie) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(&movie.id),
        ]);
    }
    table
}

/// Print the search box state: loading, error, or results
pub fn print_search(state: &SearchState, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "type": "search",
            "query": state.query,
            "is_loading": state.is_loading,
            "error": state.error,
            "results": state.results,
        }));
        return;
    }

    if state.is_loading {
        output.println(format!("{}", "Loading...".bright_black()));
    } else if let Some(error) = &state.error {
        output.error(format!("⛔️ {}", error));
    } else if state.results.is_empty() {
        output.info("No results");
    } else {
        output.println(format!("Found {} results", state.results.len().to_string().bold()));
        output.println(results_table(&state.results).to_string());
    }
}

/// Print a movie with its watched status.
///
/// `prior` is the rating stored in the watched list, `pending` the one being
/// composed in an interactive session.
pub fn print_detail(detail: &MovieDetail, prior: Option<UserRating>, pending: Option<UserRating>, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "type": "detail",
            "movie": detail,
            "watched": prior.is_some(),
            "user_rating": prior.map(UserRating::value),
            "pending_rating": pending.map(UserRating::value),
        }));
        return;
    }

    let mut table = styled_table();
    table.set_header(vec![header(&format!("{} ({})", detail.title, detail.year))]);
    table.add_row(vec![Cell::new("Released"), Cell::new(or_unknown(detail.release_date.as_deref()))]);
    table.add_row(vec![Cell::new("Runtime"), Cell::new(format_runtime(detail.runtime_minutes))]);
    table.add_row(vec![Cell::new("Genre"), Cell::new(or_unknown(detail.genre.as_deref()))]);
    table.add_row(vec![Cell::new("⭐️ IMDb rating"), Cell::new(format_rating(detail.imdb_rating))]);
    table.add_row(vec![Cell::new("Director"), Cell::new(or_unknown(detail.director.as_deref()))]);
    table.add_row(vec![Cell::new("Starring"), Cell::new(or_unknown(detail.actors.as_deref()))]);
    if let Some(plot) = &detail.plot {
        table.add_row(vec![Cell::new("Plot"), Cell::new(plot)]);
    }
    output.println(table.to_string());

    match (prior, pending) {
        (Some(rating), _) => output.println(format!("You rated this movie {} ⭐️", rating.to_string().green())),
        (None, Some(rating)) => output.println(format!("Your rating: {} (use :add to save it)", rating.to_string().yellow())),
        (None, None) => output.println(format!("{}", "Not rated yet".bright_black())),
    }
}

pub fn print_watched(entries: &[WatchedEntry], output: &Output) {
    if !output.is_human() {
        output.json(&json!({ "type": "watched", "movies": entries }));
        return;
    }

    if entries.is_empty() {
        output.info("No watched movies yet");
        return;
    }

    let mut table = styled_table();
    table.set_header(vec![
        header("Title"),
        header("Year"),
        header("⭐️ IMDb"),
        header("🌟 Yours"),
        header("⏳ Runtime"),
        header("IMDb id"),
    ]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.year),
            Cell::new(format_rating(entry.imdb_rating)),
            Cell::new(entry.user_rating),
            Cell::new(format_runtime(entry.runtime_minutes)),
            Cell::new(&entry.id),
        ]);
    }
    output.println(table.to_string());
}

pub fn print_summary(summary: &WatchedSummary, output: &Output) {
    if !output.is_human() {
        output.json(&json!({ "type": "summary", "summary": summary }));
        return;
    }

    let mut table = styled_table();
    table.set_header(vec![header("Movies you watched")]);
    table.add_row(vec![Cell::new("#️⃣ Movies"), Cell::new(summary.count)]);
    table.add_row(vec![Cell::new("⭐️ Avg IMDb rating"), Cell::new(format!("{:.2}", summary.avg_imdb_rating))]);
    table.add_row(vec![Cell::new("🌟 Avg your rating"), Cell::new(format!("{:.2}", summary.avg_user_rating))]);
    table.add_row(vec![Cell::new("⏳ Avg runtime"), Cell::new(format!("{:.0} min", summary.avg_runtime_minutes))]);
    output.println(table.to_string());
}
