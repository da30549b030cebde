use crate::config::DisplayConfig;
use crate::results::ResultEntry;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::fmt::Write as _;

/// Status cell color by status class; 2xx also varies by method
pub fn status_color(status_code: u16, method: &str) -> Option<Color> {
    match status_code {
        500..=599 => Some(Color::Red),
        400..=499 => Some(Color::DarkYellow),
        300..=399 => Some(Color::Yellow),
        200..=299 => match method.to_uppercase().as_str() {
            "GET" => Some(Color::Green),
            "POST" => Some(Color::Blue),
            _ => Some(Color::Magenta),
        },
        _ => None,
    }
}

fn truncate_url(url: &str, max: usize) -> String {
    if max == 0 || url.chars().count() <= max {
        return url.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = url.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Build the results table for the given rows
pub fn build_results_table(
    entries: &[ResultEntry],
    indices: &[usize],
    config: &DisplayConfig,
    colorize: bool,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Method", "URL", "Status Code"]);

    for entry in indices.iter().filter_map(|idx| entries.get(*idx)) {
        let mut status = Cell::new(entry.status_code).set_alignment(CellAlignment::Center);
        if colorize {
            if let Some(color) = status_color(entry.status_code, &entry.method) {
                status = status.fg(color);
            }
        }

        table.add_row(vec![
            Cell::new(entry.rank).set_alignment(CellAlignment::Center),
            Cell::new(&entry.method),
            Cell::new(truncate_url(&entry.url, config.max_url_width)),
            status,
        ]);
    }

    table
}

/// One-line count of what is on screen
pub fn summary_line(visible: usize, total: usize, filtered: bool) -> String {
    if filtered {
        format!("Showing {visible} of {total} items")
    } else {
        format!(
            "{total} item{} found",
            if total == 1 { "" } else { "s" }
        )
    }
}

/// Format the table plus summary as text
pub fn format_results_text(
    entries: &[ResultEntry],
    indices: &[usize],
    filtered: bool,
    config: &DisplayConfig,
    colorize: bool,
) -> String {
    let mut out = String::new();
    if indices.is_empty() {
        let _ = writeln!(out, "No matching results.");
    } else {
        let table = build_results_table(entries, indices, config, colorize);
        let _ = writeln!(out, "{table}");
    }
    let summary = summary_line(indices.len(), entries.len(), filtered);
    let _ = writeln!(out, "{}", summary.italic());
    out
}

/// Serialize the visible rows as a pretty JSON array
pub fn format_results_json(entries: &[ResultEntry], indices: &[usize]) -> serde_json::Result<String> {
    let visible: Vec<&ResultEntry> = indices.iter().filter_map(|idx| entries.get(*idx)).collect();
    serde_json::to_string_pretty(&visible)
}
