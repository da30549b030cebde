use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading ranked results
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("Failed to read results file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid result record in '{path}' at line {line}: {source}")]
    Record {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Opaque handle to the full request/response pair behind a row.
///
/// Only used to select what a preview pane shows; the filter engine never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRef(pub String);

/// One ranked HTTP exchange as produced by the ranking step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub rank: i32,
    pub method: String,
    pub url: String,
    /// Zero when the exchange never received a response.
    #[serde(default, alias = "statusCode")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<ExchangeRef>,
}

impl ResultEntry {
    pub fn new(rank: i32, method: &str, url: &str, status_code: u16) -> Self {
        Self {
            rank,
            method: method.to_string(),
            url: url.to_string(),
            status_code,
            exchange: None,
        }
    }
}

/// Load ranked results from a JSON array or JSON Lines file.
///
/// Row order is preserved exactly as written.
pub fn load_results(path: impl AsRef<Path>) -> Result<Vec<ResultEntry>, ResultsError> {
    let path = path.as_ref();
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ResultsError::Read {
        path: path_display.clone(),
        source,
    })?;

    parse_results(&raw, &path_display)
}

/// Parse results already held in memory; `origin` only labels errors.
pub fn parse_results(raw: &str, origin: &str) -> Result<Vec<ResultEntry>, ResultsError> {
    let entries: Vec<ResultEntry> = if raw.trim_start().starts_with('[') {
        serde_json::from_str(raw).map_err(|source| ResultsError::Record {
            path: origin.to_string(),
            line: source.line(),
            source,
        })?
    } else {
        let mut entries = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(line).map_err(|source| ResultsError::Record {
                path: origin.to_string(),
                line: idx + 1,
                source,
            })?;
            entries.push(entry);
        }
        entries
    };

    tracing::debug!(origin, rows = entries.len(), "Loaded ranked results");
    Ok(entries)
}
