use super::atom::{Atom, compile_token};
use super::matcher::RowFilter;
use crate::config::FilterSettings;
use crate::results::ResultEntry;
use regex::Regex;
use std::sync::LazyLock;

static OR_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+OR\s+").expect("valid OR separator regex"));
static AND_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AND\s+").expect("valid AND separator regex"));

/// Atoms that must all match
#[derive(Debug, Clone, Default)]
pub struct Clause {
    /// Compiled AND-terms; never empty once built by [`parse_query`]
    pub atoms: Vec<Atom>,
}

impl Clause {
    pub fn matches(&self, entry: &ResultEntry) -> bool {
        self.atoms.iter().all(|atom| atom.matches(entry))
    }
}

/// Clauses of which at least one must match
#[derive(Debug, Clone, Default)]
pub struct Expression {
    /// OR-segments in query order; never empty once built by [`parse_query`]
    pub clauses: Vec<Clause>,
}

impl Expression {
    pub fn matches(&self, entry: &ResultEntry) -> bool {
        self.clauses.iter().any(|clause| clause.matches(entry))
    }

    pub fn atom_count(&self) -> usize {
        self.clauses.iter().map(|c| c.atoms.len()).sum()
    }
}

/// Parse and compile a query into a row filter.
///
/// Tokens that do not compile are dropped silently, so every query yields a
/// filter. Nothing left to constrain means [`RowFilter::MatchAll`].
pub fn parse_query(text: &str, settings: &FilterSettings) -> RowFilter {
    if text.trim().is_empty() {
        return RowFilter::MatchAll;
    }

    let mut clauses = Vec::new();
    for tokens in split_clauses(text) {
        let atoms: Vec<Atom> = tokens
            .into_iter()
            .filter_map(|token| match compile_token(token, settings) {
                Ok(atom) => Some(atom),
                Err(e) => {
                    tracing::debug!(token, error = %e, "Dropping filter term");
                    None
                }
            })
            .collect();

        if !atoms.is_empty() {
            clauses.push(Clause { atoms });
        }
    }

    if clauses.is_empty() {
        return RowFilter::MatchAll;
    }

    let expression = Expression { clauses };
    tracing::trace!(
        clauses = expression.clauses.len(),
        atoms = expression.atom_count(),
        "Compiled filter expression"
    );
    RowFilter::Expression(expression)
}

/// Split into OR-segments, each holding its trimmed, non-empty AND-tokens
fn split_clauses(text: &str) -> Vec<Vec<&str>> {
    OR_SEPARATOR_RE
        .split(text)
        .map(|segment| {
            AND_SEPARATOR_RE
                .split(segment)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .collect()
        })
        .collect()
}
