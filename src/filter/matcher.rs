use super::parser::Expression;
use crate::results::ResultEntry;

/// Compiled per-row inclusion test
#[derive(Debug, Clone, Default)]
pub enum RowFilter {
    /// No filter: every row is visible.
    #[default]
    MatchAll,
    /// Rows must satisfy at least one clause.
    Expression(Expression),
}

impl RowFilter {
    pub fn is_match_all(&self) -> bool {
        matches!(self, RowFilter::MatchAll)
    }

    pub fn matches(&self, entry: &ResultEntry) -> bool {
        match self {
            RowFilter::MatchAll => true,
            RowFilter::Expression(expr) => expr.matches(entry),
        }
    }

    /// Detach the filter into a plain predicate closure
    pub fn into_predicate(self) -> impl Fn(&ResultEntry) -> bool {
        move |entry| self.matches(entry)
    }
}

/// Indices of the entries the filter keeps, in their original order
pub fn collect_visible_indices(entries: &[ResultEntry], filter: &RowFilter) -> Vec<usize> {
    if filter.is_match_all() {
        return (0..entries.len()).collect();
    }

    entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| filter.matches(entry).then_some(idx))
        .collect()
}
