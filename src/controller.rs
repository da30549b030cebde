use crate::config::FilterSettings;
use crate::filter::{FilterError, RowFilter, collect_visible_indices, parse_query};
use crate::menu::{LogicOp, QuickFilter};
use crate::results::ResultEntry;
use std::fmt;

/// Turns non-blank query text into a row filter for the controller
pub trait QueryCompiler: fmt::Debug {
    fn compile(&self, text: &str) -> Result<RowFilter, FilterError>;
}

/// The query language itself; bad terms are dropped, so this never fails.
impl QueryCompiler for FilterSettings {
    fn compile(&self, text: &str) -> Result<RowFilter, FilterError> {
        Ok(parse_query(text, self))
    }
}

/// Whether a filter is currently narrowing the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// Match-all: every row is visible
    Unfiltered,
    /// A compiled expression decides visibility
    Filtered,
}

/// Keeps the active row filter in sync with the query text.
///
/// Every change recompiles the whole text. A query that fails to compile
/// leaves the previous filter in place.
#[derive(Debug)]
pub struct FilterController {
    text: String,
    active: RowFilter,
    compiler: Box<dyn QueryCompiler>,
    focus_requested: bool,
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new(FilterSettings::default())
    }
}

impl FilterController {
    pub fn new(settings: FilterSettings) -> Self {
        Self::with_compiler(settings)
    }

    pub fn with_compiler(compiler: impl QueryCompiler + 'static) -> Self {
        Self {
            text: String::new(),
            active: RowFilter::MatchAll,
            compiler: Box::new(compiler),
            focus_requested: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn active_filter(&self) -> &RowFilter {
        &self.active
    }

    pub fn state(&self) -> FilterState {
        if self.active.is_match_all() {
            FilterState::Unfiltered
        } else {
            FilterState::Filtered
        }
    }

    /// Text-change notification from the query input
    pub fn set_text(&mut self, text: impl Into<String>) -> FilterState {
        self.text = text.into();
        self.apply();
        self.state()
    }

    pub fn clear(&mut self) -> FilterState {
        self.set_text(String::new())
    }

    /// Append a `field:value` condition, joining with ` AND ` when needed
    pub fn append_condition(&mut self, condition: &str) -> FilterState {
        if !self.text.is_empty() && !ends_with_whitespace(&self.text) {
            self.text.push_str(" AND ");
        }
        self.text.push_str(condition);
        self.after_append()
    }

    /// Append a bare `AND`/`OR` keyword followed by a single space
    pub fn append_operator(&mut self, op: LogicOp) -> FilterState {
        if !self.text.is_empty() && !ends_with_whitespace(&self.text) {
            self.text.push(' ');
        }
        self.text.push_str(op.keyword());
        self.text.push(' ');
        self.after_append()
    }

    pub fn append(&mut self, item: &QuickFilter) -> FilterState {
        match item.as_operator() {
            Some(op) => self.append_operator(op),
            None => self.append_condition(&item.token()),
        }
    }

    /// Returns true once after an append asked for the input to regain focus
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn visible_indices(&self, entries: &[ResultEntry]) -> Vec<usize> {
        collect_visible_indices(entries, &self.active)
    }

    fn after_append(&mut self) -> FilterState {
        self.apply();
        self.focus_requested = true;
        self.state()
    }

    fn apply(&mut self) {
        if self.text.trim().is_empty() {
            self.active = RowFilter::MatchAll;
            return;
        }

        match self.compiler.compile(&self.text) {
            Ok(filter) => self.active = filter,
            Err(e) => {
                tracing::warn!(error = %e, "Filter not updated; keeping the previous one");
            }
        }
    }
}

fn ends_with_whitespace(text: &str) -> bool {
    text.chars().next_back().is_some_and(char::is_whitespace)
}
