use crate::config::MenuConfig;
use std::fmt;

/// Logical keyword joining two terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub fn keyword(self) -> &'static str {
        match self {
            LogicOp::And => "AND",
            LogicOp::Or => "OR",
        }
    }
}

/// One entry of the "add filter" menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickFilter {
    Logic(LogicOp),
    Method(String),
    Status(u16),
    RankAtLeast(i32),
    /// Leaves `rank:` for the analyst to complete.
    CustomRank,
    /// Leaves `url:` for the analyst to complete.
    CustomUrl,
}

impl QuickFilter {
    /// Canonical query text inserted for this entry
    pub fn token(&self) -> String {
        match self {
            QuickFilter::Logic(op) => op.keyword().to_string(),
            QuickFilter::Method(method) => format!("method:{method}"),
            QuickFilter::Status(code) => format!("status:{code}"),
            QuickFilter::RankAtLeast(n) => format!("rank:>={n}"),
            QuickFilter::CustomRank => "rank:".to_string(),
            QuickFilter::CustomUrl => "url:".to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            QuickFilter::Logic(op) => op.keyword().to_string(),
            QuickFilter::Method(method) => method.clone(),
            QuickFilter::Status(code) => code.to_string(),
            QuickFilter::RankAtLeast(n) => format!(">= {n}"),
            QuickFilter::CustomRank => "Custom...".to_string(),
            QuickFilter::CustomUrl => "URL (Custom)".to_string(),
        }
    }

    /// The keyword for `AND`/`OR` entries; `None` for conditions
    pub fn as_operator(&self) -> Option<LogicOp> {
        match self {
            QuickFilter::Logic(op) => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// A titled group of menu entries
#[derive(Debug, Clone)]
pub struct MenuSection {
    pub title: &'static str,
    pub items: Vec<QuickFilter>,
}

/// Build the quick-filter menu in display order
pub fn build_menu(config: &MenuConfig) -> Vec<MenuSection> {
    let mut rank_items: Vec<QuickFilter> = config
        .rank_thresholds
        .iter()
        .map(|n| QuickFilter::RankAtLeast(*n))
        .collect();
    rank_items.push(QuickFilter::CustomRank);

    vec![
        MenuSection {
            title: "Logic",
            items: vec![
                QuickFilter::Logic(LogicOp::And),
                QuickFilter::Logic(LogicOp::Or),
            ],
        },
        MenuSection {
            title: "Method",
            items: config
                .methods
                .iter()
                .map(|m| QuickFilter::Method(m.clone()))
                .collect(),
        },
        MenuSection {
            title: "Status",
            items: config
                .status_codes
                .iter()
                .map(|c| QuickFilter::Status(*c))
                .collect(),
        },
        MenuSection {
            title: "Rank",
            items: rank_items,
        },
        MenuSection {
            title: "URL",
            items: vec![QuickFilter::CustomUrl],
        },
    ]
}

/// Menu entries flattened in display order, for numbered selection
pub fn flatten_menu(sections: &[MenuSection]) -> Vec<&QuickFilter> {
    sections.iter().flat_map(|s| s.items.iter()).collect()
}
