use thiserror::Error;

/// Why a single token contributes no constraint.
///
/// These never abort a query: the parser drops the token and carries on.
#[derive(Debug, Error)]
pub enum AtomError {
    /// `key:` with nothing after the colon, whether or not the key is a known field
    #[error("Empty filter value after '{0}:'")]
    EmptyValue(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure reported by a [`QueryCompiler`](crate::controller::QueryCompiler).
///
/// The built-in compiler never produces one; the controller keeps its previous
/// filter when any compiler does.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Query could not be compiled: {0}")]
    Compile(String),
}
