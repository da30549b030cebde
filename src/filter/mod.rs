//! Query parsing and row matching for ranked results
//!
//! A query is a flat OR of AND-ed terms typed into a single line. It is
//! recompiled from scratch on every change; terms that make no sense are
//! dropped instead of reported.
//!
//! # Syntax
//!
//! ```text
//! term AND term OR term     AND binds tighter than OR; no parentheses
//! field:value               Case-insensitive pattern on one field
//! field:>=N  field:<N       Numeric comparison (rank and status only)
//! text                      Case-insensitive pattern on method, url, status and rank
//! ```
//!
//! # Fields
//!
//! - `rank`
//! - `method`
//! - `url` / `path`
//! - `status` / `code` / `statuscode`
//!
//! A bare number on a numeric field is still a pattern: `rank:5` keeps ranks
//! 5, 15 and 51. Use `rank:>=5` or similar for a numeric test.
//!
//! # Examples
//!
//! ```text
//! method:POST AND status:200     # successful POSTs
//! status:>=500                   # server errors
//! url:login OR url:auth          # either path
//! rank: AND method:GET           # dangling "rank:" is ignored
//! host: AND method:GET           # so is any other empty "key:"
//! ```

pub mod atom;
pub mod error;
pub mod matcher;
pub mod numeric;
pub mod parser;

pub use atom::{Atom, Field, FieldMatcher, Pattern, compile_token};
pub use error::{AtomError, FilterError};
pub use matcher::{RowFilter, collect_visible_indices};
pub use numeric::{CompareOp, NumericComparison};
pub use parser::{Clause, Expression, parse_query};
