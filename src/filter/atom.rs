use super::error::AtomError;
use super::numeric::NumericComparison;
use crate::config::FilterSettings;
use crate::results::ResultEntry;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// Row fields a token can address with a `field:value` prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Anomaly rank, compared numerically or as decimal text
    Rank,
    /// HTTP method such as `GET`
    Method,
    /// Full request URL; also reachable as `path`
    Url,
    /// Response status code; also reachable as `code` and `statuscode`
    Status,
}

/// Every accepted key, already lowercased.
static FIELD_ALIASES: &[(&str, Field)] = &[
    ("rank", Field::Rank),
    ("method", Field::Method),
    ("url", Field::Url),
    ("path", Field::Url),
    ("status", Field::Status),
    ("code", Field::Status),
    ("statuscode", Field::Status),
];

/// Fields that accept `>=`, `<=`, `>` and `<` in addition to pattern values.
static NUMERIC_FIELDS: &[Field] = &[Field::Rank, Field::Status];

impl Field {
    /// Resolve a lowercased key through the alias table
    pub fn from_alias(key: &str) -> Option<Field> {
        FIELD_ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, field)| *field)
    }

    pub fn is_numeric(self) -> bool {
        NUMERIC_FIELDS.contains(&self)
    }

    /// Text a pattern is matched against; numbers use their decimal form.
    pub fn text_value(self, entry: &ResultEntry) -> Cow<'_, str> {
        match self {
            Field::Rank => Cow::Owned(entry.rank.to_string()),
            Field::Method => Cow::Borrowed(entry.method.as_str()),
            Field::Url => Cow::Borrowed(entry.url.as_str()),
            Field::Status => Cow::Owned(entry.status_code.to_string()),
        }
    }

    pub fn numeric_value(self, entry: &ResultEntry) -> Option<i64> {
        match self {
            Field::Rank => Some(i64::from(entry.rank)),
            Field::Status => Some(i64::from(entry.status_code)),
            Field::Method | Field::Url => None,
        }
    }
}

/// Case-insensitive, unanchored pattern.
///
/// Plain text behaves as a substring search; regex syntax is honoured.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str, settings: &FilterSettings) -> Result<Self, AtomError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .size_limit(settings.pattern_size_limit)
            .build()
            .map_err(|e| AtomError::InvalidPattern {
                pattern: source.to_string(),
                source: e,
            })?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// How a field atom tests its field
#[derive(Debug, Clone)]
pub enum FieldMatcher {
    /// Case-insensitive search over the field's text
    Pattern(Pattern),
    /// `>=`, `<=`, `>` or `<` against the field's numeric value
    Compare(NumericComparison),
}

/// The smallest filterable unit of a query
#[derive(Debug, Clone)]
pub enum Atom {
    /// `key:value` where the key resolved to a known field
    Field {
        /// Field the value is tested against
        field: Field,
        /// Compiled value
        matcher: FieldMatcher,
    },
    /// Any other token, searched in method, URL, status and rank
    FreeText {
        /// The whole token, colon included
        pattern: Pattern,
    },
}

impl Atom {
    pub fn matches(&self, entry: &ResultEntry) -> bool {
        match self {
            Atom::Field {
                field,
                matcher: FieldMatcher::Pattern(pattern),
            } => pattern.is_match(&field.text_value(entry)),
            Atom::Field {
                field,
                matcher: FieldMatcher::Compare(cmp),
            } => field
                .numeric_value(entry)
                .is_some_and(|actual| cmp.matches(actual)),
            Atom::FreeText { pattern } => search_fields(entry)
                .iter()
                .any(|text| pattern.is_match(text)),
        }
    }
}

/// Stringified fields a free-text term is searched in.
///
/// Each field is tested on its own so a term never matches across a field boundary.
pub fn search_fields(entry: &ResultEntry) -> [Cow<'_, str>; 4] {
    [
        Field::Method.text_value(entry),
        Field::Url.text_value(entry),
        Field::Status.text_value(entry),
        Field::Rank.text_value(entry),
    ]
}

/// Compile one trimmed, non-empty token.
///
/// An `Err` means the token adds no constraint. That covers any `key:` with an
/// empty value, known field or not, so `host:` and a lone `:` drop out instead of
/// becoming free text. A bare value on a numeric field
/// (`rank:5`) is a pattern over the decimal text and so also matches 15 or 51;
/// only an operator-prefixed value (`rank:>=5`) compares numerically.
pub fn compile_token(token: &str, settings: &FilterSettings) -> Result<Atom, AtomError> {
    if let Some((key, value)) = token.split_once(':') {
        let key = key.trim().to_lowercase();
        if value.trim().is_empty() {
            return Err(AtomError::EmptyValue(key));
        }
        if let Some(field) = Field::from_alias(&key) {
            return compile_field(field, value.trim(), settings);
        }
    }

    Ok(Atom::FreeText {
        pattern: Pattern::new(token, settings)?,
    })
}

fn compile_field(field: Field, value: &str, settings: &FilterSettings) -> Result<Atom, AtomError> {
    if field.is_numeric() {
        if let Some(cmp) = NumericComparison::parse(value) {
            return Ok(Atom::Field {
                field,
                matcher: FieldMatcher::Compare(cmp),
            });
        }
    }

    Ok(Atom::Field {
        field,
        matcher: FieldMatcher::Pattern(Pattern::new(value, settings)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::numeric::CompareOp;

    fn settings() -> FilterSettings {
        FilterSettings::default()
    }

    fn row(rank: i32, method: &str, url: &str, status: u16) -> ResultEntry {
        ResultEntry::new(rank, method, url, status)
    }

    #[test]
    fn test_alias_table() {
        assert_eq!(Field::from_alias("rank"), Some(Field::Rank));
        assert_eq!(Field::from_alias("path"), Some(Field::Url));
        assert_eq!(Field::from_alias("code"), Some(Field::Status));
        assert_eq!(Field::from_alias("statuscode"), Some(Field::Status));
        assert_eq!(Field::from_alias("host"), None);
        assert!(Field::Rank.is_numeric());
        assert!(Field::Status.is_numeric());
        assert!(!Field::Url.is_numeric());
    }

    #[test]
    fn test_key_is_case_insensitive() {
        let atom = compile_token("METHOD:post", &settings()).unwrap();
        assert!(matches!(atom, Atom::Field { field: Field::Method, .. }));
        assert!(atom.matches(&row(1, "POST", "/", 200)));
        assert!(!atom.matches(&row(1, "GET", "/", 200)));
    }

    #[test]
    fn test_operator_value_compiles_to_comparison() {
        let atom = compile_token("status:>=500", &settings()).unwrap();
        match &atom {
            Atom::Field {
                field: Field::Status,
                matcher: FieldMatcher::Compare(cmp),
            } => {
                assert_eq!(cmp.op, CompareOp::Ge);
                assert_eq!(cmp.target, 500);
            }
            other => panic!("expected comparison, got {other:?}"),
        }
        assert!(atom.matches(&row(1, "GET", "/", 503)));
        assert!(!atom.matches(&row(1, "GET", "/", 404)));
    }

    #[test]
    fn test_bare_numeric_value_is_substring() {
        let atom = compile_token("rank:5", &settings()).unwrap();
        for rank in [5, 15, 51, 105] {
            assert!(atom.matches(&row(rank, "GET", "/", 200)), "rank {rank}");
        }
        assert!(!atom.matches(&row(6, "GET", "/", 200)));
    }

    #[test]
    fn test_operator_on_text_field_is_a_pattern() {
        let atom = compile_token("url:>=5", &settings()).unwrap();
        assert!(matches!(
            atom,
            Atom::Field {
                field: Field::Url,
                matcher: FieldMatcher::Pattern(_)
            }
        ));
        assert!(atom.matches(&row(1, "GET", "/cmp?x>=5", 200)));
    }

    #[test]
    fn test_unparseable_comparison_falls_back_to_pattern() {
        let atom = compile_token("status:>abc", &settings()).unwrap();
        assert!(matches!(
            atom,
            Atom::Field {
                matcher: FieldMatcher::Pattern(_),
                ..
            }
        ));
        assert!(!atom.matches(&row(1, "GET", "/", 500)));
    }

    #[test]
    fn test_empty_value_is_dropped() {
        assert!(matches!(
            compile_token("rank:", &settings()),
            Err(AtomError::EmptyValue(key)) if key == "rank"
        ));
        assert!(matches!(
            compile_token("URL:   ", &settings()),
            Err(AtomError::EmptyValue(key)) if key == "url"
        ));
    }

    #[test]
    fn test_empty_value_after_unknown_key_is_dropped() {
        assert!(matches!(
            compile_token("host:", &settings()),
            Err(AtomError::EmptyValue(key)) if key == "host"
        ));
        assert!(matches!(
            compile_token(":", &settings()),
            Err(AtomError::EmptyValue(key)) if key.is_empty()
        ));

        let atom = compile_token(":8080", &settings()).unwrap();
        assert!(matches!(atom, Atom::FreeText { .. }));
        assert!(atom.matches(&row(1, "GET", "http://host:8080/a", 200)));
    }

    #[test]
    fn test_unknown_key_is_free_text_with_colon() {
        let atom = compile_token("https://api", &settings()).unwrap();
        assert!(matches!(atom, Atom::FreeText { .. }));
        assert!(atom.matches(&row(1, "GET", "https://api.test/v1", 200)));
        assert!(!atom.matches(&row(1, "GET", "http://api.test/v1", 200)));

        let atom = compile_token("host:8080", &settings()).unwrap();
        assert!(matches!(atom, Atom::FreeText { .. }));
    }

    #[test]
    fn test_free_text_searches_every_field() {
        let atom = compile_token("get", &settings()).unwrap();
        assert!(atom.matches(&row(1, "GET", "/", 200)));
        assert!(atom.matches(&row(1, "POST", "/widgets/get", 200)));
        assert!(!atom.matches(&row(1, "POST", "/", 200)));

        let atom = compile_token("404", &settings()).unwrap();
        assert!(atom.matches(&row(1, "GET", "/", 404)));

        let atom = compile_token("42", &settings()).unwrap();
        assert!(atom.matches(&row(42, "GET", "/", 200)));
    }

    #[test]
    fn test_invalid_pattern_is_dropped() {
        assert!(matches!(
            compile_token("url:[", &settings()),
            Err(AtomError::InvalidPattern { .. })
        ));
        assert!(matches!(
            compile_token("(unclosed", &settings()),
            Err(AtomError::InvalidPattern { .. })
        ));
    }
}
