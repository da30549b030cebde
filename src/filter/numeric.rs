/// Comparison operator accepted in front of a numeric field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Ge,
    Le,
    Gt,
    Lt,
}

/// Two-character operators come first so `>=` is never read as `>` then `=`.
const OPERATOR_PREFIXES: [(&str, CompareOp); 4] = [
    (">=", CompareOp::Ge),
    ("<=", CompareOp::Le),
    (">", CompareOp::Gt),
    ("<", CompareOp::Lt),
];

impl CompareOp {
    pub fn apply(self, actual: i64, target: i64) -> bool {
        match self {
            CompareOp::Ge => actual >= target,
            CompareOp::Le => actual <= target,
            CompareOp::Gt => actual > target,
            CompareOp::Lt => actual < target,
        }
    }
}

/// An explicit numeric comparison such as `>=500`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericComparison {
    pub op: CompareOp,
    pub target: i32,
}

impl NumericComparison {
    /// Parse an operator-prefixed integer.
    ///
    /// Returns `None` when there is no operator or the remainder is not a
    /// base-10 integer, leaving the caller to fall back to pattern matching.
    pub fn parse(value: &str) -> Option<Self> {
        let (op, rest) = OPERATOR_PREFIXES
            .iter()
            .find_map(|(prefix, op)| value.strip_prefix(*prefix).map(|rest| (*op, rest)))?;

        let target = rest.trim().parse::<i32>().ok()?;
        Some(Self { op, target })
    }

    pub fn matches(&self, actual: i64) -> bool {
        self.op.apply(actual, i64::from(self.target))
    }
}
