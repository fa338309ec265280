use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::Result;
use crate::predicate::Predicate;

/// A string-level matching rule.
///
/// Testers are the leaves of every name predicate: [`of_basename`] and
/// friends extract one substring from a path and run it through the
/// disjunction of the testers they were built with. Three forms exist:
///
/// - **Literal** — matches on exact string equality.
/// - **Pattern** — matches when a [`Regex`] finds the string.
/// - **Function** — an arbitrary, possibly failing check over `&str`.
///
/// `&str`, `String` and [`Regex`] convert into a tester directly, so call
/// sites usually never name this type:
///
/// ```rust
/// use pathseek::of_basename;
/// use regex::Regex;
///
/// let exact = of_basename(["Cargo.toml"]);
/// let pattern = of_basename([Regex::new(r"^invoice_").unwrap()]);
/// ```
///
/// [`of_basename`]: crate::of_basename
#[derive(Clone)]
pub enum Tester {
    /// Exact string equality.
    Literal(String),
    /// Regular-expression match (unanchored, like `Regex::is_match`).
    Pattern(Regex),
    /// Arbitrary check. An `Err` aborts the enclosing evaluation.
    Function(Arc<dyn Fn(&str) -> Result<bool> + Send + Sync>),
}

impl Tester {
    /// Tester matching exactly `literal`.
    pub fn literal(literal: impl Into<String>) -> Self {
        Self::Literal(literal.into())
    }

    /// Tester matching wherever `pattern` finds the string.
    pub fn pattern(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }

    /// Tester delegating to an arbitrary function.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<bool> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Run this tester against a string.
    pub fn matches(&self, value: &str) -> Result<bool> {
        match self {
            Self::Literal(s) => Ok(s == value),
            Self::Pattern(re) => Ok(re.is_match(value)),
            Self::Function(f) => f(value),
        }
    }
}

impl Predicate<str> for Tester {
    fn test(&self, value: &str) -> Result<bool> {
        self.matches(value)
    }
}

impl From<&str> for Tester {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for Tester {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<Regex> for Tester {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

impl fmt::Debug for Tester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
