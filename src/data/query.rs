//! Parameterized queries against the elements endpoint
//!
//! Each query maps to exactly one query-string parameter. Values are forwarded
//! as given: range checks on period and group are left to the server.

use std::fmt;

/// A single-parameter query understood by the elements endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementQuery {
    /// One element by chemical symbol
    Symbol(String),
    /// One element by atomic number
    Number(u32),
    /// Every element in a category, e.g. "noble-gas"
    Category(String),
    /// Every element in a period (1-7 expected)
    Period(u8),
    /// Every element in a group (1-18 expected)
    Group(u8),
}

impl ElementQuery {
    /// Query-string parameter name
    pub fn param(&self) -> &'static str {
        match self {
            ElementQuery::Symbol(_) => "symbol",
            ElementQuery::Number(_) => "number",
            ElementQuery::Category(_) => "category",
            ElementQuery::Period(_) => "period",
            ElementQuery::Group(_) => "group",
        }
    }

    /// Query-string parameter value, unencoded
    pub fn value(&self) -> String {
        match self {
            ElementQuery::Symbol(s) | ElementQuery::Category(s) => s.clone(),
            ElementQuery::Number(n) => n.to_string(),
            ElementQuery::Period(n) | ElementQuery::Group(n) => n.to_string(),
        }
    }

    /// The `(name, value)` pair to append to the endpoint URL
    pub fn pair(&self) -> (&'static str, String) {
        (self.param(), self.value())
    }

    /// Message used when this query fails
    pub fn failure_context(&self) -> String {
        match self {
            ElementQuery::Symbol(s) => format!("Element {} not found", s),
            ElementQuery::Number(n) => format!("Element with number {} not found", n),
            ElementQuery::Category(c) => format!("Failed to fetch category {}", c),
            ElementQuery::Period(p) => format!("Failed to fetch period {}", p),
            ElementQuery::Group(g) => format!("Failed to fetch group {}", g),
        }
    }
}

impl fmt::Display for ElementQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.param(), self.value())
    }
}

/// Failure message for the unparameterized full-dataset request
pub(crate) const FETCH_ALL_CONTEXT: &str = "Failed to fetch elements";
