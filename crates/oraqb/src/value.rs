//! Filter values as supplied by the hosting framework.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer value, inlined without quotes.
    Integer(i64),
    /// Floating point value, inlined without quotes when finite.
    Float(f64),
    /// Text value, always quote-escaped.
    Text(String),
}

impl Scalar {
    /// Text form of the value, used for LIKE patterns and list members.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Borrow the value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// The value side of a filter clause: a scalar, or a list for `is_in` / `is_not_in`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl FilterValue {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(s.into()))
    }

    /// Create a list of text values.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Scalar::Text(s.into())).collect())
    }

    /// Borrow the scalar, if this is not a list.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::Text(s))
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Integer(n))
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Scalar(Scalar::Integer(i64::from(n)))
    }
}

impl From<f64> for FilterValue {
    fn from(x: f64) -> Self {
        Self::Scalar(Scalar::Float(x))
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        Self::list(items)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(items: Vec<&str>) -> Self {
        Self::list(items)
    }
}
