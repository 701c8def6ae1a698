//! Typed queries against a [`SeriesBuffer`](crate::SeriesBuffer).

use serde_json::Value;

use crate::error::LagerError;

/// What to read out of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// One full row of the underlying buffer. Negative indexes count from
    /// the end of the buffer's capacity, not from the last valid sample.
    Row(isize),
    /// Every valid sample of one label, in insertion order.
    Label(String),
}

impl From<isize> for Query {
    fn from(index: isize) -> Self {
        Query::Row(index)
    }
}

/// Indexes past `isize::MAX` saturate, so they still fail the range check.
impl From<usize> for Query {
    fn from(index: usize) -> Self {
        Query::Row(isize::try_from(index).unwrap_or(isize::MAX))
    }
}

impl From<i32> for Query {
    fn from(index: i32) -> Self {
        Query::Row(index as isize)
    }
}

impl From<&str> for Query {
    fn from(label: &str) -> Self {
        Query::Label(label.to_string())
    }
}

impl From<String> for Query {
    fn from(label: String) -> Self {
        Query::Label(label)
    }
}

/// Queries arriving as untyped JSON (e.g. from a config file or a REPL).
/// Only integers and strings are meaningful.
impl TryFrom<Value> for Query {
    type Error = LagerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(label) => Ok(Query::Label(label)),
            Value::Number(n) => n
                .as_i64()
                .and_then(|i| isize::try_from(i).ok())
                .map(Query::Row)
                .ok_or_else(|| LagerError::InvalidQuery(format!("not an integer index: {n}"))),
            other => Err(LagerError::InvalidQuery(format!(
                "unsupported query type: {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
