use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::doc_node::DocNode;

/// A fully decoded result item.
///
/// One `DecodedValue` is produced per item in the server's result sequence,
/// in emission order. Which variant a node item becomes is controlled by the
/// query's [`NodeFormat`](crate::models::NodeFormat).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecodedValue {
    /// Boolean item
    Boolean(bool),
    /// Date, dateTime, or time item
    DateTime(DateTime<Utc>),
    /// Double or float item
    Double(f64),
    /// Integer item (decimal items are coerced here, fractional part dropped)
    Integer(i64),
    /// String item
    String(String),
    /// Node item decoded as the transport's native tree
    Node(DocNode),
    /// Node item re-parsed into generic JSON
    Json(JsonValue),
}

impl DecodedValue {
    /// Value kind name used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodedValue::Boolean(_) => "boolean",
            DecodedValue::DateTime(_) => "dateTime",
            DecodedValue::Double(_) => "double",
            DecodedValue::Integer(_) => "integer",
            DecodedValue::String(_) => "string",
            DecodedValue::Node(_) => "node",
            DecodedValue::Json(_) => "json",
        }
    }

    /// Boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DecodedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// String payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::String(s) => Some(s),
            _ => None,
        }
    }
}
