use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime type tag carried by each item in a result sequence.
///
/// The server annotates every emitted item with one of these tags; exactly
/// one accessor on [`ResultSequence`](crate::connection::ResultSequence) is
/// valid for the current item, matching its tag.
///
/// `Decimal` items are served through the integer accessor (the server
/// truncates the fractional part); there is no dedicated decimal accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemTag {
    /// Boolean value
    Boolean,
    /// Calendar date
    Date,
    /// Date with time of day
    DateTime,
    /// Time of day
    Time,
    /// 64-bit floating point
    Double,
    /// 32-bit floating point
    Float,
    /// Fixed-point decimal (read through the integer accessor)
    Decimal,
    /// 64-bit signed integer
    Integer,
    /// Document-fragment node
    Node,
    /// UTF-8 string
    String,
    /// Raw binary value
    Binary,
    /// Day/time duration
    Duration,
}

impl ItemTag {
    /// Lowercase tag name as it appears in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ItemTag::Boolean => "boolean",
            ItemTag::Date => "date",
            ItemTag::DateTime => "dateTime",
            ItemTag::Time => "time",
            ItemTag::Double => "double",
            ItemTag::Float => "float",
            ItemTag::Decimal => "decimal",
            ItemTag::Integer => "integer",
            ItemTag::Node => "node",
            ItemTag::String => "string",
            ItemTag::Binary => "binary",
            ItemTag::Duration => "duration",
        }
    }
}

impl fmt::Display for ItemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
