//! Result handlers: strategies that fold a result sequence into one typed
//! output.
//!
//! A handler consumes the sequence item by item, advancing it to exhaustion
//! or failing partway (the engine discards partial output).  The two built-in
//! handlers back the typed execute operations on
//! [`QueryExecutor`](crate::executor::QueryExecutor); custom handlers plug in
//! through [`QueryExecutor::execute_with`](crate::executor::QueryExecutor::execute_with).

use async_trait::async_trait;

use crate::connection::ResultSequence;
use crate::error::{DecodeError, HandleError};
use crate::models::{DecodedValue, ItemTag};
use crate::node::decode_node;
use crate::query::Query;

/// Strategy for folding a result sequence into a typed output.
///
/// Raise [`HandleError::Transport`] for wire problems (the engine retries)
/// and [`HandleError::Decode`] for type-dispatch problems (the engine fails
/// fast).
#[async_trait]
pub trait ResultHandler<S: ResultSequence>: Send + Sync {
    /// The typed output this handler produces.
    type Output: Send;

    /// Consume the sequence and produce the output.
    async fn handle(&self, query: &Query, seq: &mut S) -> Result<Self::Output, HandleError>;
}

/// Generic handler: one [`DecodedValue`] per item, in emission order.
///
/// Node items are decoded per the query's node-format preference. Decimal
/// items come through the integer accessor with the fractional part dropped.
pub struct DecodeValues;

#[async_trait]
impl<S: ResultSequence> ResultHandler<S> for DecodeValues {
    type Output = Vec<DecodedValue>;

    async fn handle(&self, query: &Query, seq: &mut S) -> Result<Vec<DecodedValue>, HandleError> {
        let mut values = Vec::new();
        while seq.has_next().await? {
            seq.advance().await?;
            let tag = seq.item_tag();
            let value = match tag {
                ItemTag::Boolean => DecodedValue::Boolean(seq.as_bool()?),
                ItemTag::Date | ItemTag::DateTime | ItemTag::Time => {
                    DecodedValue::DateTime(seq.as_datetime()?)
                }
                ItemTag::Double | ItemTag::Float => DecodedValue::Double(seq.as_double()?),
                ItemTag::Decimal | ItemTag::Integer => DecodedValue::Integer(seq.as_integer()?),
                ItemTag::Node => decode_node(seq, query.node_format())?,
                ItemTag::String => DecodedValue::String(seq.as_string()?),
                other => return Err(DecodeError::UnexpectedType(other).into()),
            };
            values.push(value);
        }
        Ok(values)
    }
}

/// Strings-only handler: every item must be a string or a node.
///
/// Node items are coerced to their serialized text regardless of the query's
/// node-format preference; any other tag fails with
/// [`DecodeError::NonStringType`].
pub struct DecodeStrings;

#[async_trait]
impl<S: ResultSequence> ResultHandler<S> for DecodeStrings {
    type Output = Vec<String>;

    async fn handle(&self, _query: &Query, seq: &mut S) -> Result<Vec<String>, HandleError> {
        let mut strings = Vec::new();
        while seq.has_next().await? {
            seq.advance().await?;
            let tag = seq.item_tag();
            let value = match tag {
                ItemTag::Node => seq.node_text()?,
                ItemTag::String => seq.as_string()?,
                other => return Err(DecodeError::NonStringType(other).into()),
            };
            strings.push(value);
        }
        Ok(strings)
    }
}
