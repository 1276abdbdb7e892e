//! Connection seam between the execution engine and a concrete transport.
//!
//! The engine never talks to the network itself.  It consumes a narrow
//! protocol surface — connection, statement, result sequence — expressed as
//! traits here and implemented by transport crates (or by test doubles):
//!
//! - a [`Connection`] owns the network session and hands out statements
//! - a [`Statement`] is a server-side handle bound to one query execution
//! - a [`ResultSequence`] is the forward-only, lazily advanced stream of
//!   tagged items produced by that execution
//!
//! Every fallible operation on this surface fails with [`TransportError`],
//! which is what makes it retryable from the engine's point of view.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;

use crate::models::{DocNode, ItemTag};

/// Transport-level failure: a connection, statement, or result-stream I/O
/// problem. The engine treats these as transient and retries them up to the
/// configured bound; everything else fails fast.
#[derive(Debug, Clone)]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Create a transport error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::new(err.to_string())
    }
}

/// An open session against a query server.
///
/// The connection's lifetime (dialing, authentication, teardown) is entirely
/// the implementor's responsibility; the engine only opens and closes
/// statements on top of an already-open connection.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Statement handle type produced by this connection.
    type Stmt: Statement;

    /// Acquire a fresh statement handle.
    async fn create_statement(&self) -> Result<Self::Stmt, TransportError>;
}

/// A server-side handle bound to one query execution.
#[async_trait]
pub trait Statement: Send {
    /// Result sequence type produced by this statement.
    type Seq: ResultSequence;

    /// Submit the query text and return the resulting item stream.
    async fn execute_query(&mut self, text: &str) -> Result<Self::Seq, TransportError>;

    /// Release the server-side handle. Best-effort: the engine logs a close
    /// failure and discards it.
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Forward-only, lazily advanced stream of tagged result items.
///
/// The cursor protocol mirrors the wire: call [`has_next`](Self::has_next),
/// then [`advance`](Self::advance) to move onto the item, then read its tag
/// and exactly one matching accessor. Once advanced past an item it cannot
/// be re-read. Accessors may touch the network (values are fetched lazily)
/// and therefore fail with [`TransportError`].
#[async_trait]
pub trait ResultSequence: Send {
    /// Whether another item is available.
    async fn has_next(&mut self) -> Result<bool, TransportError>;

    /// Move the cursor onto the next item.
    async fn advance(&mut self) -> Result<(), TransportError>;

    /// Type tag of the current item. Only valid after a successful
    /// [`advance`](Self::advance).
    fn item_tag(&self) -> ItemTag;

    /// Current item as a boolean. Valid for [`ItemTag::Boolean`].
    fn as_bool(&self) -> Result<bool, TransportError>;

    /// Current item as a UTC timestamp. Valid for [`ItemTag::Date`],
    /// [`ItemTag::DateTime`], and [`ItemTag::Time`].
    fn as_datetime(&self) -> Result<DateTime<Utc>, TransportError>;

    /// Current item as a double. Valid for [`ItemTag::Double`] and
    /// [`ItemTag::Float`].
    fn as_double(&self) -> Result<f64, TransportError>;

    /// Current item as an integer. Valid for [`ItemTag::Integer`] and
    /// [`ItemTag::Decimal`] (the server truncates the fractional part).
    fn as_integer(&self) -> Result<i64, TransportError>;

    /// Current item as a string. Valid for [`ItemTag::String`].
    fn as_string(&self) -> Result<String, TransportError>;

    /// Serialized text of the current node item. Valid for [`ItemTag::Node`].
    fn node_text(&self) -> Result<String, TransportError>;

    /// Native tree of the current node item, already built by the transport.
    /// Valid for [`ItemTag::Node`].
    fn node_tree(&self) -> Result<DocNode, TransportError>;

    /// Release the stream. Best-effort: the engine logs a close failure and
    /// discards it.
    async fn close(&mut self) -> Result<(), TransportError>;
}

/// Result sequence type reachable through a connection's statement type.
pub type SequenceOf<C> = <<C as Connection>::Stmt as Statement>::Seq;
