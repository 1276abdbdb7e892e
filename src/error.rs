//! Error types for quill-link.
//!
//! Failures are layered the way the engine reasons about them:
//!
//! - [`TransportError`](crate::connection::TransportError) — wire-level
//!   problems raised by the connection seam; transient, retried by the engine
//! - [`DecodeError`] — type-dispatch and parse problems raised while folding
//!   a result sequence; never retried
//! - [`HandleError`] — what a [`ResultHandler`](crate::handlers::ResultHandler)
//!   raises: one of the two above, which is how the engine decides between
//!   retrying and failing fast
//! - [`QueryFailure`] — the single user-visible failure, carrying the
//!   offending query text and the underlying cause

use std::fmt;

use crate::connection::TransportError;
use crate::models::ItemTag;
use crate::query::Query;

/// Result type for quill-link operations.
pub type Result<T> = std::result::Result<T, QueryFailure>;

/// Decode-time failure. Non-retryable: retrying the query would produce the
/// same item stream and fail the same way.
#[derive(Debug, Clone)]
pub enum DecodeError {
    /// The generic decode path met a tag it has no mapping for.
    UnexpectedType(ItemTag),

    /// The strings-only decode path met a tag not coercible to a string.
    NonStringType(ItemTag),

    /// A single-value operation found a first item of the wrong kind.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A single-value operation found an empty sequence.
    EmptyResult,

    /// Secondary parse of a node's serialized text failed.
    MalformedDocument(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedType(tag) => write!(f, "got unexpected item type: {}", tag),
            DecodeError::NonStringType(tag) => write!(f, "got non-string item type: {}", tag),
            DecodeError::TypeMismatch { expected, found } => {
                write!(f, "expected {} result, got {}", expected, found)
            }
            DecodeError::EmptyResult => write!(f, "got empty result"),
            DecodeError::MalformedDocument(msg) => write!(f, "malformed document: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Failure raised by a result handler while consuming a sequence.
///
/// The variant is the retry decision: `Transport` flows back into the
/// engine's retry loop, `Decode` aborts the execution immediately.
#[derive(Debug)]
pub enum HandleError {
    /// Wire-level problem while advancing or reading the sequence.
    Transport(TransportError),
    /// Type-dispatch or parse problem; retrying cannot help.
    Decode(DecodeError),
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleError::Transport(e) => write!(f, "transport problem: {}", e),
            HandleError::Decode(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for HandleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandleError::Transport(e) => Some(e),
            HandleError::Decode(e) => Some(e),
        }
    }
}

impl From<TransportError> for HandleError {
    fn from(err: TransportError) -> Self {
        HandleError::Transport(err)
    }
}

impl From<DecodeError> for HandleError {
    fn from(err: DecodeError) -> Self {
        HandleError::Decode(err)
    }
}

/// Why a query execution ultimately failed.
#[derive(Debug)]
pub enum FailureKind {
    /// Retries exhausted; `cause` is the last transport error observed.
    GivingUp {
        attempts: u32,
        cause: TransportError,
    },
    /// A non-retryable decode failure.
    Decode(DecodeError),
}

/// The single failure value callers observe from the engine.
///
/// Carries the textual form of the offending query alongside the cause. No
/// partial results accompany it: an execution yields either a fully decoded
/// result or this.
#[derive(Debug)]
pub struct QueryFailure {
    query: String,
    kind: FailureKind,
}

impl QueryFailure {
    pub(crate) fn giving_up(query: &Query, attempts: u32, cause: TransportError) -> Self {
        Self {
            query: query.to_string(),
            kind: FailureKind::GivingUp { attempts, cause },
        }
    }

    pub(crate) fn decode(query: &Query, cause: DecodeError) -> Self {
        Self {
            query: query.to_string(),
            kind: FailureKind::Decode(cause),
        }
    }

    /// Textual form of the query that failed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The underlying cause.
    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// True when the failure came from exhausting transport retries.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, FailureKind::GivingUp { .. })
    }
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FailureKind::GivingUp { attempts, cause } => write!(
                f,
                "giving up on query after {} attempt(s) ({}): {}",
                attempts, cause, self.query
            ),
            FailureKind::Decode(cause) => write!(f, "{}: {}", cause, self.query),
        }
    }
}

impl std::error::Error for QueryFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            FailureKind::GivingUp { cause, .. } => Some(cause),
            FailureKind::Decode(cause) => Some(cause),
        }
    }
}
