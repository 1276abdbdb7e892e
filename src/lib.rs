//! # quill-link: QuillDB Client Library
//!
//! Client library for executing queries against QuillDB servers. Submits a
//! query expression over an open connection, rides out transient transport
//! failures with bounded retry, and decodes the server's ordered,
//! heterogeneous result stream into typed values.
//!
//! ## Features
//!
//! - **Resilient Execution**: Transparent retry with a fixed delay when the
//!   transport fails mid-query (server reboot, dropped connection)
//! - **Typed Results**: Per-item type dispatch into booleans, integers,
//!   doubles, timestamps, strings, and document nodes
//! - **Three Node Representations**: Serialized text, the transport's native
//!   tree, or a generic JSON re-parse — selected per query
//! - **Pluggable Transport**: The connection/statement/result-sequence
//!   protocol surface is a set of traits; any transport (or test double)
//!   plugs in
//! - **Pluggable Handlers**: Custom result-folding strategies via
//!   [`ResultHandler`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quill_link::{NodeFormat, Query, QueryExecutor, RetryPolicy};
//!
//! // `transport` is any `Connection` implementation.
//! let executor = QueryExecutor::with_policy(transport, RetryPolicy::default());
//!
//! // Single typed values
//! let count = executor.execute_int(&Query::new("count(//chapter)")).await?;
//! let ok = executor.execute_boolean(&Query::new("1+1 = 2")).await?;
//!
//! // Heterogeneous sequences, with node items as JSON trees
//! let query = Query::new("//chapter[1]").nodes_as(NodeFormat::Json);
//! let values = executor.execute(&query).await?;
//! ```
//!
//! ## Error Model
//!
//! Transport failures are retried up to the configured bound, then surface
//! as a single [`QueryFailure`] carrying the last underlying error and the
//! offending query text. Decode failures (unexpected item types, malformed
//! documents, empty results) are never retried. Resource release is
//! best-effort on every exit path and never masks the primary outcome.

pub mod connection;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod models;
pub mod node;
pub mod query;
pub mod retry;

// Re-export main types for convenience
pub use connection::{Connection, ResultSequence, SequenceOf, Statement, TransportError};
pub use error::{DecodeError, FailureKind, HandleError, QueryFailure, Result};
pub use executor::QueryExecutor;
pub use handlers::{DecodeStrings, DecodeValues, ResultHandler};
pub use models::{DecodedValue, DocNode, ItemTag, NodeFormat};
pub use query::{ModuleRef, Query};
pub use retry::{RetryPolicy, RetryPolicyBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
