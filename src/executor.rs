//! Query execution engine with transparent retry.
//!
//! [`QueryExecutor`] orchestrates one execution: acquire a statement, submit
//! the query text, hand the result sequence to a handler, release both
//! handles, return the handler's typed output.  Transport failures are
//! retried with a fixed delay up to the configured bound; decode failures
//! abort immediately.  Statement and sequence are released on every exit
//! path, and release errors are logged, never propagated.
//!
//! One statement/sequence pair is in flight per call; attempts and items are
//! never parallelized.  Callers needing cancellation wrap the call in their
//! own timeout (e.g. `tokio::time::timeout`).

use log::{debug, warn};
use std::time::Instant;

use crate::connection::{Connection, ResultSequence, SequenceOf, Statement};
use crate::error::{DecodeError, HandleError, QueryFailure, Result};
use crate::handlers::{DecodeStrings, DecodeValues, ResultHandler};
use crate::models::DecodedValue;
use crate::query::Query;
use crate::retry::RetryPolicy;

/// Executes [`Query`] instances against a connection and decodes the results.
///
/// Includes the retry logic that rides out transient transport failures (a
/// server rebooting mid-query, for example).  The connection itself is an
/// external collaborator: the executor only opens and closes statements on
/// top of it.
///
/// Configuration is fixed at construction; a shared executor is safe to use
/// from concurrent callers.
///
/// # Examples
///
/// ```rust,ignore
/// use quill_link::{Query, QueryExecutor, RetryPolicy};
///
/// let executor = QueryExecutor::with_policy(transport, RetryPolicy::fast());
///
/// let count = executor.execute_int(&Query::new("count(//chapter)")).await?;
/// let titles = executor.execute_strings(&Query::new("//chapter/title")).await?;
/// ```
pub struct QueryExecutor<C: Connection> {
    connection: C,
    policy: RetryPolicy,
}

impl<C: Connection> QueryExecutor<C> {
    /// Create an executor with the default [`RetryPolicy`].
    pub fn new(connection: C) -> Self {
        Self {
            connection,
            policy: RetryPolicy::default(),
        }
    }

    /// Create an executor with a custom [`RetryPolicy`].
    pub fn with_policy(connection: C, policy: RetryPolicy) -> Self {
        Self { connection, policy }
    }

    /// The configured retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// The underlying connection.
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Consume the executor, returning the connection.
    pub fn into_connection(self) -> C {
        self.connection
    }

    /// Execute `query` and fold the result sequence with `handler`.
    ///
    /// Returns the handler's typed output, or [`QueryFailure`] once retries
    /// are exhausted or a non-retryable failure is hit.
    pub async fn execute_with<H>(&self, query: &Query, handler: &H) -> Result<H::Output>
    where
        H: ResultHandler<SequenceOf<C>>,
    {
        let text = query.to_string();
        let preview = preview(&text);
        let total = self.policy.attempts();
        let mut attempts_left = total;
        let overall_start = Instant::now();

        loop {
            let attempt = total - attempts_left + 1;
            debug!(
                "[LINK_EXEC] executing (attempt {}/{}): \"{}\"",
                attempt, total, preview
            );

            match self.attempt(&text, query, handler).await {
                Ok(output) => {
                    debug!(
                        "[LINK_EXEC] success: attempts={} total_ms={}",
                        attempt,
                        overall_start.elapsed().as_millis()
                    );
                    return Ok(output);
                }
                Err(HandleError::Decode(cause)) => {
                    return Err(QueryFailure::decode(query, cause));
                }
                Err(HandleError::Transport(cause)) => {
                    attempts_left -= 1;
                    warn!(
                        "[LINK_RETRY] transport problem ({}): retries left: {}",
                        cause, attempts_left
                    );
                    if attempts_left == 0 {
                        return Err(QueryFailure::giving_up(query, total, cause));
                    }
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
            }
        }
    }

    /// One attempt: statement acquisition through handler completion, with
    /// both handles released on every exit path.
    async fn attempt<H>(&self, text: &str, query: &Query, handler: &H) -> std::result::Result<H::Output, HandleError>
    where
        H: ResultHandler<SequenceOf<C>>,
    {
        let mut stmt = self.connection.create_statement().await?;
        let outcome = match stmt.execute_query(text).await {
            Ok(mut seq) => {
                let out = handler.handle(query, &mut seq).await;
                if let Err(e) = seq.close().await {
                    warn!("[LINK_EXEC] could not close result sequence: {}", e);
                }
                out
            }
            Err(e) => Err(e.into()),
        };
        if let Err(e) = stmt.close().await {
            warn!("[LINK_EXEC] could not close statement: {}", e);
        }
        outcome
    }

    /// Execute `query` and return every item as a [`DecodedValue`], in
    /// emission order.
    pub async fn execute(&self, query: &Query) -> Result<Vec<DecodedValue>> {
        self.execute_with(query, &DecodeValues).await
    }

    /// Execute `query` and return every item as a string.
    ///
    /// Node items are coerced to their serialized text; any other non-string
    /// item fails the execution.
    pub async fn execute_strings(&self, query: &Query) -> Result<Vec<String>> {
        self.execute_with(query, &DecodeStrings).await
    }

    /// Execute `query` and return the first item as a string.
    ///
    /// Fails with [`DecodeError::EmptyResult`] when the sequence yields
    /// nothing.
    pub async fn execute_string(&self, query: &Query) -> Result<String> {
        let mut strings = self.execute_strings(query).await?;
        if strings.is_empty() {
            return Err(QueryFailure::decode(query, DecodeError::EmptyResult));
        }
        Ok(strings.remove(0))
    }

    /// Execute `query` and return the first item as an integer.
    ///
    /// Fails with [`DecodeError::TypeMismatch`] when the first item is not
    /// integer-typed, and [`DecodeError::EmptyResult`] when the sequence
    /// yields nothing.
    pub async fn execute_int(&self, query: &Query) -> Result<i64> {
        match self.execute(query).await?.into_iter().next() {
            Some(DecodedValue::Integer(n)) => Ok(n),
            Some(other) => Err(QueryFailure::decode(
                query,
                DecodeError::TypeMismatch {
                    expected: "integer",
                    found: other.kind(),
                },
            )),
            None => Err(QueryFailure::decode(query, DecodeError::EmptyResult)),
        }
    }

    /// Execute `query` and return the first item as a boolean.
    ///
    /// Fails with [`DecodeError::TypeMismatch`] when the first item is not
    /// boolean-typed, and [`DecodeError::EmptyResult`] when the sequence
    /// yields nothing.
    pub async fn execute_boolean(&self, query: &Query) -> Result<bool> {
        match self.execute(query).await?.into_iter().next() {
            Some(DecodedValue::Boolean(b)) => Ok(b),
            Some(other) => Err(QueryFailure::decode(
                query,
                DecodeError::TypeMismatch {
                    expected: "boolean",
                    found: other.kind(),
                },
            )),
            None => Err(QueryFailure::decode(query, DecodeError::EmptyResult)),
        }
    }
}

/// Single-line query preview for log records.
fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > 80 {
        let cut: String = flat.chars().take(80).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}
