#![allow(dead_code)]
//! Scripted in-memory transport for executor tests.
//!
//! A `MockConnection` is loaded with one script entry per expected attempt:
//! fail at statement creation, fail at query execution, or serve a fixed
//! list of items. The connection counts the statements it hands out, which
//! is the engine's attempt count.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use quill_link::{
    Connection, DocNode, ItemTag, ResultSequence, Statement, TransportError,
};

/// One scripted server-side item.
#[derive(Clone)]
pub enum MockItem {
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Double(f64),
    Integer(i64),
    /// Decimal-tagged; served through the integer accessor like the wire does.
    Decimal(i64),
    Str(String),
    Node {
        text: String,
        tree: DocNode,
    },
    /// Node whose serialized text cannot be read (transport error on access).
    NodeWithBrokenText {
        tree: DocNode,
    },
    Binary,
}

impl MockItem {
    pub fn str(s: &str) -> Self {
        MockItem::Str(s.to_string())
    }

    pub fn node(text: &str, tree: DocNode) -> Self {
        MockItem::Node {
            text: text.to_string(),
            tree,
        }
    }

    fn tag(&self) -> ItemTag {
        match self {
            MockItem::Bool(_) => ItemTag::Boolean,
            MockItem::Timestamp(_) => ItemTag::DateTime,
            MockItem::Double(_) => ItemTag::Double,
            MockItem::Integer(_) => ItemTag::Integer,
            MockItem::Decimal(_) => ItemTag::Decimal,
            MockItem::Str(_) => ItemTag::String,
            MockItem::Node { .. } | MockItem::NodeWithBrokenText { .. } => ItemTag::Node,
            MockItem::Binary => ItemTag::Binary,
        }
    }
}

/// Script for one execution attempt.
#[derive(Clone)]
pub enum Attempt {
    /// `create_statement` fails.
    FailCreate(&'static str),
    /// `execute_query` fails.
    FailExecute(&'static str),
    /// Execution succeeds and serves these items.
    Items(Vec<MockItem>),
}

pub struct MockConnection {
    script: Mutex<VecDeque<Attempt>>,
    statements_created: AtomicU32,
    fail_stmt_close: bool,
    fail_seq_close: bool,
}

impl MockConnection {
    pub fn new(script: Vec<Attempt>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            statements_created: AtomicU32::new(0),
            fail_stmt_close: false,
            fail_seq_close: false,
        }
    }

    /// One successful attempt serving `items`.
    pub fn single(items: Vec<MockItem>) -> Self {
        Self::new(vec![Attempt::Items(items)])
    }

    /// Make every statement and sequence close call fail.
    pub fn with_failing_closes(mut self) -> Self {
        self.fail_stmt_close = true;
        self.fail_seq_close = true;
        self
    }

    /// Number of statements handed out, i.e. attempts the engine made.
    pub fn attempts_made(&self) -> u32 {
        self.statements_created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connection for MockConnection {
    type Stmt = MockStatement;

    async fn create_statement(&self) -> Result<Self::Stmt, TransportError> {
        self.statements_created.fetch_add(1, Ordering::SeqCst);
        let attempt = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock script exhausted: more attempts than scripted");
        match attempt {
            Attempt::FailCreate(msg) => Err(TransportError::new(msg)),
            other => Ok(MockStatement {
                attempt: Some(other),
                fail_close: self.fail_stmt_close,
                fail_seq_close: self.fail_seq_close,
            }),
        }
    }
}

pub struct MockStatement {
    attempt: Option<Attempt>,
    fail_close: bool,
    fail_seq_close: bool,
}

#[async_trait]
impl Statement for MockStatement {
    type Seq = MockSequence;

    async fn execute_query(&mut self, _text: &str) -> Result<Self::Seq, TransportError> {
        match self.attempt.take().expect("statement executed twice") {
            Attempt::FailCreate(_) => unreachable!("FailCreate handled by the connection"),
            Attempt::FailExecute(msg) => Err(TransportError::new(msg)),
            Attempt::Items(items) => Ok(MockSequence {
                items: items.into_iter().collect(),
                current: None,
                fail_close: self.fail_seq_close,
            }),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.fail_close {
            Err(TransportError::new("statement close failed"))
        } else {
            Ok(())
        }
    }
}

pub struct MockSequence {
    items: VecDeque<MockItem>,
    current: Option<MockItem>,
    fail_close: bool,
}

impl MockSequence {
    fn current(&self) -> &MockItem {
        self.current.as_ref().expect("accessor before advance")
    }

    fn mismatch(&self, accessor: &str) -> TransportError {
        TransportError::new(format!(
            "accessor {} does not match item tag {}",
            accessor,
            self.current().tag()
        ))
    }
}

#[async_trait]
impl ResultSequence for MockSequence {
    async fn has_next(&mut self) -> Result<bool, TransportError> {
        Ok(!self.items.is_empty())
    }

    async fn advance(&mut self) -> Result<(), TransportError> {
        match self.items.pop_front() {
            Some(item) => {
                self.current = Some(item);
                Ok(())
            }
            None => Err(TransportError::new("advanced past end of sequence")),
        }
    }

    fn item_tag(&self) -> ItemTag {
        self.current().tag()
    }

    fn as_bool(&self) -> Result<bool, TransportError> {
        match self.current() {
            MockItem::Bool(b) => Ok(*b),
            _ => Err(self.mismatch("as_bool")),
        }
    }

    fn as_datetime(&self) -> Result<DateTime<Utc>, TransportError> {
        match self.current() {
            MockItem::Timestamp(ts) => Ok(*ts),
            _ => Err(self.mismatch("as_datetime")),
        }
    }

    fn as_double(&self) -> Result<f64, TransportError> {
        match self.current() {
            MockItem::Double(d) => Ok(*d),
            _ => Err(self.mismatch("as_double")),
        }
    }

    fn as_integer(&self) -> Result<i64, TransportError> {
        match self.current() {
            MockItem::Integer(n) | MockItem::Decimal(n) => Ok(*n),
            _ => Err(self.mismatch("as_integer")),
        }
    }

    fn as_string(&self) -> Result<String, TransportError> {
        match self.current() {
            MockItem::Str(s) => Ok(s.clone()),
            _ => Err(self.mismatch("as_string")),
        }
    }

    fn node_text(&self) -> Result<String, TransportError> {
        match self.current() {
            MockItem::Node { text, .. } => Ok(text.clone()),
            MockItem::NodeWithBrokenText { .. } => {
                Err(TransportError::new("io problem reading node text"))
            }
            _ => Err(self.mismatch("node_text")),
        }
    }

    fn node_tree(&self) -> Result<DocNode, TransportError> {
        match self.current() {
            MockItem::Node { tree, .. } | MockItem::NodeWithBrokenText { tree } => Ok(tree.clone()),
            _ => Err(self.mismatch("node_tree")),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.fail_close {
            Err(TransportError::new("sequence close failed"))
        } else {
            Ok(())
        }
    }
}
