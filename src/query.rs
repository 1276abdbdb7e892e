//! Query value: the expression text, an optional supporting module, and the
//! caller's node-format preference.

use std::fmt;

use crate::models::NodeFormat;

/// Reference to a server-side library module a query depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
    /// Location the module is loaded from.
    pub path: String,
    /// Namespace the module's functions live in.
    pub namespace: String,
}

impl ModuleRef {
    /// Create a module reference.
    pub fn new(path: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
        }
    }
}

/// A query expression to execute against the server.
///
/// Immutable once constructed, except for the node-format preference, which
/// is consulted only at decode time. Safe to reuse across executions.
///
/// The textual form submitted to the server is produced by `Display`: with a
/// module reference it is an import preamble followed by the expression,
/// otherwise the expression verbatim.
///
/// # Examples
///
/// ```rust
/// use quill_link::{NodeFormat, Query};
///
/// let q = Query::new("count(//chapter)");
/// assert_eq!(q.to_string(), "count(//chapter)");
///
/// let q = Query::with_module("prettyprint('1234567')", "format.qml", "http://quilldb.io/format")
///     .nodes_as(NodeFormat::Json);
/// assert_eq!(
///     q.to_string(),
///     "import module 'http://quilldb.io/format' at 'format.qml' prettyprint('1234567')"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: String,
    module: Option<ModuleRef>,
    nodes_as: NodeFormat,
}

impl Query {
    /// Create a query from an expression.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            module: None,
            nodes_as: NodeFormat::default(),
        }
    }

    /// Create a query that imports a library module before the expression.
    pub fn with_module(
        text: impl Into<String>,
        path: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            module: Some(ModuleRef::new(path, namespace)),
            nodes_as: NodeFormat::default(),
        }
    }

    /// The bare expression, without any import preamble.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The module reference, if any.
    pub fn module(&self) -> Option<&ModuleRef> {
        self.module.as_ref()
    }

    /// Representation node items are decoded into.
    pub fn node_format(&self) -> NodeFormat {
        self.nodes_as
    }

    /// Set the representation node items are decoded into.
    pub fn set_node_format(&mut self, format: NodeFormat) {
        self.nodes_as = format;
    }

    /// Builder-style variant of [`set_node_format`](Self::set_node_format).
    pub fn nodes_as(mut self, format: NodeFormat) -> Self {
        self.nodes_as = format;
        self
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(
                f,
                "import module '{}' at '{}' {}",
                module.namespace, module.path, self.text
            ),
            None => f.write_str(&self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_query_renders_verbatim() {
        let q = Query::new("1+1 = 2");
        assert_eq!(q.to_string(), "1+1 = 2");
    }

    #[test]
    fn test_module_query_renders_import_preamble() {
        let q = Query::with_module(
            "prettyprint('1234567', true())",
            "format-conversions.qml",
            "http://quilldb.io/format",
        );
        assert_eq!(
            q.to_string(),
            "import module 'http://quilldb.io/format' at 'format-conversions.qml' \
             prettyprint('1234567', true())"
        );
    }

    #[test]
    fn test_node_format_defaults_to_text() {
        let mut q = Query::new("//chapter");
        assert_eq!(q.node_format(), NodeFormat::Text);
        q.set_node_format(NodeFormat::Tree);
        assert_eq!(q.node_format(), NodeFormat::Tree);
    }
}
