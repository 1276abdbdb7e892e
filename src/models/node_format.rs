use serde::{Deserialize, Serialize};

/// Representation a node item is decoded into by the generic decode path.
///
/// Consulted only at decode time; see [`Query::set_node_format`](crate::query::Query::set_node_format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeFormat {
    /// The node's serialized text, verbatim as sent by the server.
    #[default]
    Text,
    /// The transport's already-built [`DocNode`](crate::models::DocNode) tree.
    Tree,
    /// Re-parse of the serialized text into a generic [`serde_json::Value`].
    Json,
}
