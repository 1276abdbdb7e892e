//! Data models for the quill-link client library.
//!
//! Defines the result-item tags, decoded value shapes, and the document
//! node model shared between the connection seam and the decode path.

pub mod decoded_value;
pub mod doc_node;
pub mod item_tag;
pub mod node_format;

pub use decoded_value::DecodedValue;
pub use doc_node::DocNode;
pub use item_tag::ItemTag;
pub use node_format::NodeFormat;
