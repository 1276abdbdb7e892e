//! Node decoding: one serialized document fragment, three representations.

use crate::connection::ResultSequence;
use crate::error::{DecodeError, HandleError};
use crate::models::{DecodedValue, NodeFormat};

/// Decode the sequence's current node item into the requested representation.
///
/// - [`NodeFormat::Text`] returns the serialized text verbatim.
/// - [`NodeFormat::Tree`] returns the transport's already-built tree; no
///   extra parse happens.
/// - [`NodeFormat::Json`] re-parses the serialized text. A syntax error is
///   fatal ([`DecodeError::MalformedDocument`]); a transport error while
///   reading the text is raised as such, so the engine's retry loop applies.
pub fn decode_node<S: ResultSequence>(
    seq: &S,
    format: NodeFormat,
) -> Result<DecodedValue, HandleError> {
    match format {
        NodeFormat::Text => Ok(DecodedValue::String(seq.node_text()?)),
        NodeFormat::Tree => Ok(DecodedValue::Node(seq.node_tree()?)),
        NodeFormat::Json => {
            let text = seq.node_text()?;
            let doc = serde_json::from_str(&text)
                .map_err(|e| DecodeError::MalformedDocument(e.to_string()))?;
            Ok(DecodedValue::Json(doc))
        }
    }
}
