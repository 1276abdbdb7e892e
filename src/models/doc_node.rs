use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document-fragment node as modeled by the wire protocol.
///
/// This is the tree handle the transport hands over for node-tagged items:
/// the transport builds it while reading the response, so obtaining it never
/// costs an extra parse. For a generic JSON view of the same fragment, decode
/// with [`NodeFormat::Json`](crate::models::NodeFormat) instead.
///
/// # Example JSON
///
/// ```json
/// {"name": "chapter", "attrs": {"id": "1"}, "children": ["Loomings."]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocNode {
    /// Text content.
    Text(String),
    /// Element with a name, attributes, and ordered children.
    Element {
        name: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<DocNode>,
    },
}

impl DocNode {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        DocNode::Text(content.into())
    }

    /// Create an element with no attributes or children.
    pub fn element(name: impl Into<String>) -> Self {
        DocNode::Element {
            name: name.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Element name, or `None` for a text node.
    pub fn name(&self) -> Option<&str> {
        match self {
            DocNode::Text(_) => None,
            DocNode::Element { name, .. } => Some(name),
        }
    }

    /// Child nodes (empty for a text node).
    pub fn children(&self) -> &[DocNode] {
        match self {
            DocNode::Text(_) => &[],
            DocNode::Element { children, .. } => children,
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            DocNode::Text(_) => None,
            DocNode::Element { attrs, .. } => attrs.get(name).map(String::as_str),
        }
    }

    /// Concatenated text of this node and all descendants, in document order.
    pub fn text_content(&self) -> String {
        fn walk(node: &DocNode, out: &mut String) {
            match node {
                DocNode::Text(text) => out.push_str(text),
                DocNode::Element { children, .. } => {
                    for child in children {
                        walk(child, out);
                    }
                }
            }
        }
        let mut out = String::new();
        walk(self, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_element_with_defaults() {
        let node: DocNode = serde_json::from_str(r#"{"name": "quux"}"#).unwrap();
        assert_eq!(node.name(), Some("quux"));
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let json = r#"{"name":"chapter","attrs":{"id":"1"},"children":["Loomings."]}"#;
        let node: DocNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.attr("id"), Some("1"));
        assert_eq!(serde_json::to_string(&node).unwrap(), json);
    }

    #[test]
    fn test_text_content_walks_descendants() {
        let node: DocNode = serde_json::from_str(
            r#"{"name":"a","children":[{"name":"b","children":["x"]},"y"]}"#,
        )
        .unwrap();
        assert_eq!(node.text_content(), "xy");
    }
}
