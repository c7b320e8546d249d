//! Content nodes
//!
//! Elements, text runs and the document root. Styling is held elsewhere,
//! keyed by [`NodeId`].

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// Index of a node in a [`crate::DomTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Document,
    Element(ElementData),
    /// Uncollapsed text, as authored
    Text(String),
}

/// Natural size of a replaced element (images, media), in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntrinsicSize {
    pub width: f32,
    pub height: f32,
}

impl IntrinsicSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Tag, attributes and, for replaced content, the natural size
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Lowercased on creation
    pub tag_name: String,
    pub attributes: FxHashMap<String, String>,
    /// Set for replaced elements, whose content is not laid out as children
    pub intrinsic_size: Option<IntrinsicSize>,
}

impl ElementData {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: FxHashMap::default(),
            intrinsic_size: None,
        }
    }

    /// Attribute names are case insensitive
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into().to_ascii_lowercase(), value.into());
    }
}

/// A node and its links
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub node_type: NodeType,
    /// None for the document and for nodes not yet attached
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType) -> Self {
        Self {
            id,
            node_type,
            parent: None,
            children: SmallVec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.node_type, NodeType::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.node_type, NodeType::Text(_))
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Whether this is an element with the given tag, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|e| e.tag_name.eq_ignore_ascii_case(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_tag_is_lowercased() {
        let data = ElementData::new("BODY");
        assert_eq!(data.tag_name, "body");
    }

    #[test]
    fn test_attributes_ignore_case() {
        let mut data = ElementData::new("div");
        data.set_attribute("STYLE", "width: 10px");
        assert_eq!(data.get_attribute("style"), Some("width: 10px"));
        assert_eq!(data.get_attribute("Style"), Some("width: 10px"));
        assert_eq!(data.get_attribute("class"), None);
    }

    #[test]
    fn test_has_tag() {
        let node = Node::new(NodeId::new(1), NodeType::Element(ElementData::new("p")));
        assert!(node.has_tag("P"));
        assert!(!node.has_tag("div"));

        let text = Node::new(NodeId::new(2), NodeType::Text("p".into()));
        assert!(!text.has_tag("p"));
    }
}
