//! Content tree
//!
//! Nodes are stored by id; links go both ways through [`Node::parent`] and
//! [`Node::children`].

use rustc_hash::FxHashMap;

use crate::error::{DomError, DomResult};
use crate::node::{ElementData, IntrinsicSize, Node, NodeId, NodeType};

/// Owns every node of one document
#[derive(Debug)]
pub struct DomTree {
    nodes: FxHashMap<NodeId, Node>,
    next_id: u32,
    document_id: NodeId,
}

impl DomTree {
    /// A tree holding only the document node
    pub fn new() -> Self {
        let document_id = NodeId::new(0);
        let mut nodes = FxHashMap::default();
        nodes.insert(document_id, Node::new(document_id, NodeType::Document));

        Self {
            nodes,
            next_id: 1,
            document_id,
        }
    }

    pub fn document_id(&self) -> NodeId {
        self.document_id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    fn insert(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, node_type));
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: impl Into<String>) -> NodeId {
        self.insert(NodeType::Element(ElementData::new(tag_name)))
    }

    /// Create a detached replaced element (image, media) with a natural size
    pub fn create_replaced(&mut self, tag_name: impl Into<String>, width: f32, height: f32) -> NodeId {
        let mut element = ElementData::new(tag_name);
        element.intrinsic_size = Some(IntrinsicSize::new(width, height));
        self.insert(NodeType::Element(element))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.insert(NodeType::Text(content.into()))
    }

    /// Attach `child_id` as the last child of `parent_id`.
    ///
    /// Text nodes take no children and a node is attached at most once.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) -> DomResult<()> {
        let parent = self.get(parent_id).ok_or(DomError::NodeNotFound(parent_id.0))?;
        if parent.is_text() {
            return Err(DomError::TextHasNoChildren(parent_id.0));
        }

        let child = self.get_mut(child_id).ok_or(DomError::NodeNotFound(child_id.0))?;
        if child.parent.is_some() {
            return Err(DomError::AlreadyAttached { child: child_id.0 });
        }
        child.parent = Some(parent_id);

        let parent = self.get_mut(parent_id).ok_or(DomError::NodeNotFound(parent_id.0))?;
        parent.children.push(child_id);
        log::trace!("appended {} to {}", child_id, parent_id);
        Ok(())
    }

    pub fn append_element(&mut self, parent_id: NodeId, tag_name: impl Into<String>) -> DomResult<NodeId> {
        let id = self.create_element(tag_name);
        self.append_child(parent_id, id)?;
        Ok(id)
    }

    pub fn append_text(&mut self, parent_id: NodeId, content: impl Into<String>) -> DomResult<NodeId> {
        let id = self.create_text(content);
        self.append_child(parent_id, id)?;
        Ok(id)
    }

    /// Children of `id` in document order; empty for unknown ids
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id).map(|n| n.children.to_vec()).unwrap_or_default()
    }

    /// Descendants of `id` in pre-order, not including `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            result.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        result
    }

    /// First descendant of the document, in pre-order, matching `pred`
    pub fn find_first(&self, pred: impl Fn(&Node) -> bool) -> Option<NodeId> {
        self.descendants(self.document_id)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(&pred))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Only the document node is present
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
