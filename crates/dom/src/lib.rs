//! Lintel DOM - content tree
//!
//! The element/text tree consumed by the layout engine. Markup parsing is
//! left to the embedding application; trees are built through [`DomTree`].

mod node;
mod tree;
mod error;

pub use node::{Node, NodeId, NodeType, ElementData, IntrinsicSize};
pub use tree::DomTree;
pub use error::{DomError, DomResult};
