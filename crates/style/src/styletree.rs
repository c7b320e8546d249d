//! Style Tree
//!
//! Map from content nodes to their resolved style.

use rustc_hash::FxHashMap;

use lintel_dom::{DomTree, Node, NodeId};

use crate::properties::parse_declaration;
use crate::{ComputedStyle, Display};

/// Default display for an element, as a user agent stylesheet would set it
pub fn default_display(tag_name: &str) -> Display {
    match tag_name.to_ascii_lowercase().as_str() {
        "html" | "body" | "div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "ol"
        | "dl" | "dt" | "dd" | "section" | "article" | "header" | "footer" | "nav" | "main"
        | "aside" | "blockquote" | "pre" | "form" | "hr" | "address" | "center" => Display::Block,
        "head" | "script" | "style" | "title" | "meta" | "link" | "template" => Display::None,
        "li" => Display::ListItem,
        "img" | "button" | "input" | "select" | "textarea" => Display::InlineBlock,
        "table" => Display::Table,
        "thead" => Display::TableHeaderGroup,
        "tbody" => Display::TableRowGroup,
        "tfoot" => Display::TableFooterGroup,
        "tr" => Display::TableRow,
        "td" | "th" => Display::TableCell,
        "caption" => Display::TableCaption,
        "col" => Display::TableColumn,
        "colgroup" => Display::TableColumnGroup,
        _ => Display::Inline,
    }
}

/// A tree of computed styles, parallel to the content tree
#[derive(Debug, Default)]
pub struct StyleTree {
    /// Map from node ID to computed style
    styles: FxHashMap<NodeId, ComputedStyle>,
    /// Style for elements that were never given one
    default_style: ComputedStyle,
}

impl StyleTree {
    /// Create a new empty style tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build styles for every element of `tree`.
    ///
    /// Each element starts from its parent's inherited properties and its
    /// tag's default display; `declare` then applies the element's own values.
    pub fn build<F>(tree: &DomTree, mut declare: F) -> Self
    where
        F: FnMut(&Node, &mut ComputedStyle),
    {
        let mut style_tree = Self::new();
        let root = ComputedStyle::with_display(Display::Block);
        style_tree.compute_styles_recursive(tree, tree.document_id(), &root, &mut declare);
        style_tree
    }

    /// Build styles from the inline `style` attributes of each element
    pub fn from_style_attributes(tree: &DomTree) -> Self {
        Self::build(tree, |node, style| {
            let Some(declarations) = node.as_element().and_then(|e| e.get_attribute("style")) else {
                return;
            };
            for declaration in declarations.split(';') {
                let Some((name, value)) = declaration.split_once(':') else {
                    continue;
                };
                for (property, value) in parse_declaration(name, value) {
                    style.set_computed_value(property, value);
                }
            }
        })
    }

    fn compute_styles_recursive<F>(
        &mut self,
        tree: &DomTree,
        node_id: NodeId,
        parent_style: &ComputedStyle,
        declare: &mut F,
    ) where
        F: FnMut(&Node, &mut ComputedStyle),
    {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match node.as_element() {
            Some(element) => {
                let mut style = ComputedStyle::inherit_from(parent_style);
                style.display = default_display(&element.tag_name);
                declare(node, &mut style);

                for child_id in tree.children(node_id) {
                    self.compute_styles_recursive(tree, child_id, &style, declare);
                }
                self.styles.insert(node_id, style);
            }
            None => {
                // text and document nodes carry no style of their own
                for child_id in tree.children(node_id) {
                    self.compute_styles_recursive(tree, child_id, parent_style, declare);
                }
            }
        }
    }

    /// Get the computed style for a node
    pub fn get_style(&self, node_id: NodeId) -> Option<&ComputedStyle> {
        self.styles.get(&node_id)
    }

    /// Computed style for a node, or the initial style if it has none
    pub fn style_or_default(&self, node_id: NodeId) -> &ComputedStyle {
        self.styles.get(&node_id).unwrap_or(&self.default_style)
    }

    /// The initial style, used for unstyled elements and the layout root frame
    pub fn default_style(&self) -> &ComputedStyle {
        &self.default_style
    }

    /// Set or replace the style of a node
    pub fn set_style(&mut self, node_id: NodeId, style: ComputedStyle) {
        self.styles.insert(node_id, style);
    }

    /// Mutable access to a node's style, inserting the initial style first
    pub fn style_mut(&mut self, node_id: NodeId) -> &mut ComputedStyle {
        self.styles.entry(node_id).or_default()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
