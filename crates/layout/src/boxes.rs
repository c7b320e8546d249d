//! Box Tree
//!
//! Layout boxes live in an arena and refer to each other by [`BoxId`].
//! Parent links are plain ids, so the tree owns every box exactly once.

use std::fmt;
use std::ops::{Index, IndexMut};

use lintel_dom::NodeId;
use lintel_style::{Color, Direction, TextAlign, VerticalAlign};
use smallvec::SmallVec;

use crate::fixed::FixedPoint;
use crate::float::FloatLedger;
use crate::geometry::{Dimensions, Point};
use crate::text::Line;

/// Identifier of a box in a [`BoxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(u32);

impl BoxId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoxId({})", self.0)
    }
}

/// One reflowed line of a text node, as carried by a text box
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub line: Line,
    /// Position within the owning line box
    pub offset: Point,
    pub width: FixedPoint,
    pub height: FixedPoint,
    /// Distance from the top of the box to the glyph baseline
    pub baseline: FixedPoint,
    /// Font descender, zero or negative
    pub descender: FixedPoint,
    pub color: Color,
    pub vertical_align: VerticalAlign,
}

/// Kind of layout box
#[derive(Debug, Clone, PartialEq)]
pub enum BoxKind {
    Block,
    InlineBlock,
    /// Synthetic box holding one line of inline content
    Line,
    Text(TextFragment),
    InlineElement,
    Absolute,
    Fixed,
}

impl BoxKind {
    pub fn name(&self) -> &'static str {
        match self {
            BoxKind::Block => "BlockBox",
            BoxKind::InlineBlock => "InlineBlockBox",
            BoxKind::Line => "LineBox",
            BoxKind::Text(_) => "TextBox",
            BoxKind::InlineElement => "InlineElementBox",
            BoxKind::Absolute => "AbsoluteBox",
            BoxKind::Fixed => "FixedBox",
        }
    }
}

/// A box in the layout tree
#[derive(Debug, Clone)]
pub struct LayoutBox {
    pub kind: BoxKind,
    /// Content node that generated the box; line boxes have none
    pub node: Option<NodeId>,
    pub parent: Option<BoxId>,
    pub dimensions: Dimensions,
    /// Normal flow children
    pub children: Vec<BoxId>,
    /// Absolutely positioned descendants recorded here
    pub absolutes: SmallVec<[BoxId; 2]>,
    /// Fixed descendants, recorded on the root only
    pub fixed: SmallVec<[BoxId; 2]>,
    /// Floats placed in this box's formatting context
    pub floats: SmallVec<[BoxId; 2]>,
    /// Insertion point for the next child
    pub cursor: Point,
    pub float_ledger: FloatLedger,
    /// Line box currently accepting inline content
    pub open_line: Option<BoxId>,
    /// Alignment applied to line boxes of this box
    pub text_align: TextAlign,
    pub direction: Direction,
    /// Inline-block standing in for replaced content, painted by the embedder
    pub replaced: bool,
}

impl LayoutBox {
    pub fn new(kind: BoxKind, node: Option<NodeId>, parent: Option<BoxId>) -> Self {
        Self {
            kind,
            node,
            parent,
            dimensions: Dimensions::default(),
            children: Vec::new(),
            absolutes: SmallVec::new(),
            fixed: SmallVec::new(),
            floats: SmallVec::new(),
            cursor: Point::default(),
            float_ledger: FloatLedger::new(),
            open_line: None,
            text_align: TextAlign::default(),
            direction: Direction::default(),
            replaced: false,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self.kind, BoxKind::Line)
    }

    pub fn text(&self) -> Option<&TextFragment> {
        match &self.kind {
            BoxKind::Text(fragment) => Some(fragment),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextFragment> {
        match &mut self.kind {
            BoxKind::Text(fragment) => Some(fragment),
            _ => None,
        }
    }

    /// Layout of a text box: copy the reflowed geometry into the dimensions
    pub fn layout_text(&mut self) {
        if let BoxKind::Text(fragment) = &self.kind {
            self.dimensions.content.x = fragment.offset.x;
            self.dimensions.content.y = fragment.offset.y;
            self.dimensions.content.width = fragment.width;
            self.dimensions.content.height = fragment.height;
        }
    }
}

/// Arena of layout boxes
#[derive(Debug, Clone, Default)]
pub struct BoxTree {
    boxes: Vec<LayoutBox>,
}

impl BoxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box, returning its id
    pub fn push(&mut self, layout_box: LayoutBox) -> BoxId {
        let id = BoxId(self.boxes.len() as u32);
        self.boxes.push(layout_box);
        id
    }

    pub fn get(&self, id: BoxId) -> Option<&LayoutBox> {
        self.boxes.get(id.index())
    }

    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut LayoutBox> {
        self.boxes.get_mut(id.index())
    }

    /// Append `child` to the normal flow children of `parent`
    pub fn append_child(&mut self, parent: BoxId, child: BoxId) {
        self[child].parent = Some(parent);
        self[parent].children.push(child);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Visit `id` and its normal flow descendants, pre-order, with depth
    pub fn pre_order(&self, id: BoxId, f: &mut impl FnMut(BoxId, &LayoutBox, usize)) {
        self.visit(id, 0, f);
    }

    fn visit(&self, id: BoxId, depth: usize, f: &mut impl FnMut(BoxId, &LayoutBox, usize)) {
        if let Some(b) = self.get(id) {
            f(id, b, depth);
            for &child in &b.children {
                self.visit(child, depth + 1, f);
            }
        }
    }

    /// Pretty print the subtree at `id` for debugging
    pub fn pretty_print(&self, id: BoxId) -> String {
        let mut output = String::new();
        self.pre_order(id, &mut |_, b, depth| {
            let r = b.dimensions.content;
            output.push_str(&format!(
                "{}{}: ({}, {}, {}, {})",
                "  ".repeat(depth),
                b.kind.name(),
                r.x,
                r.y,
                r.width,
                r.height
            ));
            if let Some(fragment) = b.text() {
                let words: Vec<&str> = fragment.line.words.iter().map(|w| w.text.as_str()).collect();
                output.push_str(&format!(" {:?}", words.join(" ")));
            }
            output.push('\n');
        });
        output
    }
}

impl Index<BoxId> for BoxTree {
    type Output = LayoutBox;

    fn index(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.index()]
    }
}

impl IndexMut<BoxId> for BoxTree {
    fn index_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.index()]
    }
}
