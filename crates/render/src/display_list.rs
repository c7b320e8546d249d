//! Display List
//!
//! Converts the layout tree to paint commands.

use lintel_dom::NodeId;
use lintel_layout::{BoxId, BoxKind, FixedPoint, LayoutBox, LayoutTree, TextFragment};
use lintel_style::{Color, StyleTree};

use crate::paint::RenderRect;

/// A display list of paint commands
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    pub commands: Vec<PaintCommand>,
}

/// A paint command
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill a rectangle with a solid color
    FillRect {
        rect: RenderRect,
        color: Color,
    },
    /// Draw a run of glyphs, one origin per glyph on the baseline
    DrawGlyphs {
        text: String,
        positions: Vec<(f32, f32)>,
        color: Color,
    },
    /// Draw a border (outline of rectangle)
    DrawBorder {
        rect: RenderRect,
        widths: BorderWidths,
        color: Color,
    },
    /// Draw the embedder's content for a replaced element (image, media)
    /// into its content box
    DrawReplaced {
        node: NodeId,
        rect: RenderRect,
    },
}

/// Border widths for all four sides
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderWidths {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PaintCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Build a display list from a laid out box tree
pub fn build_display_list(tree: &LayoutTree, styles: &StyleTree) -> DisplayList {
    let mut list = DisplayList::new();
    render_layout_box(&mut list, tree, styles, tree.root, FixedPoint::ZERO, FixedPoint::ZERO);
    list
}

/// Recursively render a layout box and its children.
/// offset_x and offset_y are the absolute position of the parent's content area
fn render_layout_box(
    list: &mut DisplayList,
    tree: &LayoutTree,
    styles: &StyleTree,
    id: BoxId,
    offset_x: FixedPoint,
    offset_y: FixedPoint,
) {
    let layout_box = &tree.boxes[id];
    let d = &layout_box.dimensions;

    // Absolute position of this box's content area
    let abs_x = offset_x + d.content.x;
    let abs_y = offset_y + d.content.y;

    render_background(list, layout_box, styles, offset_x, offset_y);
    render_borders(layout_box);
    render_replaced(list, layout_box, offset_x, offset_y);

    if let Some(fragment) = layout_box.text() {
        render_text(list, fragment, abs_x, abs_y);
    }

    for &child in &layout_box.children {
        render_layout_box(list, tree, styles, child, abs_x, abs_y);
    }
    for &float in &layout_box.floats {
        render_layout_box(list, tree, styles, float, abs_x, abs_y);
    }

    if !layout_box.absolutes.is_empty() || !layout_box.fixed.is_empty() {
        log::trace!("{} has out of flow boxes that are not painted", id);
    }
}

/// Render the background of an element's box
fn render_background(
    list: &mut DisplayList,
    layout_box: &LayoutBox,
    styles: &StyleTree,
    offset_x: FixedPoint,
    offset_y: FixedPoint,
) {
    if !matches!(
        layout_box.kind,
        BoxKind::Block | BoxKind::InlineBlock | BoxKind::InlineElement
    ) {
        return;
    }
    let Some(style) = layout_box.node.and_then(|node| styles.get_style(node)) else {
        return;
    };

    let color = style.background_color;
    if color.is_transparent() {
        return;
    }

    let rect = RenderRect::from_layout(layout_box.dimensions.border_box(), offset_x, offset_y);
    list.push(PaintCommand::FillRect { rect, color });
}

/// Borders are resolved during layout but not painted yet
fn render_borders(layout_box: &LayoutBox) {
    let border = &layout_box.dimensions.border;
    if border.horizontal() > FixedPoint::ZERO || border.vertical() > FixedPoint::ZERO {
        log::trace!("border painting is not implemented");
    }
}

fn render_replaced(list: &mut DisplayList, layout_box: &LayoutBox, offset_x: FixedPoint, offset_y: FixedPoint) {
    let Some(node) = layout_box.node.filter(|_| layout_box.replaced) else {
        return;
    };
    let rect = RenderRect::from_layout(layout_box.dimensions.content, offset_x, offset_y);
    list.push(PaintCommand::DrawReplaced { node, rect });
}

/// Render one line of text. Glyphs sit on the baseline, raised by the
/// font's descender.
fn render_text(list: &mut DisplayList, fragment: &TextFragment, abs_x: FixedPoint, abs_y: FixedPoint) {
    let line = &fragment.line;
    let y = (abs_y + fragment.baseline + fragment.descender).to_f32();

    let mut x = abs_x;
    if line.leading_space {
        x += line.space_advance;
    }

    let mut positions = Vec::new();
    for word in &line.words {
        let glyphs = word.advances.len().saturating_sub(1);
        positions.extend(word.advances[..glyphs].iter().map(|&advance| ((x + advance).to_f32(), y)));
        x += word.width() + line.space_advance;
    }

    list.push(PaintCommand::DrawGlyphs {
        text: line.glyph_text(),
        positions,
        color: fragment.color,
    });
}
