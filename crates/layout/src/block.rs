//! Block Layout
//!
//! Width, position and height of block-level boxes. All functions read the
//! element's style from the top frame of the render context.

use crate::boxes::{BoxId, BoxTree};
use crate::context::RenderContext;
use crate::fixed::FixedPoint;
use crate::geometry::Dimensions;

/// Size of the box that percentages resolve against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainingBlock {
    pub width: FixedPoint,
    pub height: FixedPoint,
}

impl ContainingBlock {
    pub fn new(width: FixedPoint, height: FixedPoint) -> Self {
        Self { width, height }
    }
}

/// Calculate the width and horizontal edges of a block element
pub fn calculate_block_width(ctx: &RenderContext, d: &mut Dimensions, containing: ContainingBlock) {
    let style = ctx.style();
    let containing_width = containing.width;

    let css_width = &style.width;
    let width = ctx.resolve_width(css_width, containing_width);

    d.border.left = ctx.resolve(&style.border_left_width, FixedPoint::ZERO);
    d.border.right = ctx.resolve(&style.border_right_width, FixedPoint::ZERO);

    d.padding.left = ctx.resolve(&style.padding_left, containing_width);
    d.padding.right = ctx.resolve(&style.padding_right, containing_width);

    let margin_left_auto = style.margin_left.is_auto();
    let margin_right_auto = style.margin_right.is_auto();
    d.margin.left = ctx.resolve_width(&style.margin_left, containing_width);
    d.margin.right = ctx.resolve_width(&style.margin_right, containing_width);

    let total = d.mbp_width() + width;

    if !css_width.is_auto() && total > containing_width {
        if margin_left_auto {
            d.margin.left = FixedPoint::ZERO;
        }
        if margin_right_auto {
            d.margin.right = FixedPoint::ZERO;
        }
    }

    // negative underflow is overflow
    let underflow = containing_width - total;

    if css_width.is_auto() {
        if margin_left_auto {
            d.margin.left = FixedPoint::ZERO;
        }
        if margin_right_auto {
            d.margin.right = FixedPoint::ZERO;
        }
        if underflow >= FixedPoint::ZERO {
            d.content.width = underflow;
        } else {
            d.content.width = FixedPoint::ZERO;
            d.margin.right += underflow;
        }
        return;
    }

    d.content.width = width;
    match (margin_left_auto, margin_right_auto) {
        (false, false) => d.margin.right += underflow,
        (false, true) => d.margin.right = underflow,
        (true, false) => d.margin.left = underflow,
        (true, true) => {
            d.margin.left = underflow / 2;
            d.margin.right = underflow / 2;
        }
    }
}

/// Width of a float or inline-block: the block width, keeping the margins
/// as specified (auto is zero) instead of filling the containing block.
///
/// An auto width is shrunk to the content after children are laid out.
pub fn calculate_shrink_width(ctx: &RenderContext, d: &mut Dimensions, containing: ContainingBlock) {
    calculate_block_width(ctx, d, containing);
    let style = ctx.style();
    d.margin.left = ctx.resolve_width(&style.margin_left, containing.width);
    d.margin.right = ctx.resolve_width(&style.margin_right, containing.width);
    if style.width.is_auto() {
        d.content.width = (containing.width - d.mbp_width()).non_negative();
    }
}

/// Resolve the vertical edges. Percentages refer to the containing height.
pub fn calculate_vertical_edges(ctx: &RenderContext, d: &mut Dimensions, containing: ContainingBlock) {
    let style = ctx.style();
    let containing_height = containing.height;

    d.border.top = ctx.resolve(&style.border_top_width, FixedPoint::ZERO);
    d.border.bottom = ctx.resolve(&style.border_bottom_width, FixedPoint::ZERO);

    d.padding.top = ctx.resolve(&style.padding_top, containing_height);
    d.padding.bottom = ctx.resolve(&style.padding_bottom, containing_height);

    d.margin.top = ctx.resolve_width(&style.margin_top, containing_height);
    d.margin.bottom = ctx.resolve_width(&style.margin_bottom, containing_height);
}

/// Resolve all four edges with auto margins as zero, for replaced content
pub fn calculate_box_edges(ctx: &RenderContext, d: &mut Dimensions, containing: ContainingBlock) {
    let style = ctx.style();
    d.border.left = ctx.resolve(&style.border_left_width, FixedPoint::ZERO);
    d.border.right = ctx.resolve(&style.border_right_width, FixedPoint::ZERO);
    d.padding.left = ctx.resolve(&style.padding_left, containing.width);
    d.padding.right = ctx.resolve(&style.padding_right, containing.width);
    d.margin.left = ctx.resolve_width(&style.margin_left, containing.width);
    d.margin.right = ctx.resolve_width(&style.margin_right, containing.width);
    calculate_vertical_edges(ctx, d, containing);
}

/// Calculate the position of a block element below `cursor_y`
pub fn calculate_block_position(
    ctx: &RenderContext,
    d: &mut Dimensions,
    containing: ContainingBlock,
    cursor_y: FixedPoint,
) {
    calculate_vertical_edges(ctx, d, containing);
    d.content.x = d.mbp_left();
    d.content.y = cursor_y + d.mbp_top();
}

/// The element's specified height, if it is not auto
pub fn explicit_height(ctx: &RenderContext, containing: ContainingBlock) -> Option<FixedPoint> {
    let height = &ctx.style().height;
    if height.is_auto() {
        None
    } else {
        Some(ctx.resolve_width(height, containing.height))
    }
}

/// Apply a specified height over the one accumulated from children
pub fn calculate_block_height(ctx: &RenderContext, d: &mut Dimensions, containing: ContainingBlock) {
    if let Some(height) = explicit_height(ctx, containing) {
        d.content.height = height;
    }
    // min-height and max-height are not applied
}

/// Bottom edge of the lowest normal flow child
pub fn content_bottom(boxes: &BoxTree, id: BoxId) -> FixedPoint {
    boxes[id]
        .children
        .iter()
        .map(|&child| boxes[child].dimensions.margin_box_bottom())
        .max()
        .unwrap_or(FixedPoint::ZERO)
        .non_negative()
}

/// Right edge of the widest child or float, for shrink-to-fit widths
pub fn shrink_to_fit(boxes: &BoxTree, id: BoxId) -> FixedPoint {
    let b = &boxes[id];
    b.children
        .iter()
        .chain(b.floats.iter())
        .map(|&child| {
            let d = &boxes[child].dimensions;
            d.content.x + d.content.width + d.mbp_right()
        })
        .max()
        .unwrap_or(FixedPoint::ZERO)
        .non_negative()
}
