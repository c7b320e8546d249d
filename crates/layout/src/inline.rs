//! Inline Layout
//!
//! Sizing and alignment of line boxes once their content is known.

use lintel_style::{Direction, TextAlign, VerticalAlign};

use crate::boxes::{BoxId, BoxKind, BoxTree};
use crate::context::RenderContext;
use crate::fixed::FixedPoint;

/// Size a line box from its children: the sum of their widths and the
/// tallest content height.
pub fn layout_line(boxes: &mut BoxTree, line: BoxId) {
    let (width, height) = boxes[line].children.iter().fold(
        (FixedPoint::ZERO, FixedPoint::ZERO),
        |(width, height), &child| {
            let d = &boxes[child].dimensions;
            (width + d.mbp_width() + d.content.width, height.max(d.content.height))
        },
    );
    let content = &mut boxes[line].dimensions.content;
    content.width = width;
    content.height = height;
}

/// How far to move a line of `line_width` right within `available`
pub fn horizontal_shift(
    align: TextAlign,
    direction: Direction,
    available: FixedPoint,
    line_width: FixedPoint,
) -> FixedPoint {
    let free = (available - line_width).non_negative();
    match align {
        TextAlign::Right => free,
        TextAlign::Center => free / 2,
        TextAlign::Left => FixedPoint::ZERO,
        TextAlign::Normal if direction == Direction::Rtl => free,
        TextAlign::Normal => FixedPoint::ZERO,
        TextAlign::Justify => {
            log::trace!("text-align: justify is laid out as left");
            FixedPoint::ZERO
        }
    }
}

/// Baseline of a text fragment of `line_height` inside a line box of
/// `line_box_height`, or `None` to keep the default.
pub fn vertical_baseline(
    ctx: &RenderContext,
    align: &VerticalAlign,
    line_height: FixedPoint,
    line_box_height: FixedPoint,
) -> Option<FixedPoint> {
    match align {
        VerticalAlign::Baseline => Some(line_height),
        VerticalAlign::Middle => Some(line_height / 2),
        VerticalAlign::Bottom => Some(line_box_height),
        VerticalAlign::Length(length) => Some(line_height - ctx.resolve(length, line_height)),
        other => {
            log::trace!("vertical-align {:?} keeps the default baseline", other);
            None
        }
    }
}

/// Finish a line box: size it, align it within the width it was given and
/// place its inline content vertically. Baseline aligned text is lowered so
/// its baseline meets the bottom of the tallest inline-block. Returns the
/// line height.
pub fn finish_line(
    boxes: &mut BoxTree,
    line: BoxId,
    ctx: &RenderContext,
    align: TextAlign,
    direction: Direction,
) -> FixedPoint {
    let available = boxes[line].dimensions.content.width;
    layout_line(boxes, line);

    let content = boxes[line].dimensions.content;
    boxes[line].dimensions.content.x += horizontal_shift(align, direction, available, content.width);

    // inline-block bottoms and text baselines share the line's bottom edge
    let baseline = content.height;
    let children = boxes[line].children.clone();
    for child in children {
        let b = &mut boxes[child];
        if matches!(b.kind, BoxKind::InlineBlock) {
            b.dimensions.content.y += baseline;
            continue;
        }
        let Some(fragment) = b.text_mut() else {
            continue;
        };
        let lower = match fragment.vertical_align {
            VerticalAlign::Baseline | VerticalAlign::Length(_) => baseline - fragment.height,
            _ => FixedPoint::ZERO,
        };
        if let Some(offset) = vertical_baseline(ctx, &fragment.vertical_align, fragment.height, content.height) {
            fragment.baseline = offset;
        }
        b.dimensions.content.y += lower;
    }
    content.height
}
