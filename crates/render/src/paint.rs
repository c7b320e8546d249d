//! Paint primitives
//!
//! Geometry handed to backends, in device pixels. Colors are the resolved
//! [`lintel_style::Color`] values.

use lintel_layout::{FixedPoint, Rect};

/// A rectangle in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RenderRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Convert a layout rectangle, moved by an absolute offset
    pub fn from_layout(rect: Rect, offset_x: FixedPoint, offset_y: FixedPoint) -> Self {
        Self::new(
            (offset_x + rect.x).to_f32(),
            (offset_y + rect.y).to_f32(),
            rect.width.to_f32(),
            rect.height.to_f32(),
        )
    }
}
