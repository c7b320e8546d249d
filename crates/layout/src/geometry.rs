//! Box geometry

use crate::fixed::FixedPoint;

/// A point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: FixedPoint,
    pub y: FixedPoint,
}

impl Point {
    pub fn new(x: FixedPoint, y: FixedPoint) -> Self {
        Self { x, y }
    }
}

/// A rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: FixedPoint,
    pub y: FixedPoint,
    pub width: FixedPoint,
    pub height: FixedPoint,
}

impl Rect {
    pub fn new(x: FixedPoint, y: FixedPoint, width: FixedPoint, height: FixedPoint) -> Self {
        Self { x, y, width, height }
    }
}

/// Edge sizes (top, right, bottom, left)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeSizes {
    pub top: FixedPoint,
    pub right: FixedPoint,
    pub bottom: FixedPoint,
    pub left: FixedPoint,
}

impl EdgeSizes {
    pub fn horizontal(&self) -> FixedPoint {
        self.left + self.right
    }

    pub fn vertical(&self) -> FixedPoint {
        self.top + self.bottom
    }
}

/// Box dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    /// Content area, relative to the parent's content origin
    pub content: Rect,
    pub padding: EdgeSizes,
    pub border: EdgeSizes,
    pub margin: EdgeSizes,
}

impl Dimensions {
    pub fn mbp_left(&self) -> FixedPoint {
        self.margin.left + self.border.left + self.padding.left
    }

    pub fn mbp_right(&self) -> FixedPoint {
        self.margin.right + self.border.right + self.padding.right
    }

    pub fn mbp_top(&self) -> FixedPoint {
        self.margin.top + self.border.top + self.padding.top
    }

    pub fn mbp_bottom(&self) -> FixedPoint {
        self.margin.bottom + self.border.bottom + self.padding.bottom
    }

    /// Horizontal margin + border + padding
    pub fn mbp_width(&self) -> FixedPoint {
        self.mbp_left() + self.mbp_right()
    }

    /// Vertical margin + border + padding
    pub fn mbp_height(&self) -> FixedPoint {
        self.mbp_top() + self.mbp_bottom()
    }

    /// Get the total width including padding, border, and margin
    pub fn margin_box_width(&self) -> FixedPoint {
        self.content.width + self.mbp_width()
    }

    /// Get the total height including padding, border, and margin
    pub fn margin_box_height(&self) -> FixedPoint {
        self.content.height + self.mbp_height()
    }

    /// Bottom edge of the margin box in the parent's coordinates
    pub fn margin_box_bottom(&self) -> FixedPoint {
        self.content.y + self.content.height + self.mbp_bottom()
    }

    /// Get the padding box rectangle
    pub fn padding_box(&self) -> Rect {
        Rect {
            x: self.content.x - self.padding.left,
            y: self.content.y - self.padding.top,
            width: self.content.width + self.padding.horizontal(),
            height: self.content.height + self.padding.vertical(),
        }
    }

    /// Get the border box rectangle
    pub fn border_box(&self) -> Rect {
        let padding = self.padding_box();
        Rect {
            x: padding.x - self.border.left,
            y: padding.y - self.border.top,
            width: padding.width + self.border.horizontal(),
            height: padding.height + self.border.vertical(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(v: i32) -> FixedPoint {
        FixedPoint::from_px(v)
    }

    fn sample() -> Dimensions {
        let edges = |v| EdgeSizes { top: px(v), right: px(v), bottom: px(v), left: px(v) };
        Dimensions {
            content: Rect::new(px(20), px(30), px(100), px(50)),
            padding: edges(5),
            border: edges(2),
            margin: edges(10),
        }
    }

    #[test]
    fn test_mbp() {
        let d = sample();
        assert_eq!(d.mbp_left(), px(17));
        assert_eq!(d.mbp_width(), px(34));
        assert_eq!(d.mbp_height(), px(34));
        assert_eq!(d.margin_box_width(), px(134));
        assert_eq!(d.margin_box_height(), px(84));
        assert_eq!(d.margin_box_bottom(), px(97));
    }

    #[test]
    fn test_padding_and_border_box() {
        let d = sample();
        assert_eq!(d.padding_box(), Rect::new(px(15), px(25), px(110), px(60)));
        assert_eq!(d.border_box(), Rect::new(px(13), px(23), px(114), px(64)));
    }
}
