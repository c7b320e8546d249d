//! Render Context
//!
//! Stack of (style, font) frames mirroring the element nesting currently
//! being laid out. Every length and font resolution reads the top frame.

use std::rc::Rc;

use lintel_style::{
    font_size_table, ComputedStyle, FontSizeKeyword, FontSize, Length, LineHeight, UnitContext, Width,
};

use crate::fixed::FixedPoint;
use crate::font::{FontHandle, FontProvider};

/// One entry of the context stack
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub style: &'a ComputedStyle,
    pub font: Rc<dyn FontHandle>,
    pub font_size: f64,
}

/// Pass-scoped style and font state
#[derive(Debug)]
pub struct RenderContext<'a> {
    frames: Vec<Frame<'a>>,
    dpi: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a context whose root frame uses `root_style` at the `medium`
    /// font size for `dpi`.
    pub fn new(dpi: f64, root_style: &'a ComputedStyle, fonts: &dyn FontProvider) -> Self {
        let medium = FontSize::Absolute(FontSizeKeyword::Medium);
        let font_size = match root_style.font_size {
            FontSize::Inherit => medium,
            size => size,
        };
        let base = font_size_table(dpi)[FontSizeKeyword::Medium as usize];
        let ctx = UnitContext { dpi, font_size: base, x_height: base * 0.5 };
        let font_size = font_size.compute(base, &ctx);
        let font = fonts.font(&root_style.font_family, font_size);

        Self {
            frames: vec![Frame { style: root_style, font, font_size }],
            dpi,
        }
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Number of frames, including the root frame
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn top(&self) -> &Frame<'a> {
        // the root frame is never popped
        &self.frames[self.frames.len() - 1]
    }

    /// Push a frame for an element with `style`
    pub fn push(&mut self, style: &'a ComputedStyle, fonts: &dyn FontProvider) {
        let parent_size = self.font_size();
        let font_size = style.font_size.compute(parent_size, &self.unit_context());
        let font = if font_size == parent_size && style.font_family == self.style().font_family {
            Rc::clone(&self.top().font)
        } else {
            fonts.font(&style.font_family, font_size)
        };
        self.frames.push(Frame { style, font, font_size });
    }

    /// Pop the frame pushed by the matching [`RenderContext::push`]
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        } else {
            log::warn!("attempted to pop the root render context frame");
        }
    }

    pub fn style(&self) -> &'a ComputedStyle {
        self.top().style
    }

    pub fn font(&self) -> Rc<dyn FontHandle> {
        Rc::clone(&self.top().font)
    }

    pub fn font_size(&self) -> f64 {
        self.top().font_size
    }

    /// Unit context for the current frame
    pub fn unit_context(&self) -> UnitContext {
        let top = self.top();
        UnitContext {
            dpi: self.dpi,
            font_size: top.font_size,
            x_height: top.font.x_height(),
        }
    }

    /// Resolve a length against `reference` (what percentages refer to)
    pub fn resolve(&self, length: &Length, reference: FixedPoint) -> FixedPoint {
        FixedPoint::from_f64(length.evaluate(reference.to_f64(), &self.unit_context()))
    }

    /// Resolve a possibly auto length; auto resolves to zero
    pub fn resolve_width(&self, width: &Width, reference: FixedPoint) -> FixedPoint {
        width.length().map_or(FixedPoint::ZERO, |l| self.resolve(l, reference))
    }

    /// Used line height of the current frame
    pub fn line_height(&self) -> FixedPoint {
        let font_size = self.font_size();
        let line_height = match self.style().line_height {
            LineHeight::Normal => font_size * 1.2,
            LineHeight::Number(n) => font_size * n,
            LineHeight::Length(l) if l.is_percent() || l.is_number() => font_size * l.value,
            LineHeight::Length(l) => l.evaluate(font_size, &self.unit_context()),
        };
        FixedPoint::from_f64(line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::SimpleFontProvider;
    use lintel_style::{LengthUnit, RelativeFontSize};

    #[test]
    fn test_root_frame_is_medium() {
        let root = ComputedStyle::default();
        let fonts = SimpleFontProvider::new();
        let ctx = RenderContext::new(96.0, &root, &fonts);
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.font_size(), 18.0);
        assert_eq!(ctx.font().font_size(), 18.0);
    }

    #[test]
    fn test_push_and_pop() {
        let root = ComputedStyle::default();
        let mut larger = ComputedStyle::default();
        larger.font_size = FontSize::Relative(RelativeFontSize::Larger);
        let fonts = SimpleFontProvider::new();

        let mut ctx = RenderContext::new(72.0, &root, &fonts);
        let base = ctx.font_size();
        ctx.push(&larger, &fonts);
        assert_eq!(ctx.depth(), 2);
        assert!((ctx.font_size() - base * 1.15).abs() < 1e-9);
        ctx.pop();
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.font_size(), base);

        // the root frame stays
        ctx.pop();
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_resolve_percent_and_inches() {
        let root = ComputedStyle::default();
        let fonts = SimpleFontProvider::new();
        let ctx = RenderContext::new(72.0, &root, &fonts);

        let half = ctx.resolve(&Length::percent(50.0), FixedPoint::from_px(200));
        assert_eq!(half, FixedPoint::from_px(100));

        let inch = ctx.resolve(&Length::new(1.0, LengthUnit::In), FixedPoint::ZERO);
        assert_eq!(inch, FixedPoint::from_px(72));

        assert_eq!(ctx.resolve_width(&Width::Auto, FixedPoint::from_px(200)), FixedPoint::ZERO);
    }

    #[test]
    fn test_line_height() {
        let fonts = SimpleFontProvider::new();
        let mut style = ComputedStyle::default();
        style.font_size = FontSize::Length(Length::pt(10.0));

        let ctx = RenderContext::new(72.0, &style, &fonts);
        assert_eq!(ctx.font_size(), 10.0);
        assert_eq!(ctx.line_height(), FixedPoint::from_px(12));

        style.line_height = LineHeight::Number(2.0);
        let ctx = RenderContext::new(72.0, &style, &fonts);
        assert_eq!(ctx.line_height(), FixedPoint::from_px(20));

        style.line_height = LineHeight::Length(Length::percent(150.0));
        let ctx = RenderContext::new(72.0, &style, &fonts);
        assert_eq!(ctx.line_height(), FixedPoint::from_px(15));

        style.line_height = LineHeight::Length(Length::pt(14.0));
        let ctx = RenderContext::new(72.0, &style, &fonts);
        assert_eq!(ctx.line_height(), FixedPoint::from_px(14));
    }
}
