//! Font Interfaces
//!
//! Glyph metrics come from an external font provider. Layout only needs
//! advances and a few vertical metrics, all in device units.

use std::fmt;
use std::rc::Rc;

use crate::fixed::FixedPoint;

/// A font at a particular size
pub trait FontHandle: fmt::Debug {
    /// Size this handle was created for
    fn font_size(&self) -> f64;

    /// Height of a lowercase 'x'
    fn x_height(&self) -> f64;

    /// Natural distance between baselines
    fn line_gap(&self) -> FixedPoint;

    /// Distance below the baseline, zero or negative
    fn descender(&self) -> FixedPoint;

    /// Advance of a single space
    fn space_advance(&self) -> FixedPoint;

    /// Cumulative glyph advances for `text`: one entry per glyph boundary,
    /// starting at zero and ending at the full width.
    fn advances(&self, text: &str) -> Vec<FixedPoint>;

    /// Width of `text`
    fn measure(&self, text: &str) -> FixedPoint {
        self.advances(text).last().copied().unwrap_or(FixedPoint::ZERO)
    }
}

/// Source of font handles
pub trait FontProvider {
    /// Get a font for the first usable family in `families`
    fn font(&self, families: &[String], size: f64) -> Rc<dyn FontHandle>;
}

/// Font with the same advance for every glyph
#[derive(Debug, Clone)]
pub struct SimpleFont {
    size: f64,
    glyph_advance: FixedPoint,
    space_advance: FixedPoint,
    descender: FixedPoint,
}

impl FontHandle for SimpleFont {
    fn font_size(&self) -> f64 {
        self.size
    }

    fn x_height(&self) -> f64 {
        self.size * 0.5
    }

    fn line_gap(&self) -> FixedPoint {
        FixedPoint::from_f64(self.size * 1.2)
    }

    fn descender(&self) -> FixedPoint {
        self.descender
    }

    fn space_advance(&self) -> FixedPoint {
        self.space_advance
    }

    fn advances(&self, text: &str) -> Vec<FixedPoint> {
        let mut advances = Vec::with_capacity(text.len() + 1);
        let mut x = FixedPoint::ZERO;
        advances.push(x);
        for _ in text.chars() {
            x += self.glyph_advance;
            advances.push(x);
        }
        advances
    }
}

/// Fixed-ratio metrics provider, used until a real font backend is wired in
///
/// Every glyph is 0.6 × the font size wide, which is close enough to an
/// average proportional font for layout purposes.
#[derive(Debug, Clone, Default)]
pub struct SimpleFontProvider {
    /// Fixed (glyph, space) advances, ignoring the font size
    fixed: Option<(FixedPoint, FixedPoint)>,
}

impl SimpleFontProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose fonts use exact glyph and space advances at any size
    pub fn fixed(glyph_advance: f64, space_advance: f64) -> Self {
        Self {
            fixed: Some((FixedPoint::from_f64(glyph_advance), FixedPoint::from_f64(space_advance))),
        }
    }
}

impl FontProvider for SimpleFontProvider {
    fn font(&self, families: &[String], size: f64) -> Rc<dyn FontHandle> {
        log::trace!("font for {:?} at {}", families, size);
        let font = match self.fixed {
            Some((glyph_advance, space_advance)) => SimpleFont {
                size,
                glyph_advance,
                space_advance,
                descender: FixedPoint::ZERO,
            },
            None => SimpleFont {
                size,
                glyph_advance: FixedPoint::from_f64(size * 0.6),
                space_advance: FixedPoint::from_f64(size * 0.6),
                descender: FixedPoint::from_f64(-size * 0.2),
            },
        };
        Rc::new(font)
    }
}
