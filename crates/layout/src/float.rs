//! Float Ledger
//!
//! Records the floats placed in a formatting context and answers how much
//! horizontal room is left beside them for a given vertical band.

use smallvec::SmallVec;

use crate::boxes::BoxId;
use crate::fixed::FixedPoint;

/// A placed float, in the container's coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatEntry {
    /// The floated box
    pub owner: BoxId,
    /// Top of the float's margin box
    pub top: FixedPoint,
    pub mbp_height: FixedPoint,
    pub mbp_width: FixedPoint,
    pub content_height: FixedPoint,
    pub content_width: FixedPoint,
}

impl FloatEntry {
    /// Horizontal room the float takes
    pub fn extent_width(&self) -> FixedPoint {
        self.mbp_width + self.content_width
    }

    /// Bottom of the float's margin box
    pub fn bottom(&self) -> FixedPoint {
        self.top + self.mbp_height + self.content_height
    }

    /// Whether the band `[y, y + line_height)` overlaps the float
    pub fn is_active(&self, y: FixedPoint, line_height: FixedPoint) -> bool {
        y < self.bottom() && y + line_height > self.top
    }
}

/// Left and right floats of one formatting context
///
/// Floats per container are expected to be few, so queries are linear scans.
#[derive(Debug, Clone, Default)]
pub struct FloatLedger {
    left: SmallVec<[FloatEntry; 2]>,
    right: SmallVec<[FloatEntry; 2]>,
}

impl FloatLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_left(&mut self, entry: FloatEntry) {
        self.left.push(entry);
    }

    pub fn add_right(&mut self, entry: FloatEntry) {
        self.right.push(entry);
    }

    pub fn left(&self) -> &[FloatEntry] {
        &self.left
    }

    pub fn right(&self) -> &[FloatEntry] {
        &self.right
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Whether any float intrudes on the band
    pub fn has_floats_at(&self, y: FixedPoint, line_height: FixedPoint) -> bool {
        self.left.iter().chain(self.right.iter()).any(|f| f.is_active(y, line_height))
    }

    /// Nearest bottom edge among the floats active in the band
    pub fn next_float_bottom(&self, y: FixedPoint, line_height: FixedPoint) -> Option<FixedPoint> {
        self.left
            .iter()
            .chain(self.right.iter())
            .filter(|f| f.is_active(y, line_height))
            .map(FloatEntry::bottom)
            .min()
    }

    /// Start of the free space: the widest active left float.
    ///
    /// Floats on the same side are not stacked side by side.
    pub fn available_left_offset(&self, y: FixedPoint, line_height: FixedPoint) -> FixedPoint {
        self.left
            .iter()
            .filter(|f| f.is_active(y, line_height))
            .map(FloatEntry::extent_width)
            .max()
            .unwrap_or(FixedPoint::ZERO)
    }

    /// Room taken from the right edge by active right floats
    pub fn available_right_offset(&self, y: FixedPoint, line_height: FixedPoint) -> FixedPoint {
        self.right
            .iter()
            .filter(|f| f.is_active(y, line_height))
            .map(FloatEntry::extent_width)
            .sum()
    }

    /// Width left for content in the band, never negative
    pub fn available_width(
        &self,
        y: FixedPoint,
        line_height: FixedPoint,
        container_width: FixedPoint,
    ) -> FixedPoint {
        let taken: FixedPoint = self
            .left
            .iter()
            .chain(self.right.iter())
            .filter(|f| f.is_active(y, line_height))
            .map(FloatEntry::extent_width)
            .sum();
        (container_width - taken).non_negative()
    }
}
