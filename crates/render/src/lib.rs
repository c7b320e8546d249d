//! Lintel Render
//!
//! Walks a laid out box tree and produces a display list for a backend.

mod display_list;
mod paint;

pub use display_list::{build_display_list, BorderWidths, DisplayList, PaintCommand};
pub use paint::RenderRect;

use lintel_style::Color;

/// Trait for render backends
pub trait RenderBackend {
    /// Clear the surface with a color
    fn clear(&mut self, color: Color);

    /// Execute a display list
    fn render(&mut self, display_list: &DisplayList);

    /// Present the rendered frame
    fn present(&mut self);

    /// Surface width in device pixels
    fn width(&self) -> u32;

    /// Surface height in device pixels
    fn height(&self) -> u32;
}
