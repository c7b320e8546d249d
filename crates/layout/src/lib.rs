//! Lintel Layout Engine
//!
//! CSS2 box layout over a styled content tree: block and inline formatting,
//! text reflow around floats, and inline-block and replaced content.
//!
//! Geometry is in 16.16 fixed point device units. Fonts come from an
//! embedder-supplied [`FontProvider`].

pub mod block;
pub mod boxes;
pub mod context;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod float;
pub mod font;
pub mod geometry;
pub mod inline;
pub mod text;

pub use block::ContainingBlock;
pub use boxes::{BoxId, BoxKind, BoxTree, LayoutBox, TextFragment};
pub use context::RenderContext;
pub use engine::{layout_document, LayoutEngine, LayoutOptions, LayoutTree};
pub use error::{LayoutError, LayoutResult};
pub use fixed::{FixedPoint, FIXED_POINT_SCALE};
pub use float::{FloatEntry, FloatLedger};
pub use font::{FontHandle, FontProvider, SimpleFont, SimpleFontProvider};
pub use geometry::{Dimensions, EdgeSizes, Point, Rect};
pub use text::{Line, Word};
