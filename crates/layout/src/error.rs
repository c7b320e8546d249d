//! Layout error types

use lintel_dom::{DomError, NodeId};
use thiserror::Error;

use crate::boxes::BoxId;
use crate::fixed::FixedPoint;

/// Layout result type
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Layout errors
///
/// Any of these aborts the layout pass.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("display '{display}' is not supported")]
    Unsupported { display: &'static str },

    #[error("Tried to close a line on box {0} with no open line")]
    NoOpenLine(BoxId),

    #[error("Box {0} is not a line box")]
    NotALineBox(BoxId),

    #[error("Only elements and text can be laid out, got {0}")]
    UnhandledNode(NodeId),

    #[error("Text does not fit beside floats at y={0} and no float ends below")]
    NoFloatClearance(FixedPoint),

    #[error("Document has no body element")]
    NoBody,

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
