//! DOM error types

use thiserror::Error;

/// DOM operation result type
pub type DomResult<T> = Result<T, DomError>;

/// DOM errors
#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Node {child} already has a parent")]
    AlreadyAttached { child: u32 },

    #[error("Text node {0} cannot have children")]
    TextHasNoChildren(u32),
}
