//! Error types for quill_dom

use thiserror::Error;

use crate::dom::NodeId;

/// Errors raised when building or mutating a [`MemoryDom`](crate::MemoryDom)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// The node was never created or has been removed
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// Inserting the node would make it its own ancestor
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    /// The node already has a parent
    #[error("node {0:?} is already attached")]
    AlreadyAttached(NodeId),

    /// The node is not a child of the given parent
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Unrecognised overflow keyword
    #[error("invalid overflow value: {0:?}")]
    InvalidOverflow(String),

    /// The layout engine rejected an operation
    #[error("layout error: {0}")]
    Layout(String),
}

impl From<taffy::TaffyError> for DomError {
    fn from(err: taffy::TaffyError) -> Self {
        DomError::Layout(err.to_string())
    }
}

/// Result type for quill_dom operations
pub type Result<T> = std::result::Result<T, DomError>;
