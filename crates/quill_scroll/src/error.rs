//! Error types for quill_scroll
//!
//! None of these escape the event path: the engine logs them and carries on
//! doing nothing for the affected target. They surface as values only from
//! configuration loading.

use quill_dom::NodeId;
use thiserror::Error;

/// Errors that can occur in the infinite-scroll engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InfiniteScrollError {
    /// No scrollable ancestor and no document to fall back to
    #[error("no scroll container found for {0:?}")]
    MissingContainer(NodeId),

    /// An update arrived before the mount continuation ran
    #[error("update for {0:?} arrived before mount completed")]
    PrematureUpdate(NodeId),

    /// Configuration could not be parsed or is out of range
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for InfiniteScrollError {
    fn from(err: toml::de::Error) -> Self {
        InfiniteScrollError::Config(err.to_string())
    }
}

/// Result type for quill_scroll operations
pub type Result<T> = std::result::Result<T, InfiniteScrollError>;
