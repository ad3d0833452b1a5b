//! Error types for the document model.

/// Result type alias for document operations.
pub type DomResult<T> = std::result::Result<T, DomError>;

/// Errors that can occur while building, querying or mutating a document.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// The markup could not be tokenized.
    #[error("markup parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// An end tag did not match the open element.
    #[error("unbalanced markup: expected </{expected}>, found {found}")]
    Unbalanced { expected: String, found: String },

    /// The node id does not refer to a live node.
    #[error("node does not exist in this document")]
    InvalidNode,

    /// The operation requires an element node.
    #[error("node is not an element")]
    NotAnElement,

    /// The insertion would create a cycle or move the document node.
    #[error("hierarchy request error: {0}")]
    Hierarchy(&'static str),

    /// A selector or stylesheet failed to parse.
    #[error(transparent)]
    Style(#[from] snap_blocks_style::Error),
}

impl DomError {
    pub(crate) fn parse(position: u64, message: impl ToString) -> Self {
        Self::Parse {
            position,
            message: message.to_string(),
        }
    }
}
