//! Error types for cfg-ir
//!
//! Provides unified error handling across the crate. Not-found outcomes that
//! callers are expected to handle (removing an absent instruction, splitting at
//! an absent instruction) are reported through return values, not through
//! this type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::{BlockId, CfgId, Label};

/// Main error type for cfg-ir operations
#[derive(Debug, Error)]
pub enum CfgError {
    /// `next` was called on an exhausted iterator
    #[error("No such element: iterator is exhausted")]
    NoSuchElement,

    /// Operation is not supported by this view
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Block handle does not resolve in this graph
    #[error("Block not found: {0:?}")]
    BlockNotFound(BlockId),

    /// Block handle belongs to another graph
    #[error("Block {block:?} does not belong to graph {graph}")]
    ForeignBlock { block: BlockId, graph: CfgId },

    /// Label is already bound to a block of the graph
    #[error("Label '{0}' is already bound to a block")]
    DuplicateLabel(Label),

    /// A rename map would map two distinct sources onto one target
    #[error("Rename conflict: '{original}' would map to '{target}', already taken by '{existing}'")]
    RenameConflict {
        original: String,
        target: String,
        existing: String,
    },

    /// An instruction required by a transformation is not in the block
    #[error("Instruction not found in block {block:?}")]
    InstructionNotFound { block: BlockId },

    /// Structural precondition of a transformation violated
    #[error("Invalid transformation: {0}")]
    InvalidTransform(String),

    /// JSON export error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CfgError {
    /// Create an invalid transformation error
    pub fn invalid_transform(msg: impl Into<String>) -> Self {
        CfgError::InvalidTransform(msg.into())
    }

    pub(crate) fn rename_conflict(
        original: &impl std::fmt::Display,
        target: &impl std::fmt::Display,
        existing: &impl std::fmt::Display,
    ) -> Self {
        CfgError::RenameConflict {
            original: original.to_string(),
            target: target.to_string(),
            existing: existing.to_string(),
        }
    }

    /// True for misuse of an iterator or view (as opposed to a graph problem)
    pub fn is_usage_error(&self) -> bool {
        matches!(self, CfgError::NoSuchElement | CfgError::UnsupportedOperation(_))
    }
}

/// Result type alias for cfg-ir operations
pub type Result<T> = std::result::Result<T, CfgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors_are_distinct() {
        let exhausted = CfgError::NoSuchElement;
        let unsupported = CfgError::UnsupportedOperation("remove");

        assert!(exhausted.is_usage_error());
        assert!(unsupported.is_usage_error());
        assert_ne!(exhausted.to_string(), unsupported.to_string());
        assert!(!CfgError::invalid_transform("x").is_usage_error());
    }

    #[test]
    fn test_error_display() {
        let err = CfgError::DuplicateLabel(Label::new("_LABEL_1"));
        assert_eq!(err.to_string(), "Label '_LABEL_1' is already bound to a block");
    }
}
