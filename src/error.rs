//! Error types for pack list editing, operators and workspace files

use std::io;

use thiserror::Error;

/// Result type for pack list operations.
pub type Result<T> = std::result::Result<T, PackListError>;

/// Errors raised by the command layer and by persisted-state loading.
///
/// Incompatible connector drops are not errors; they are ignored without
/// touching the slot store.
#[derive(Debug, Error)]
pub enum PackListError {
    /// No node tree with the given name exists in the workspace.
    #[error("Node tree '{0}' not found")]
    TreeNotFound(String),

    /// No node with the given name exists in the tree.
    #[error("Node '{node}' not found in tree '{tree}'")]
    NodeNotFound { tree: String, node: String },

    /// The node has no pack list declaration stored under this property.
    #[error("Node '{node}' has no pack list property '{prop_name}'")]
    PropertyNotFound { node: String, prop_name: String },

    /// A remove was requested for a position outside the slot store.
    #[error("Slot index {index} out of range for {len} slots")]
    IndexOutOfRange { index: usize, len: usize },

    /// A link endpoint does not exist on its node.
    #[error("Socket '{identifier}' not found on node {node}")]
    SocketNotFound { node: usize, identifier: String },

    /// The two endpoints cannot be linked.
    #[error("Invalid link: {0}")]
    InvalidLink(&'static str),

    /// The operator idname is not registered.
    #[error("Unknown operator '{0}'")]
    UnknownOperator(String),

    /// A persisted slot has an empty identity.
    #[error("Slot at position {0} has an empty identity")]
    EmptyIdentity(usize),

    /// Two persisted slots share an identity.
    #[error("Duplicate slot identity '{0}'")]
    DuplicateIdentity(String),

    /// Malformed JSON in a workspace file or operator call.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Workspace file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PackListError {
    /// Whether the error comes from a caller passing bad arguments rather
    /// than from the environment or persisted data.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::InvalidLink(_) | Self::UnknownOperator(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PackListError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "Slot index 3 out of range for 2 slots");
        assert!(err.is_contract_violation());

        let err = PackListError::TreeNotFound("NodeTree".to_string());
        assert_eq!(err.to_string(), "Node tree 'NodeTree' not found");
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: PackListError = parse.unwrap_err().into();
        assert!(matches!(err, PackListError::Json(_)));
    }
}
