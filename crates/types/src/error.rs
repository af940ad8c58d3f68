//! Error types for the metadata and scope-tree model

use crate::ids::ContractName;
use thiserror::Error;

/// Errors raised while building or querying a scope tree.
#[derive(Debug, Error)]
pub enum ScopeTreeError {
    #[error("A scope with relative path '{0}' already exists in the tree")]
    DuplicatePath(String),

    #[error("Unknown scope id {0}")]
    UnknownScope(usize),
}

/// Errors raised by the contract-loading capability.
///
/// Loading is owned by the external metadata layer; failures here are
/// metadata errors and propagate unchanged through the engine.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Contract type not found: {0}")]
    NotFound(ContractName),
}
