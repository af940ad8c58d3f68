//! Namespace and endpoint-call error types

use thiserror::Error;

/// Errors raised by a [`crate::Namespace`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("A binding already exists at '{0}'")]
    AlreadyBound(String),

    #[error("No binding at '{0}'")]
    NotBound(String),

    #[error("Link chain starting at '{0}' did not terminate")]
    LinkLoop(String),
}

/// Errors surfaced by an [`crate::Endpoint`] call.
///
/// `Naming` means the call never reached a target; the other variants are
/// raised by the target itself and are forwarded to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error("Endpoint has no operation named '{0}'")]
    UnknownMethod(String),

    #[error("{0}")]
    Application(String),
}
