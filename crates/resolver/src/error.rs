//! Resolution error types
//!
//! Every variant carries enough of the reference context (owning scope,
//! declared name, required contract) for the failure to be actionable
//! without re-running the search. Nothing here is recovered locally: an
//! ambiguous reference is a configuration error, never a pick.

use arbor_types::{ComponentName, ContractError, ContractName, ScopeTreeError};
use thiserror::Error;

/// Errors raised by [`crate::TreeResolver`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No component satisfies reference {reference}")]
    NotFound { reference: String },

    #[error(
        "Reference {reference} was matched by more than one component: {matches:?}. \
         Specify a target name explicitly or ensure the contract is unique"
    )]
    Ambiguous {
        reference: String,
        matches: Vec<ComponentName>,
    },

    #[error(
        "Required contract '{required}' is not unique within component '{component}'; \
         assignable contracts: {candidates:?}"
    )]
    AmbiguousContract {
        component: ComponentName,
        required: ContractName,
        candidates: Vec<ContractName>,
    },

    #[error("Target name '{target}' in reference {reference} must not end with '/' or '#'")]
    TrailingSeparator { target: String, reference: String },

    #[error(
        "Reference {reference} uses relative path '{path}', but its owning scope is the \
         tree root and has nothing to be relative to"
    )]
    RelativePathFromRoot { path: String, reference: String },

    #[error("No scope at relative path '{path}' below '{from}' for reference {reference}")]
    UnknownRelativePath {
        path: String,
        from: String,
        reference: String,
    },

    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error(transparent)]
    Scope(#[from] ScopeTreeError),
}
