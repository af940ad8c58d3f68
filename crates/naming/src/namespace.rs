//! The namespace capability

use crate::endpoint::{Endpoint, EndpointRef};
use crate::error::NamingError;
use std::fmt;
use std::sync::Arc;

/// What a namespace path holds.
#[derive(Clone)]
pub enum NamespaceEntry {
    /// A live endpoint object.
    Object(EndpointRef),
    /// A redirect to another namespace path, dereferenced on lookup.
    Link(String),
}

impl NamespaceEntry {
    pub fn object(endpoint: impl Endpoint + 'static) -> Self {
        Self::Object(Arc::new(endpoint))
    }

    pub fn link(target: impl Into<String>) -> Self {
        Self::Link(target.into())
    }

    pub fn as_object(&self) -> Option<&EndpointRef> {
        match self {
            Self::Object(endpoint) => Some(endpoint),
            Self::Link(_) => None,
        }
    }

    pub fn as_link(&self) -> Option<&str> {
        match self {
            Self::Object(_) => None,
            Self::Link(target) => Some(target),
        }
    }
}

impl fmt::Debug for NamespaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(_) => f.write_str("Object(..)"),
            Self::Link(target) => write!(f, "Link({})", target),
        }
    }
}

/// Hierarchical namespace: bind, unbind, and lookup by `/`-separated path.
///
/// Binding is create-only: a bind onto an occupied path fails. Unbind and
/// lookup fail on an absent path. Implementations dereference
/// [`NamespaceEntry::Link`] records during lookup, so callers always
/// receive the final entry. Lookup may block per the backing namespace's
/// own consistency model.
pub trait Namespace: Send + Sync {
    fn bind(&self, path: &str, entry: NamespaceEntry) -> Result<(), NamingError>;

    fn unbind(&self, path: &str) -> Result<(), NamingError>;

    fn lookup(&self, path: &str) -> Result<NamespaceEntry, NamingError>;
}

/// Shared handle to a namespace.
pub type NamespaceRef = Arc<dyn Namespace>;
