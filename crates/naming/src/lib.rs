//! Namespace capability and dynamic endpoint model for Arbor
//!
//! The engine publishes and resolves component views through an abstract
//! hierarchical namespace:
//!
//! - [`Namespace`]: bind (create-only), unbind, and lookup by `/`-separated
//!   path. Supplied by the hosting environment; [`MemoryNamespace`] is the
//!   in-process implementation.
//! - [`NamespaceEntry`]: what a path holds — a live [`Endpoint`] object, or
//!   a [`NamespaceEntry::Link`] redirect record dereferenced on lookup.
//! - [`Endpoint`]: the dynamic call surface of a published view. Callers
//!   invoke named operations with opaque JSON arguments; the concrete
//!   dispatch is the endpoint's business.

#![deny(unsafe_code)]

mod endpoint;
mod error;
mod memory;
mod namespace;

pub use endpoint::*;
pub use error::*;
pub use memory::*;
pub use namespace::*;
