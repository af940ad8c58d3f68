//! Reference resolution over deployment scope trees
//!
//! A component declares a [`ComponentReference`]: "the component named X",
//! "whatever satisfies contract C", or both, optionally scoped with
//! `path#name` or `module/name` link syntax. The [`TreeResolver`] searches
//! the scope tree — the owning scope first, then its descendants, then its
//! ancestors and their other descendants — and returns the unique
//! [`ResolutionResult`] or fails loudly. Ambiguity is never broken by
//! picking a candidate.

#![deny(unsafe_code)]

mod error;
mod reference;
mod resolver;
mod result;

pub use error::*;
pub use reference::*;
pub use resolver::*;
pub use result::*;
