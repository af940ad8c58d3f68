//! View binding engine for Arbor
//!
//! For every deployable component this crate:
//!
//! - builds the component's [`View`]s from its descriptor,
//! - derives the canonical hierarchical names each view is published under
//!   ([`NameDeriver`]): tenant-wide, application-scoped, and module-scoped,
//!   plus the unqualified alias for single-view components,
//! - publishes and unpublishes the views through the namespace
//!   ([`ComponentBinder`]), and
//! - produces the forwarding targets that get published: deferred
//!   [`LazyProxy`] objects that resolve their real target on first call,
//!   or plain link redirect records ([`LinkRedirectFactory`]).
//!
//! Binder identities ([`BinderId`]) name binder instances for startup
//! ordering.

#![deny(unsafe_code)]

mod binder;
mod error;
mod identity;
mod names;
mod proxy;
mod view;

pub use binder::*;
pub use error::*;
pub use identity::*;
pub use names::*;
pub use proxy::*;
pub use view::*;
