//! Deferred forwarding targets
//!
//! A bound view does not hold its real implementation; it holds a stand-in
//! produced by a [`ProxyFactory`]:
//!
//! - [`LazyProxyFactory`] publishes a [`LazyProxy`], an endpoint that
//!   resolves its link through the namespace on first forwarded call and
//!   caches the target for its lifetime.
//! - [`LinkRedirectFactory`] publishes a plain link record instead, for
//!   environments where call-level interception is unavailable or
//!   undesired. The namespace dereferences it on lookup; full redirection
//!   only, but semantically identical for the caller.
//!
//! Both locate the real target through a [`TargetLocator`], the capability
//! the deployment pipeline uses to say where component instances actually
//! live.

use crate::view::View;
use arbor_naming::{CallError, Endpoint, EndpointRef, NamespaceEntry, NamespaceRef, NamingError};
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

/// Reserved finalization hook. Filtered by the lazy proxy: answered
/// locally, never forwarded, so object teardown can never trigger a
/// namespace lookup.
pub const FINALIZE_METHOD: &str = "finalize";

/// Where a view's real implementation is published.
pub trait TargetLocator: Send + Sync {
    fn locate(&self, view: &View) -> String;
}

impl<F> TargetLocator for F
where
    F: Fn(&View) -> String + Send + Sync,
{
    fn locate(&self, view: &View) -> String {
        self(view)
    }
}

/// Produces the namespace entry published for a view.
pub trait ProxyFactory: Send + Sync {
    fn produce(&self, view: &View) -> NamespaceEntry;
}

/// Publishes deferred [`LazyProxy`] endpoints.
pub struct LazyProxyFactory {
    namespace: NamespaceRef,
    locator: Arc<dyn TargetLocator>,
}

impl LazyProxyFactory {
    pub fn new(namespace: NamespaceRef, locator: Arc<dyn TargetLocator>) -> Self {
        Self { namespace, locator }
    }
}

impl ProxyFactory for LazyProxyFactory {
    fn produce(&self, view: &View) -> NamespaceEntry {
        let link = self.locator.locate(view);
        NamespaceEntry::Object(Arc::new(LazyProxy::new(link, self.namespace.clone())))
    }
}

/// Publishes plain link redirect records instead of proxies.
pub struct LinkRedirectFactory {
    locator: Arc<dyn TargetLocator>,
}

impl LinkRedirectFactory {
    pub fn new(locator: Arc<dyn TargetLocator>) -> Self {
        Self { locator }
    }
}

impl ProxyFactory for LinkRedirectFactory {
    fn produce(&self, view: &View) -> NamespaceEntry {
        NamespaceEntry::link(self.locator.locate(view))
    }
}

/// Endpoint that resolves its target lazily, once, and forwards every call.
///
/// Construction performs no lookup. The first forwarded call resolves the
/// link through the namespace; the write lock is held across that lookup,
/// so concurrent first calls perform at most one underlying lookup and all
/// observe the same target. A failed lookup is not cached; the next call
/// retries.
///
/// `Display`, `PartialEq`, `Eq`, and `Hash` are answered from the link
/// string alone, so printing a proxy or keeping it in a container never
/// resolves anything.
pub struct LazyProxy {
    link: String,
    namespace: NamespaceRef,
    target: RwLock<Option<EndpointRef>>,
}

impl LazyProxy {
    pub fn new(link: impl Into<String>, namespace: NamespaceRef) -> Self {
        Self {
            link: link.into(),
            namespace,
            target: RwLock::new(None),
        }
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Whether the target has been resolved yet. Diagnostic only.
    pub fn is_resolved(&self) -> bool {
        self.target.read().is_some()
    }

    fn target(&self) -> Result<EndpointRef, NamingError> {
        if let Some(target) = self.target.read().as_ref() {
            return Ok(target.clone());
        }
        let mut slot = self.target.write();
        if let Some(target) = slot.as_ref() {
            return Ok(target.clone());
        }
        let entry = self.namespace.lookup(&self.link)?;
        let target = match entry {
            NamespaceEntry::Object(endpoint) => endpoint,
            // Lookup contracts dereference links; a surviving link means
            // the chain never reached an object.
            NamespaceEntry::Link(tail) => return Err(NamingError::NotBound(tail)),
        };
        debug!(link = %self.link, "Resolved lazy link");
        *slot = Some(target.clone());
        Ok(target)
    }
}

impl Endpoint for LazyProxy {
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, CallError> {
        if method == FINALIZE_METHOD && args.is_empty() {
            return Ok(Value::Null);
        }
        let target = self.target()?;
        target.invoke(method, args)
    }
}

impl fmt::Display for LazyProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "namespace-link: {}", self.link)
    }
}

impl fmt::Debug for LazyProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyProxy")
            .field("link", &self.link)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

impl PartialEq for LazyProxy {
    fn eq(&self, other: &Self) -> bool {
        self.link == other.link
    }
}

impl Eq for LazyProxy {}

impl Hash for LazyProxy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.link.hash(state);
    }
}
