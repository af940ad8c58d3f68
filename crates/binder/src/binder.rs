//! The binding engine
//!
//! A [`ComponentBinder`] publishes every view of one component into the
//! namespace and unpublishes them on shutdown. Binders move Unbound →
//! Bound → Unbound, driven externally by the deployment lifecycle; each
//! transition happens at most once per component instance.

use crate::error::BindError;
use crate::identity::BinderId;
use crate::names::NameDeriver;
use crate::proxy::ProxyFactory;
use crate::view::View;
use arbor_naming::NamespaceRef;
use arbor_types::ComponentDescriptor;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle state of a binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
}

/// Publishes one component's views under their canonical names.
pub struct ComponentBinder {
    component: Arc<ComponentDescriptor>,
    views: Vec<View>,
    deriver: NameDeriver,
    namespace: NamespaceRef,
    factory: Arc<dyn ProxyFactory>,
    state: BindingState,
    /// Names actually published by `bind`, in publish order.
    published: Vec<String>,
}

impl ComponentBinder {
    pub fn new(
        component: Arc<ComponentDescriptor>,
        deriver: NameDeriver,
        namespace: NamespaceRef,
        factory: Arc<dyn ProxyFactory>,
    ) -> Self {
        let views = View::build_all(&component);
        Self {
            component,
            views,
            deriver,
            namespace,
            factory,
            state: BindingState::Unbound,
            published: Vec::new(),
        }
    }

    pub fn component(&self) -> &Arc<ComponentDescriptor> {
        &self.component
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    pub fn id(&self) -> BinderId {
        BinderId::for_component(&self.component)
    }

    /// Publish every view at its tenant-wide, app, and module names, plus
    /// the unqualified alias when the component has exactly one view.
    ///
    /// Publication is create-only: an occupied path fails the bind. A
    /// partial failure is not rolled back; the binder stays answerable to
    /// [`ComponentBinder::unbind`], which removes whatever was published.
    pub fn bind(&mut self) -> Result<(), BindError> {
        if self.state == BindingState::Bound {
            return Err(BindError::AlreadyActive(self.component.name.clone()));
        }
        self.state = BindingState::Bound;

        let single_view = self.views.len() == 1;
        for view in &self.views {
            let entry = self.factory.produce(view);
            let names = self.deriver.view_names(view);
            for name in names.in_bind_order() {
                self.namespace.bind(name, entry.clone())?;
                self.published.push(name.to_string());
            }
            debug!(
                component = %self.component.name,
                qualifier = %view.qualifier(),
                "Bound view"
            );

            // A single-view component is additionally reachable without
            // the contract qualifier, through the same forwarding target.
            if single_view {
                let alias = self.deriver.alias_names(&self.component);
                for name in alias.in_bind_order() {
                    self.namespace.bind(name, entry.clone())?;
                    self.published.push(name.to_string());
                }
                debug!(component = %self.component.name, "Bound unqualified alias");
            }
        }

        Ok(())
    }

    /// Remove every name `bind` published, in exact reverse order.
    ///
    /// A missing name is a bookkeeping integrity error: it means the
    /// namespace no longer matches what this binder published. The sweep
    /// continues past such names and the first error is returned once all
    /// removals were attempted.
    pub fn unbind(&mut self) -> Result<(), BindError> {
        if self.state == BindingState::Unbound {
            return Err(BindError::NotActive(self.component.name.clone()));
        }

        let mut first_error = None;
        for name in self.published.iter().rev() {
            if let Err(error) = self.namespace.unbind(name) {
                debug!(component = %self.component.name, path = %name, "Unbind integrity error");
                first_error.get_or_insert(error);
            }
        }
        self.published.clear();
        self.state = BindingState::Unbound;

        match first_error {
            None => Ok(()),
            Some(error) => Err(BindError::Naming(error)),
        }
    }
}
