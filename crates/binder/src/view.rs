//! Published views of a component
//!
//! A [`View`] is one published facet of a component: a distinct contract,
//! or the component's own implementation type for the no-contract view.
//! Views are built once from the descriptor at binder construction and are
//! immutable afterwards.

use arbor_types::{ComponentDescriptor, ContractName};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which declared facet a view publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    BusinessLocal,
    BusinessRemote,
    Home,
    LocalHome,
    NoContract,
}

/// One published facet of a component.
#[derive(Debug, Clone)]
pub struct View {
    component: Arc<ComponentDescriptor>,
    contract: Option<ContractName>,
    kind: ViewKind,
}

impl View {
    fn new(component: Arc<ComponentDescriptor>, contract: Option<ContractName>, kind: ViewKind) -> Self {
        debug_assert!(
            (kind == ViewKind::NoContract) == contract.is_none(),
            "no-contract views carry no contract; every other kind carries one"
        );
        Self {
            component,
            contract,
            kind,
        }
    }

    /// Build every view the component declares, in declaration order:
    /// business locals, business remotes, home, local home, and the
    /// no-contract view last.
    pub fn build_all(component: &Arc<ComponentDescriptor>) -> Vec<View> {
        let mut views = Vec::with_capacity(component.view_count());
        for contract in &component.business_locals {
            views.push(View::new(
                component.clone(),
                Some(contract.clone()),
                ViewKind::BusinessLocal,
            ));
        }
        for contract in &component.business_remotes {
            views.push(View::new(
                component.clone(),
                Some(contract.clone()),
                ViewKind::BusinessRemote,
            ));
        }
        if let Some(home) = &component.home {
            views.push(View::new(component.clone(), Some(home.clone()), ViewKind::Home));
        }
        if let Some(local_home) = &component.local_home {
            views.push(View::new(
                component.clone(),
                Some(local_home.clone()),
                ViewKind::LocalHome,
            ));
        }
        if component.no_contract {
            views.push(View::new(component.clone(), None, ViewKind::NoContract));
        }
        views
    }

    pub fn component(&self) -> &Arc<ComponentDescriptor> {
        &self.component
    }

    /// The published contract; `None` for the no-contract view.
    pub fn contract(&self) -> Option<&ContractName> {
        self.contract.as_ref()
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// The name qualifier this view is published under: its contract, or
    /// the implementation type for the no-contract view.
    pub fn qualifier(&self) -> &ContractName {
        self.contract.as_ref().unwrap_or(&self.component.impl_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_types::{ComponentName, ModuleName};

    fn component() -> Arc<ComponentDescriptor> {
        Arc::new(
            ComponentDescriptor::session(
                ComponentName::new("TestBean"),
                ModuleName::new("testModule"),
                ContractName::new("com.acme.TestBeanImpl"),
            )
            .with_business_local(ContractName::new("com.acme.Foo"))
            .with_business_remote(ContractName::new("com.acme.Bar"))
            .with_no_contract_view(),
        )
    }

    #[test]
    fn views_follow_declaration_order() {
        let views = View::build_all(&component());
        let kinds: Vec<ViewKind> = views.iter().map(|v| v.kind()).collect();
        assert_eq!(
            kinds,
            vec![ViewKind::BusinessLocal, ViewKind::BusinessRemote, ViewKind::NoContract]
        );
    }

    #[test]
    fn no_contract_view_qualifies_by_implementation_type() {
        let views = View::build_all(&component());
        let no_contract = views.last().unwrap();
        assert_eq!(no_contract.contract(), None);
        assert_eq!(no_contract.qualifier(), &ContractName::new("com.acme.TestBeanImpl"));
    }
}
