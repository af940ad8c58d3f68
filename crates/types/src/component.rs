//! Component descriptors
//!
//! A [`ComponentDescriptor`] is the flat, read-only description of one
//! deployable component as handed over by the metadata layer: its declared
//! contract lists, its owning module and (optionally) application, and its
//! implementation type.

use crate::ids::{ApplicationName, ComponentName, ContractName, ModuleName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What kind of component this is.
///
/// Only session components carry a binder identity usable for startup
/// ordering; message-driven components are never valid reference targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Session,
    Entity,
    MessageDriven,
}

/// The application a module is deployed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRef {
    pub name: ApplicationName,
    /// True when the deployment is packaged as a multi-module archive.
    /// Only then does the application segment appear in tenant-wide names.
    pub multi_module_archive: bool,
}

impl ApplicationRef {
    pub fn new(name: ApplicationName, multi_module_archive: bool) -> Self {
        Self {
            name,
            multi_module_archive,
        }
    }
}

/// One component's declared views and owning scope, read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub name: ComponentName,
    pub module: ModuleName,
    pub application: Option<ApplicationRef>,
    pub kind: ComponentKind,
    pub business_locals: Vec<ContractName>,
    pub business_remotes: Vec<ContractName>,
    pub home: Option<ContractName>,
    pub local_home: Option<ContractName>,
    /// Component publishes a view shaped like its own implementation type.
    pub no_contract: bool,
    pub impl_type: ContractName,
}

impl ComponentDescriptor {
    pub fn new(
        kind: ComponentKind,
        name: ComponentName,
        module: ModuleName,
        impl_type: ContractName,
    ) -> Self {
        Self {
            name,
            module,
            application: None,
            kind,
            business_locals: Vec::new(),
            business_remotes: Vec::new(),
            home: None,
            local_home: None,
            no_contract: false,
            impl_type,
        }
    }

    pub fn session(name: ComponentName, module: ModuleName, impl_type: ContractName) -> Self {
        Self::new(ComponentKind::Session, name, module, impl_type)
    }

    pub fn entity(name: ComponentName, module: ModuleName, impl_type: ContractName) -> Self {
        Self::new(ComponentKind::Entity, name, module, impl_type)
    }

    pub fn with_application(mut self, application: ApplicationRef) -> Self {
        self.application = Some(application);
        self
    }

    pub fn with_business_local(mut self, contract: ContractName) -> Self {
        self.business_locals.push(contract);
        self
    }

    pub fn with_business_remote(mut self, contract: ContractName) -> Self {
        self.business_remotes.push(contract);
        self
    }

    pub fn with_home(mut self, contract: ContractName) -> Self {
        self.home = Some(contract);
        self
    }

    pub fn with_local_home(mut self, contract: ContractName) -> Self {
        self.local_home = Some(contract);
        self
    }

    pub fn with_no_contract_view(mut self) -> Self {
        self.no_contract = true;
        self
    }

    pub fn is_session(&self) -> bool {
        self.kind == ComponentKind::Session
    }

    /// The full set of contracts this component exposes, across all
    /// declared view kinds. The no-contract view is not part of this set;
    /// it matches by implementation type.
    pub fn exposed_contracts(&self) -> BTreeSet<ContractName> {
        let mut contracts = BTreeSet::new();
        contracts.extend(self.business_locals.iter().cloned());
        contracts.extend(self.business_remotes.iter().cloned());
        if let Some(home) = &self.home {
            contracts.insert(home.clone());
        }
        if let Some(local_home) = &self.local_home {
            contracts.insert(local_home.clone());
        }
        contracts
    }

    /// Total number of views this component publishes, counting every view
    /// kind including the no-contract view.
    pub fn view_count(&self) -> usize {
        self.business_locals.len()
            + self.business_remotes.len()
            + usize::from(self.home.is_some())
            + usize::from(self.local_home.is_some())
            + usize::from(self.no_contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ComponentDescriptor {
        ComponentDescriptor::session(
            ComponentName::new("TestBean"),
            ModuleName::new("testModule"),
            ContractName::new("com.acme.TestBeanImpl"),
        )
    }

    #[test]
    fn exposed_contracts_cover_all_view_kinds() {
        let component = descriptor()
            .with_business_local(ContractName::new("com.acme.Foo"))
            .with_business_remote(ContractName::new("com.acme.Bar"))
            .with_home(ContractName::new("com.acme.FooHome"))
            .with_local_home(ContractName::new("com.acme.FooLocalHome"));

        let exposed = component.exposed_contracts();
        assert_eq!(exposed.len(), 4);
        assert!(exposed.contains(&ContractName::new("com.acme.FooHome")));
    }

    #[test]
    fn view_count_includes_no_contract_view() {
        let component = descriptor()
            .with_business_local(ContractName::new("com.acme.Foo"))
            .with_no_contract_view();
        assert_eq!(component.view_count(), 2);

        let single = descriptor().with_business_local(ContractName::new("com.acme.Foo"));
        assert_eq!(single.view_count(), 1);
    }
}
