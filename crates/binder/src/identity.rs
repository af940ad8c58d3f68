//! Binder identities
//!
//! Each component's binder has a unique installable name. Resolution
//! results carry it so callers can order startup of a referencing
//! component after the binder of its target.

use arbor_types::ComponentDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable name of a component's binder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinderId(String);

impl BinderId {
    /// Derive the binder name for a component:
    /// `arbor:application=<app>,module=<module>,component=<name>,service=ComponentBinder`,
    /// with the application key only when the component has an owning
    /// application.
    pub fn for_component(component: &ComponentDescriptor) -> Self {
        let mut name = String::from("arbor:");
        if let Some(application) = &component.application {
            name.push_str("application=");
            name.push_str(application.name.as_str());
            name.push(',');
        }
        name.push_str("module=");
        name.push_str(component.module.as_str());
        name.push_str(",component=");
        name.push_str(component.name.as_str());
        name.push_str(",service=ComponentBinder");
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BinderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_types::{ApplicationName, ApplicationRef, ComponentName, ContractName, ModuleName};

    #[test]
    fn binder_id_includes_application_only_when_present() {
        let component = ComponentDescriptor::session(
            ComponentName::new("TestBean"),
            ModuleName::new("testModule"),
            ContractName::new("com.acme.TestBeanImpl"),
        );
        assert_eq!(
            BinderId::for_component(&component).as_str(),
            "arbor:module=testModule,component=TestBean,service=ComponentBinder"
        );

        let with_app = component.with_application(ApplicationRef::new(
            ApplicationName::new("testApp"),
            true,
        ));
        assert_eq!(
            BinderId::for_component(&with_app).as_str(),
            "arbor:application=testApp,module=testModule,component=TestBean,service=ComponentBinder"
        );
    }
}
