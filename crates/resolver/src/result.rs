//! Resolution results

use arbor_binder::BinderId;
use arbor_types::{ComponentDescriptor, ContractName};
use std::fmt;
use std::sync::Arc;

/// The outcome of resolving one reference.
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    name: String,
    binder: Option<BinderId>,
    contract: Option<ContractName>,
    component: Option<Arc<ComponentDescriptor>>,
}

impl ResolutionResult {
    pub(crate) fn resolved(
        name: String,
        binder: Option<BinderId>,
        contract: ContractName,
        component: Arc<ComponentDescriptor>,
    ) -> Self {
        Self {
            name,
            binder,
            contract: Some(contract),
            component: Some(component),
        }
    }

    pub(crate) fn overridden(name: String, contract: Option<ContractName>) -> Self {
        Self {
            name,
            binder: None,
            contract,
            component: None,
        }
    }

    /// Canonical tenant-wide name the reference resolved to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the target's binder, for startup ordering. Present only
    /// for session components.
    pub fn binder(&self) -> Option<&BinderId> {
        self.binder.as_ref()
    }

    /// The contract the reference actually resolved to, which for a
    /// supertype match is the exposed contract, not the requested one.
    pub fn contract(&self) -> Option<&ContractName> {
        self.contract.as_ref()
    }

    /// The matched component. Absent when an explicit override bypassed
    /// resolution.
    pub fn component(&self) -> Option<&Arc<ComponentDescriptor>> {
        self.component.as_ref()
    }
}

impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResolutionResult[name={} binder={}]",
            self.name,
            self.binder
                .as_ref()
                .map(|b| b.as_str())
                .unwrap_or("<none>"),
        )
    }
}
