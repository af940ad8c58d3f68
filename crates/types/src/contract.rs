//! Contract type model and loading capability
//!
//! A [`ContractType`] is the loaded form of a declared contract: its name
//! plus the names of every ancestor contract it extends. The engine never
//! loads contracts itself; it asks a [`ContractLoader`] supplied by the
//! external metadata layer.

use crate::error::ContractError;
use crate::ids::ContractName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A loaded contract type with its ancestry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractType {
    name: ContractName,
    /// Every contract this one transitively extends.
    ancestors: BTreeSet<ContractName>,
}

impl ContractType {
    pub fn new(name: ContractName) -> Self {
        Self {
            name,
            ancestors: BTreeSet::new(),
        }
    }

    /// Declare an ancestor contract. Ancestry is transitive; callers
    /// supply the full closure.
    pub fn with_ancestor(mut self, ancestor: ContractName) -> Self {
        self.ancestors.insert(ancestor);
        self
    }

    pub fn name(&self) -> &ContractName {
        &self.name
    }

    pub fn ancestors(&self) -> &BTreeSet<ContractName> {
        &self.ancestors
    }

    /// True when a value of `other` satisfies this contract, i.e. `other`
    /// is this contract itself or declares it as an ancestor.
    pub fn is_assignable_from(&self, other: &ContractType) -> bool {
        self.name == other.name || other.ancestors.contains(&self.name)
    }
}

/// Capability for materializing declared contract names into loaded types.
///
/// The backing facility (a class loader, a schema registry) is owned by
/// the deployment pipeline. A missing type surfaces as
/// [`ContractError::NotFound`] and is never swallowed by the engine.
pub trait ContractLoader: Send + Sync {
    fn load(&self, name: &ContractName) -> Result<Arc<ContractType>, ContractError>;
}

/// In-memory contract catalog.
///
/// Used by embedders that know their full contract set up front, and by
/// tests.
#[derive(Debug, Default)]
pub struct StaticContractLoader {
    contracts: BTreeMap<ContractName, Arc<ContractType>>,
}

impl StaticContractLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contract type, replacing any previous registration of
    /// the same name.
    pub fn register(&mut self, contract: ContractType) {
        self.contracts
            .insert(contract.name().clone(), Arc::new(contract));
    }

    pub fn with(mut self, contract: ContractType) -> Self {
        self.register(contract);
        self
    }
}

impl ContractLoader for StaticContractLoader {
    fn load(&self, name: &ContractName) -> Result<Arc<ContractType>, ContractError> {
        self.contracts
            .get(name)
            .cloned()
            .ok_or_else(|| ContractError::NotFound(name.clone()))
    }
}
