//! Unresolved component references

use arbor_types::{ContractName, ScopeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One unresolved reference from a component to another.
///
/// Created when the metadata layer encounters an injection point, consumed
/// once by the resolver, never mutated. `lookup_name` and `mapped_name`
/// are explicit overrides that bypass tree search entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentReference {
    owner: ScopeId,
    target_name: Option<String>,
    contract: Option<ContractName>,
    mapped_name: Option<String>,
    lookup_name: Option<String>,
}

impl ComponentReference {
    pub fn new(owner: ScopeId, contract: Option<ContractName>) -> Self {
        Self {
            owner,
            target_name: None,
            contract,
            mapped_name: None,
            lookup_name: None,
        }
    }

    /// Reference by required contract alone.
    pub fn to_contract(owner: ScopeId, contract: ContractName) -> Self {
        Self::new(owner, Some(contract))
    }

    /// Add a target component name: bare `name`, `path#name`, or
    /// `module/name`.
    pub fn with_target_name(mut self, name: impl Into<String>) -> Self {
        self.target_name = Some(name.into());
        self
    }

    pub fn with_mapped_name(mut self, name: impl Into<String>) -> Self {
        self.mapped_name = Some(name.into());
        self
    }

    pub fn with_lookup_name(mut self, name: impl Into<String>) -> Self {
        self.lookup_name = Some(name.into());
        self
    }

    /// Scope this reference was declared in; anchors `path#name` links.
    pub fn owner(&self) -> ScopeId {
        self.owner
    }

    pub fn target_name(&self) -> Option<&str> {
        self.target_name.as_deref()
    }

    pub fn contract(&self) -> Option<&ContractName> {
        self.contract.as_ref()
    }

    pub fn mapped_name(&self) -> Option<&str> {
        self.mapped_name.as_deref()
    }

    pub fn lookup_name(&self) -> Option<&str> {
        self.lookup_name.as_deref()
    }

    /// Explicit override path, if any; lookup-name wins over mapped-name.
    pub fn override_path(&self) -> Option<&str> {
        self.lookup_name.as_deref().or(self.mapped_name.as_deref())
    }
}

impl fmt::Display for ComponentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[reference: contract '{}', target name '{}', owner {}]",
            self.contract
                .as_ref()
                .map(|c| c.as_str())
                .unwrap_or("<none>"),
            self.target_name.as_deref().unwrap_or("<none>"),
            self.owner,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_types::{ModuleName, ScopeTree};

    #[test]
    fn display_carries_the_full_context() {
        let tree = ScopeTree::new("app", ModuleName::new("app"));
        let reference = ComponentReference::to_contract(tree.root(), ContractName::new("com.acme.Foo"))
            .with_target_name("other#TestBean");

        let text = reference.to_string();
        assert!(text.contains("com.acme.Foo"));
        assert!(text.contains("other#TestBean"));
        assert!(text.contains("scope:0"));
    }

    #[test]
    fn lookup_name_wins_over_mapped_name() {
        let tree = ScopeTree::new("app", ModuleName::new("app"));
        let reference = ComponentReference::new(tree.root(), None)
            .with_mapped_name("mapped/path")
            .with_lookup_name("lookup/path");
        assert_eq!(reference.override_path(), Some("lookup/path"));
    }
}
