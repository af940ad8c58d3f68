//! Scope-tree search
//!
//! Resolution starts at the reference's owning scope, scans its
//! components, then descends into children, then climbs to the parent and
//! scans the rest of the tree — each scope at most once, tracked through a
//! visited set so subtrees reached from both directions are never
//! rescanned.

use crate::error::ResolveError;
use crate::reference::ComponentReference;
use crate::result::ResolutionResult;
use arbor_binder::{BinderId, NameDeriver};
use arbor_types::{
    ComponentDescriptor, ComponentKind, ContractLoader, ContractName, ScopeId, ScopeNode, ScopeTree,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Resolves references against a deployment scope tree.
///
/// Read-only over the tree; independent references may resolve
/// concurrently while the tree is quiescent.
pub struct TreeResolver {
    loader: Arc<dyn ContractLoader>,
    deriver: NameDeriver,
}

/// The reference's target-name constraint, normalized once per resolution.
enum TargetFilter {
    /// No target name: every component passes.
    Any,
    /// Bare component name.
    Bare(String),
    /// `path#name`: the path names a scope, absolutely (its relative path
    /// from the tree root) or relative to the owner's parent.
    Scoped {
        path: String,
        name: String,
        resolved: Option<ScopeId>,
    },
    /// `module/name`.
    Module { module: String, name: String },
}

impl TreeResolver {
    pub fn new(loader: Arc<dyn ContractLoader>, deriver: NameDeriver) -> Self {
        Self { loader, deriver }
    }

    /// Resolve a reference, searching from its owning scope.
    ///
    /// Returns the unique match or fails: no match is `NotFound`, several
    /// matches in one scope are `Ambiguous`, and a contract satisfied by
    /// more than one exposed contract of a candidate is
    /// `AmbiguousContract`.
    pub fn resolve(
        &self,
        tree: &ScopeTree,
        reference: &ComponentReference,
    ) -> Result<ResolutionResult, ResolveError> {
        debug!(reference = %reference, "Resolving reference");

        if let Some(path) = reference.override_path() {
            debug!(reference = %reference, path = %path, "Reference overridden, bypassing search");
            return Ok(ResolutionResult::overridden(
                path.to_string(),
                reference.contract().cloned(),
            ));
        }

        let (filter, deferred) = self.build_filter(tree, reference)?;

        let mut visited: HashSet<ScopeId> = HashSet::new();
        if let Some(result) = self.scan_down(tree, reference.owner(), &mut visited, reference, &filter)? {
            return Ok(result);
        }

        // Climb towards the root, scanning each ancestor and whatever of
        // its subtree the descent has not covered yet.
        let mut current = reference.owner();
        while let Some(parent) = tree.node(current)?.parent() {
            if !visited.contains(&parent) {
                if let Some(result) = self.scan_down(tree, parent, &mut visited, reference, &filter)? {
                    return Ok(result);
                }
            }
            current = parent;
        }

        // A link that never named a reachable scope explains the miss
        // better than a plain not-found.
        if let Some(error) = deferred {
            return Err(error);
        }
        Err(ResolveError::NotFound {
            reference: reference.to_string(),
        })
    }

    /// Scan a scope and then its unvisited children, depth first.
    fn scan_down(
        &self,
        tree: &ScopeTree,
        scope: ScopeId,
        visited: &mut HashSet<ScopeId>,
        reference: &ComponentReference,
        filter: &TargetFilter,
    ) -> Result<Option<ResolutionResult>, ResolveError> {
        visited.insert(scope);

        if let Some(result) = self.find_in_scope(tree, scope, reference, filter)? {
            return Ok(Some(result));
        }

        let children: Vec<ScopeId> = tree.node(scope)?.children().to_vec();
        for child in children {
            if visited.contains(&child) {
                continue;
            }
            if let Some(result) = self.scan_down(tree, child, visited, reference, filter)? {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    /// Apply the name filter and the contract filter to every component of
    /// one scope. Exactly one survivor resolves; several are a
    /// configuration error.
    fn find_in_scope(
        &self,
        tree: &ScopeTree,
        scope: ScopeId,
        reference: &ComponentReference,
        filter: &TargetFilter,
    ) -> Result<Option<ResolutionResult>, ResolveError> {
        let node = tree.node(scope)?;
        let mut matches: Vec<(Arc<ComponentDescriptor>, ContractName)> = Vec::new();

        for component in node.components() {
            if !accepts_name(filter, node, component) {
                continue;
            }
            if let Some(contract) = self.matching_contract(component, reference)? {
                debug!(
                    component = %component.name,
                    contract = %contract,
                    scope = %scope,
                    "Candidate matched"
                );
                matches.push((component.clone(), contract));
            }
        }

        match matches.len() {
            0 => Ok(None),
            1 => {
                let (component, contract) = matches.remove(0);
                let name = self.deriver.names(&component, Some(&contract)).global;
                let binder = component
                    .is_session()
                    .then(|| BinderId::for_component(&component));
                let result = ResolutionResult::resolved(name, binder, contract, component);
                debug!(reference = %reference, result = %result, "Resolved reference");
                Ok(Some(result))
            }
            _ => Err(ResolveError::Ambiguous {
                reference: reference.to_string(),
                matches: matches.into_iter().map(|(c, _)| c.name.clone()).collect(),
            }),
        }
    }

    /// The contract filter: decide whether a component satisfies the
    /// reference's required contract, and which exposed contract it
    /// resolves to.
    fn matching_contract(
        &self,
        component: &ComponentDescriptor,
        reference: &ComponentReference,
    ) -> Result<Option<ContractName>, ResolveError> {
        // Message-driven components are never reference targets.
        if component.kind == ComponentKind::MessageDriven {
            return Ok(None);
        }

        let Some(required) = reference.contract() else {
            // A reference without a contract can only mean the default,
            // no-contract view.
            if component.no_contract {
                return Ok(Some(component.impl_type.clone()));
            }
            return Ok(None);
        };

        if component.no_contract && required == &component.impl_type {
            return Ok(Some(component.impl_type.clone()));
        }

        let exposed = component.exposed_contracts();
        if exposed.contains(required) {
            return Ok(Some(required.clone()));
        }

        // Not exposed verbatim: accept a unique exposed contract the
        // required contract is an ancestor of.
        let required_type = self.loader.load(required)?;
        let mut assignable: Vec<ContractName> = Vec::new();
        for name in &exposed {
            let exposed_type = self.loader.load(name)?;
            if required_type.is_assignable_from(&exposed_type) {
                assignable.push(name.clone());
            }
        }
        match assignable.len() {
            0 => Ok(None),
            1 => Ok(Some(assignable.remove(0))),
            _ => Err(ResolveError::AmbiguousContract {
                component: component.name.clone(),
                required: required.clone(),
                candidates: assignable,
            }),
        }
    }

    /// Normalize the target name into a filter. Link-syntax errors are
    /// raised here; a relative path that names no scope is kept as a
    /// deferred error so it only surfaces if nothing matches absolutely.
    fn build_filter(
        &self,
        tree: &ScopeTree,
        reference: &ComponentReference,
    ) -> Result<(TargetFilter, Option<ResolveError>), ResolveError> {
        let Some(target) = reference.target_name() else {
            return Ok((TargetFilter::Any, None));
        };

        if target.ends_with('#') || target.ends_with('/') {
            return Err(ResolveError::TrailingSeparator {
                target: target.to_string(),
                reference: reference.to_string(),
            });
        }

        if let Some((path, name)) = target.split_once('#') {
            let owner = tree.node(reference.owner())?;
            let (resolved, deferred) = match owner.parent() {
                None => (
                    None,
                    Some(ResolveError::RelativePathFromRoot {
                        path: path.to_string(),
                        reference: reference.to_string(),
                    }),
                ),
                Some(parent) => match self.walk_relative(tree, parent, path) {
                    Some(scope) => (Some(scope), None),
                    None => (
                        None,
                        Some(ResolveError::UnknownRelativePath {
                            path: path.to_string(),
                            from: tree.node(parent)?.name().to_string(),
                            reference: reference.to_string(),
                        }),
                    ),
                },
            };
            return Ok((
                TargetFilter::Scoped {
                    path: path.to_string(),
                    name: name.to_string(),
                    resolved,
                },
                deferred,
            ));
        }

        if let Some((module, name)) = target.split_once('/') {
            return Ok((
                TargetFilter::Module {
                    module: module.to_string(),
                    name: name.to_string(),
                },
                None,
            ));
        }

        Ok((TargetFilter::Bare(target.to_string()), None))
    }

    /// Descend a `/`-separated path of scope names, one child per segment.
    fn walk_relative(&self, tree: &ScopeTree, from: ScopeId, path: &str) -> Option<ScopeId> {
        let mut current = from;
        for segment in path.split('/') {
            current = tree.relative_child(current, segment).ok()??;
        }
        Some(current)
    }
}

/// The name filter: whether a component in a scope is addressed by the
/// reference's target name.
fn accepts_name(filter: &TargetFilter, node: &ScopeNode, component: &ComponentDescriptor) -> bool {
    match filter {
        TargetFilter::Any => true,
        TargetFilter::Bare(name) => component.name.as_str() == name,
        TargetFilter::Scoped {
            path,
            name,
            resolved,
        } => {
            component.name.as_str() == name
                && (node.relative_path() == path || *resolved == Some(node.id()))
        }
        TargetFilter::Module { module, name } => {
            node.module().as_str() == module && component.name.as_str() == name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_types::{
        ApplicationName, ApplicationRef, ComponentName, ContractError, ContractType, ModuleName,
        StaticContractLoader,
    };

    fn contract(name: &str) -> ContractName {
        ContractName::new(name)
    }

    fn loader() -> Arc<StaticContractLoader> {
        Arc::new(
            StaticContractLoader::new()
                .with(ContractType::new(contract("com.acme.Foo")))
                .with(ContractType::new(contract("com.acme.Bar")))
                .with(ContractType::new(contract("com.acme.Base")))
                .with(ContractType::new(contract("com.acme.Left")).with_ancestor(contract("com.acme.Base")))
                .with(ContractType::new(contract("com.acme.Right")).with_ancestor(contract("com.acme.Base"))),
        )
    }

    fn resolver() -> TreeResolver {
        TreeResolver::new(loader(), NameDeriver::default())
    }

    fn session(name: &str, module: &str) -> ComponentDescriptor {
        ComponentDescriptor::session(
            ComponentName::new(name),
            ModuleName::new(module),
            contract(&format!("com.acme.impl.{name}")),
        )
        .with_application(ApplicationRef::new(ApplicationName::new("testApp"), true))
    }

    /// testApp root with a core and a web child.
    fn tree() -> (ScopeTree, ScopeId, ScopeId) {
        let mut tree = ScopeTree::new("testApp", ModuleName::new("testApp"));
        let core = tree
            .add_child(tree.root(), "core", ModuleName::new("core"))
            .unwrap();
        let web = tree
            .add_child(tree.root(), "web", ModuleName::new("web"))
            .unwrap();
        (tree, core, web)
    }

    #[test]
    fn resolves_by_contract_in_the_owning_scope() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let reference = ComponentReference::to_contract(core, contract("com.acme.Foo"));
        let result = resolver().resolve(&tree, &reference).unwrap();

        assert_eq!(result.name(), "global/testApp/core/TestBean!com.acme.Foo");
        assert_eq!(result.contract(), Some(&contract("com.acme.Foo")));
        assert_eq!(
            result.component().unwrap().name,
            ComponentName::new("TestBean")
        );
    }

    #[test]
    fn bare_target_name_must_match_the_component_name() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();
        tree.attach(core, session("OtherBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let named = ComponentReference::to_contract(core, contract("com.acme.Foo"))
            .with_target_name("TestBean");
        let result = resolver().resolve(&tree, &named).unwrap();
        assert_eq!(
            result.component().unwrap().name,
            ComponentName::new("TestBean")
        );

        let missing = ComponentReference::to_contract(core, contract("com.acme.Foo"))
            .with_target_name("NoSuchBean");
        assert!(matches!(
            resolver().resolve(&tree, &missing),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn two_components_with_the_same_contract_are_ambiguous() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("BeanA", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();
        tree.attach(core, session("BeanB", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let reference = ComponentReference::to_contract(core, contract("com.acme.Foo"));
        let err = resolver().resolve(&tree, &reference).unwrap_err();
        match err {
            ResolveError::Ambiguous { matches, .. } => {
                assert_eq!(matches.len(), 2);
            }
            other => panic!("expected ambiguity, got {other}"),
        }
    }

    #[test]
    fn supertype_resolves_to_the_unique_assignable_contract() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Left")))
            .unwrap();

        let reference = ComponentReference::to_contract(core, contract("com.acme.Base"));
        let result = resolver().resolve(&tree, &reference).unwrap();

        // The resolved contract is the exposed one, not the requested one.
        assert_eq!(result.contract(), Some(&contract("com.acme.Left")));
        assert_eq!(result.name(), "global/testApp/core/TestBean!com.acme.Left");
    }

    #[test]
    fn supertype_satisfied_twice_within_one_component_fails() {
        let (mut tree, core, _) = tree();
        tree.attach(
            core,
            session("TestBean", "core")
                .with_business_local(contract("com.acme.Left"))
                .with_business_remote(contract("com.acme.Right")),
        )
        .unwrap();

        let reference = ComponentReference::to_contract(core, contract("com.acme.Base"));
        let err = resolver().resolve(&tree, &reference).unwrap_err();
        match err {
            ResolveError::AmbiguousContract { candidates, .. } => {
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected contract ambiguity, got {other}"),
        }

        // Asking for one sibling directly still works.
        let direct = ComponentReference::to_contract(core, contract("com.acme.Left"));
        let result = resolver().resolve(&tree, &direct).unwrap();
        assert_eq!(result.contract(), Some(&contract("com.acme.Left")));
    }

    #[test]
    fn ascends_to_a_sibling_scope_through_the_common_ancestor() {
        let (mut tree, core, web) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let reference = ComponentReference::to_contract(web, contract("com.acme.Foo"));
        let result = resolver().resolve(&tree, &reference).unwrap();

        assert_eq!(result.name(), "global/testApp/core/TestBean!com.acme.Foo");
    }

    #[test]
    fn module_qualified_target_matches_only_that_module() {
        let (mut tree, core, web) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let good = ComponentReference::to_contract(web, contract("com.acme.Foo"))
            .with_target_name("core/TestBean");
        assert!(resolver().resolve(&tree, &good).is_ok());

        let wrong_module = ComponentReference::to_contract(web, contract("com.acme.Foo"))
            .with_target_name("web/TestBean");
        assert!(matches!(
            resolver().resolve(&tree, &wrong_module),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn path_qualified_target_resolves_relative_to_the_owners_parent() {
        let (mut tree, core, web) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let reference = ComponentReference::to_contract(web, contract("com.acme.Foo"))
            .with_target_name("core#TestBean");
        let result = resolver().resolve(&tree, &reference).unwrap();
        assert_eq!(result.name(), "global/testApp/core/TestBean!com.acme.Foo");
    }

    #[test]
    fn path_qualified_target_also_matches_by_absolute_relative_path() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        // Declared in the root scope: nothing to be relative to, but the
        // path names the candidate scope absolutely.
        let reference = ComponentReference::to_contract(tree.root(), contract("com.acme.Foo"))
            .with_target_name("core#TestBean");
        let result = resolver().resolve(&tree, &reference).unwrap();
        assert_eq!(result.name(), "global/testApp/core/TestBean!com.acme.Foo");
    }

    #[test]
    fn unreachable_relative_path_is_a_declaration_error() {
        let (mut tree, core, web) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let reference = ComponentReference::to_contract(web, contract("com.acme.Foo"))
            .with_target_name("missing#TestBean");
        assert!(matches!(
            resolver().resolve(&tree, &reference),
            Err(ResolveError::UnknownRelativePath { .. })
        ));

        let from_root = ComponentReference::to_contract(tree.root(), contract("com.acme.Foo"))
            .with_target_name("missing#TestBean");
        assert!(matches!(
            resolver().resolve(&tree, &from_root),
            Err(ResolveError::RelativePathFromRoot { .. })
        ));
    }

    #[test]
    fn trailing_separators_are_declaration_errors() {
        let (tree, core, _) = tree();
        for target in ["TestBean#", "core/TestBean/"] {
            let reference = ComponentReference::to_contract(core, contract("com.acme.Foo"))
                .with_target_name(target);
            assert!(matches!(
                resolver().resolve(&tree, &reference),
                Err(ResolveError::TrailingSeparator { .. })
            ));
        }
    }

    #[test]
    fn lookup_and_mapped_names_bypass_the_search() {
        let (tree, core, _) = tree();

        let mapped = ComponentReference::to_contract(core, contract("com.acme.Foo"))
            .with_mapped_name("custom/mapped");
        let result = resolver().resolve(&tree, &mapped).unwrap();
        assert_eq!(result.name(), "custom/mapped");
        assert!(result.component().is_none());
        assert!(result.binder().is_none());

        let both = ComponentReference::to_contract(core, contract("com.acme.Foo"))
            .with_mapped_name("custom/mapped")
            .with_lookup_name("custom/lookup");
        assert_eq!(resolver().resolve(&tree, &both).unwrap().name(), "custom/lookup");
    }

    #[test]
    fn only_session_components_carry_a_binder_identity() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("SessionBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();
        tree.attach(
            core,
            ComponentDescriptor::entity(
                ComponentName::new("EntityBean"),
                ModuleName::new("core"),
                contract("com.acme.impl.EntityBean"),
            )
            .with_business_local(contract("com.acme.Bar")),
        )
        .unwrap();

        let session_ref = ComponentReference::to_contract(core, contract("com.acme.Foo"));
        let result = resolver().resolve(&tree, &session_ref).unwrap();
        assert_eq!(
            result.binder().unwrap().as_str(),
            "arbor:application=testApp,module=core,component=SessionBean,service=ComponentBinder"
        );

        let entity_ref = ComponentReference::to_contract(core, contract("com.acme.Bar"));
        let result = resolver().resolve(&tree, &entity_ref).unwrap();
        assert!(result.binder().is_none());
    }

    #[test]
    fn message_driven_components_never_match() {
        let (mut tree, core, _) = tree();
        tree.attach(
            core,
            ComponentDescriptor::new(
                ComponentKind::MessageDriven,
                ComponentName::new("Listener"),
                ModuleName::new("core"),
                contract("com.acme.impl.Listener"),
            )
            .with_business_local(contract("com.acme.Foo")),
        )
        .unwrap();

        let reference = ComponentReference::to_contract(core, contract("com.acme.Foo"));
        assert!(matches!(
            resolver().resolve(&tree, &reference),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn contract_less_references_match_the_no_contract_view() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("PlainBean", "core").with_no_contract_view())
            .unwrap();
        tree.attach(core, session("OtherBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let reference = ComponentReference::new(core, None).with_target_name("PlainBean");
        let result = resolver().resolve(&tree, &reference).unwrap();
        assert_eq!(result.contract(), Some(&contract("com.acme.impl.PlainBean")));
        assert_eq!(
            result.name(),
            "global/testApp/core/PlainBean!com.acme.impl.PlainBean"
        );
    }

    #[test]
    fn implementation_type_matches_the_no_contract_view_exactly() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("PlainBean", "core").with_no_contract_view())
            .unwrap();

        let reference =
            ComponentReference::to_contract(core, contract("com.acme.impl.PlainBean"));
        let result = resolver().resolve(&tree, &reference).unwrap();
        assert_eq!(result.contract(), Some(&contract("com.acme.impl.PlainBean")));
    }

    #[test]
    fn unknown_required_contract_propagates_the_loading_failure() {
        let (mut tree, core, _) = tree();
        tree.attach(core, session("TestBean", "core").with_business_local(contract("com.acme.Foo")))
            .unwrap();

        let reference = ComponentReference::to_contract(core, contract("com.acme.Missing"));
        let err = resolver().resolve(&tree, &reference).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Contract(ContractError::NotFound(name)) if name == contract("com.acme.Missing")
        ));
    }

    #[test]
    fn not_found_reports_the_reference_context() {
        let (tree, core, _) = tree();
        let reference = ComponentReference::to_contract(core, contract("com.acme.Foo"))
            .with_target_name("GhostBean");
        let err = resolver().resolve(&tree, &reference).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("GhostBean"));
        assert!(text.contains("com.acme.Foo"));
    }
}
