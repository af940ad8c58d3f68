//! Deployment scope tree
//!
//! Scopes form the hierarchy references are resolved against: one root per
//! deployment tree, children owned by their parent, each scope carrying the
//! components attached to it. Nodes live in an arena and are addressed by
//! stable [`ScopeId`]s, so a resolution pass can hold plain ids and treat
//! the tree as a snapshot.
//!
//! The tree is acyclic by construction: children are only ever created
//! through [`ScopeTree::add_child`] and are never re-parented.

use crate::component::ComponentDescriptor;
use crate::error::ScopeTreeError;
use crate::ids::ModuleName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identifier of a scope within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(usize);

impl ScopeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope:{}", self.0)
    }
}

/// One node in the deployment hierarchy.
#[derive(Debug, Clone)]
pub struct ScopeNode {
    id: ScopeId,
    parent: Option<ScopeId>,
    children: Vec<ScopeId>,
    name: String,
    module: ModuleName,
    relative_path: String,
    components: Vec<Arc<ComponentDescriptor>>,
}

impl ScopeNode {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Relation only; the parent owns this node, not the reverse.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Ordered for deterministic search; order never affects correctness.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &ModuleName {
        &self.module
    }

    /// Path from the tree root, `/`-joined; empty for the root itself.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn components(&self) -> &[Arc<ComponentDescriptor>] {
        &self.components
    }
}

/// Arena of deployment scopes with a single root.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
}

impl ScopeTree {
    /// Create a tree containing only its root scope. The root's relative
    /// path is empty.
    pub fn new(name: impl Into<String>, module: ModuleName) -> Self {
        let root = ScopeNode {
            id: ScopeId(0),
            parent: None,
            children: Vec::new(),
            name: name.into(),
            module,
            relative_path: String::new(),
            components: Vec::new(),
        };
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn node(&self, id: ScopeId) -> Result<&ScopeNode, ScopeTreeError> {
        self.nodes
            .get(id.0)
            .ok_or(ScopeTreeError::UnknownScope(id.0))
    }

    /// Add a child scope. Its relative path is the parent's path extended
    /// with `name`, and must be unique within the tree.
    pub fn add_child(
        &mut self,
        parent: ScopeId,
        name: impl Into<String>,
        module: ModuleName,
    ) -> Result<ScopeId, ScopeTreeError> {
        let name = name.into();
        let parent_path = self.node(parent)?.relative_path.clone();
        let relative_path = join_path(&parent_path, &name);
        if self.find_by_path(&relative_path).is_some() {
            return Err(ScopeTreeError::DuplicatePath(relative_path));
        }

        let id = ScopeId(self.nodes.len());
        self.nodes.push(ScopeNode {
            id,
            parent: Some(parent),
            children: Vec::new(),
            name,
            module,
            relative_path,
            components: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Attach a component descriptor to a scope.
    pub fn attach(
        &mut self,
        scope: ScopeId,
        component: ComponentDescriptor,
    ) -> Result<Arc<ComponentDescriptor>, ScopeTreeError> {
        self.node(scope)?;
        let component = Arc::new(component);
        self.nodes[scope.0].components.push(component.clone());
        Ok(component)
    }

    /// Find a scope by its relative path from the root.
    pub fn find_by_path(&self, relative_path: &str) -> Option<ScopeId> {
        self.nodes
            .iter()
            .find(|n| n.relative_path == relative_path)
            .map(|n| n.id)
    }

    /// Resolve `path` against a scope: the direct child whose relative
    /// path equals the scope's path extended with `path`.
    pub fn relative_child(&self, from: ScopeId, path: &str) -> Result<Option<ScopeId>, ScopeTreeError> {
        let from_node = self.node(from)?;
        let wanted = join_path(&from_node.relative_path, path);
        for child in &from_node.children {
            if self.nodes[child.0].relative_path == wanted {
                return Ok(Some(*child));
            }
        }
        Ok(None)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn join_path(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", base, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentDescriptor;
    use crate::ids::{ComponentName, ContractName};

    fn module(s: &str) -> ModuleName {
        ModuleName::new(s)
    }

    fn tree() -> ScopeTree {
        ScopeTree::new("testApp", module("testApp"))
    }

    #[test]
    fn relative_paths_accumulate_from_root() {
        let mut tree = tree();
        let core = tree.add_child(tree.root(), "core", module("core")).unwrap();
        let nested = tree.add_child(core, "inner", module("inner")).unwrap();

        assert_eq!(tree.node(tree.root()).unwrap().relative_path(), "");
        assert_eq!(tree.node(core).unwrap().relative_path(), "core");
        assert_eq!(tree.node(nested).unwrap().relative_path(), "core/inner");
    }

    #[test]
    fn duplicate_relative_paths_are_rejected() {
        let mut tree = tree();
        tree.add_child(tree.root(), "core", module("core")).unwrap();
        let err = tree.add_child(tree.root(), "core", module("core2")).unwrap_err();
        assert!(matches!(err, ScopeTreeError::DuplicatePath(p) if p == "core"));
    }

    #[test]
    fn relative_child_resolves_direct_children_only() {
        let mut tree = tree();
        let core = tree.add_child(tree.root(), "core", module("core")).unwrap();
        let nested = tree.add_child(core, "inner", module("inner")).unwrap();

        assert_eq!(tree.relative_child(tree.root(), "core").unwrap(), Some(core));
        assert_eq!(tree.relative_child(core, "inner").unwrap(), Some(nested));
        // not a direct child of the root
        assert_eq!(tree.relative_child(tree.root(), "core/inner").unwrap(), None);
    }

    #[test]
    fn attached_components_are_shared() {
        let mut tree = tree();
        let scope = tree.add_child(tree.root(), "core", module("core")).unwrap();
        let component = ComponentDescriptor::session(
            ComponentName::new("TestBean"),
            module("core"),
            ContractName::new("com.acme.TestBeanImpl"),
        );
        let attached = tree.attach(scope, component).unwrap();

        let node = tree.node(scope).unwrap();
        assert_eq!(node.components().len(), 1);
        assert!(Arc::ptr_eq(&node.components()[0], &attached));
    }
}
