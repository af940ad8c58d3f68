//! In-process namespace implementation

use crate::error::NamingError;
use crate::namespace::{Namespace, NamespaceEntry};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

/// Bound on link dereferences per lookup; a chain longer than this is
/// treated as a loop.
const MAX_LINK_HOPS: usize = 16;

/// In-memory namespace.
///
/// Concurrent reads and writes are safe; lookup dereferences link entries
/// until it reaches an object.
#[derive(Debug, Default)]
pub struct MemoryNamespace {
    entries: DashMap<String, NamespaceEntry>,
}

impl MemoryNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// All currently bound paths, sorted.
    pub fn bound_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        paths.sort();
        paths
    }
}

impl Namespace for MemoryNamespace {
    fn bind(&self, path: &str, entry: NamespaceEntry) -> Result<(), NamingError> {
        match self.entries.entry(path.to_string()) {
            Entry::Occupied(_) => Err(NamingError::AlreadyBound(path.to_string())),
            Entry::Vacant(slot) => {
                debug!(path = %path, entry = ?entry, "Bound");
                slot.insert(entry);
                Ok(())
            }
        }
    }

    fn unbind(&self, path: &str) -> Result<(), NamingError> {
        match self.entries.remove(path) {
            Some(_) => {
                debug!(path = %path, "Unbound");
                Ok(())
            }
            None => Err(NamingError::NotBound(path.to_string())),
        }
    }

    fn lookup(&self, path: &str) -> Result<NamespaceEntry, NamingError> {
        let mut current = path.to_string();
        for _ in 0..MAX_LINK_HOPS {
            let entry = self
                .entries
                .get(&current)
                .map(|e| e.value().clone())
                .ok_or_else(|| NamingError::NotBound(current.clone()))?;
            match entry {
                NamespaceEntry::Link(target) => current = target,
                object => return Ok(object),
            }
        }
        Err(NamingError::LinkLoop(path.to_string()))
    }
}
