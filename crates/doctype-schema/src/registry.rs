//! Concurrent schema registry

use crate::model::TypeExpr;
use dashmap::DashMap;
use std::sync::Arc;

/// Registry of compiled type expressions, keyed by name
///
/// Compiled expressions are immutable, so the registry hands out shared
/// `Arc` handles; concurrent validations can hold them without locking.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: DashMap<String, Arc<TypeExpr>>,
}

impl SchemaRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled schema under a name
    pub fn register(&self, name: impl Into<String>, schema: Arc<TypeExpr>) {
        self.schemas.insert(name.into(), schema);
    }

    /// Get a schema by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<TypeExpr>> {
        self.schemas.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a schema exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// All registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered schemas
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
