//! Category registry
//!
//! The effective category set is the union of categories used by catalog
//! items and categories the user created explicitly (possibly still empty).

use std::collections::BTreeSet;

use crate::catalog::GearCatalog;
use crate::error::{GearError, Result};

/// Explicitly created categories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryRegistry {
    registered: Vec<String>,
}

/// One row of the category management list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUsage {
    pub name: String,
    pub item_count: usize,
}

impl CategoryUsage {
    /// Only unused categories may be deleted
    pub fn deletable(&self) -> bool {
        self.item_count == 0
    }
}

impl CategoryRegistry {
    pub fn new(registered: Vec<String>) -> Self {
        let mut registry = Self::default();
        for name in registered {
            if !registry.registered.contains(&name) {
                registry.registered.push(name);
            }
        }
        registry
    }

    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    /// Sorted union of catalog categories and registered ones
    pub fn effective(&self, catalog: &GearCatalog) -> BTreeSet<String> {
        catalog
            .categories()
            .into_iter()
            .map(str::to_string)
            .chain(self.registered.iter().cloned())
            .collect()
    }

    pub fn contains(&self, name: &str, catalog: &GearCatalog) -> bool {
        self.registered.iter().any(|c| c == name) || catalog.count_in_category(name) > 0
    }

    /// Register a new category; exact (case-sensitive) duplicates are rejected
    pub fn add(&mut self, name: &str, catalog: &GearCatalog) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GearError::EmptyCategoryName);
        }
        if self.contains(name, catalog) {
            return Err(GearError::DuplicateCategory(name.to_string()));
        }
        self.registered.push(name.to_string());
        Ok(name.to_string())
    }

    /// Drop an explicit registration; returns whether it was present
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.registered.len();
        self.registered.retain(|c| c != name);
        before != self.registered.len()
    }

    pub fn usage(&self, catalog: &GearCatalog) -> Vec<CategoryUsage> {
        self.effective(catalog)
            .into_iter()
            .map(|name| CategoryUsage {
                item_count: catalog.count_in_category(&name),
                name,
            })
            .collect()
    }
}
