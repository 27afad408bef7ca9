//! Global (category, key) assignment storage owned by a portlet manager.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::properties::Category;

use super::AssignmentMapping;

/// Category to lookup key to [AssignmentMapping], e.g. `group -> "editors" -> {..}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PortletStorage {
    manager: String,
    categories: BTreeMap<Category, BTreeMap<String, AssignmentMapping>>,
}

impl PortletStorage {
    pub fn new<S: Into<String>>(manager: S) -> Self {
        PortletStorage {
            manager: manager.into(),
            categories: BTreeMap::new(),
        }
    }

    pub fn manager(&self) -> &str {
        &self.manager
    }

    pub fn get(&self, category: &Category, key: &str) -> Option<&AssignmentMapping> {
        self.categories.get(category).and_then(|keys| keys.get(key))
    }

    /// Get the mapping for (`category`, `key`), creating it if necessary.
    pub fn mapping_mut(&mut self, category: &Category, key: &str) -> &mut AssignmentMapping {
        let manager = &self.manager;
        self.categories
            .entry(category.clone())
            .or_default()
            .entry(key.to_string())
            .or_insert_with(|| AssignmentMapping::new(manager.as_str(), category.clone()))
    }

    pub fn remove(&mut self, category: &Category, key: &str) -> Option<AssignmentMapping> {
        let keys = self.categories.get_mut(category)?;
        let removed = keys.remove(key);
        if keys.is_empty() {
            self.categories.remove(category);
        }
        removed
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.keys()
    }

    pub fn keys(&self, category: &Category) -> impl Iterator<Item = &str> {
        self.categories
            .get(category)
            .into_iter()
            .flat_map(|keys| keys.keys().map(String::as_str))
    }
}
