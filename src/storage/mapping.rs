//! Ordered assignment container.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    error::PortletError,
    properties::{Assignment, Category},
};

/// An ordered mapping from assignment name to [Assignment].
///
/// One mapping exists per (node, slot) for local assignments and one per (category, key) for
/// global assignments. Iteration order is insertion order, which is also render order. Replacing
/// an existing name keeps its position; deleting a name removes it from the order without
/// disturbing the relative order of the rest.
///
/// Serialized as the list of its assignments in order. Loading a list that names the same
/// assignment twice is a [PortletError::Serialization].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(into = "MappingRecord", try_from = "MappingRecord")]
pub struct AssignmentMapping {
    manager: String,
    category: Category,
    order: Vec<String>,
    items: HashMap<String, Assignment>,
}

impl AssignmentMapping {
    pub fn new<S: Into<String>>(manager: S, category: Category) -> Self {
        AssignmentMapping {
            manager: manager.into(),
            category,
            order: Vec::new(),
            items: HashMap::new(),
        }
    }

    pub fn manager(&self) -> &str {
        &self.manager
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn get(&self, name: &str) -> Option<&Assignment> {
        self.items.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Assignment> {
        self.items.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Insert `assignment` under `name`, returning the assignment it replaced, if any. The stored
    /// assignment's own name is always set to `name`.
    pub fn set<S: Into<String>>(
        &mut self,
        name: S,
        mut assignment: Assignment,
    ) -> Option<Assignment> {
        let name = name.into();
        assignment.name = name.clone();
        let previous = self.items.insert(name.clone(), assignment);
        if previous.is_none() {
            self.order.push(name);
        }
        previous
    }

    pub fn delete(&mut self, name: &str) -> Option<Assignment> {
        let removed = self.items.remove(name)?;
        self.order.retain(|n| n != name);
        Some(removed)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Assignment> {
        self.order.iter().filter_map(|name| self.items.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|n| n == name)
    }

    /// Move `name` to `index`, clamped to the last position. Returns false if `name` is unknown.
    pub fn move_to(&mut self, name: &str, index: usize) -> bool {
        let Some(current) = self.position(name) else {
            return false;
        };
        let entry = self.order.remove(current);
        let index = index.min(self.order.len());
        self.order.insert(index, entry);
        true
    }

    pub fn move_up(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(0) => true,
            Some(idx) => self.move_to(name, idx - 1),
            None => false,
        }
    }

    pub fn move_down(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => self.move_to(name, idx + 1),
            None => false,
        }
    }

    /// Return a name derived from `base` that is not yet used in this mapping: `base` itself if
    /// free, otherwise the first free of `base-1`, `base-2`, ...
    pub fn choose_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        let mut idx = 1usize;
        loop {
            let candidate = format!("{base}-{idx}");
            if !self.contains(&candidate) {
                return candidate;
            }
            idx += 1;
        }
    }
}

#[derive(Serialize, Deserialize)]
struct MappingRecord {
    manager: String,
    category: Category,
    #[serde(default)]
    assignments: Vec<Assignment>,
}

impl From<AssignmentMapping> for MappingRecord {
    fn from(mut mapping: AssignmentMapping) -> Self {
        let assignments = mapping
            .order
            .iter()
            .filter_map(|name| mapping.items.remove(name))
            .collect();
        MappingRecord {
            manager: mapping.manager,
            category: mapping.category,
            assignments,
        }
    }
}

impl TryFrom<MappingRecord> for AssignmentMapping {
    type Error = PortletError;

    fn try_from(record: MappingRecord) -> Result<Self, Self::Error> {
        let mut mapping = AssignmentMapping::new(record.manager, record.category);
        for assignment in record.assignments {
            let name = assignment.name.clone();
            if mapping.set(name.as_str(), assignment).is_some() {
                return Err(PortletError::Serialization(format!(
                    "duplicate assignment name '{name}' in mapping for '{}'",
                    mapping.manager
                )));
            }
        }
        Ok(mapping)
    }
}
