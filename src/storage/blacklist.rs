//! Per-node, per-slot blacklist state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::properties::{BlacklistStatus, Category, NodeId};

use super::annotations::MemoryAnnotations;

/// Category tag to explicit [BlacklistStatus] for one (node, slot) pair. A category without an
/// entry is unset, which is distinct from an explicit [BlacklistStatus::Unblocked].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BlacklistMap(BTreeMap<Category, BlacklistStatus>);

impl BlacklistMap {
    pub fn new() -> Self {
        BlacklistMap(BTreeMap::new())
    }

    pub fn get(&self, category: &Category) -> Option<BlacklistStatus> {
        self.0.get(category).copied()
    }

    /// Record `status` for `category`; `None` removes the entry, returning the category to unset.
    pub fn set(&mut self, category: Category, status: Option<BlacklistStatus>) {
        match status {
            Some(status) => {
                self.0.insert(category, status);
            }
            None => {
                self.0.remove(&category);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, BlacklistStatus)> {
        self.0.iter().map(|(cat, status)| (cat, *status))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Accessor for the blacklist state of one (node, slot) pair.
///
/// Reads never create storage. Writes create the node's annotations and the slot's
/// [BlacklistMap] on demand.
#[derive(Debug)]
pub struct LocalPortletAssignmentManager<'a> {
    annotations: &'a mut MemoryAnnotations,
    node: NodeId,
    manager: String,
}

impl<'a> LocalPortletAssignmentManager<'a> {
    pub(super) fn new(
        annotations: &'a mut MemoryAnnotations,
        node: NodeId,
        manager: &str,
    ) -> Self {
        LocalPortletAssignmentManager {
            annotations,
            node,
            manager: manager.to_string(),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn manager(&self) -> &str {
        &self.manager
    }

    pub fn get_blacklist_status(&self, category: &Category) -> Option<BlacklistStatus> {
        self.annotations
            .node(&self.node)
            .and_then(|ann| ann.blacklist(&self.manager))
            .and_then(|blacklist| blacklist.get(category))
    }

    pub fn set_blacklist_status(&mut self, category: Category, status: Option<BlacklistStatus>) {
        tracing::debug!(
            "[{}] blacklist {} for node {} set to {:?}",
            self.manager,
            category,
            self.node,
            status
        );
        self.annotations
            .blacklist_mut(self.node, &self.manager)
            .set(category, status);
    }
}
