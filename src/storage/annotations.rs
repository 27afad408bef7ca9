//! Node-attached portlet storage.
//!
//! Each node may carry a [NodeAnnotations] container holding its local assignment mappings and
//! blacklist maps, one of each per slot. [AnnotationStore] is the read side the resolver consumes;
//! [MemoryAnnotations] is an in-memory implementation that also offers the get-or-create writer
//! operations used by editing collaborators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::properties::{Category, NodeId};

use super::{blacklist::LocalPortletAssignmentManager, AssignmentMapping, BlacklistMap};

/// Read access to node-attached portlet storage.
///
/// `None` means "no container"; callers resolving portlets treat it the same as an empty
/// container.
pub trait AnnotationStore {
    fn local_assignments(&self, node: &NodeId, manager: &str) -> Option<&AssignmentMapping>;
    fn blacklist(&self, node: &NodeId, manager: &str) -> Option<&BlacklistMap>;
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeAnnotations {
    #[serde(default)]
    assignments: BTreeMap<String, AssignmentMapping>,
    #[serde(default)]
    blacklist: BTreeMap<String, BlacklistMap>,
}

impl NodeAnnotations {
    pub fn assignments(&self, manager: &str) -> Option<&AssignmentMapping> {
        self.assignments.get(manager)
    }

    pub fn blacklist(&self, manager: &str) -> Option<&BlacklistMap> {
        self.blacklist.get(manager)
    }

    pub fn managers(&self) -> impl Iterator<Item = &str> {
        self.assignments.keys().map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MemoryAnnotations {
    nodes: BTreeMap<NodeId, NodeAnnotations>,
}

impl MemoryAnnotations {
    pub fn node(&self, node: &NodeId) -> Option<&NodeAnnotations> {
        self.nodes.get(node)
    }

    /// Get the local mapping for (`node`, `manager`), creating the node's annotations and the
    /// mapping if necessary.
    pub fn local_assignments_mut(
        &mut self,
        node: NodeId,
        manager: &str,
    ) -> &mut AssignmentMapping {
        self.nodes
            .entry(node)
            .or_default()
            .assignments
            .entry(manager.to_string())
            .or_insert_with(|| AssignmentMapping::new(manager, Category::context()))
    }

    /// Get the blacklist map for (`node`, `manager`), creating it if necessary.
    pub fn blacklist_mut(&mut self, node: NodeId, manager: &str) -> &mut BlacklistMap {
        self.nodes
            .entry(node)
            .or_default()
            .blacklist
            .entry(manager.to_string())
            .or_default()
    }

    pub fn assignment_manager(
        &mut self,
        node: NodeId,
        manager: &str,
    ) -> LocalPortletAssignmentManager<'_> {
        LocalPortletAssignmentManager::new(self, node, manager)
    }

    /// Drop everything stored for `node`, e.g. when the node is destroyed.
    pub fn clear_node(&mut self, node: &NodeId) -> Option<NodeAnnotations> {
        self.nodes.remove(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl AnnotationStore for MemoryAnnotations {
    fn local_assignments(&self, node: &NodeId, manager: &str) -> Option<&AssignmentMapping> {
        self.nodes.get(node).and_then(|ann| ann.assignments(manager))
    }

    fn blacklist(&self, node: &NodeId, manager: &str) -> Option<&BlacklistMap> {
        self.nodes.get(node).and_then(|ann| ann.blacklist(manager))
    }
}
