//! Portlet retrievers: work out which assignments a manager shows for a node.
//!
//! [PortletRetriever] walks from the node towards the root collecting local assignments and
//! blacklist decisions, then appends the global assignments of every category left unblocked.
//! [PlacelessPortletRetriever] ignores the hierarchy and returns only global assignments.
//! [Retriever] wraps both so callers can pick the strategy from the manager's kind.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    config::DEFAULT_MAX_DEPTH,
    context::ContentTree,
    error::PortletError,
    properties::{Assignment, BlacklistStatus, Category, NodeId},
    storage::{AnnotationStore, AssignmentMapping, PortletStorage},
};

/// One assignment to render, with enough information to find it again.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResolvedAssignment {
    pub category: Category,
    pub key: String,
    pub name: String,
    pub assignment: Assignment,
}

impl ResolvedAssignment {
    fn new(category: &Category, key: &str, assignment: &Assignment) -> Self {
        ResolvedAssignment {
            category: category.clone(),
            key: key.to_string(),
            name: assignment.name.clone(),
            assignment: assignment.clone(),
        }
    }
}

fn extend_from(
    accum: &mut Vec<ResolvedAssignment>,
    category: &Category,
    key: &str,
    mapping: &AssignmentMapping,
) {
    accum.extend(
        mapping
            .values()
            .map(|assignment| ResolvedAssignment::new(category, key, assignment)),
    );
}

fn check_manager(storage: &PortletStorage) -> Result<&str, PortletError> {
    let manager = storage.manager();
    if manager.trim().is_empty() {
        return Err(PortletError::InvalidSlot(manager.to_string()));
    }
    Ok(manager)
}

/// Blacklist decisions inherited along an ancestor walk.
///
/// Each tracked category starts unset. The first explicit decision seen for it wins; later
/// (farther) decisions are ignored. Categories that end the walk unset are not blocked.
#[derive(Debug, Default)]
struct InheritedBlacklist {
    statuses: BTreeMap<Category, Option<BlacklistStatus>>,
    resolved: BTreeSet<Category>,
}

impl InheritedBlacklist {
    fn new<'a, I: IntoIterator<Item = &'a Category>>(categories: I) -> Self {
        InheritedBlacklist {
            statuses: categories.into_iter().map(|cat| (cat.clone(), None)).collect(),
            resolved: BTreeSet::new(),
        }
    }

    fn assert(&mut self, category: &Category, status: BlacklistStatus) {
        if let Some(slot) = self.statuses.get_mut(category) {
            if slot.is_none() {
                *slot = Some(status);
                self.resolved.insert(category.clone());
            }
        }
    }

    fn all_resolved(&self) -> bool {
        self.resolved.len() == self.statuses.len()
    }

    fn is_blocked(&self, category: &Category) -> bool {
        matches!(
            self.statuses.get(category),
            Some(Some(BlacklistStatus::Blocked))
        )
    }
}

/// The hierarchical retriever.
#[derive(Clone, Copy, Debug)]
pub struct PortletRetriever<'a> {
    storage: &'a PortletStorage,
    max_depth: usize,
}

impl<'a> PortletRetriever<'a> {
    pub fn new(storage: &'a PortletStorage) -> Self {
        PortletRetriever {
            storage,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Cap on the number of nodes visited in one walk. Exceeding it is reported as a
    /// [PortletError::StructuralInconsistency]. The node being resolved is always visited, so
    /// values below 1 count as 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn get_portlets<T, A>(
        &self,
        tree: &T,
        annotations: &A,
        node: &NodeId,
    ) -> Result<Vec<ResolvedAssignment>, PortletError>
    where
        T: ContentTree + ?Sized,
        A: AnnotationStore + ?Sized,
    {
        let manager = check_manager(self.storage)?;

        let Some(pcontext) = tree.portlet_context(node) else {
            tracing::debug!("[{manager}] node {node} has no portlet context");
            return Ok(Vec::new());
        };

        // Keys are computed once, for the node being rendered. Only the blocked status of each
        // category is inherited.
        let categories = pcontext.global_portlet_categories(false);
        let mut blacklist = InheritedBlacklist::new(categories.iter().map(|(cat, _)| cat));

        let context_category = Category::context();
        let mut assignments = Vec::new();
        let mut parents_blocked = false;
        let mut visited = BTreeSet::new();
        let mut current = Some(pcontext);

        while let Some(pc) = current {
            let uid = pc.uid();
            if !visited.insert(uid) {
                return Err(PortletError::StructuralInconsistency(format!(
                    "node {uid} is its own ancestor (walk started at {node})"
                )));
            }
            if visited.len() > self.max_depth {
                return Err(PortletError::StructuralInconsistency(format!(
                    "ancestor chain of {node} is deeper than {} nodes",
                    self.max_depth
                )));
            }

            if tree.is_local_assignable(&uid) {
                if !parents_blocked {
                    if let Some(mapping) = annotations.local_assignments(&uid, manager) {
                        tracing::trace!(
                            "[{manager}] {} local assignment(s) from {uid}",
                            mapping.len()
                        );
                        extend_from(&mut assignments, &context_category, &uid.to_string(), mapping);
                    }
                }

                if let Some(statuses) = annotations.blacklist(&uid, manager) {
                    for (category, status) in statuses.iter() {
                        if category.is_context() {
                            if status.is_blocked() && !parents_blocked {
                                tracing::trace!("[{manager}] parent portlets blocked at {uid}");
                                parents_blocked = true;
                            }
                        } else {
                            blacklist.assert(category, status);
                        }
                    }
                }
            }

            if parents_blocked && blacklist.all_resolved() {
                tracing::trace!("[{manager}] walk settled at {uid}");
                break;
            }

            current = pc.parent().and_then(|parent| tree.portlet_context(&parent));
        }

        for (category, key) in categories.iter() {
            if blacklist.is_blocked(category) {
                continue;
            }
            if let Some(mapping) = self.storage.get(category, key) {
                extend_from(&mut assignments, category, key, mapping);
            }
        }

        tracing::debug!(
            "[{manager}] resolved {} assignment(s) for {node} after visiting {} node(s)",
            assignments.len(),
            visited.len()
        );
        Ok(assignments)
    }
}

/// The placeless retriever: global assignments of every category the node reports, user and
/// group categories included, with no inheritance or blacklisting.
#[derive(Clone, Copy, Debug)]
pub struct PlacelessPortletRetriever<'a> {
    storage: &'a PortletStorage,
}

impl<'a> PlacelessPortletRetriever<'a> {
    pub fn new(storage: &'a PortletStorage) -> Self {
        PlacelessPortletRetriever { storage }
    }

    pub fn get_portlets<T>(
        &self,
        tree: &T,
        node: &NodeId,
    ) -> Result<Vec<ResolvedAssignment>, PortletError>
    where
        T: ContentTree + ?Sized,
    {
        let manager = check_manager(self.storage)?;

        let Some(pcontext) = tree.portlet_context(node) else {
            tracing::debug!("[{manager}] node {node} has no portlet context");
            return Ok(Vec::new());
        };

        let mut assignments = Vec::new();
        for (category, key) in pcontext.global_portlet_categories(true).iter() {
            if let Some(mapping) = self.storage.get(category, key) {
                extend_from(&mut assignments, category, key, mapping);
            }
        }
        Ok(assignments)
    }
}

/// Retrieval strategy chosen by the caller, typically from [crate::manager::ManagerKind].
#[derive(Clone, Copy, Debug)]
pub enum Retriever<'a> {
    Hierarchical(PortletRetriever<'a>),
    Placeless(PlacelessPortletRetriever<'a>),
}

impl<'a> Retriever<'a> {
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        match self {
            Retriever::Hierarchical(r) => Retriever::Hierarchical(r.with_max_depth(max_depth)),
            placeless => placeless,
        }
    }

    pub fn get_portlets<T, A>(
        &self,
        tree: &T,
        annotations: &A,
        node: &NodeId,
    ) -> Result<Vec<ResolvedAssignment>, PortletError>
    where
        T: ContentTree + ?Sized,
        A: AnnotationStore + ?Sized,
    {
        match self {
            Retriever::Hierarchical(r) => r.get_portlets(tree, annotations, node),
            Retriever::Placeless(r) => r.get_portlets(tree, node),
        }
    }
}
