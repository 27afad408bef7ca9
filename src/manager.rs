//! Portlet managers (named display slots) and the registry that looks them up by name.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    config::{PortletConfig, DEFAULT_MAX_DEPTH},
    context::ContentTree,
    error::PortletError,
    properties::NodeId,
    retriever::{PlacelessPortletRetriever, PortletRetriever, ResolvedAssignment, Retriever},
    storage::{AnnotationStore, PortletStorage},
};

/// Selects the retrieval strategy of a manager.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ManagerKind {
    /// Content columns: local assignments are inherited and may be blacklisted.
    #[default]
    Hierarchical,
    /// Slots not tied to a place in the tree, e.g. dashboards.
    Placeless,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PortletManager {
    name: String,
    kind: ManagerKind,
    storage: PortletStorage,
}

impl PortletManager {
    pub fn new<S: Into<String>>(name: S, kind: ManagerKind) -> Result<Self, PortletError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PortletError::InvalidSlot(name));
        }
        Ok(PortletManager {
            storage: PortletStorage::new(name.as_str()),
            name,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ManagerKind {
        self.kind
    }

    pub fn storage(&self) -> &PortletStorage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut PortletStorage {
        &mut self.storage
    }

    pub fn retriever(&self) -> Retriever<'_> {
        match self.kind {
            ManagerKind::Hierarchical => {
                Retriever::Hierarchical(PortletRetriever::new(&self.storage))
            }
            ManagerKind::Placeless => {
                Retriever::Placeless(PlacelessPortletRetriever::new(&self.storage))
            }
        }
    }
}

/// Thread-safe collection of [PortletManager]s keyed by name.
#[derive(Debug)]
pub struct PortletRegistry {
    managers: RwLock<BTreeMap<String, PortletManager>>,
    max_depth: usize,
}

impl Default for PortletRegistry {
    fn default() -> Self {
        PortletRegistry::new(DEFAULT_MAX_DEPTH)
    }
}

impl PortletRegistry {
    pub fn new(max_depth: usize) -> Self {
        PortletRegistry {
            managers: RwLock::new(BTreeMap::new()),
            max_depth,
        }
    }

    /// Build a registry with an empty manager for every configured slot.
    pub fn from_config(config: &PortletConfig) -> Result<Self, PortletError> {
        if config.max_depth == 0 {
            return Err(PortletError::Custom(
                "max_depth must be at least 1 so the resolved node itself can be visited"
                    .to_string(),
            ));
        }
        let registry = PortletRegistry::new(config.max_depth);
        for record in config.managers.iter() {
            let manager = PortletManager::new(record.name.as_str(), record.kind)?;
            if registry.register(manager).is_some() {
                tracing::warn!("Portlet manager '{}' configured more than once", record.name);
            }
        }
        Ok(registry)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Add `manager`, returning the manager previously registered under the same name.
    pub fn register(&self, manager: PortletManager) -> Option<PortletManager> {
        tracing::debug!("Registering {:?} portlet manager '{}'", manager.kind(), manager.name());
        self.managers
            .write()
            .insert(manager.name().to_string(), manager)
    }

    pub fn unregister(&self, name: &str) -> Option<PortletManager> {
        self.managers.write().remove(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.managers.read().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.managers.read().contains_key(name)
    }

    pub fn with_manager<R, F>(&self, name: &str, op: F) -> Result<R, PortletError>
    where
        F: FnOnce(&PortletManager) -> R,
    {
        let managers = self.managers.read();
        let manager = managers
            .get(name)
            .ok_or_else(|| PortletError::InvalidSlot(name.to_string()))?;
        Ok(op(manager))
    }

    pub fn with_manager_mut<R, F>(&self, name: &str, op: F) -> Result<R, PortletError>
    where
        F: FnOnce(&mut PortletManager) -> R,
    {
        let mut managers = self.managers.write();
        let manager = managers
            .get_mut(name)
            .ok_or_else(|| PortletError::InvalidSlot(name.to_string()))?;
        Ok(op(manager))
    }

    /// Resolve the assignments `manager` shows for `node`, using the retriever matching the
    /// manager's kind.
    pub fn resolve<T, A>(
        &self,
        tree: &T,
        annotations: &A,
        node: &NodeId,
        manager: &str,
    ) -> Result<Vec<ResolvedAssignment>, PortletError>
    where
        T: ContentTree + ?Sized,
        A: AnnotationStore + ?Sized,
    {
        self.with_manager(manager, |m| {
            m.retriever()
                .with_max_depth(self.max_depth)
                .get_portlets(tree, annotations, node)
        })?
    }
}
