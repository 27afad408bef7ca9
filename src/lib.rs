//! # portlet-core
//!
//! Resolves which portlets (small page widgets) a named display slot shows for a node of a
//! content tree.
//!
//! ## Overview
//!
//! Portlets are assigned at two levels:
//!
//! - **Locally**, to a node for a given slot. Local assignments are inherited by the node's
//!   descendants.
//! - **Globally**, to a category such as the current user, one of their groups, or the node's
//!   content type. Global assignments live in the slot's own storage, keyed by the category and
//!   a lookup key (user id, group id, type name).
//!
//! Every node may, per slot and per category, block or unblock inheritance. The reserved
//! `context` category blocks local assignments of the node's ancestors; every other category
//! blocks the matching global assignments. Decisions are tri-state (unset, blocked, unblocked)
//! and the nearest decision on the way from the node to the root wins.
//!
//! ## Architecture
//!
//! - **[`properties`]**: identities and tags (`NodeId`, `Category`, `BlacklistStatus`,
//!   `Assignment`)
//! - **[`storage`]**: ordered assignment mappings, blacklist state, node annotations and the
//!   per-slot global storage
//! - **[`context`]**: the contract a host implements to expose its content tree
//! - **[`retriever`]**: hierarchical and placeless resolution
//! - **[`manager`]**: named slots and a registry dispatching to the right retriever
//! - **[`config`]**: TOML-backed slot configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use portlet_core::{
//!     context::{ContentTree, PortletContext},
//!     manager::{ManagerKind, PortletRegistry, PortletManager},
//!     properties::{Assignment, Category, NodeId},
//!     storage::MemoryAnnotations,
//! };
//! use std::collections::BTreeMap;
//!
//! struct Node {
//!     uid: NodeId,
//!     parent: Option<NodeId>,
//! }
//!
//! impl PortletContext for &Node {
//!     fn uid(&self) -> NodeId {
//!         self.uid
//!     }
//!     fn parent(&self) -> Option<NodeId> {
//!         self.parent
//!     }
//!     fn global_portlet_categories(&self, _placeless: bool) -> Vec<(Category, String)> {
//!         vec![(Category::content_type(), "Document".to_string())]
//!     }
//! }
//!
//! struct Tree(BTreeMap<NodeId, Node>);
//!
//! impl ContentTree for Tree {
//!     fn portlet_context(&self, node: &NodeId) -> Option<Box<dyn PortletContext + '_>> {
//!         self.0
//!             .get(node)
//!             .map(|n| Box::new(n) as Box<dyn PortletContext + '_>)
//!     }
//! }
//!
//! # fn main() -> Result<(), portlet_core::PortletError> {
//! let root = NodeId::new();
//! let child = NodeId::new();
//! let mut nodes = BTreeMap::new();
//! nodes.insert(root, Node { uid: root, parent: None });
//! nodes.insert(child, Node { uid: child, parent: Some(root) });
//! let tree = Tree(nodes);
//!
//! let mut annotations = MemoryAnnotations::default();
//! annotations
//!     .local_assignments_mut(root, "left")
//!     .set("welcome", Assignment::new("welcome"));
//!
//! let registry = PortletRegistry::default();
//! registry.register(PortletManager::new("left", ManagerKind::Hierarchical)?);
//!
//! let portlets = registry.resolve(&tree, &annotations, &child, "left")?;
//! assert_eq!(portlets.len(), 1);
//! assert_eq!(portlets[0].key, root.to_string());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod manager;
pub mod properties;
pub mod retriever;
pub mod storage;
#[cfg(test)]
mod tests;

pub use error::*;
