//! The node context contract.
//!
//! This crate does not own the content tree. Hosts implement [ContentTree] to adapt their nodes
//! into [PortletContext] views; the retrievers only ever see nodes through these two traits.

use crate::properties::{Category, NodeId};

/// A view of one content node as seen by the retrievers.
pub trait PortletContext {
    /// Stable identity, used to find the node's annotations and reported as the `key` of its
    /// local assignments.
    fn uid(&self) -> NodeId;

    /// The parent node, or `None` at the root.
    fn parent(&self) -> Option<NodeId>;

    /// Global categories relevant to this node as `(category, lookup key)` pairs, in the order
    /// their assignments should be rendered.
    ///
    /// With `placeless == false` only the categories whose key depends on the node (e.g. its
    /// content type) are returned. With `placeless == true` the node-independent categories
    /// (e.g. the current user and their groups) are included as well.
    fn global_portlet_categories(&self, placeless: bool) -> Vec<(Category, String)>;
}

/// Capability lookups over the host's content tree.
pub trait ContentTree {
    /// Adapt `node` to a [PortletContext]. `None` means the node does not take part in portlet
    /// resolution.
    fn portlet_context(&self, node: &NodeId) -> Option<Box<dyn PortletContext + '_>>;

    /// Whether `node` can carry local assignments and blacklist state. Nodes that can't are
    /// stepped over during the ancestor walk.
    fn is_local_assignable(&self, _node: &NodeId) -> bool {
        true
    }
}
