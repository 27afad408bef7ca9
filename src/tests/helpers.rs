//! Shared test utilities for retriever testing

use crate::{
    context::{ContentTree, PortletContext},
    properties::{Category, NodeId},
};
use std::{cell::Cell, collections::BTreeMap};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

#[derive(Debug, Clone)]
pub struct TestNode {
    pub uid: NodeId,
    pub parent: Option<NodeId>,
    pub content_type: String,
    /// Whether the node may carry local assignments and blacklist state.
    pub assignable: bool,
    /// Whether the node adapts to a portlet context at all.
    pub adaptable: bool,
}

/// In-memory content tree. Every node reports its content type as its node-dependent category;
/// the tree-wide user and groups are the node-independent ones.
#[derive(Debug, Default)]
pub struct TestTree {
    nodes: BTreeMap<NodeId, TestNode>,
    pub user: Option<String>,
    pub groups: Vec<String>,
    lookups: Cell<usize>,
}

impl TestTree {
    pub fn new() -> Self {
        init_logging();
        TestTree::default()
    }

    pub fn add_node(&mut self, parent: Option<NodeId>, content_type: &str) -> NodeId {
        let uid = NodeId::new();
        self.nodes.insert(
            uid,
            TestNode {
                uid,
                parent,
                content_type: content_type.to_string(),
                assignable: true,
                adaptable: true,
            },
        );
        uid
    }

    /// Create a chain of `depth` "Folder" nodes, returned root first.
    pub fn chain(&mut self, depth: usize) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = Vec::with_capacity(depth);
        for _ in 0..depth {
            let parent = ids.last().copied();
            ids.push(self.add_node(parent, "Folder"));
        }
        ids
    }

    pub fn node_mut(&mut self, uid: &NodeId) -> &mut TestNode {
        self.nodes.get_mut(uid).expect("test node exists")
    }

    /// Number of [ContentTree::portlet_context] calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    pub fn reset_lookups(&self) {
        self.lookups.set(0);
    }
}

pub struct TestContext<'a> {
    tree: &'a TestTree,
    node: &'a TestNode,
}

impl PortletContext for TestContext<'_> {
    fn uid(&self) -> NodeId {
        self.node.uid
    }

    fn parent(&self) -> Option<NodeId> {
        self.node.parent
    }

    fn global_portlet_categories(&self, placeless: bool) -> Vec<(Category, String)> {
        let mut cats = vec![(Category::content_type(), self.node.content_type.clone())];
        if placeless {
            if let Some(user) = &self.tree.user {
                cats.push((Category::user(), user.clone()));
            }
            cats.extend(
                self.tree
                    .groups
                    .iter()
                    .map(|group| (Category::group(), group.clone())),
            );
        }
        cats
    }
}

impl ContentTree for TestTree {
    fn portlet_context(&self, node: &NodeId) -> Option<Box<dyn PortletContext + '_>> {
        self.lookups.set(self.lookups.get() + 1);
        let node = self.nodes.get(node).filter(|n| n.adaptable)?;
        Some(Box::new(TestContext { tree: self, node }))
    }

    fn is_local_assignable(&self, node: &NodeId) -> bool {
        self.nodes.get(node).map(|n| n.assignable).unwrap_or(false)
    }
}
