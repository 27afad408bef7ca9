//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use portlet_core::{
    context::{ContentTree, PortletContext},
    properties::{Category, NodeId},
};
use std::collections::BTreeMap;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

struct Page {
    uid: NodeId,
    parent: Option<NodeId>,
    portal_type: String,
}

/// A site addressed by slash-separated paths, e.g. `/news/2026`. The root is `/`.
///
/// Pages report their portal type as a node-dependent category. The logged-in member and
/// their groups are reported as node-independent categories.
#[allow(dead_code)]
pub struct Site {
    pages: BTreeMap<NodeId, Page>,
    paths: BTreeMap<String, NodeId>,
    pub member: Option<String>,
    pub groups: Vec<String>,
}

#[allow(dead_code)]
impl Site {
    pub fn new() -> Self {
        init_logging();
        let mut site = Site {
            pages: BTreeMap::new(),
            paths: BTreeMap::new(),
            member: None,
            groups: Vec::new(),
        };
        let root = NodeId::new();
        site.pages.insert(
            root,
            Page {
                uid: root,
                parent: None,
                portal_type: "Site".to_string(),
            },
        );
        site.paths.insert("/".to_string(), root);
        site
    }

    /// Add a page under the page at the parent path of `path`.
    pub fn add(&mut self, path: &str, portal_type: &str) -> NodeId {
        let parent_path = match path.rfind('/') {
            Some(0) | None => "/",
            Some(idx) => &path[..idx],
        };
        let parent = self.id(parent_path);
        let uid = NodeId::new();
        self.pages.insert(
            uid,
            Page {
                uid,
                parent: Some(parent),
                portal_type: portal_type.to_string(),
            },
        );
        self.paths.insert(path.to_string(), uid);
        uid
    }

    pub fn id(&self, path: &str) -> NodeId {
        *self
            .paths
            .get(path)
            .unwrap_or_else(|| panic!("no page at {path}"))
    }
}

struct PageContext<'a> {
    site: &'a Site,
    page: &'a Page,
}

impl PortletContext for PageContext<'_> {
    fn uid(&self) -> NodeId {
        self.page.uid
    }

    fn parent(&self) -> Option<NodeId> {
        self.page.parent
    }

    fn global_portlet_categories(&self, placeless: bool) -> Vec<(Category, String)> {
        let mut cats = vec![(Category::content_type(), self.page.portal_type.clone())];
        if placeless {
            if let Some(member) = &self.site.member {
                cats.push((Category::user(), member.clone()));
            }
            for group in self.site.groups.iter() {
                cats.push((Category::group(), group.clone()));
            }
        }
        cats
    }
}

impl ContentTree for Site {
    fn portlet_context(&self, node: &NodeId) -> Option<Box<dyn PortletContext + '_>> {
        let page = self.pages.get(node)?;
        Some(Box::new(PageContext { site: self, page }))
    }
}
