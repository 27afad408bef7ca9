//! Storage model read by the retrievers.
//!
//! - [`mapping`]: the ordered [AssignmentMapping] container
//! - [`blacklist`]: per (node, slot) tri-state blacklist state and its accessor
//! - [`annotations`]: node-attached storage and the [AnnotationStore] read contract
//! - [`global`]: per-manager (category, key) storage

mod annotations;
mod blacklist;
mod global;
mod mapping;

pub use annotations::{AnnotationStore, MemoryAnnotations, NodeAnnotations};
pub use blacklist::{BlacklistMap, LocalPortletAssignmentManager};
pub use global::PortletStorage;
pub use mapping::AssignmentMapping;
