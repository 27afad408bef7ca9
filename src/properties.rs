/// [crate::properties] contains the identities and tags that the storage and resolution layers
/// are keyed on: node ids, category tags, blacklist statuses and the assignments themselves.
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use toml::value::Table;

pub use uuid::Uuid;

use crate::error::PortletError;

pub const CONTEXT_CATEGORY: &str = "context";
pub const USER_CATEGORY: &str = "user";
pub const GROUP_CATEGORY: &str = "group";
pub const CONTENT_TYPE_CATEGORY: &str = "content_type";

/// Stable identity of a content node.
///
/// The hyphenated lowercase rendering of a [NodeId] is the `key` reported for every assignment
/// contributed by that node's local storage.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        NodeId(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        NodeId(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for NodeId {
    fn default() -> Self {
        NodeId::new()
    }
}

impl AsRef<Uuid> for NodeId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for NodeId {
    fn from(id: Uuid) -> Self {
        NodeId(id)
    }
}

impl TryFrom<&str> for NodeId {
    type Error = PortletError;

    fn try_from(string: &str) -> Result<Self, Self::Error> {
        Ok(NodeId(Uuid::parse_str(string)?))
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0.hyphenated().encode_lower(&mut Uuid::encode_buffer())
        )
    }
}

/// A portlet category tag.
///
/// [Category::context] is reserved: as a blacklist entry it controls whether local assignments
/// of a node's ancestors are inherited. Every other tag names a global category (user, group,
/// content type, or a custom one) whose assignments are stored per lookup key rather than per
/// node.
#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Category(tag.into())
    }

    pub fn context() -> Self {
        Category(CONTEXT_CATEGORY.to_string())
    }

    pub fn user() -> Self {
        Category(USER_CATEGORY.to_string())
    }

    pub fn group() -> Self {
        Category(GROUP_CATEGORY.to_string())
    }

    pub fn content_type() -> Self {
        Category(CONTENT_TYPE_CATEGORY.to_string())
    }

    pub fn is_context(&self) -> bool {
        self.0 == CONTEXT_CATEGORY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Category(tag.to_string())
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An explicit blacklist decision. The absence of a decision (`Option::None`) is the third state:
/// no opinion, so the decision of the nearest ancestor applies.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlacklistStatus {
    Blocked,
    Unblocked,
}

impl BlacklistStatus {
    pub fn is_blocked(&self) -> bool {
        matches!(self, BlacklistStatus::Blocked)
    }
}

impl From<bool> for BlacklistStatus {
    fn from(blocked: bool) -> Self {
        if blocked {
            BlacklistStatus::Blocked
        } else {
            BlacklistStatus::Unblocked
        }
    }
}

impl From<BlacklistStatus> for bool {
    fn from(status: BlacklistStatus) -> bool {
        status.is_blocked()
    }
}

/// One configured portlet instance.
///
/// The `name` is the identity of the assignment within its owning
/// [crate::storage::AssignmentMapping]; the `data` payload is opaque to this crate and belongs to
/// whichever collaborator renders or edits the portlet.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub name: String,
    #[serde(default)]
    pub data: Table,
}

impl Assignment {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Assignment {
            name: name.into(),
            data: Table::new(),
        }
    }

    pub fn with_data<S: Into<String>>(name: S, data: Table) -> Self {
        Assignment {
            name: name.into(),
            data,
        }
    }
}
