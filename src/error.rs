use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum PortletError {
    #[error("Custom error: {0}")]
    Custom(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Invalid portlet manager slot: '{0}'")]
    InvalidSlot(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
    #[error("Structural inconsistency in content hierarchy: {0}")]
    StructuralInconsistency(String),
}

impl From<toml::de::Error> for PortletError {
    fn from(src: toml::de::Error) -> PortletError {
        PortletError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for PortletError {
    fn from(src: toml::ser::Error) -> PortletError {
        PortletError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<uuid::Error> for PortletError {
    fn from(src: uuid::Error) -> PortletError {
        PortletError::Serialization(format!("UUID conversion failed: {src}"))
    }
}

impl From<io::Error> for PortletError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => PortletError::NotFound(format!("{x}")),
            _ => PortletError::Io(format!("IOError: {}", x.kind())),
        }
    }
}
