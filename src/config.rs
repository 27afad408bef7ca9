use crate::{error::PortletError, manager::ManagerKind};
use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

/// Default cap on the number of nodes one ancestor walk may visit.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerRecord {
    pub name: String,
    #[serde(default)]
    pub kind: ManagerKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortletConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub managers: Vec<ManagerRecord>,
}

impl Default for PortletConfig {
    fn default() -> Self {
        PortletConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            managers: Vec::new(),
        }
    }
}

pub trait PortletConfigProvider: Send + Sync {
    fn get_config(&self) -> Result<PortletConfig, PortletError>;
    fn set_config(&self, config: &PortletConfig) -> Result<(), PortletError>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PortletConfigProvider for TomlConfigProvider {
    fn get_config(&self) -> Result<PortletConfig, PortletError> {
        tracing::debug!("Attempting to read portlet config from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Config file not found, using default portlet config.");
            return Ok(PortletConfig::default());
        }
        let content = read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn set_config(&self, config: &PortletConfig) -> Result<(), PortletError> {
        tracing::debug!("Attempting to write portlet config to: {:?}", &self.path);
        let toml_string = toml::to_string(config)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}
