//! Store configuration
//!
//! Every field has a default, so a YAML file only needs the keys it
//! overrides:
//!
//! ```yaml
//! default_context: "http://example.org/default"
//! discover_datatypes: true
//! prefixes:
//!   ex: "http://example.org/"
//! ```

use crate::model::{Resource, TermResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Context given to quadruples read without an explicit graph name
pub const DEFAULT_CONTEXT: &str = "urn:quadstore:default-graph";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Store and persistence configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Context IRI for quadruples without a graph name
    pub default_context: String,
    /// Base IRI for relative IRIs in TriG documents
    pub base_iri: Option<String>,
    /// Register derived datatypes found in imported data and validate typed literals
    pub discover_datatypes: bool,
    /// Timeout for HTTP(S) imports
    pub http_timeout_secs: u64,
    /// Log filter used by the binary when RUST_LOG is unset
    pub log_level: String,
    /// Extra namespace prefixes, on top of the common ones
    pub prefixes: BTreeMap<String, String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_context: DEFAULT_CONTEXT.to_string(),
            base_iri: None,
            discover_datatypes: false,
            http_timeout_secs: 30,
            log_level: "info".to_string(),
            prefixes: BTreeMap::new(),
        }
    }
}

impl StoreConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let config = Self::from_yaml_str(&std::fs::read_to_string(path)?)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// The default context as a resource
    pub fn default_context(&self) -> TermResult<Resource> {
        Resource::parse(&self.default_context)
    }
}
