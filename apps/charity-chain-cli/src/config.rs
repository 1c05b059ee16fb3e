use crate::error::CliResult;
use alloy_primitives::{Address, Bytes};
use charity_chain_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Global flags that override values from the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub rpc_url: Option<Url>,
    pub factory: Option<Address>,
}

impl ConfigOverrides {
    /// Load the config file (if any) and apply command-line overrides on top
    pub fn load(&self) -> CliResult<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_yaml_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url = Some(rpc_url.clone());
        }
        if let Some(factory) = self.factory {
            config.factory_address = Some(factory);
        }
        Ok(config)
    }
}

/// Compiled factory contract as produced by the build tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactoryArtifact {
    /// ABI, kept only for reference
    #[serde(default)]
    pub interface: serde_json::Value,

    /// Creation bytecode
    pub bytecode: Bytes,
}

impl FactoryArtifact {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
