use crate::errors::{ConfigError, ConfigResult};
use alloy_primitives::Address;
use charity_chain_sdk::{ContractHandle, MAX_SUPPORTED_DECIMALS, NATIVE_DECIMALS};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use url::Url;

const DEFAULT_PRICE_FEED_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Configuration shared by the wallet, oracle and submission components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// JSON-RPC endpoint acting as the wallet provider; absent means no wallet
    #[serde(default)]
    pub rpc_url: Option<Url>,

    /// Address of the deployed campaign factory
    ///
    /// Deliberately has no default: the deployment target must be chosen explicitly.
    #[serde(default)]
    pub factory_address: Option<Address>,

    /// External price feed used for the informational conversion
    #[serde(default)]
    pub price_feed: PriceFeedConfig,

    /// Decimal places of the native currency
    #[serde(default = "default_native_decimals")]
    pub native_decimals: u8,

    /// How often the RPC wallet watcher polls for account and network changes
    #[serde(default = "default_event_poll_interval_ms")]
    pub event_poll_interval_ms: u64,
}

/// Simple-price style feed: `GET {url}?ids={asset_id}&vs_currencies={display_currency}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFeedConfig {
    pub url: Url,
    pub asset_id: String,
    pub display_currency: String,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_PRICE_FEED_URL).expect("default price feed URL is valid"),
            asset_id: "ethereum".to_string(),
            display_currency: "inr".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            factory_address: None,
            price_feed: PriceFeedConfig::default(),
            native_decimals: default_native_decimals(),
            event_poll_interval_ms: default_event_poll_interval_ms(),
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check everything the submission flow needs before it is constructed
    pub fn validate(&self) -> ConfigResult<()> {
        if self.native_decimals > MAX_SUPPORTED_DECIMALS {
            return Err(ConfigError::UnsupportedDecimals(self.native_decimals));
        }
        self.factory_handle().map(|_| ())
    }

    pub fn factory_handle(&self) -> ConfigResult<ContractHandle> {
        self.factory_address
            .map(ContractHandle::new)
            .ok_or(ConfigError::MissingFactoryAddress)
    }

    pub fn require_rpc_url(&self) -> ConfigResult<&Url> {
        self.rpc_url.as_ref().ok_or(ConfigError::MissingRpcUrl)
    }

    pub fn event_poll_interval(&self) -> Duration {
        Duration::from_millis(self.event_poll_interval_ms.max(1))
    }
}

fn default_native_decimals() -> u8 {
    NATIVE_DECIMALS
}

fn default_event_poll_interval_ms() -> u64 {
    1_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.native_decimals, 18);
        assert_eq!(config.event_poll_interval(), Duration::from_secs(1));
        assert_eq!(config.price_feed.asset_id, "ethereum");
        assert_eq!(config.price_feed.display_currency, "inr");
        assert!(config.rpc_url.is_none());
    }

    #[test]
    fn test_missing_factory_address_is_rejected() {
        let config = ClientConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingFactoryAddress)
        ));
    }

    #[test]
    fn test_unsupported_decimals_rejected() {
        let config = ClientConfig {
            factory_address: Some(Address::ZERO),
            native_decimals: 78,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedDecimals(78))
        ));
    }

    #[test]
    fn test_yaml_partial_config_uses_defaults() {
        let yaml = r#"
rpc_url: "http://localhost:8545"
factory_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3"
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.factory_address,
            Some(address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"))
        );
        assert_eq!(config.rpc_url.unwrap().as_str(), "http://localhost:8545/");
        assert_eq!(config.native_decimals, 18);
        assert_eq!(config.price_feed, PriceFeedConfig::default());
    }

    #[test]
    fn test_yaml_file_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "factory_address: \"0x5FbDB2315678afecb367f032d93F642f64180aa3\"\nevent_poll_interval_ms: 250\nprice_feed:\n  url: \"http://localhost:9000/price\"\n  asset_id: \"ethereum\"\n  display_currency: \"usd\""
        )
        .unwrap();

        let config = ClientConfig::from_yaml_file(file.path()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.event_poll_interval(), Duration::from_millis(250));
        assert_eq!(config.price_feed.display_currency, "usd");
        assert_eq!(
            config.factory_handle().unwrap().address(),
            address!("0x5FbDB2315678afecb367f032d93F642f64180aa3")
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ClientConfig::from_yaml_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
