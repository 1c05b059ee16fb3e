use crate::submission::DraftField;
use charity_chain_sdk::{FactoryError, UnitsError};
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;
pub type WalletResult<T> = Result<T, WalletError>;
pub type SubmissionResult<T> = Result<T, SubmissionError>;
pub type FetchResult<T> = Result<T, FetchError>;
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Price feed error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),

    #[error("RPC error: {0}")]
    Rpc(String),
}

/// Failures of the wallet provider interface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("No wallet provider detected. Please install MetaMask!")]
    ProviderAbsent,

    #[error("User rejected the request")]
    UserRejected,

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Wallet provider error: {0}")]
    Provider(String),
}

/// Failures of a `createCampaign` transaction
///
/// Every variant displays the underlying message verbatim; it is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("{0}")]
    UserRejected(String),

    #[error("{0}")]
    Reverted(String),

    #[error("{0}")]
    Rpc(String),
}

impl SubmissionError {
    pub fn message(&self) -> &str {
        match self {
            Self::UserRejected(message) | Self::Reverted(message) | Self::Rpc(message) => message,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All Fields are Required")]
    MissingFields(Vec<DraftField>),

    #[error(transparent)]
    InvalidAmount(#[from] UnitsError),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Price feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Price feed returned HTTP {0}")]
    Status(u16),

    #[error("Price feed payload has no {asset}/{currency} rate")]
    MissingRate { asset: String, currency: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No factory address configured; set `factory_address` explicitly")]
    MissingFactoryAddress,

    #[error("No RPC URL configured")]
    MissingRpcUrl,

    #[error("Unsupported native decimals: {0}")]
    UnsupportedDecimals(u8),
}
