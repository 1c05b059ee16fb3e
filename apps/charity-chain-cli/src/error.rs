use charity_chain_client::{ClientError, ConfigError, WalletError};
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Campaign submission failed: {0}")]
    Submission(String),

    #[error("Deployment failed: {0}")]
    Deployment(String),
}
