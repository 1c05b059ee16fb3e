use crate::{
    config::{ConfigOverrides, FactoryArtifact},
    error::{CliError, CliResult},
};
use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types::TransactionRequest;
use std::path::PathBuf;
use tracing::{debug, info};

pub async fn execute(overrides: &ConfigOverrides, artifact: PathBuf) -> CliResult<()> {
    let config = overrides.load()?;
    let rpc_url = config.require_rpc_url()?.clone();
    let artifact = FactoryArtifact::from_json_file(&artifact)?;
    if artifact.bytecode.is_empty() {
        return Err(CliError::Deployment("artifact has empty bytecode".to_string()));
    }

    let provider: RootProvider = RootProvider::new_http(rpc_url);
    let deployer = provider
        .get_accounts()
        .await
        .map_err(|e| CliError::Deployment(e.to_string()))?
        .first()
        .copied()
        .ok_or_else(|| CliError::Deployment("endpoint has no accounts".to_string()))?;
    info!("Deploying campaign factory from {}", deployer);

    let tx = TransactionRequest::default()
        .with_from(deployer)
        .with_deploy_code(artifact.bytecode);
    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| CliError::Deployment(e.to_string()))?;
    debug!("Deployment sent: {}", pending.tx_hash());

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| CliError::Deployment(e.to_string()))?;
    if !receipt.status() {
        return Err(CliError::Deployment(format!(
            "transaction {} reverted",
            receipt.transaction_hash()
        )));
    }

    let address = receipt
        .contract_address()
        .ok_or_else(|| CliError::Deployment("receipt has no contract address".to_string()))?;
    println!("Campaign factory deployed at {address}");
    println!("Set `factory_address: \"{address}\"` in your config to use it");
    Ok(())
}
