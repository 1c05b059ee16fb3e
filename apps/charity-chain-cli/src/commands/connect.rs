use crate::{config::ConfigOverrides, error::CliResult};
use charity_chain_client::{RpcWalletProvider, SessionManager, WalletError};
use tracing::info;

pub async fn execute(overrides: &ConfigOverrides) -> CliResult<()> {
    let config = overrides.load()?;
    let mut manager = SessionManager::new(RpcWalletProvider::from_config(&config));

    match manager.connect().await {
        Ok(session) => {
            if let Some(account) = session.account() {
                info!("Connected account {}", account);
                println!("Connected: {account}");
            }
            Ok(())
        }
        // declining the prompt is not an error
        Err(WalletError::UserRejected) => {
            println!("Connection request was declined");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
