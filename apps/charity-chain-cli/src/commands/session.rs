use crate::{config::ConfigOverrides, error::CliResult};
use charity_chain_client::{RpcWalletProvider, SessionManager, WalletProvider};

pub async fn execute(overrides: &ConfigOverrides) -> CliResult<()> {
    let config = overrides.load()?;
    let provider = RpcWalletProvider::from_config(&config);
    if !provider.is_present() {
        println!("No wallet provider configured (set rpc_url or pass --rpc-url)");
        return Ok(());
    }

    let mut manager = SessionManager::new(provider);
    let session = manager.get_current_session().await;

    match session.short_account() {
        Some(label) => println!("Connected: {label}"),
        None => println!("Not connected"),
    }
    if let Some(account) = session.account() {
        println!("Account:   {account}");
    }
    if let Some(chain_id) = manager.chain_id() {
        println!("Chain ID:  {chain_id}");
    }
    Ok(())
}
