use crate::{config::ConfigOverrides, error::CliResult};
use charity_chain_client::{FactoryContract, RpcFactoryContract};

pub async fn execute(overrides: &ConfigOverrides) -> CliResult<()> {
    let config = overrides.load()?;
    let factory = RpcFactoryContract::from_config(&config)?;
    list(&factory).await
}

/// Print every campaign the factory has deployed
pub async fn list<F: FactoryContract>(factory: &F) -> CliResult<()> {
    let campaigns = factory.deployed_campaigns().await?;
    println!(
        "Factory {} has {} campaign(s)",
        factory.handle().address(),
        campaigns.len()
    );
    for (index, campaign) in campaigns.iter().enumerate() {
        println!("  {:>3}. {}", index + 1, campaign);
    }
    Ok(())
}
