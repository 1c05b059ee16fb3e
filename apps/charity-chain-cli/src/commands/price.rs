use crate::{config::ConfigOverrides, error::CliResult};
use charity_chain_client::{HttpPriceFeed, PriceOracle};

pub async fn execute(overrides: &ConfigOverrides, amount: Option<String>) -> CliResult<()> {
    let config = overrides.load()?;
    let currency = config.price_feed.display_currency.to_uppercase();
    let asset = config.price_feed.asset_id.clone();

    let mut oracle = PriceOracle::new(HttpPriceFeed::new(config.price_feed));
    let Some(rate) = oracle.load().await else {
        println!("Price feed unavailable");
        return Ok(());
    };
    println!("1 {asset} = {} {currency}", rate.rate_native_to_display);

    if let Some(amount) = amount {
        match oracle.contribution_hint(&amount) {
            Some(value) => println!("{amount} = {value:.2} {currency}"),
            None => println!("{amount}: no conversion available"),
        }
    }
    Ok(())
}
