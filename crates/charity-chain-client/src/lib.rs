/*!
# Charity Chain Client

Client-side workflow for registering a campaign (NGO) with the on-chain campaign
factory.

## Components

- **Wallet Session Manager** ([`SessionManager`]): silent reconnect, explicit connect and
  disconnect, and an owned channel for account/network change notifications
- **Price Oracle Adapter** ([`PriceOracle`]): one best-effort rate fetch per page load for
  the informational display-currency conversion
- **Campaign Submission Flow** ([`CampaignSubmission`]): validation, exact base-unit
  conversion, `createCampaign` submission and navigation

External collaborators are traits ([`WalletProvider`], [`FactoryContract`], [`PriceFeed`],
[`Navigator`]); [`rpc`] and [`HttpPriceFeed`] provide the JSON-RPC and HTTP implementations.

## Usage

```rust,no_run
use charity_chain_client::{
    CampaignDraft, CampaignSubmission, ClientConfig, HttpPriceFeed, Navigator, PriceOracle,
    Route, RpcFactoryContract, RpcWalletProvider, SessionManager,
};

struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&mut self, route: Route) {
        println!("navigate to {}", route.path());
    }
}

# async fn example() -> Result<(), Box<dyn std::error::Error>> {
let config = ClientConfig::from_yaml_file("charity-chain.yaml")?;
config.validate()?;

let mut flow = CampaignSubmission::new(
    SessionManager::new(RpcWalletProvider::from_config(&config)),
    RpcFactoryContract::from_config(&config)?,
    PriceOracle::new(HttpPriceFeed::new(config.price_feed.clone())),
    PrintNavigator,
    config.native_decimals,
);

flow.mount().await;
flow.set_draft(CampaignDraft {
    minimum_contribution: "0.01".to_string(),
    name: "Clean Water".to_string(),
    description: "Wells for rural schools".to_string(),
    image_url: "https://example.org/well.png".to_string(),
    legal_doc_url: String::new(),
});
let outcome = flow.submit().await;
println!("{outcome:?}");
# Ok(())
# }
```
*/

mod config;
mod contract;
mod errors;
mod oracle;
pub mod rpc;
mod submission;
mod wallet;

pub use config::{ClientConfig, PriceFeedConfig};
pub use contract::{FactoryContract, TxReceipt};
pub use errors::*;
pub use oracle::{convert, extract_rate, ExchangeRate, HttpPriceFeed, PriceFeed, PriceOracle};
pub use rpc::{RpcFactoryContract, RpcWalletProvider};
pub use submission::{
    CampaignDraft, CampaignSubmission, DraftField, Navigator, Notice, PrimaryAction, Route,
    SubmissionState, SubmissionStateReceiver, SubmitOutcome,
};
pub use wallet::{
    NetworkEpoch, SessionManager, SessionUpdate, WalletEvent, WalletEventReceiver,
    WalletEventSender, WalletProvider, WalletSession,
};

// Re-export key SDK types for convenience
pub use charity_chain_sdk::{
    Address, ContractHandle, CreateCampaignParams, U256, NATIVE_DECIMALS,
};
