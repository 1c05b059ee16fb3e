use crate::{
    commands::campaigns,
    config::ConfigOverrides,
    error::{CliError, CliResult},
};
use charity_chain_client::{
    CampaignDraft, CampaignSubmission, CreateCampaignParams, FactoryContract, HttpPriceFeed,
    Navigator, PriceFeed, PriceOracle, Route, RpcFactoryContract, RpcWalletProvider,
    SessionManager, SubmitOutcome, TxReceipt, WalletError, WalletProvider,
};
use charity_chain_sdk::format_base_units;
use tracing::{debug, info};

/// Remembers where the flow asked to go
#[derive(Debug, Default)]
struct TerminalNavigator {
    destination: Option<Route>,
}

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, route: Route) {
        debug!("Navigate to {}", route.path());
        self.destination = Some(route);
    }
}

#[derive(Debug)]
enum Completion {
    Registered {
        receipt: TxReceipt,
        params: CreateCampaignParams,
    },
    /// The connect prompt was declined; nothing was sent
    Declined,
}

fn print_draft(draft: &CampaignDraft) {
    println!("Draft kept for retry:");
    println!("  minimum:       {}", draft.minimum_contribution);
    println!("  name:          {}", draft.name);
    println!("  description:   {}", draft.description);
    println!("  image url:     {}", draft.image_url);
    println!("  legal doc url: {}", draft.legal_doc_url);
}

/// Submit the loaded draft, connecting the wallet once if the flow asks for it
async fn drive<W, F, P>(
    flow: &mut CampaignSubmission<W, F, P, TerminalNavigator>,
) -> CliResult<Completion>
where
    W: WalletProvider,
    F: FactoryContract,
    P: PriceFeed,
{
    let mut outcome = flow.submit().await;
    if outcome == SubmitOutcome::WalletRequired {
        if let Some(notice) = flow.notice() {
            println!("{notice}");
        }
        match flow.connect_wallet().await {
            Ok(_) => outcome = flow.submit().await,
            Err(WalletError::UserRejected) => {
                println!("Connection request was declined");
                print_draft(flow.draft());
                return Ok(Completion::Declined);
            }
            Err(e) => return Err(e.into()),
        }
    }

    match outcome {
        SubmitOutcome::Submitted { receipt, params } => {
            Ok(Completion::Registered { receipt, params })
        }
        SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) => {
            print_draft(flow.draft());
            Err(CliError::Submission(
                flow.notice()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
        SubmitOutcome::WalletRequired => Err(CliError::Submission(
            "no wallet account available".to_string(),
        )),
        SubmitOutcome::Stale => Err(CliError::Submission(
            "network changed while the transaction was pending; result discarded".to_string(),
        )),
    }
}

pub async fn execute(
    overrides: &ConfigOverrides,
    minimum: String,
    name: String,
    description: String,
    image_url: String,
    legal_doc_url: String,
) -> CliResult<()> {
    let config = overrides.load()?;
    config.validate()?;

    let mut flow = CampaignSubmission::new(
        SessionManager::new(RpcWalletProvider::from_config(&config)),
        RpcFactoryContract::from_config(&config)?,
        PriceOracle::new(HttpPriceFeed::new(config.price_feed.clone())),
        TerminalNavigator::default(),
        config.native_decimals,
    );
    flow.mount().await;
    flow.set_draft(CampaignDraft {
        minimum_contribution: minimum,
        name,
        description,
        image_url,
        legal_doc_url,
    });

    if let Some(value) = flow.contribution_hint() {
        println!(
            "Minimum contribution ≈ {value:.2} {}",
            config.price_feed.display_currency.to_uppercase()
        );
    }

    let mut states = flow.subscribe_state();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            if states.borrow_and_update().is_busy() {
                println!("Waiting for the transaction to be mined...");
            }
        }
    });

    match drive(&mut flow).await? {
        Completion::Registered { receipt, params } => {
            info!("Campaign registered in {}", receipt.transaction_hash);
            println!(
                "Campaign \"{}\" registered (tx {}, minimum contribution {})",
                params.name,
                receipt.transaction_hash,
                format_base_units(params.minimum_contribution, config.native_decimals)
            );
            if flow.navigator().destination == Some(Route::Home) {
                campaigns::list(flow.factory()).await?;
            }
        }
        Completion::Declined => {}
    }
    Ok(())
}
