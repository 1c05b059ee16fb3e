/*!
# JSON-RPC Adapters

Production implementations of [`WalletProvider`] and [`FactoryContract`] on top of an
alloy HTTP provider. The endpoint is expected to hold the user's accounts (browser
wallet bridge or a node with unlocked accounts): transactions go out via
`eth_sendTransaction` and are signed by the endpoint.
*/

use crate::{
    config::ClientConfig,
    contract::{FactoryContract, TxReceipt},
    errors::{ClientError, ClientResult, SubmissionError, SubmissionResult, WalletError, WalletResult},
    wallet::{WalletEvent, WalletEventSender, WalletProvider},
};
use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, ChainId};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types::TransactionRequest;
use alloy_transport::TransportError;
use async_trait::async_trait;
use charity_chain_sdk::{ContractHandle, CreateCampaignParams};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// EIP-1193 "User Rejected Request"
pub const USER_REJECTED_CODE: i64 = 4001;

fn is_user_rejection(err: &TransportError) -> bool {
    err.as_error_resp()
        .is_some_and(|payload| payload.code == USER_REJECTED_CODE)
}

fn wallet_error(err: TransportError) -> WalletError {
    if is_user_rejection(&err) {
        WalletError::UserRejected
    } else {
        WalletError::Provider(err.to_string())
    }
}

/// Keep the provider's own message so it can be shown verbatim
fn submission_error(err: TransportError) -> SubmissionError {
    match err.as_error_resp() {
        Some(payload) if payload.code == USER_REJECTED_CODE => {
            SubmissionError::UserRejected(payload.message.to_string())
        }
        Some(payload) if payload.message.contains("revert") => {
            SubmissionError::Reverted(payload.message.to_string())
        }
        Some(payload) => SubmissionError::Rpc(payload.message.to_string()),
        None => SubmissionError::Rpc(err.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct RpcWalletProvider {
    provider: Option<RootProvider>,
    poll_interval: Duration,
}

impl RpcWalletProvider {
    /// `None` models a browser without a wallet extension
    pub fn new(rpc_url: Option<Url>, poll_interval: Duration) -> Self {
        Self {
            provider: rpc_url.map(RootProvider::new_http),
            poll_interval,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.rpc_url.clone(), config.event_poll_interval())
    }

    fn provider(&self) -> WalletResult<&RootProvider> {
        self.provider.as_ref().ok_or(WalletError::ProviderAbsent)
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    fn is_present(&self) -> bool {
        self.provider.is_some()
    }

    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        self.provider()?
            .raw_request::<_, Vec<Address>>("eth_requestAccounts".into(), ())
            .await
            .map_err(wallet_error)
    }

    async fn get_accounts(&self) -> WalletResult<Vec<Address>> {
        self.provider()?.get_accounts().await.map_err(wallet_error)
    }

    async fn chain_id(&self) -> WalletResult<ChainId> {
        self.provider()?.get_chain_id().await.map_err(wallet_error)
    }

    /// Poll accounts and chain id, emitting an event whenever either changes
    fn subscribe(&self, events: WalletEventSender) {
        let Some(provider) = self.provider.clone() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available; wallet change notifications disabled");
            return;
        };

        runtime.spawn(watch_provider(provider, self.poll_interval, events));
    }
}

async fn watch_provider(provider: RootProvider, poll_interval: Duration, events: WalletEventSender) {
    let mut ticker = tokio::time::interval(poll_interval);
    let mut last_accounts: Option<Vec<Address>> = None;
    let mut last_chain_id: Option<ChainId> = None;

    loop {
        ticker.tick().await;
        if events.is_closed() {
            debug!("Wallet watcher stopping: session manager dropped");
            return;
        }

        match provider.get_accounts().await {
            Ok(accounts) => {
                if last_accounts.as_ref().is_some_and(|last| *last != accounts)
                    && events
                        .send(WalletEvent::AccountsChanged(accounts.clone()))
                        .is_err()
                {
                    return;
                }
                last_accounts = Some(accounts);
            }
            Err(e) => debug!("Watcher account poll failed: {}", e),
        }

        match provider.get_chain_id().await {
            Ok(chain_id) => {
                if last_chain_id.is_some_and(|last| last != chain_id)
                    && events.send(WalletEvent::ChainChanged(chain_id)).is_err()
                {
                    return;
                }
                last_chain_id = Some(chain_id);
            }
            Err(e) => debug!("Watcher chain id poll failed: {}", e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RpcFactoryContract {
    provider: RootProvider,
    handle: ContractHandle,
}

impl RpcFactoryContract {
    pub fn new(rpc_url: Url, handle: ContractHandle) -> Self {
        Self {
            provider: RootProvider::new_http(rpc_url),
            handle,
        }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let handle = config.factory_handle()?;
        let rpc_url = config.require_rpc_url()?.clone();
        Ok(Self::new(rpc_url, handle))
    }
}

#[async_trait]
impl FactoryContract for RpcFactoryContract {
    fn handle(&self) -> ContractHandle {
        self.handle
    }

    async fn create_campaign(
        &self,
        from: Address,
        params: CreateCampaignParams,
    ) -> SubmissionResult<TxReceipt> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(self.handle.address())
            .with_input(self.handle.create_campaign_calldata(&params));

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(submission_error)?;
        debug!("createCampaign sent: {}", pending.tx_hash());

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| SubmissionError::Rpc(e.to_string()))?;

        if !receipt.status() {
            return Err(SubmissionError::Reverted(format!(
                "Transaction {} reverted",
                receipt.transaction_hash()
            )));
        }

        Ok(TxReceipt {
            transaction_hash: receipt.transaction_hash(),
            block_number: receipt.block_number(),
        })
    }

    async fn deployed_campaigns(&self) -> ClientResult<Vec<Address>> {
        let tx = TransactionRequest::default()
            .with_to(self.handle.address())
            .with_input(self.handle.deployed_campaigns_calldata());

        let output = self
            .provider
            .call(tx)
            .await
            .map_err(|e| ClientError::Rpc(e.to_string()))?;

        Ok(self.handle.decode_deployed_campaigns(&output)?)
    }
}
