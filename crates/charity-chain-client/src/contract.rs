use crate::errors::{ClientResult, SubmissionResult};
use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use charity_chain_sdk::{ContractHandle, CreateCampaignParams};

/// Mined `createCampaign` transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Deployed campaign factory, as seen by the submission flow
#[async_trait]
pub trait FactoryContract: Send + Sync {
    fn handle(&self) -> ContractHandle;

    /// Send `createCampaign(...)` from `from` and wait for the receipt
    ///
    /// Resolves only once the transaction is mined or rejected; there is no local timeout.
    async fn create_campaign(
        &self,
        from: Address,
        params: CreateCampaignParams,
    ) -> SubmissionResult<TxReceipt>;

    /// Addresses of every campaign the factory has deployed
    async fn deployed_campaigns(&self) -> ClientResult<Vec<Address>>;
}
