/*!
# Campaign Factory Interface

ABI of the pre-deployed campaign factory and the immutable [`ContractHandle`] used
to address it. Only calldata is produced here; sending is the client's concern.
*/

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};
use serde::{Deserialize, Serialize};
use thiserror::Error;

sol! {
    interface ICampaignFactory {
        function createCampaign(
            uint256 minimumContribution,
            string name,
            string description,
            string imageUrl,
            string legalDocUrl
        ) external;

        function getDeployedCampaigns() external view returns (address[] memory);
    }
}

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Failed to decode factory response: {0}")]
    Decode(#[from] alloy_sol_types::Error),
}

pub type FactoryResult<T> = Result<T, FactoryError>;

/// Arguments of `createCampaign`, already converted to on-chain representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCampaignParams {
    /// Minimum contribution in base units (wei)
    pub minimum_contribution: U256,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Optional on the form; sent as an empty string when absent
    pub legal_doc_url: String,
}

/// Reference to a deployed factory contract
///
/// Fixed address, fixed interface. Constructed once from configuration and shared
/// for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractHandle {
    address: Address,
}

impl ContractHandle {
    pub const fn new(address: Address) -> Self {
        Self { address }
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    /// Encode a `createCampaign(...)` call
    pub fn create_campaign_calldata(&self, params: &CreateCampaignParams) -> Bytes {
        ICampaignFactory::createCampaignCall {
            minimumContribution: params.minimum_contribution,
            name: params.name.clone(),
            description: params.description.clone(),
            imageUrl: params.image_url.clone(),
            legalDocUrl: params.legal_doc_url.clone(),
        }
        .abi_encode()
        .into()
    }

    /// Encode a `getDeployedCampaigns()` call
    pub fn deployed_campaigns_calldata(&self) -> Bytes {
        ICampaignFactory::getDeployedCampaignsCall {}
            .abi_encode()
            .into()
    }

    /// Decode the return data of `getDeployedCampaigns()`
    pub fn decode_deployed_campaigns(&self, data: &[u8]) -> FactoryResult<Vec<Address>> {
        Ok(ICampaignFactory::getDeployedCampaignsCall::abi_decode_returns(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, keccak256};
    use alloy_sol_types::SolValue;

    const FACTORY: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

    fn params() -> CreateCampaignParams {
        CreateCampaignParams {
            minimum_contribution: U256::from(10_000_000_000_000_000u64),
            name: "Clean Water".to_string(),
            description: "Wells for rural schools".to_string(),
            image_url: "https://example.org/well.png".to_string(),
            legal_doc_url: String::new(),
        }
    }

    #[test]
    fn test_create_campaign_selector() {
        let calldata = ContractHandle::new(FACTORY).create_campaign_calldata(&params());
        let expected = keccak256("createCampaign(uint256,string,string,string,string)");
        assert_eq!(&calldata[..4], &expected[..4]);
    }

    #[test]
    fn test_create_campaign_encodes_minimum_as_first_word() {
        let calldata = ContractHandle::new(FACTORY).create_campaign_calldata(&params());
        let first_word = U256::from_be_slice(&calldata[4..36]);
        assert_eq!(first_word, U256::from(10_000_000_000_000_000u64));
    }

    #[test]
    fn test_deployed_campaigns_decoding() {
        let handle = ContractHandle::new(FACTORY);
        let campaigns = vec![
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"),
            address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
        ];
        let encoded = campaigns.abi_encode();

        assert_eq!(handle.decode_deployed_campaigns(&encoded).unwrap(), campaigns);
        assert_eq!(
            &handle.deployed_campaigns_calldata()[..],
            &keccak256("getDeployedCampaigns()")[..4]
        );
    }

    #[test]
    fn test_malformed_return_data_is_an_error() {
        let handle = ContractHandle::new(FACTORY);
        assert!(handle.decode_deployed_campaigns(&[0xde, 0xad]).is_err());
    }
}
