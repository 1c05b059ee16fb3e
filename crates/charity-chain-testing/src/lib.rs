/*!
In-memory wallet, factory, price feed and navigator doubles, plus a [`TestFixture`]
that wires them into a [`CampaignSubmission`](charity_chain_client::CampaignSubmission).
*/

mod mocks;
mod test_fixture;

pub use mocks::*;
pub use test_fixture::*;

use {
    alloy_primitives::{address, Address, ChainId},
    charity_chain_client::CampaignDraft,
};

/// Well-known dev-chain accounts
pub const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const BOB: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

pub const FACTORY: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

/// Holesky
pub const TEST_CHAIN_ID: ChainId = 17000;
/// Native → INR
pub const TEST_RATE: f64 = 250_000.0;

/// A draft with every required field filled in
pub fn sample_draft() -> CampaignDraft {
    CampaignDraft {
        minimum_contribution: "0.01".to_string(),
        name: "Clean Water".to_string(),
        description: "Wells for rural schools".to_string(),
        image_url: "https://example.org/well.png".to_string(),
        legal_doc_url: "https://example.org/registration.pdf".to_string(),
    }
}
