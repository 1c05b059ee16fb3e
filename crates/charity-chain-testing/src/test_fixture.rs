use {
    crate::{
        MockFactory, MockWallet, RecordingNavigator, StaticPriceFeed, FACTORY, TEST_CHAIN_ID,
        TEST_RATE,
    },
    alloy_primitives::Address,
    charity_chain_client::{
        CampaignSubmission, ContractHandle, PriceOracle, Route, SessionManager, NATIVE_DECIMALS,
    },
};

pub type TestSubmission =
    CampaignSubmission<MockWallet, MockFactory, StaticPriceFeed, RecordingNavigator>;

pub struct TestFixture {
    pub flow: TestSubmission,
    pub wallet: MockWallet,
    pub factory: MockFactory,
    pub feed: StaticPriceFeed,
}

impl TestFixture {
    /// Unmounted flow around `wallet`, a succeeding factory and a reachable price feed
    pub fn new(wallet: MockWallet) -> Self {
        Self::with_feed(wallet, StaticPriceFeed::new(TEST_RATE))
    }

    pub fn with_feed(wallet: MockWallet, feed: StaticPriceFeed) -> Self {
        let factory = MockFactory::new(ContractHandle::new(FACTORY));
        let flow = CampaignSubmission::new(
            SessionManager::new(wallet.clone()),
            factory.clone(),
            PriceOracle::new(feed.clone()),
            RecordingNavigator::default(),
            NATIVE_DECIMALS,
        );

        Self {
            flow,
            wallet,
            factory,
            feed,
        }
    }

    /// Mounted flow whose wallet already authorized `accounts`
    pub async fn mounted(accounts: Vec<Address>) -> Self {
        let mut fixture = Self::new(MockWallet::authorized(TEST_CHAIN_ID, accounts));
        fixture.flow.mount().await;
        fixture
    }

    pub fn navigations(&self) -> &[Route] {
        self.flow.navigator().routes()
    }
}
