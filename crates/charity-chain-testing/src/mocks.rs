use {
    alloy_primitives::{Address, ChainId, TxHash},
    async_trait::async_trait,
    charity_chain_client::{
        ClientResult, FactoryContract, FetchError, FetchResult, Navigator, PriceFeed, Route,
        SubmissionError, SubmissionResult, SubmissionState, SubmissionStateReceiver, TxReceipt,
        WalletError, WalletEvent, WalletEventSender, WalletProvider, WalletResult,
    },
    charity_chain_sdk::{ContractHandle, CreateCampaignParams},
    parking_lot::Mutex,
    std::sync::Arc,
};

#[derive(Debug)]
struct MockWalletState {
    present: bool,
    authorized: Vec<Address>,
    request_response: WalletResult<Vec<Address>>,
    chain_id: ChainId,
    subscriber: Option<WalletEventSender>,
    request_count: usize,
}

/// In-memory wallet extension
///
/// Cloning shares state, so a test can keep a handle after moving one into the flow.
#[derive(Debug, Clone)]
pub struct MockWallet {
    state: Arc<Mutex<MockWalletState>>,
}

impl MockWallet {
    /// Installed wallet with no authorized accounts; a connect request grants `accounts`
    pub fn installed(chain_id: ChainId, accounts: Vec<Address>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockWalletState {
                present: true,
                authorized: vec![],
                request_response: Ok(accounts),
                chain_id,
                subscriber: None,
                request_count: 0,
            })),
        }
    }

    /// Installed wallet that already authorized `accounts` on a previous visit
    pub fn authorized(chain_id: ChainId, accounts: Vec<Address>) -> Self {
        let wallet = Self::installed(chain_id, accounts.clone());
        wallet.state.lock().authorized = accounts;
        wallet
    }

    /// No wallet extension at all
    pub fn absent() -> Self {
        let wallet = Self::installed(0, vec![]);
        wallet.state.lock().present = false;
        wallet
    }

    /// The next connect prompt is declined
    pub fn reject_requests(&self) {
        self.state.lock().request_response = Err(WalletError::UserRejected);
    }

    /// Simulate a notification from the extension
    pub fn emit(&self, event: WalletEvent) {
        let mut state = self.state.lock();
        match &event {
            WalletEvent::AccountsChanged(accounts) => state.authorized = accounts.clone(),
            WalletEvent::ChainChanged(chain_id) => state.chain_id = *chain_id,
        }
        if let Some(subscriber) = &state.subscriber {
            // receiver may already be gone at the end of a test
            let _ = subscriber.send(event);
        }
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().request_count
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.lock().subscriber.is_some()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    fn is_present(&self) -> bool {
        self.state.lock().present
    }

    async fn request_accounts(&self) -> WalletResult<Vec<Address>> {
        let mut state = self.state.lock();
        state.request_count += 1;
        let response = state.request_response.clone();
        if let Ok(accounts) = &response {
            state.authorized = accounts.clone();
        }
        response
    }

    async fn get_accounts(&self) -> WalletResult<Vec<Address>> {
        Ok(self.state.lock().authorized.clone())
    }

    async fn chain_id(&self) -> WalletResult<ChainId> {
        Ok(self.state.lock().chain_id)
    }

    fn subscribe(&self, events: WalletEventSender) {
        self.state.lock().subscriber = Some(events);
    }
}

#[derive(Debug)]
struct MockFactoryState {
    response: SubmissionResult<()>,
    calls: Vec<(Address, CreateCampaignParams)>,
    deployed: Vec<Address>,
    during_send: Vec<WalletEvent>,
    wallet: Option<MockWallet>,
    state_observer: Option<SubmissionStateReceiver>,
    observed_states: Vec<SubmissionState>,
}

/// In-memory campaign factory
#[derive(Debug, Clone)]
pub struct MockFactory {
    handle: ContractHandle,
    state: Arc<Mutex<MockFactoryState>>,
}

impl MockFactory {
    /// Factory whose transactions are mined successfully
    pub fn new(handle: ContractHandle) -> Self {
        Self {
            handle,
            state: Arc::new(Mutex::new(MockFactoryState {
                response: Ok(()),
                calls: vec![],
                deployed: vec![],
                during_send: vec![],
                wallet: None,
                state_observer: None,
                observed_states: vec![],
            })),
        }
    }

    /// Every following transaction fails with `error`
    pub fn fail_with(&self, error: SubmissionError) {
        self.state.lock().response = Err(error);
    }

    /// Emit `event` through `wallet` while the next transaction is pending
    pub fn emit_during_send(&self, wallet: &MockWallet, event: WalletEvent) {
        let mut state = self.state.lock();
        state.wallet = Some(wallet.clone());
        state.during_send.push(event);
    }

    /// Record the flow state seen through `states` whenever a transaction is pending
    pub fn observe_state(&self, states: SubmissionStateReceiver) {
        self.state.lock().state_observer = Some(states);
    }

    pub fn observed_states(&self) -> Vec<SubmissionState> {
        self.state.lock().observed_states.clone()
    }

    pub fn calls(&self) -> Vec<(Address, CreateCampaignParams)> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }
}

#[async_trait]
impl FactoryContract for MockFactory {
    fn handle(&self) -> ContractHandle {
        self.handle
    }

    async fn create_campaign(
        &self,
        from: Address,
        params: CreateCampaignParams,
    ) -> SubmissionResult<TxReceipt> {
        let (pending_events, wallet) = {
            let mut state = self.state.lock();
            state.calls.push((from, params));
            if let Some(observed) = state.state_observer.as_ref().map(|states| *states.borrow()) {
                state.observed_states.push(observed);
            }
            (std::mem::take(&mut state.during_send), state.wallet.clone())
        };

        if let Some(wallet) = wallet {
            for event in pending_events {
                wallet.emit(event);
            }
        }
        tokio::task::yield_now().await;

        let mut state = self.state.lock();
        state.response.clone()?;

        let index = state.calls.len() as u8;
        state.deployed.push(Address::with_last_byte(index));
        Ok(TxReceipt {
            transaction_hash: TxHash::with_last_byte(index),
            block_number: Some(u64::from(index)),
        })
    }

    async fn deployed_campaigns(&self) -> ClientResult<Vec<Address>> {
        Ok(self.state.lock().deployed.clone())
    }
}

/// Price feed returning a fixed rate, or failing
#[derive(Debug, Clone)]
pub struct StaticPriceFeed {
    rate: Option<f64>,
    fetches: Arc<Mutex<usize>>,
}

impl StaticPriceFeed {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: Some(rate),
            fetches: Arc::new(Mutex::new(0)),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            rate: None,
            fetches: Arc::new(Mutex::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock()
    }
}

#[async_trait]
impl PriceFeed for StaticPriceFeed {
    async fn fetch_rate(&self) -> FetchResult<f64> {
        *self.fetches.lock() += 1;
        self.rate.ok_or(FetchError::Status(503))
    }
}

/// Navigator that records every requested route
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    routes: Vec<Route>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, route: Route) {
        self.routes.push(route);
    }
}
