/*!
# Wallet Session Manager

Tracks whether a wallet provider is present, connected, and which account is active.

Account and network change notifications are delivered through an unbounded channel
owned by the [`SessionManager`]. Providers push [`WalletEvent`]s into the sender they
receive from [`WalletProvider::subscribe`]; the manager drains them in arrival order
whenever [`SessionManager::process_events`] is called.
*/

use crate::errors::{WalletError, WalletResult};
use alloy_primitives::{Address, ChainId};
use async_trait::async_trait;
use std::fmt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub type WalletEventSender = mpsc::UnboundedSender<WalletEvent>;
pub type WalletEventReceiver = mpsc::UnboundedReceiver<WalletEvent>;

/// Notifications emitted by a wallet provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    /// The set of authorized accounts changed; the first entry is the active one
    AccountsChanged(Vec<Address>),
    /// The provider switched networks
    ChainChanged(ChainId),
}

/// Injected wallet interface
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a wallet is available at all
    fn is_present(&self) -> bool;

    /// Interactive account request (may prompt the user)
    async fn request_accounts(&self) -> WalletResult<Vec<Address>>;

    /// Non-interactive query of already authorized accounts
    async fn get_accounts(&self) -> WalletResult<Vec<Address>>;

    async fn chain_id(&self) -> WalletResult<ChainId>;

    /// Register for `accountsChanged` / `chainChanged` notifications
    fn subscribe(&self, events: WalletEventSender);
}

/// Active wallet account, if any
///
/// `is_connected()` is derived from the account, so a session can never be half-populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSession {
    account: Option<Address>,
}

impl WalletSession {
    pub const fn connected(account: Address) -> Self {
        Self {
            account: Some(account),
        }
    }

    pub const fn disconnected() -> Self {
        Self { account: None }
    }

    /// Session for the first account of a provider account list
    pub fn from_accounts(accounts: &[Address]) -> Self {
        Self {
            account: accounts.first().copied(),
        }
    }

    pub const fn account(&self) -> Option<Address> {
        self.account
    }

    pub const fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Navigation-bar label: first 10 characters of the checksummed address and `...`
    pub fn short_account(&self) -> Option<String> {
        self.account.map(|account| {
            let checksummed = account.to_checksum(None);
            format!("{}...", &checksummed[..10])
        })
    }
}

/// Monotonic counter advanced on every network change
///
/// Results produced under an older epoch belong to a network context that no longer exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkEpoch(u64);

impl NetworkEpoch {
    pub const fn value(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for NetworkEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Effect of a processed wallet event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    AccountChanged(WalletSession),
    /// Everything derived from the previous network must be reloaded
    NetworkChanged {
        chain_id: ChainId,
        epoch: NetworkEpoch,
    },
}

impl SessionUpdate {
    pub const fn requires_reload(&self) -> bool {
        matches!(self, Self::NetworkChanged { .. })
    }
}

pub struct SessionManager<W> {
    provider: W,
    session: WalletSession,
    chain_id: Option<ChainId>,
    epoch: NetworkEpoch,
    events_tx: WalletEventSender,
    events_rx: WalletEventReceiver,
}

impl<W: WalletProvider> SessionManager<W> {
    /// Create a manager and register it for the provider's notifications
    pub fn new(provider: W) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        if provider.is_present() {
            provider.subscribe(events_tx.clone());
        }

        Self {
            provider,
            session: WalletSession::disconnected(),
            chain_id: None,
            epoch: NetworkEpoch::default(),
            events_tx,
            events_rx,
        }
    }

    /// Request account access, prompting the user if necessary
    pub async fn connect(&mut self) -> WalletResult<WalletSession> {
        if !self.provider.is_present() {
            warn!("No wallet provider detected; a wallet extension must be installed");
            return Err(WalletError::ProviderAbsent);
        }

        let accounts = match self.provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(WalletError::UserRejected) => {
                debug!("User rejected the account request");
                return Err(WalletError::UserRejected);
            }
            Err(e) => {
                warn!("Account request failed: {}", e);
                return Err(e);
            }
        };

        let session = WalletSession::from_accounts(&accounts);
        if !session.is_connected() {
            return Err(WalletError::NoAccounts);
        }

        self.session = session;
        self.refresh_chain_id().await;
        info!("Wallet connected: {:?}", session.account());
        Ok(session)
    }

    /// Restore an already authorized session without prompting
    ///
    /// Any failure leaves the session disconnected.
    pub async fn get_current_session(&mut self) -> WalletSession {
        if !self.provider.is_present() {
            self.session = WalletSession::disconnected();
            return self.session;
        }

        self.session = match self.provider.get_accounts().await {
            Ok(accounts) => WalletSession::from_accounts(&accounts),
            Err(e) => {
                warn!("Silent account query failed: {}", e);
                WalletSession::disconnected()
            }
        };
        self.refresh_chain_id().await;

        debug!(
            "Restored wallet session: connected={}, account={:?}",
            self.session.is_connected(),
            self.session.account()
        );
        self.session
    }

    /// Forget the local session; provider-level authorization is untouched
    pub fn disconnect(&mut self) {
        self.session = WalletSession::disconnected();
        debug!("Wallet session cleared");
    }

    /// Apply all pending notifications in arrival order
    pub fn process_events(&mut self) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            updates.push(self.handle_event(event));
        }
        updates
    }

    pub fn handle_event(&mut self, event: WalletEvent) -> SessionUpdate {
        match event {
            WalletEvent::AccountsChanged(accounts) => {
                self.session = WalletSession::from_accounts(&accounts);
                info!("Accounts changed: active={:?}", self.session.account());
                SessionUpdate::AccountChanged(self.session)
            }
            WalletEvent::ChainChanged(chain_id) => {
                self.epoch = self.epoch.next();
                self.chain_id = Some(chain_id);
                info!("Network changed to chain {} (epoch {})", chain_id, self.epoch);
                SessionUpdate::NetworkChanged {
                    chain_id,
                    epoch: self.epoch,
                }
            }
        }
    }

    pub fn session(&self) -> WalletSession {
        self.session
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.chain_id
    }

    pub fn epoch(&self) -> NetworkEpoch {
        self.epoch
    }

    /// Sender for delivering notifications into this manager
    pub fn event_sender(&self) -> WalletEventSender {
        self.events_tx.clone()
    }

    pub fn provider(&self) -> &W {
        &self.provider
    }

    async fn refresh_chain_id(&mut self) {
        match self.provider.chain_id().await {
            Ok(chain_id) => self.chain_id = Some(chain_id),
            Err(e) => debug!("Could not read chain id: {}", e),
        }
    }
}
