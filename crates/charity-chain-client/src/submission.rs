/*!
# Campaign Submission Flow

Validates the "register NGO" draft, converts the minimum contribution into base units
and submits `createCampaign` from the active wallet account.

## States

```text
Idle → Validating → AwaitingWalletAccount → Submitting → Succeeded | Failed
```

- Missing required fields return to `Idle` with one aggregate notice.
- Without a connected account the flow stops in `AwaitingWalletAccount` and offers a
  connect action; no transaction is attempted.
- `Failed` returns to `Idle` with the error message shown verbatim and the draft intact.
- A result that resolves after a network change is discarded (see [`NetworkEpoch`]).

Every method takes `&mut self`, so a second submission cannot start while one is in flight.
State changes are also published on a [`watch`] channel ([`CampaignSubmission::subscribe_state`])
so a UI can keep the submit control disabled while `submit()` is pending.

[`NetworkEpoch`]: crate::wallet::NetworkEpoch
*/

use crate::{
    contract::{FactoryContract, TxReceipt},
    errors::{ValidationError, WalletError, WalletResult},
    oracle::{PriceFeed, PriceOracle},
    wallet::{SessionManager, WalletProvider, WalletSession},
};
use charity_chain_sdk::{format_base_units, parse_to_base_units, CreateCampaignParams};
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub type SubmissionStateReceiver = watch::Receiver<SubmissionState>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    AwaitingWalletAccount,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Submit control is disabled and shows a loading indicator
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Required draft fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    MinimumContribution,
    Name,
    Description,
    ImageUrl,
}

/// Form values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignDraft {
    /// Native amount, e.g. `"0.01"`
    pub minimum_contribution: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Optional
    pub legal_doc_url: String,
}

impl CampaignDraft {
    pub fn missing_fields(&self) -> Vec<DraftField> {
        [
            (DraftField::MinimumContribution, &self.minimum_contribution),
            (DraftField::Name, &self.name),
            (DraftField::Description, &self.description),
            (DraftField::ImageUrl, &self.image_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Check required fields and convert the draft into contract arguments
    pub fn validate(&self, native_decimals: u8) -> Result<CreateCampaignParams, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let minimum_contribution =
            parse_to_base_units(&self.minimum_contribution, native_decimals)?;

        Ok(CreateCampaignParams {
            minimum_contribution,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            legal_doc_url: self.legal_doc_url.trim().to_string(),
        })
    }
}

/// Message displayed inline on the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Aggregate notice for any missing required field
    AllFieldsRequired,
    /// Submit is replaced by a connect action until an account is available
    ConnectWallet,
    /// No wallet extension detected
    InstallWallet,
    /// Underlying error message, verbatim
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllFieldsRequired => write!(f, "All Fields are Required"),
            Self::ConnectWallet => write!(f, "Please Connect Your Wallet First for Register NGO"),
            Self::InstallWallet => write!(f, "Please install MetaMask!"),
            Self::Error(message) => write!(f, "{message}"),
        }
    }
}

/// Which control the form offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    Submit,
    ConnectWallet,
}

/// Routes the surrounding application can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Campaign listing
    Home,
    NewCampaign,
}

impl Route {
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::NewCampaign => "/campaign/new",
        }
    }
}

pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Transaction mined with `params`; navigation to the listing happened
    Submitted {
        receipt: TxReceipt,
        params: CreateCampaignParams,
    },
    /// Validation failed; nothing was sent
    Invalid(ValidationError),
    /// No connected account; nothing was sent
    WalletRequired,
    /// Transaction failed with this message; the draft is preserved
    Failed(String),
    /// The network changed while the transaction was in flight; its result was ignored
    Stale,
}

pub struct CampaignSubmission<W, F, P, N> {
    session: SessionManager<W>,
    factory: F,
    oracle: PriceOracle<P>,
    navigator: N,
    native_decimals: u8,
    draft: CampaignDraft,
    state: SubmissionState,
    state_tx: watch::Sender<SubmissionState>,
    notice: Option<Notice>,
}

impl<W, F, P, N> CampaignSubmission<W, F, P, N>
where
    W: WalletProvider,
    F: FactoryContract,
    P: PriceFeed,
    N: Navigator,
{
    pub fn new(
        session: SessionManager<W>,
        factory: F,
        oracle: PriceOracle<P>,
        navigator: N,
        native_decimals: u8,
    ) -> Self {
        Self {
            session,
            factory,
            oracle,
            navigator,
            native_decimals,
            draft: CampaignDraft::default(),
            state: SubmissionState::Idle,
            state_tx: watch::channel(SubmissionState::Idle).0,
            notice: None,
        }
    }

    /// Page load: silent session restore and the single price fetch
    pub async fn mount(&mut self) {
        self.session.get_current_session().await;
        self.oracle.load().await;
    }

    /// Full reset after a network change
    pub async fn reload(&mut self) {
        info!("Reloading after network change (epoch {})", self.session.epoch());
        self.draft = CampaignDraft::default();
        self.notice = None;
        self.transition(SubmissionState::Idle);
        self.oracle.reset();
        self.mount().await;
    }

    /// Apply pending wallet notifications; reloads if the network changed
    ///
    /// Returns `true` when a reload happened.
    pub async fn sync_events(&mut self) -> bool {
        let updates = self.session.process_events();
        if updates.iter().any(|update| update.requires_reload()) {
            self.reload().await;
            return true;
        }

        if self.state == SubmissionState::AwaitingWalletAccount
            && self.session.session().is_connected()
        {
            self.resume_after_connect();
        }
        false
    }

    /// Connect action offered by the form
    pub async fn connect_wallet(&mut self) -> WalletResult<WalletSession> {
        match self.session.connect().await {
            Ok(session) => {
                self.resume_after_connect();
                Ok(session)
            }
            Err(WalletError::ProviderAbsent) => {
                self.notice = Some(Notice::InstallWallet);
                Err(WalletError::ProviderAbsent)
            }
            // declining the prompt leaves the form as it was
            Err(e) => Err(e),
        }
    }

    pub fn disconnect_wallet(&mut self) {
        self.session.disconnect();
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        self.sync_events().await;
        self.notice = None;
        self.transition(SubmissionState::Validating);

        let params = match self.draft.validate(self.native_decimals) {
            Ok(params) => params,
            Err(e) => {
                debug!("Draft rejected: {:?}", e);
                self.notice = Some(match &e {
                    ValidationError::MissingFields(_) => Notice::AllFieldsRequired,
                    ValidationError::InvalidAmount(units) => Notice::Error(units.to_string()),
                });
                self.transition(SubmissionState::Idle);
                return SubmitOutcome::Invalid(e);
            }
        };

        let Some(from) = self.session.session().account() else {
            self.transition(SubmissionState::AwaitingWalletAccount);
            self.notice = Some(Notice::ConnectWallet);
            return SubmitOutcome::WalletRequired;
        };

        self.transition(SubmissionState::Submitting);
        let epoch = self.session.epoch();
        info!(
            "Submitting createCampaign from {} to factory {} (minimum {} = {} base units)",
            from,
            self.factory.handle().address(),
            format_base_units(params.minimum_contribution, self.native_decimals),
            params.minimum_contribution
        );

        let result = self.factory.create_campaign(from, params.clone()).await;

        // notifications may have arrived while the transaction was pending
        self.sync_events().await;
        if self.session.epoch() != epoch {
            warn!(
                "Discarding createCampaign result from epoch {} (now {})",
                epoch,
                self.session.epoch()
            );
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(receipt) => {
                info!("Campaign created in tx {}", receipt.transaction_hash);
                self.transition(SubmissionState::Succeeded);
                self.draft = CampaignDraft::default();
                self.navigator.navigate(Route::Home);
                SubmitOutcome::Submitted { receipt, params }
            }
            Err(e) => {
                warn!("createCampaign failed: {}", e);
                self.transition(SubmissionState::Failed);
                let message = e.message().to_string();
                self.notice = Some(Notice::Error(message.clone()));
                self.transition(SubmissionState::Idle);
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Informational display-currency value of the typed minimum contribution
    pub fn contribution_hint(&self) -> Option<f64> {
        self.oracle.contribution_hint(&self.draft.minimum_contribution)
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.session.session().is_connected() {
            PrimaryAction::Submit
        } else {
            PrimaryAction::ConnectWallet
        }
    }

    /// Submit control is disabled and shows a loading indicator
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Receiver that observes every state change, including those made while `submit()` is pending
    pub fn subscribe_state(&self) -> SubmissionStateReceiver {
        self.state_tx.subscribe()
    }

    pub fn draft(&self) -> &CampaignDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CampaignDraft {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: CampaignDraft) {
        self.draft = draft;
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn session(&self) -> &SessionManager<W> {
        &self.session
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn oracle(&self) -> &PriceOracle<P> {
        &self.oracle
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    fn resume_after_connect(&mut self) {
        if self.state == SubmissionState::AwaitingWalletAccount {
            self.transition(SubmissionState::Idle);
        }
        if self.notice == Some(Notice::ConnectWallet) || self.notice == Some(Notice::InstallWallet)
        {
            self.notice = None;
        }
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!("Submission state {:?} -> {:?}", self.state, next);
        self.state = next;
        self.state_tx.send_replace(next);
    }
}
