/*!
# Price Oracle Adapter

Best-effort native → display currency rate, fetched once per page load and used
only for the informational conversion next to the minimum-contribution field.
Never feeds into a transaction.
*/

use crate::{
    config::PriceFeedConfig,
    errors::{FetchError, FetchResult},
};
use async_trait::async_trait;
use charity_chain_sdk::parse_native_amount;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use tracing::{debug, warn};

#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Current price of one native unit in the display currency
    async fn fetch_rate(&self) -> FetchResult<f64>;
}

/// Simple-price HTTP feed
#[derive(Debug, Clone)]
pub struct HttpPriceFeed {
    client: reqwest::Client,
    config: PriceFeedConfig,
}

impl HttpPriceFeed {
    pub fn new(config: PriceFeedConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: PriceFeedConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &PriceFeedConfig {
        &self.config
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    async fn fetch_rate(&self) -> FetchResult<f64> {
        let response = self
            .client
            .get(self.config.url.clone())
            .query(&[
                ("ids", self.config.asset_id.as_str()),
                ("vs_currencies", self.config.display_currency.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let payload: Value = response.json().await?;
        extract_rate(
            &payload,
            &self.config.asset_id,
            &self.config.display_currency,
        )
    }
}

/// Read `payload[asset][currency]` as a positive finite number
pub fn extract_rate(payload: &Value, asset: &str, currency: &str) -> FetchResult<f64> {
    payload
        .get(asset)
        .and_then(|prices| prices.get(currency))
        .and_then(Value::as_f64)
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or_else(|| FetchError::MissingRate {
            asset: asset.to_string(),
            currency: currency.to_string(),
        })
}

/// Fetched native → display rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate {
    pub rate_native_to_display: f64,
}

/// `amount * rate`, rounded to two places for display
pub fn convert(amount: f64, rate: f64) -> f64 {
    (amount * rate * 100.0).round() / 100.0
}

pub struct PriceOracle<P> {
    feed: P,
    rate: Option<ExchangeRate>,
    loaded: bool,
}

impl<P: PriceFeed> PriceOracle<P> {
    pub fn new(feed: P) -> Self {
        Self {
            feed,
            rate: None,
            loaded: false,
        }
    }

    /// Fetch the rate once; later calls are no-ops until [`reset`](Self::reset)
    ///
    /// A failed fetch is logged and leaves the rate unknown. There is no retry.
    pub async fn load(&mut self) -> Option<ExchangeRate> {
        if self.loaded {
            return self.rate;
        }
        self.loaded = true;

        match self.feed.fetch_rate().await {
            Ok(rate) => {
                debug!("Fetched exchange rate: {}", rate);
                self.rate = Some(ExchangeRate {
                    rate_native_to_display: rate,
                });
            }
            Err(e) => {
                warn!("Price feed unavailable, conversion hint disabled: {}", e);
                self.rate = None;
            }
        }
        self.rate
    }

    /// Forget the fetched rate so the next [`load`](Self::load) fetches again
    pub fn reset(&mut self) {
        self.rate = None;
        self.loaded = false;
    }

    pub fn rate(&self) -> Option<ExchangeRate> {
        self.rate
    }

    /// Informational display-currency value of a typed native amount
    ///
    /// `None` when the rate is unknown, the input is not a number, or it is zero.
    pub fn contribution_hint(&self, input: &str) -> Option<f64> {
        let rate = self.rate?;
        let amount = parse_native_amount(input.trim().trim_start_matches('-'))
            .ok()?
            .to_f64()?;
        if amount == 0.0 {
            return None;
        }
        Some(convert(amount, rate.rate_native_to_display))
    }

    pub fn feed(&self) -> &P {
        &self.feed
    }
}
