use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::config::BinancePerpsClientConfig;
use crate::error::{Error, Result};
use crate::markets::{Market, Markets};
use crate::parse;
use crate::types::{Order, Ticker};

/// Client for Binance perpetual futures (USDT-M) API.
pub struct BinancePerpsClient {
    client: Arc<reqwest::Client>,
    config: BinancePerpsClientConfig,
    sandbox: bool,
    markets: RwLock<Option<Arc<Markets>>>,
    load_lock: Mutex<()>,
}

impl BinancePerpsClient {
    pub fn new(client: Arc<reqwest::Client>, config: BinancePerpsClientConfig) -> Self {
        Self {
            client,
            config,
            sandbox: false,
            markets: RwLock::new(None),
            load_lock: Mutex::new(()),
        }
    }

    /// Routes requests to `sandbox_url` instead of `base_url`.
    pub fn set_sandbox_mode(&mut self, enabled: bool) {
        self.sandbox = enabled;
    }

    pub fn sandbox_mode(&self) -> bool {
        self.sandbox
    }

    /// Host currently used for requests.
    pub fn base_url(&self) -> &str {
        if self.sandbox {
            &self.config.sandbox_url
        } else {
            &self.config.base_url
        }
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.config.api_secret
    }

    pub fn recv_window(&self) -> u64 {
        self.config.recv_window
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn markets_loaded(&self) -> bool {
        self.markets.read().await.is_some()
    }

    /// Cached markets, if `load_markets` has completed.
    pub async fn markets(&self) -> Option<Arc<Markets>> {
        self.markets.read().await.clone()
    }

    /// Fetches `/fapi/v1/exchangeInfo` and replaces the market cache.
    pub async fn load_markets(&self) -> Result<Arc<Markets>> {
        let url = format!("{}/fapi/v1/exchangeInfo", self.base_url());
        tracing::debug!(%url, "loading markets");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::api(status.as_u16(), &text));
        }

        let data: Value = serde_json::from_str(&text)?;
        let markets = Arc::new(Markets::from_exchange_info(&data)?);
        if markets.is_empty() {
            tracing::warn!("exchangeInfo from {} listed no usable markets", self.base_url());
        } else {
            tracing::info!("Loaded {} futures markets from {}", markets.len(), self.base_url());
        }

        *self.markets.write().await = Some(Arc::clone(&markets));
        Ok(markets)
    }

    /// Cached markets, loading them first if needed. Concurrent first callers
    /// share a single `exchangeInfo` request.
    pub async fn ensure_markets(&self) -> Result<Arc<Markets>> {
        if let Some(markets) = self.markets().await {
            return Ok(markets);
        }
        let _guard = self.load_lock.lock().await;
        if let Some(markets) = self.markets().await {
            return Ok(markets);
        }
        self.load_markets().await
    }

    /// Resolves a unified symbol (or exchange id) against the loaded markets.
    pub async fn market(&self, symbol: &str) -> Result<Market> {
        let markets = self.markets().await.ok_or(Error::MarketsNotLoaded)?;
        markets
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::BadSymbol(symbol.to_string()))
    }

    /// Normalizes a `/fapi/v1/ticker/24hr` payload.
    pub fn parse_ticker(&self, data: &Value, market: &Market) -> Ticker {
        parse::parse_ticker(data, market)
    }

    /// Normalizes an order payload from `/fapi/v1/order`.
    pub fn parse_order(&self, data: &Value, market: &Market) -> Order {
        parse::parse_order(data, market)
    }
}
