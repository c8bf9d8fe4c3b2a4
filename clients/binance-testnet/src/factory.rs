use std::sync::Arc;

use clients_binance::{BinancePerpsClient, BinancePerpsClientConfig, Result};

use crate::config::TestnetConfig;
use crate::testnet::TestnetExchange;

/// Builds exchange clients wired for the futures testnet.
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Creates a USDⓈ-M futures client in sandbox mode whose balance, ticker,
    /// position and order calls go to the testnet host.
    ///
    /// Credentials are not validated here; a bad key surfaces as an API error
    /// on the first signed call.
    pub fn create_binance_demo(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<TestnetExchange> {
        Self::from_config(TestnetConfig::new(api_key, api_secret))
    }

    /// Same as [`ExchangeFactory::create_binance_demo`] with explicit settings.
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn from_config(config: TestnetConfig) -> Result<TestnetExchange> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        let perps_config = BinancePerpsClientConfig {
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            sandbox_url: config.base_url.clone(),
            recv_window: config.recv_window,
            ..BinancePerpsClientConfig::new("", "")
        };
        let mut inner = BinancePerpsClient::new(Arc::new(http), perps_config);
        inner.set_sandbox_mode(true);

        tracing::info!(base_url = %config.base_url, "binance futures testnet client ready");
        Ok(TestnetExchange::new(inner))
    }
}
