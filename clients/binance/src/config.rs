use serde::{Deserialize, Serialize};

/// Production USDⓈ-M futures REST host.
pub const MAINNET_URL: &str = "https://fapi.binance.com";
/// Dedicated futures testnet REST host.
pub const TESTNET_URL: &str = "https://testnet.binancefuture.com";
/// Receive window (ms) sent with every signed request.
pub const DEFAULT_RECV_WINDOW: u64 = 60_000;

/// Configuration for BinancePerpsClient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinancePerpsClientConfig {
    /// Binance API key
    pub api_key: String,
    /// Binance API secret
    pub api_secret: String,
    /// Base URL for API endpoints
    pub base_url: String,
    /// Base URL used instead of `base_url` while sandbox mode is enabled
    pub sandbox_url: String,
    /// Receive window in milliseconds for signed requests
    pub recv_window: u64,
}

impl BinancePerpsClientConfig {
    /// Config with production/testnet hosts and the default receive window.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: MAINNET_URL.to_string(),
            sandbox_url: TESTNET_URL.to_string(),
            recv_window: DEFAULT_RECV_WINDOW,
        }
    }
}
