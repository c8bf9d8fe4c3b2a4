use clients_binance::{DEFAULT_RECV_WINDOW, TESTNET_URL};
use serde::{Deserialize, Serialize};

/// Configuration for TestnetExchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestnetConfig {
    /// Testnet API key
    pub api_key: String,
    /// Testnet API secret
    pub api_secret: String,
    /// Testnet REST host
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Receive window in milliseconds for signed requests
    #[serde(default = "default_recv_window")]
    pub recv_window: u64,
    /// Skip TLS certificate verification for testnet calls
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

fn default_base_url() -> String {
    TESTNET_URL.to_string()
}

fn default_recv_window() -> u64 {
    DEFAULT_RECV_WINDOW
}

fn default_accept_invalid_certs() -> bool {
    true
}

impl TestnetConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: default_base_url(),
            recv_window: default_recv_window(),
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }
}
