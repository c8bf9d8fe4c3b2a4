//! Binance USDⓈ-M perpetual futures client.
//!
//! Loads market metadata, resolves unified symbols (`BTC/USDT:USDT`) to
//! exchange ids (`BTCUSDT`), normalizes ticker and order payloads and provides
//! the HMAC-SHA256 request signing shared by every signed endpoint.

mod config;
mod error;
mod markets;
mod parse;
mod perps;
mod types;
pub mod utils;

pub use crate::utils::{build_query, sign_params, sign_query, timestamp_ms};
pub use config::{BinancePerpsClientConfig, DEFAULT_RECV_WINDOW, MAINNET_URL, TESTNET_URL};
pub use error::{Error, Result};
pub use markets::{Market, Markets};
pub use perps::BinancePerpsClient;
pub use types::{Order, OrderStatus, PositionRisk, Ticker};
