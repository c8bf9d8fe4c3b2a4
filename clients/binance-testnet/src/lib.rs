//! Binance USDⓈ-M futures testnet adapter.
//!
//! The library client's sandbox mode no longer shapes balance, ticker,
//! position and order requests the way `testnet.binancefuture.com` expects.
//! [`TestnetExchange`] implements those four operations against the testnet
//! host directly and delegates market metadata, symbol resolution and
//! response parsing to the wrapped [`clients_binance::BinancePerpsClient`].

mod config;
mod factory;
mod testnet;
mod trading;

pub use config::TestnetConfig;
pub use factory::ExchangeFactory;
pub use testnet::TestnetExchange;
pub use trading::{
    BalanceEntry, Balances, FuturesTrading, OrderRequest, PositionRecord, PositionSide,
};
