//! Market metadata from `/fapi/v1/exchangeInfo`.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// A tradable futures market.
#[derive(Debug, Clone, Serialize)]
pub struct Market {
    /// Exchange id, e.g. `BTCUSDT`
    pub id: String,
    /// Unified symbol, e.g. `BTC/USDT:USDT`
    pub symbol: String,
    pub base: String,
    pub quote: String,
    /// Margin (settlement) asset
    pub settle: String,
    /// `PERPETUAL`, `CURRENT_QUARTER`, ...
    pub contract_type: String,
    /// Whether the market is currently `TRADING`
    pub active: bool,
    pub price_precision: u32,
    pub quantity_precision: u32,
    /// Raw exchange payload
    pub info: Value,
}

impl Market {
    fn from_exchange_info(item: &Value) -> Option<Self> {
        let id = str_field(item, "symbol");
        let base = str_field(item, "baseAsset");
        let quote = str_field(item, "quoteAsset");
        if id.is_empty() || base.is_empty() || quote.is_empty() {
            return None;
        }
        let settle = match str_field(item, "marginAsset") {
            "" => quote,
            asset => asset,
        };
        let contract_type = str_field(item, "contractType");

        let mut symbol = format!("{}/{}:{}", base, quote, settle);
        // Delivery contracts carry their expiry as an id suffix: BTCUSDT_250328
        if contract_type != "PERPETUAL" {
            if let Some((_, expiry)) = id.split_once('_') {
                symbol = format!("{}-{}", symbol, expiry);
            }
        }

        let precision = |key: &str| {
            item.get(key)
                .and_then(Value::as_u64)
                .unwrap_or_default() as u32
        };

        Some(Self {
            id: id.to_string(),
            symbol,
            base: base.to_string(),
            quote: quote.to_string(),
            settle: settle.to_string(),
            contract_type: contract_type.to_string(),
            active: str_field(item, "status") == "TRADING",
            price_precision: precision("pricePrecision"),
            quantity_precision: precision("quantityPrecision"),
            info: item.clone(),
        })
    }
}

fn str_field<'a>(item: &'a Value, key: &str) -> &'a str {
    item.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Markets indexed by unified symbol, with a reverse index by exchange id.
#[derive(Debug, Clone, Default)]
pub struct Markets {
    by_symbol: HashMap<String, Market>,
    symbol_by_id: HashMap<String, String>,
}

impl Markets {
    /// Parses an `exchangeInfo` payload. Entries without an id or assets are skipped.
    pub fn from_exchange_info(data: &Value) -> Result<Self> {
        let symbols = data
            .get("symbols")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                Error::Decode(serde::de::Error::custom(
                    "exchangeInfo response has no symbols",
                ))
            })?;

        let mut markets = Markets::default();
        for market in symbols.iter().filter_map(Market::from_exchange_info) {
            markets
                .symbol_by_id
                .insert(market.id.clone(), market.symbol.clone());
            markets.by_symbol.insert(market.symbol.clone(), market);
        }
        Ok(markets)
    }

    /// Looks up a unified symbol, falling back to the exchange id.
    pub fn get(&self, symbol: &str) -> Option<&Market> {
        self.by_symbol.get(symbol).or_else(|| {
            self.symbol_by_id
                .get(symbol)
                .and_then(|unified| self.by_symbol.get(unified))
        })
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}
