use std::collections::BTreeMap;

use async_trait::async_trait;
use clients_binance::{Order, Result, Ticker};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Account and trading operations served by the testnet adapter.
#[async_trait]
pub trait FuturesTrading: Send + Sync {
    /// Wallet, available and used balance per asset.
    async fn fetch_balance(&self) -> Result<Balances>;

    /// 24h ticker for a unified symbol such as `BTC/USDT:USDT`.
    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker>;

    /// Every position the account reports, flat ones included.
    ///
    /// `symbols` is accepted for interface compatibility but is not applied;
    /// callers filter the returned records themselves.
    async fn fetch_positions(&self, symbols: Option<&[String]>) -> Result<Vec<PositionRecord>>;

    /// Places an order and returns it in unified form.
    async fn create_order(&self, request: OrderRequest) -> Result<Order>;
}

/// Free/used/total quantities of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceEntry {
    pub free: f64,
    pub used: f64,
    pub total: f64,
}

/// Account balances keyed by asset.
///
/// Serializes with one top-level entry per asset next to the `free`, `used`,
/// `total` and `info` maps. An asset named like one of those maps is only
/// reachable through the maps and [`Balances::get`], never at the top level.
#[derive(Debug, Clone)]
pub struct Balances {
    /// Raw account payload
    pub info: Value,
    pub free: BTreeMap<String, f64>,
    pub used: BTreeMap<String, f64>,
    pub total: BTreeMap<String, f64>,
    pub assets: BTreeMap<String, BalanceEntry>,
}

const RESERVED_KEYS: [&str; 4] = ["info", "free", "used", "total"];

impl Serialize for Balances {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("info", &self.info)?;
        map.serialize_entry("free", &self.free)?;
        map.serialize_entry("used", &self.used)?;
        map.serialize_entry("total", &self.total)?;
        for (asset, entry) in &self.assets {
            if !RESERVED_KEYS.contains(&asset.as_str()) {
                map.serialize_entry(asset, entry)?;
            }
        }
        map.end()
    }
}

impl Balances {
    pub(crate) fn new(info: Value) -> Self {
        Self {
            info,
            free: BTreeMap::new(),
            used: BTreeMap::new(),
            total: BTreeMap::new(),
            assets: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, asset: &str, entry: BalanceEntry) {
        self.free.insert(asset.to_string(), entry.free);
        self.used.insert(asset.to_string(), entry.used);
        self.total.insert(asset.to_string(), entry.total);
        self.assets.insert(asset.to_string(), entry);
    }

    pub fn get(&self, asset: &str) -> Option<&BalanceEntry> {
        self.assets.get(asset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Long for a positive quantity; everything else, a flat position
    /// included, counts as short.
    pub fn from_contracts(contracts: f64) -> Self {
        if contracts > 0.0 {
            PositionSide::Long
        } else {
            PositionSide::Short
        }
    }
}

/// One position as reported by `/fapi/v2/positionRisk`.
#[derive(Debug, Clone, Serialize)]
pub struct PositionRecord {
    /// Raw position payload
    pub info: Value,
    /// Exchange symbol, e.g. `BTCUSDT`
    pub symbol: String,
    /// Signed position size
    pub contracts: f64,
    pub unrealized_pnl: f64,
    pub leverage: f64,
    pub side: PositionSide,
    pub entry_price: f64,
}

/// Parameters for [`FuturesTrading::create_order`].
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Unified symbol or exchange id
    pub symbol: String,
    /// `MARKET`, `LIMIT`, ... (case-insensitive)
    pub order_type: String,
    /// `BUY` or `SELL` (case-insensitive)
    pub side: String,
    pub amount: f64,
    /// Only sent for `LIMIT` orders
    pub price: Option<f64>,
    /// Extra exchange parameters; never override the required ones
    pub params: Vec<(String, String)>,
}

impl OrderRequest {
    pub fn new(
        symbol: impl Into<String>,
        order_type: impl Into<String>,
        side: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            order_type: order_type.into(),
            side: side.into(),
            amount,
            price: None,
            params: Vec::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// First value supplied for `key` in the extra parameters.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_side_from_contracts() {
        assert_eq!(PositionSide::from_contracts(2.5), PositionSide::Long);
        assert_eq!(PositionSide::from_contracts(-1.0), PositionSide::Short);
        assert_eq!(PositionSide::from_contracts(0.0), PositionSide::Short);
    }

    #[test]
    fn test_balances_serialize_with_top_level_assets() {
        let mut balances = Balances::new(json!({}));
        balances.insert(
            "USDT",
            BalanceEntry {
                free: 40.0,
                used: 60.0,
                total: 100.0,
            },
        );
        let value = serde_json::to_value(&balances).unwrap();
        assert_eq!(value["USDT"], json!({"free": 40.0, "used": 60.0, "total": 100.0}));
        assert_eq!(value["free"]["USDT"], json!(40.0));
        assert_eq!(value["used"]["USDT"], json!(60.0));
        assert_eq!(value["total"]["USDT"], json!(100.0));
    }

    #[test]
    fn test_reserved_asset_names_stay_out_of_top_level() {
        let mut balances = Balances::new(json!({"assets": []}));
        let entry = BalanceEntry {
            free: 1.0,
            used: 0.0,
            total: 1.0,
        };
        balances.insert("info", entry);
        balances.insert("BTC", entry);

        let text = serde_json::to_string(&balances).unwrap();
        assert_eq!(text.matches("\"info\":").count(), 1);

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["info"], json!({"assets": []}));
        assert_eq!(value["free"]["info"], json!(1.0));
        assert_eq!(value["BTC"]["total"], json!(1.0));
        assert_eq!(balances.get("info"), Some(&entry));
    }

    #[test]
    fn test_order_request_param_lookup() {
        let request = OrderRequest::new("BTC/USDT:USDT", "limit", "buy", 0.01)
            .with_price(30_000.0)
            .with_param("timeInForce", "IOC")
            .with_param("timeInForce", "FOK");
        assert_eq!(request.param("timeInForce"), Some("IOC"));
        assert_eq!(request.param("reduceOnly"), None);
    }
}
