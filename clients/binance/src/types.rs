use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Position information from the `/fapi/v2/positionRisk` endpoint.
///
/// Numeric fields are kept as text; Binance sends them as decimal strings but
/// numbers (e.g. `"leverage": 20`) are accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRisk {
    pub symbol: String,
    #[serde(deserialize_with = "string_or_number")]
    pub position_amt: String,
    #[serde(deserialize_with = "string_or_number")]
    pub entry_price: String,
    #[serde(rename = "unRealizedProfit", deserialize_with = "string_or_number")]
    pub unrealized_pnl: String,
    #[serde(deserialize_with = "string_or_number")]
    pub leverage: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

/// 24h rolling ticker in unified form.
#[derive(Debug, Clone, Serialize)]
pub struct Ticker {
    /// Unified symbol, e.g. `BTC/USDT:USDT`
    pub symbol: String,
    /// Close time of the 24h window in milliseconds
    pub timestamp: Option<i64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub open: Option<f64>,
    pub close: Option<f64>,
    pub last: Option<f64>,
    /// Volume weighted average price
    pub vwap: Option<f64>,
    /// Absolute price change over the window
    pub change: Option<f64>,
    /// Price change in percent
    pub percentage: Option<f64>,
    pub base_volume: Option<f64>,
    pub quote_volume: Option<f64>,
    /// Raw exchange payload
    pub info: Value,
}

/// Unified order status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
    Canceled,
    Expired,
    Rejected,
    /// Status string the exchange sent that has no unified counterpart
    #[serde(untagged)]
    Other(String),
}

impl OrderStatus {
    pub fn from_exchange(status: &str) -> Self {
        match status {
            "NEW" | "PARTIALLY_FILLED" => OrderStatus::Open,
            "FILLED" => OrderStatus::Closed,
            "CANCELED" | "PENDING_CANCEL" => OrderStatus::Canceled,
            "EXPIRED" | "EXPIRED_IN_MATCH" => OrderStatus::Expired,
            "REJECTED" => OrderStatus::Rejected,
            other => OrderStatus::Other(other.to_string()),
        }
    }
}

/// Order in unified form, as returned after placement.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Exchange-assigned order id
    pub id: String,
    pub client_order_id: Option<String>,
    /// Unified symbol
    pub symbol: String,
    /// Lower-cased order type, e.g. `limit`
    pub order_type: String,
    /// Lower-cased side, `buy` or `sell`
    pub side: String,
    pub status: OrderStatus,
    /// Limit price, `None` for market orders
    pub price: Option<f64>,
    /// Average fill price, `None` until something fills
    pub average: Option<f64>,
    pub amount: Option<f64>,
    pub filled: Option<f64>,
    pub remaining: Option<f64>,
    /// Filled quote amount
    pub cost: Option<f64>,
    pub time_in_force: Option<String>,
    pub reduce_only: bool,
    pub timestamp: Option<i64>,
    /// Raw exchange payload
    pub info: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_risk_accepts_strings_and_numbers() {
        let risk: PositionRisk = serde_json::from_value(json!({
            "symbol": "BTCUSDT",
            "positionAmt": "0.010",
            "entryPrice": 30000.5,
            "unRealizedProfit": "1.25",
            "leverage": 20
        }))
        .unwrap();
        assert_eq!(risk.position_amt, "0.010");
        assert_eq!(risk.entry_price, "30000.5");
        assert_eq!(risk.leverage, "20");
    }

    #[test]
    fn test_position_risk_rejects_other_types() {
        let result: std::result::Result<PositionRisk, _> = serde_json::from_value(json!({
            "symbol": "BTCUSDT",
            "positionAmt": true,
            "entryPrice": "0",
            "unRealizedProfit": "0",
            "leverage": "1"
        }));
        assert!(result.is_err());
    }
}
