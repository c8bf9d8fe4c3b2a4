//! Normalization of raw ticker and order payloads.

use serde_json::Value;
use utils::{field_f64, field_string};

use crate::markets::Market;
use crate::types::{Order, OrderStatus, Ticker};

pub(crate) fn parse_ticker(data: &Value, market: &Market) -> Ticker {
    let last = field_f64(data, "lastPrice");
    Ticker {
        symbol: market.symbol.clone(),
        timestamp: data.get("closeTime").and_then(Value::as_i64),
        high: field_f64(data, "highPrice"),
        low: field_f64(data, "lowPrice"),
        open: field_f64(data, "openPrice"),
        close: last,
        last,
        vwap: field_f64(data, "weightedAvgPrice"),
        change: field_f64(data, "priceChange"),
        percentage: field_f64(data, "priceChangePercent"),
        base_volume: field_f64(data, "volume"),
        quote_volume: field_f64(data, "quoteVolume"),
        info: data.clone(),
    }
}

pub(crate) fn parse_order(data: &Value, market: &Market) -> Order {
    // Binance reports 0 for prices that do not apply (market orders, nothing filled yet)
    let non_zero = |key: &str| field_f64(data, key).filter(|v| *v != 0.0);
    let lower = |key: &str| field_string(data, key).map(|s| s.to_lowercase());

    let amount = field_f64(data, "origQty");
    let filled = field_f64(data, "executedQty");
    let remaining = match (amount, filled) {
        (Some(amount), Some(filled)) => Some((amount - filled).max(0.0)),
        _ => None,
    };

    Order {
        id: field_string(data, "orderId").unwrap_or_default(),
        client_order_id: field_string(data, "clientOrderId"),
        symbol: market.symbol.clone(),
        order_type: lower("type").unwrap_or_default(),
        side: lower("side").unwrap_or_default(),
        status: field_string(data, "status")
            .map(|s| OrderStatus::from_exchange(&s))
            .unwrap_or(OrderStatus::Open),
        price: non_zero("price"),
        average: non_zero("avgPrice"),
        amount,
        filled,
        remaining,
        cost: field_f64(data, "cumQuote"),
        time_in_force: field_string(data, "timeInForce"),
        reduce_only: data
            .get("reduceOnly")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        timestamp: data.get("updateTime").and_then(Value::as_i64),
        info: data.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::{tests::exchange_info, Markets};
    use serde_json::json;

    fn btc() -> Market {
        Markets::from_exchange_info(&exchange_info())
            .unwrap()
            .get("BTCUSDT")
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_parse_ticker() {
        let data = json!({
            "symbol": "BTCUSDT",
            "priceChange": "-94.99999800",
            "priceChangePercent": "-95.960",
            "weightedAvgPrice": "0.29628482",
            "lastPrice": "4.00000200",
            "lastQty": "200.00000000",
            "openPrice": "99.00000000",
            "highPrice": "100.00000000",
            "lowPrice": "0.10000000",
            "volume": "8913.30000000",
            "quoteVolume": "15.30000000",
            "openTime": 1499783499040i64,
            "closeTime": 1499869899040i64,
            "count": 76
        });
        let ticker = parse_ticker(&data, &btc());
        assert_eq!(ticker.symbol, "BTC/USDT:USDT");
        assert_eq!(ticker.last, Some(4.000002));
        assert_eq!(ticker.close, ticker.last);
        assert_eq!(ticker.high, Some(100.0));
        assert_eq!(ticker.percentage, Some(-95.96));
        assert_eq!(ticker.timestamp, Some(1499869899040));
        assert_eq!(ticker.info["count"], json!(76));
    }

    #[test]
    fn test_parse_new_market_order() {
        let data = json!({
            "clientOrderId": "testOrder",
            "cumQuote": "0",
            "executedQty": "0",
            "orderId": 22542179,
            "avgPrice": "0.00000",
            "origQty": "0.010",
            "price": "0",
            "reduceOnly": false,
            "side": "BUY",
            "status": "NEW",
            "symbol": "BTCUSDT",
            "timeInForce": "GTC",
            "type": "MARKET",
            "updateTime": 1566818724722i64
        });
        let order = parse_order(&data, &btc());
        assert_eq!(order.id, "22542179");
        assert_eq!(order.client_order_id.as_deref(), Some("testOrder"));
        assert_eq!(order.order_type, "market");
        assert_eq!(order.side, "buy");
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.price, None);
        assert_eq!(order.average, None);
        assert_eq!(order.amount, Some(0.01));
        assert_eq!(order.remaining, Some(0.01));
        assert_eq!(order.timestamp, Some(1566818724722));
    }

    #[test]
    fn test_order_status_mapping() {
        assert_eq!(OrderStatus::from_exchange("FILLED"), OrderStatus::Closed);
        assert_eq!(OrderStatus::from_exchange("PARTIALLY_FILLED"), OrderStatus::Open);
        assert_eq!(OrderStatus::from_exchange("EXPIRED_IN_MATCH"), OrderStatus::Expired);
        assert_eq!(
            OrderStatus::from_exchange("NEW_INSURANCE"),
            OrderStatus::Other("NEW_INSURANCE".to_string())
        );
    }
}
