use std::sync::Arc;

use async_trait::async_trait;
use clients_binance::{
    sign_params, BinancePerpsClient, Error, Market, Order, PositionRisk, Result, Ticker,
};
use reqwest::StatusCode;
use serde_json::Value;
use utils::field_f64;

use crate::trading::{
    BalanceEntry, Balances, FuturesTrading, OrderRequest, PositionRecord, PositionSide,
};

const API_KEY_HEADER: &str = "X-MBX-APIKEY";

type TimestampFn = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Testnet implementation of [`FuturesTrading`].
///
/// Market metadata, symbol resolution and ticker/order parsing go through the
/// wrapped library client. The four operations are sent to the client's
/// current host with its credentials, HTTP client and receive window.
pub struct TestnetExchange {
    inner: BinancePerpsClient,
    timestamp_fn: TimestampFn,
}

impl TestnetExchange {
    pub fn new(inner: BinancePerpsClient) -> Self {
        Self {
            inner,
            timestamp_fn: Arc::new(clients_binance::timestamp_ms),
        }
    }

    /// Replaces the clock used for the `timestamp` parameter.
    pub fn with_timestamp_fn(mut self, timestamp_fn: TimestampFn) -> Self {
        self.timestamp_fn = timestamp_fn;
        self
    }

    /// The wrapped library client.
    pub fn inner(&self) -> &BinancePerpsClient {
        &self.inner
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url(), path)
    }

    /// `timestamp` and `recvWindow`, the params every signed call starts with.
    fn base_params(&self) -> Vec<(String, String)> {
        vec![
            ("timestamp".to_string(), (self.timestamp_fn)().to_string()),
            ("recvWindow".to_string(), self.inner.recv_window().to_string()),
        ]
    }

    async fn resolve_market(&self, symbol: &str) -> Result<Market> {
        self.inner.ensure_markets().await?;
        self.inner.market(symbol).await
    }

    /// Signed GET carrying only the base params.
    async fn signed_get(&self, path: &str) -> Result<Value> {
        let query = sign_params(self.inner.api_secret(), &self.base_params());
        let request = self
            .inner
            .http()
            .get(format!("{}?{}", self.url(path), query))
            .header(API_KEY_HEADER, self.inner.api_key());
        self.send(path, request).await
    }

    async fn send(&self, path: &str, request: reqwest::RequestBuilder) -> Result<Value> {
        tracing::debug!(endpoint = path, "testnet request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if status != StatusCode::OK {
            tracing::warn!(endpoint = path, status = status.as_u16(), "testnet request failed");
            return Err(Error::api(status.as_u16(), &text));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl FuturesTrading for TestnetExchange {
    async fn fetch_balance(&self) -> Result<Balances> {
        let data = self.signed_get("/fapi/v2/account").await?;
        Ok(balances_from_account(data))
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker> {
        let market = self.resolve_market(symbol).await?;
        let path = "/fapi/v1/ticker/24hr";
        let request = self
            .inner
            .http()
            .get(self.url(path))
            .query(&[("symbol", market.id.as_str())]);
        let data = self.send(path, request).await?;
        Ok(self.inner.parse_ticker(&data, &market))
    }

    async fn fetch_positions(&self, _symbols: Option<&[String]>) -> Result<Vec<PositionRecord>> {
        let data = self.signed_get("/fapi/v2/positionRisk").await?;
        positions_from_risk(data)
    }

    async fn create_order(&self, request: OrderRequest) -> Result<Order> {
        let market = self.resolve_market(&request.symbol).await?;
        let params = order_params(
            &market.id,
            &request,
            (self.timestamp_fn)(),
            self.inner.recv_window(),
        );

        let path = "/fapi/v1/order";
        let query = sign_params(self.inner.api_secret(), &params);
        let builder = self
            .inner
            .http()
            .post(format!("{}?{}", self.url(path), query))
            .header(API_KEY_HEADER, self.inner.api_key());
        let data = self.send(path, builder).await?;

        let order = self.inner.parse_order(&data, &market);
        tracing::info!("Order placed on testnet: id={} symbol={}", order.id, order.symbol);
        Ok(order)
    }
}

fn balances_from_account(data: Value) -> Balances {
    let mut balances = Balances::new(Value::Null);
    if let Some(assets) = data.get("assets").and_then(Value::as_array) {
        for asset in assets {
            let name = match asset.get("asset").and_then(Value::as_str) {
                Some(name) if !name.is_empty() => name,
                _ => continue,
            };
            let total = field_f64(asset, "walletBalance").unwrap_or(0.0);
            let free = field_f64(asset, "availableBalance").unwrap_or(0.0);
            // Not clamped: available can exceed wallet balance with unrealized profit
            let used = total - free;
            balances.insert(name, BalanceEntry { free, used, total });
        }
    }
    balances.info = data;
    balances
}

fn positions_from_risk(data: Value) -> Result<Vec<PositionRecord>> {
    let items: Vec<Value> = serde_json::from_value(data)?;
    items
        .into_iter()
        .map(|item| -> Result<PositionRecord> {
            let risk: PositionRisk = serde_json::from_value(item.clone())?;
            let contracts = parse_number("positionAmt", &risk.position_amt)?;
            Ok(PositionRecord {
                symbol: risk.symbol,
                contracts,
                unrealized_pnl: parse_number("unRealizedProfit", &risk.unrealized_pnl)?,
                leverage: parse_number("leverage", &risk.leverage)?,
                side: PositionSide::from_contracts(contracts),
                entry_price: parse_number("entryPrice", &risk.entry_price)?,
                info: item,
            })
        })
        .collect()
}

fn parse_number(field: &'static str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Order params in signing order. Required fields come first and win over
/// any extra parameter with the same key.
fn order_params(
    market_id: &str,
    request: &OrderRequest,
    timestamp: u64,
    recv_window: u64,
) -> Vec<(String, String)> {
    let order_type = request.order_type.to_uppercase();
    let mut params = vec![
        ("symbol".to_string(), market_id.to_string()),
        ("side".to_string(), request.side.to_uppercase()),
        ("type".to_string(), order_type.clone()),
        ("quantity".to_string(), request.amount.to_string()),
        ("timestamp".to_string(), timestamp.to_string()),
        ("recvWindow".to_string(), recv_window.to_string()),
    ];

    if let Some(price) = request.price.filter(|p| *p != 0.0) {
        if order_type == "LIMIT" {
            let time_in_force = request.param("timeInForce").unwrap_or("GTC");
            params.push(("price".to_string(), price.to_string()));
            params.push(("timeInForce".to_string(), time_in_force.to_string()));
        }
    }

    for (key, value) in &request.params {
        if !params.iter().any(|(k, _)| k == key) {
            params.push((key.clone(), value.clone()));
        }
    }
    params
}
