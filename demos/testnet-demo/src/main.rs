//! Testnet demo: load markets, print balance, ticker and open positions on the
//! Binance futures testnet, optionally placing a market buy.
//!
//! Usage: testnet-demo --api-key <key> --api-secret <secret> [--symbol BTC/USDT:USDT] [--order-amount 0.01]
//!
//! Keys come from https://testnet.binancefuture.com/ and can also be passed via
//! `BINANCE_TESTNET_API_KEY` / `BINANCE_TESTNET_API_SECRET`.

use anyhow::Result;
use clap::Parser;
use clients_binance_testnet::{ExchangeFactory, FuturesTrading, OrderRequest};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "testnet-demo", about = "Binance USDⓈ-M futures testnet walkthrough")]
struct Args {
    /// Testnet API key
    #[arg(long, env = "BINANCE_TESTNET_API_KEY")]
    api_key: String,
    /// Testnet API secret
    #[arg(long, env = "BINANCE_TESTNET_API_SECRET", hide_env_values = true)]
    api_secret: String,
    /// Unified symbol for the ticker and the optional order
    #[arg(long, default_value = "BTC/USDT:USDT")]
    symbol: String,
    /// Place a market buy of this size
    #[arg(long)]
    order_amount: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let exchange = ExchangeFactory::create_binance_demo(args.api_key.trim(), args.api_secret.trim())?;

    let markets = exchange.inner().load_markets().await?;
    info!("Loaded {} markets", markets.len());

    let balance = exchange.fetch_balance().await?;
    let usdt_total = balance.get("USDT").map(|b| b.total).unwrap_or(0.0);
    info!("USDT balance: {:.2}", usdt_total);

    let ticker = exchange.fetch_ticker(&args.symbol).await?;
    info!("{} last price: {:?}", ticker.symbol, ticker.last);

    let positions = exchange.fetch_positions(None).await?;
    let open = positions.iter().filter(|p| p.contracts != 0.0).count();
    info!("Open positions: {}", open);

    if let Some(amount) = args.order_amount {
        let order = exchange
            .create_order(OrderRequest::new(&args.symbol, "MARKET", "BUY", amount))
            .await?;
        println!("{:?}", order);
    }

    Ok(())
}
