use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use smartflow::api::router::create_router;
use smartflow::config::AppConfig;
use smartflow::models::{Flow, FlowDirection, Trade, Wallet};
use smartflow::store::Store;
use smartflow::AppState;

/// Fixed reference time so time-window assertions are deterministic.
#[allow(dead_code)]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// Build a router over `store` with the given config.
#[allow(dead_code)]
pub fn build_app(store: Arc<Store>, config: AppConfig) -> axum::Router {
    let state = AppState {
        store,
        config,
        metrics_handle: smartflow::metrics::init_metrics(),
    };
    create_router(state)
}

#[allow(dead_code)]
pub fn address(n: u8) -> String {
    format!("0x{:040x}", n)
}

#[allow(dead_code)]
pub fn make_wallet(n: u8, realized_profit: i64, win_rate: i64) -> Wallet {
    Wallet {
        address: address(n),
        label: format!("Wallet{n}"),
        realized_profit: Decimal::from(realized_profit),
        win_rate: Decimal::from(win_rate),
        trades30d: n as u32,
        total_gains: Decimal::from(realized_profit * 2),
        tags: vec!["whale".into()],
        first_seen: Some(fixed_now() - Duration::days(90)),
        last_active: Some(fixed_now() - Duration::hours(n as i64)),
    }
}

#[allow(dead_code)]
pub fn make_flow(wallet: u8, direction: FlowDirection, value: i64, timestamp: DateTime<Utc>) -> Flow {
    Flow {
        wallet: address(wallet),
        token: address(200),
        token_symbol: Some("PEPE".into()),
        amount: Decimal::from(value * 10),
        direction,
        timestamp,
        value: Decimal::from(value),
        tx_hash: None,
    }
}

#[allow(dead_code)]
pub fn make_trade(hash: &str, wallet: u8, amount_in: i64, timestamp: DateTime<Utc>) -> Trade {
    Trade {
        hash: hash.into(),
        from: address(wallet),
        token_in: address(200),
        token_out: address(201),
        token_in_symbol: Some("WETH".into()),
        token_out_symbol: Some("PEPE".into()),
        amount_in: Decimal::from(amount_in),
        amount_out: Decimal::from(amount_in * 1_000),
        dex: "UniswapV3".into(),
        timestamp,
        profit: None,
        block_number: None,
    }
}
