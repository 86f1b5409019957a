pub mod flows;
pub mod trades;
pub mod wallets;

use chrono::{DateTime, Utc};
use metrics::gauge;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::ingestion::Snapshot;
use crate::models::{
    Flow, FlowDirection, Pagination, PaginationParams, SortDirection, TimeRange, Trade, Wallet,
};

/// Listing query shared by every collection endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub pagination: PaginationParams,
    pub range: Option<TimeRange>,
    pub sort: Option<String>,
    pub direction: SortDirection,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown sort key '{key}' (expected one of: {allowed})")]
    UnknownSortKey { key: String, allowed: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub wallets: usize,
    pub flows: usize,
    pub trades: usize,
}

/// Headline figures for the dashboard over one time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub range: TimeRange,
    pub tracked_wallets: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_realized_profit: Decimal,
    /// Mean win rate across tracked wallets, 0 when none are tracked.
    #[serde(with = "rust_decimal::serde::float")]
    pub average_win_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub inflow_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub outflow_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_flow_value: Decimal,
    pub trade_count: usize,
}

/// Lowercased (tx hash, wallet, token) plus direction of a flow that carries a tx hash.
type FlowKey = (String, String, String, FlowDirection);

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by lowercased address.
    wallets: HashMap<String, Wallet>,
    flows: Vec<Flow>,
    /// Position in `flows` of every flow that has a tx hash.
    flow_index: HashMap<FlowKey, usize>,
    /// Keyed by lowercased hash.
    trades: HashMap<String, Trade>,
}

/// In-memory holder of validated dashboard data.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<Inner>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn apply_snapshot(&self, snapshot: Snapshot) {
        self.upsert_wallets(snapshot.wallets).await;
        self.insert_flows(snapshot.flows).await;
        self.upsert_trades(snapshot.trades).await;
    }

    pub async fn summary_at(&self, range: TimeRange, now: DateTime<Utc>) -> DashboardSummary {
        let inner = self.inner.read().await;

        let tracked_wallets = inner.wallets.len();
        let total_realized_profit = inner
            .wallets
            .values()
            .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.realized_profit));
        let average_win_rate = if tracked_wallets == 0 {
            Decimal::ZERO
        } else {
            let sum = inner
                .wallets
                .values()
                .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.win_rate));
            (sum / Decimal::from(tracked_wallets)).round_dp(2)
        };

        // Sums saturate at Decimal::MAX; ingested magnitudes are unbounded.
        let (mut inflow_value, mut outflow_value, mut net_flow_value) =
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        for flow in inner.flows.iter().filter(|f| range.contains(f.timestamp, now)) {
            match flow.direction {
                FlowDirection::In => inflow_value = inflow_value.saturating_add(flow.value),
                FlowDirection::Out => outflow_value = outflow_value.saturating_add(flow.value),
            }
            net_flow_value = net_flow_value.saturating_add(flow.signed_value());
        }

        let trade_count = inner
            .trades
            .values()
            .filter(|t| range.contains(t.timestamp, now))
            .count();

        DashboardSummary {
            range,
            tracked_wallets,
            total_realized_profit,
            average_win_rate,
            inflow_value,
            outflow_value,
            net_flow_value,
            trade_count,
        }
    }

    pub async fn counts(&self) -> StoreCounts {
        let inner = self.inner.read().await;
        StoreCounts {
            wallets: inner.wallets.len(),
            flows: inner.flows.len(),
            trades: inner.trades.len(),
        }
    }
}

pub(crate) fn key(address: &str) -> String {
    address.to_ascii_lowercase()
}

fn record_gauges(inner: &Inner) {
    gauge!("tracked_wallets").set(inner.wallets.len() as f64);
    gauge!("stored_flows").set(inner.flows.len() as f64);
    gauge!("stored_trades").set(inner.trades.len() as f64);
}

/// Slice one page out of an already-sorted list.
///
/// A page past the end is empty but still reports the full total.
pub fn paginate<T>(items: Vec<T>, params: PaginationParams) -> Page<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(params.offset())
        .take(params.limit as usize)
        .collect();

    Page {
        items,
        pagination: Pagination::new(params, total),
    }
}

/// Resolve a requested sort key against the keys a collection supports.
/// The first allowed key is the default.
fn resolve_sort_key<'a>(requested: Option<&str>, allowed: &[&'a str]) -> Result<&'a str, QueryError> {
    match requested {
        None => Ok(allowed[0]),
        Some(key) => allowed
            .iter()
            .find(|k| k.eq_ignore_ascii_case(key))
            .copied()
            .ok_or_else(|| QueryError::UnknownSortKey {
                key: key.to_string(),
                allowed: allowed.join(", "),
            }),
    }
}

fn in_range(range: Option<TimeRange>, ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    range.map_or(true, |r| r.contains(ts, now))
}

/// Order `None` after every `Some` regardless of direction.
fn cmp_optional<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
