use chrono::{DateTime, Utc};

use crate::models::Trade;

use super::{
    cmp_optional, in_range, key, paginate, record_gauges, resolve_sort_key, ListQuery, Page,
    QueryError, Store,
};

pub const TRADE_SORT_KEYS: [&str; 4] = ["timestamp", "amountIn", "profit", "blockNumber"];

impl Store {
    /// Insert trades, replacing any existing trade with the same hash.
    pub async fn upsert_trades(&self, trades: Vec<Trade>) -> usize {
        let mut inner = self.inner.write().await;
        let count = trades.len();
        for trade in trades {
            inner.trades.insert(key(&trade.hash), trade);
        }
        record_gauges(&inner);
        count
    }

    pub async fn get_trade(&self, hash: &str) -> Option<Trade> {
        self.inner.read().await.trades.get(&key(hash)).cloned()
    }

    pub async fn list_trades(
        &self,
        query: &ListQuery,
        wallet: Option<&str>,
    ) -> Result<Page<Trade>, QueryError> {
        self.list_trades_at(query, wallet, Utc::now()).await
    }

    pub async fn list_trades_at(
        &self,
        query: &ListQuery,
        wallet: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Page<Trade>, QueryError> {
        let sort_key = resolve_sort_key(query.sort.as_deref(), &TRADE_SORT_KEYS)?;
        let wallet = wallet.map(key);

        let mut trades: Vec<Trade> = {
            let inner = self.inner.read().await;
            inner
                .trades
                .values()
                .filter(|t| wallet.as_deref().map_or(true, |w| key(&t.from) == w))
                .filter(|t| in_range(query.range, t.timestamp, now))
                .cloned()
                .collect()
        };

        let direction = query.direction;
        trades.sort_by(|a, b| {
            let primary = match sort_key {
                "amountIn" => direction.apply(a.amount_in.cmp(&b.amount_in)),
                "profit" => cmp_optional(a.profit, b.profit, direction),
                "blockNumber" => cmp_optional(a.block_number, b.block_number, direction),
                _ => direction.apply(a.timestamp.cmp(&b.timestamp)),
            };
            primary.then_with(|| a.hash.cmp(&b.hash))
        });

        Ok(paginate(trades, query.pagination))
    }
}
