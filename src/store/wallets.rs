use crate::models::Wallet;

use super::{
    cmp_optional, key, paginate, record_gauges, resolve_sort_key, ListQuery, Page, QueryError,
    Store,
};

pub const WALLET_SORT_KEYS: [&str; 5] = [
    "realizedProfit",
    "winRate",
    "trades30d",
    "totalGains",
    "lastActive",
];

impl Store {
    /// Insert wallets, replacing any existing record with the same address.
    pub async fn upsert_wallets(&self, wallets: Vec<Wallet>) -> usize {
        let mut inner = self.inner.write().await;
        let count = wallets.len();
        for wallet in wallets {
            inner.wallets.insert(key(&wallet.address), wallet);
        }
        record_gauges(&inner);
        count
    }

    /// Fetch a wallet by address, ignoring hex case.
    pub async fn get_wallet(&self, address: &str) -> Option<Wallet> {
        self.inner.read().await.wallets.get(&key(address)).cloned()
    }

    pub async fn list_wallets(
        &self,
        query: &ListQuery,
        tag: Option<&str>,
    ) -> Result<Page<Wallet>, QueryError> {
        let sort_key = resolve_sort_key(query.sort.as_deref(), &WALLET_SORT_KEYS)?;

        let mut wallets: Vec<Wallet> = {
            let inner = self.inner.read().await;
            inner
                .wallets
                .values()
                .filter(|w| tag.map_or(true, |t| w.has_tag(t)))
                .cloned()
                .collect()
        };

        let direction = query.direction;
        wallets.sort_by(|a, b| {
            let primary = match sort_key {
                "winRate" => direction.apply(a.win_rate.cmp(&b.win_rate)),
                "trades30d" => direction.apply(a.trades30d.cmp(&b.trades30d)),
                "totalGains" => direction.apply(a.total_gains.cmp(&b.total_gains)),
                "lastActive" => cmp_optional(a.last_active, b.last_active, direction),
                _ => direction.apply(a.realized_profit.cmp(&b.realized_profit)),
            };
            // stable output for equal keys
            primary.then_with(|| a.address.cmp(&b.address))
        });

        Ok(paginate(wallets, query.pagination))
    }
}
