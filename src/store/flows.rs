use chrono::{DateTime, Utc};

use crate::models::Flow;

use super::{
    in_range, key, paginate, record_gauges, resolve_sort_key, FlowKey, ListQuery, Page, QueryError,
    Store,
};

pub const FLOW_SORT_KEYS: [&str; 3] = ["timestamp", "value", "amount"];

fn event_key(flow: &Flow) -> Option<FlowKey> {
    flow.tx_hash
        .as_deref()
        .map(|hash| (key(hash), key(&flow.wallet), key(&flow.token), flow.direction))
}

impl Store {
    /// Append flows. A flow carrying the same tx hash, wallet, token and direction
    /// as a stored one replaces it.
    pub async fn insert_flows(&self, flows: Vec<Flow>) -> usize {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let count = flows.len();
        for flow in flows {
            let Some(event) = event_key(&flow) else {
                inner.flows.push(flow);
                continue;
            };
            match inner.flow_index.get(&event).copied() {
                Some(idx) => inner.flows[idx] = flow,
                None => {
                    inner.flow_index.insert(event, inner.flows.len());
                    inner.flows.push(flow);
                }
            }
        }
        record_gauges(inner);
        count
    }

    pub async fn list_flows(
        &self,
        query: &ListQuery,
        wallet: Option<&str>,
    ) -> Result<Page<Flow>, QueryError> {
        self.list_flows_at(query, wallet, Utc::now()).await
    }

    /// Same as [`Store::list_flows`] with the time window anchored at `now`.
    pub async fn list_flows_at(
        &self,
        query: &ListQuery,
        wallet: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Page<Flow>, QueryError> {
        let sort_key = resolve_sort_key(query.sort.as_deref(), &FLOW_SORT_KEYS)?;
        let wallet = wallet.map(key);

        let mut flows: Vec<Flow> = {
            let inner = self.inner.read().await;
            inner
                .flows
                .iter()
                .filter(|f| wallet.as_deref().map_or(true, |w| key(&f.wallet) == w))
                .filter(|f| in_range(query.range, f.timestamp, now))
                .cloned()
                .collect()
        };

        let direction = query.direction;
        flows.sort_by(|a, b| {
            let primary = match sort_key {
                "value" => direction.apply(a.value.cmp(&b.value)),
                "amount" => direction.apply(a.amount.cmp(&b.amount)),
                _ => direction.apply(a.timestamp.cmp(&b.timestamp)),
            };
            primary.then_with(|| b.timestamp.cmp(&a.timestamp))
        });

        Ok(paginate(flows, query.pagination))
    }
}
