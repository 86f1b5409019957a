use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{Flow, Trade, Wallet};

use super::pipeline::{validate_records, IngestSummary};
use super::IngestError;

/// A point-in-time export from the indexer, used to seed the store on boot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub flows: Vec<Flow>,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub wallets: IngestSummary,
    pub flows: IngestSummary,
    pub trades: IngestSummary,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> Result<Self, IngestError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Drop every record that fails validation.
    pub fn validated(self) -> (Self, SnapshotSummary) {
        let wallets = validate_records("wallets", self.wallets);
        let flows = validate_records("flows", self.flows);
        let trades = validate_records("trades", self.trades);

        let summary = SnapshotSummary {
            wallets: wallets.summary(),
            flows: flows.summary(),
            trades: trades.summary(),
        };

        let snapshot = Snapshot {
            wallets: wallets.accepted,
            flows: flows.accepted,
            trades: trades.accepted,
        };

        (snapshot, summary)
    }
}

/// Read and validate a snapshot file.
pub async fn load_snapshot(path: impl AsRef<Path>) -> Result<(Snapshot, SnapshotSummary), IngestError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let snapshot = Snapshot::from_json(&raw)?;
    tracing::info!(
        path = %path.display(),
        wallets = snapshot.wallets.len(),
        flows = snapshot.flows.len(),
        trades = snapshot.trades.len(),
        "Snapshot read"
    );

    Ok(snapshot.validated())
}
