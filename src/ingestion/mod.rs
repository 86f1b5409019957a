pub mod pipeline;
pub mod snapshot;

pub use pipeline::{accept_batch, validate_records, IngestBatch, IngestSummary, Rejected};
pub use snapshot::{load_snapshot, Snapshot, SnapshotSummary};

use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("upstream reported failure: {0}")]
    Upstream(String),

    #[error("envelope marked successful but carries an error: {0}")]
    InconsistentEnvelope(String),

    #[error("invalid pagination summary: {0}")]
    Pagination(ValidationError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
