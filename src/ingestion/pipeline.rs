use metrics::counter;
use serde::Serialize;
use std::fmt::Display;

use crate::models::{ApiResponse, EnvelopeError};
use crate::validation::{Validate, ValidationError};

use super::IngestError;

/// Records that passed validation plus a count of those that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestBatch<T> {
    pub accepted: Vec<T>,
    pub rejected: Vec<Rejected>,
}

/// A record dropped at the ingestion edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejected {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct IngestSummary {
    pub accepted: usize,
    pub rejected: usize,
}

impl<T> IngestBatch<T> {
    pub fn summary(&self) -> IngestSummary {
        IngestSummary {
            accepted: self.accepted.len(),
            rejected: self.rejected.len(),
        }
    }
}

/// Unwrap an upstream listing envelope and validate every record in it.
///
/// The whole batch is refused when the envelope reports failure, contradicts itself,
/// or carries a pagination summary that does not add up. Individual records that
/// fail validation are dropped and reported in `rejected`.
pub fn accept_batch<T>(
    kind: &'static str,
    envelope: ApiResponse<Vec<T>>,
) -> Result<IngestBatch<T>, IngestError>
where
    T: Validate + Display,
{
    let (records, pagination) = envelope.into_result().map_err(|e| match e {
        EnvelopeError::Failed(msg) => IngestError::Upstream(msg),
        EnvelopeError::Inconsistent(msg) => IngestError::InconsistentEnvelope(msg),
    })?;

    if let Some(pagination) = pagination {
        pagination.validate().map_err(IngestError::Pagination)?;
    }

    Ok(validate_records(kind, records))
}

/// Partition `records` into valid and rejected.
pub fn validate_records<T>(kind: &'static str, records: Vec<T>) -> IngestBatch<T>
where
    T: Validate + Display,
{
    let mut accepted = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match record.validate() {
            Ok(()) => accepted.push(record),
            Err(e) => {
                log_rejection(kind, index, &record, &e);
                rejected.push(Rejected {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    counter!("ingest_records_total", "kind" => kind).increment(accepted.len() as u64);
    counter!("ingest_rejected_total", "kind" => kind).increment(rejected.len() as u64);

    tracing::info!(
        kind,
        accepted = accepted.len(),
        rejected = rejected.len(),
        "Ingested batch"
    );

    IngestBatch { accepted, rejected }
}

fn log_rejection<T: Display>(kind: &str, index: usize, record: &T, error: &ValidationError) {
    tracing::warn!(
        kind,
        index,
        error = %error,
        record = %record,
        "Record rejected at ingestion"
    );
}
