use std::sync::OnceLock;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder once per process and register the
/// application metrics. Later calls return the same handle.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if metrics::set_global_recorder(recorder).is_err() {
                tracing::warn!("A global metrics recorder was already installed");
            }

            // Pre-register so they appear before the first ingest.
            for kind in ["wallets", "flows", "trades"] {
                counter!("ingest_records_total", "kind" => kind).absolute(0);
                counter!("ingest_rejected_total", "kind" => kind).absolute(0);
            }
            gauge!("tracked_wallets").set(0.0);
            gauge!("stored_flows").set(0.0);
            gauge!("stored_trades").set(0.0);

            handle
        })
        .clone()
}
