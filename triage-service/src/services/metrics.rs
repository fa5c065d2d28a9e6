use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Later calls, including concurrent
/// ones, are no-ops.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        if let Err(e) = metrics::set_global_recorder(recorder) {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
        }
        handle
    });
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count one completed triage by outcome and advice source.
pub fn record_assessment(severity: &str, source: &str) {
    metrics::counter!(
        "triage_assessments_total",
        "severity" => severity.to_string(),
        "source" => source.to_string()
    )
    .increment(1);
}

/// Count a failed model call that fell back to keyword triage.
pub fn record_model_failure(reason: &str) {
    metrics::counter!("triage_model_failures_total", "reason" => reason.to_string()).increment(1);
}
