//! Prometheus metrics collection for the allowgate server

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};

/// Initialize all metric descriptions
pub fn init_metrics() {
    describe_counter!(
        "allowgate_checks_total",
        "Total number of CheckAuthorization calls by result"
    );
    describe_counter!(
        "allowgate_rejected_messages_total",
        "Total number of requests rejected before reaching the authorizer"
    );
    describe_histogram!(
        "allowgate_check_latency_seconds",
        "CheckAuthorization handling latency in seconds"
    );
    describe_gauge!(
        "allowgate_allow_list_entries",
        "Number of usernames in the loaded allow-list"
    );
}

/// Record a completed authorization check
pub fn record_check(authorized: bool, latency_seconds: f64) {
    let result = if authorized { "authorized" } else { "unauthorized" };
    counter!("allowgate_checks_total", 1, "result" => result);
    histogram!("allowgate_check_latency_seconds", latency_seconds);
}

/// Record a message that never reached the authorizer
pub fn record_rejected_message(kind: &'static str) {
    counter!("allowgate_rejected_messages_total", 1, "kind" => kind);
}

/// Publish the allow-list size
pub fn set_allow_list_entries(count: usize) {
    gauge!("allowgate_allow_list_entries", count as f64);
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
    std::sync::OnceLock::new();

/// Install the Prometheus recorder as the global metrics recorder
pub fn init_prometheus() -> anyhow::Result<()> {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Prometheus handle already set"))?;
    Ok(())
}

/// Render metrics in the Prometheus text format
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
