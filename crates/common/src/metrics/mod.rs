//! Metrics and observability utilities
//!
//! Prometheus-style metrics with standardized naming conventions.
//! Recording is a no-op until a recorder (e.g. the Prometheus exporter)
//! is installed by the binary.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Data Insights Hub metrics
pub const METRICS_PREFIX: &str = "datahub";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.0005, // 0.5ms
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    describe_counter!(
        format!("{}_catalog_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of catalog queries"
    );

    describe_histogram!(
        format!("{}_catalog_query_results", METRICS_PREFIX),
        Unit::Count,
        "Number of projects returned per catalog query"
    );

    describe_counter!(
        format!("{}_page_views_total", METRICS_PREFIX),
        Unit::Count,
        "Total rendered pages"
    );

    describe_counter!(
        format!("{}_project_not_found_total", METRICS_PREFIX),
        Unit::Count,
        "Lookups of unknown project ids"
    );

    describe_counter!(
        format!("{}_thumbnail_jobs_total", METRICS_PREFIX),
        Unit::Count,
        "Thumbnail capture and optimize attempts"
    );

    describe_counter!(
        format!("{}_thumbnail_bytes_saved_total", METRICS_PREFIX),
        Unit::Bytes,
        "Bytes saved by thumbnail optimization"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record catalog query metrics
pub fn record_query(kind: &str, result_count: usize) {
    counter!(
        format!("{}_catalog_queries_total", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_catalog_query_results", METRICS_PREFIX),
        "kind" => kind.to_string()
    )
    .record(result_count as f64);
}

/// Helper to record a rendered page
pub fn record_page_view(page: &str) {
    counter!(
        format!("{}_page_views_total", METRICS_PREFIX),
        "page" => page.to_string()
    )
    .increment(1);
}

pub fn record_not_found() {
    counter!(format!("{}_project_not_found_total", METRICS_PREFIX)).increment(1);
}

/// Helper to record one thumbnail job outcome
pub fn record_thumbnail(stage: &str, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_thumbnail_jobs_total", METRICS_PREFIX),
        "stage" => stage.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_bytes_saved(bytes: u64) {
    counter!(format!("{}_thumbnail_bytes_saved_total", METRICS_PREFIX)).increment(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets_sorted() {
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_recording_without_recorder() {
        let metrics = RequestMetrics::start("GET", "/");
        metrics.finish(200);
        record_query("search", 3);
        record_page_view("catalog");
        record_not_found();
        record_thumbnail("capture", false);
        record_bytes_saved(1024);
    }
}
