//! Prometheus metrics for cursor-db
//!
//! Query and registry activity, exposed on the HTTP API's `/metrics`
//! endpoint.

use lazy_static::lazy_static;
use prometheus::{Counter, Encoder, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // Query metrics
    // ============================================================================

    /// Total number of table queries executed
    pub static ref QUERIES_TOTAL: Counter = Counter::with_opts(
        Opts::new(
            "cursor_db_queries_total",
            "Total number of table queries executed"
        )
    ).expect("Failed to create QUERIES_TOTAL counter");

    /// Queries that failed at the storage layer
    pub static ref QUERY_ERRORS: Counter = Counter::with_opts(
        Opts::new(
            "cursor_db_query_errors_total",
            "Queries that failed at the storage layer"
        )
    ).expect("Failed to create QUERY_ERRORS counter");

    /// Query latency in seconds, including connection open and close
    pub static ref QUERY_LATENCY: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "cursor_db_query_latency_seconds",
            "Query latency in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0])
    ).expect("Failed to create QUERY_LATENCY histogram");

    /// Rows returned per query
    pub static ref QUERY_ROWS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "cursor_db_query_rows_count",
            "Rows returned per query"
        ).buckets(vec![0.0, 1.0, 10.0, 50.0, 100.0, 500.0])
    ).expect("Failed to create QUERY_ROWS histogram");

    // ============================================================================
    // Registry metrics
    // ============================================================================

    /// Number of registry rebuilds
    pub static ref REGISTRY_REFRESHES: Counter = Counter::with_opts(
        Opts::new(
            "cursor_db_registry_refreshes_total",
            "Number of registry rebuilds"
        )
    ).expect("Failed to create REGISTRY_REFRESHES counter");

    /// Projects in the current registry
    pub static ref REGISTERED_PROJECTS: Gauge = Gauge::with_opts(
        Opts::new(
            "cursor_db_registered_projects",
            "Projects in the current registry"
        )
    ).expect("Failed to create REGISTERED_PROJECTS gauge");
}

/// Register all metrics with the global registry
///
/// Call once at startup; a second call is logged and ignored.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(QUERIES_TOTAL.clone()),
        Box::new(QUERY_ERRORS.clone()),
        Box::new(QUERY_LATENCY.clone()),
        Box::new(QUERY_ROWS.clone()),
        Box::new(REGISTRY_REFRESHES.clone()),
        Box::new(REGISTERED_PROJECTS.clone()),
    ];

    for collector in collectors {
        if let Err(e) = REGISTRY.register(collector) {
            tracing::debug!("Metric already registered: {}", e);
        }
    }
}

/// Gather all metrics and encode them in Prometheus text format
///
/// Returns an empty string if encoding fails.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Metrics contained invalid UTF-8: {}", e);
        String::new()
    })
}
