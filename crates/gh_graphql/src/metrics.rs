use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gh_graphql_requests_total",
        "GraphQL requests issued per operation grouped by outcome",
        &["operation", "outcome"]
    )
    .expect("graphql requests metric")
});

pub static REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "gh_graphql_request_duration_seconds",
        "Round-trip latency of GraphQL requests per operation",
        &["operation"],
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]
    )
    .expect("graphql latency metric")
});

pub(crate) fn record(operation: &str, outcome: &str, elapsed_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(elapsed_secs);
}
