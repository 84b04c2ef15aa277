use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter_vec, Histogram, IntCounterVec};

pub static ORG_OUTCOMES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "collector_org_outcomes_total",
        "Organizations visited during collection grouped by outcome",
        &["outcome"]
    )
    .expect("collector org outcomes")
});

pub static REPO_OUTCOMES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "collector_repo_outcomes_total",
        "Organization repositories visited during collection grouped by outcome",
        &["outcome"]
    )
    .expect("collector repo outcomes")
});

pub static AGGREGATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "collector_aggregations_total",
        "Yearly stats aggregations grouped by outcome",
        &["outcome"]
    )
    .expect("collector aggregations total")
});

pub static AGGREGATION_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "collector_aggregation_duration_seconds",
        "Duration of a full yearly stats aggregation in seconds",
        vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]
    )
    .expect("collector aggregation duration histogram")
});
