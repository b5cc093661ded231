//! Metrics definitions for the tests API client.

use shared::metrics_defs::{MetricDef, MetricType};

pub const API_REQUESTS: MetricDef = MetricDef {
    name: "catchpoint.api.requests",
    metric_type: MetricType::Counter,
    description: "Requests sent to the tests API, tagged by operation and outcome",
};

pub const API_REQUEST_DURATION: MetricDef = MetricDef {
    name: "catchpoint.api.request.duration",
    metric_type: MetricType::Histogram,
    description: "Round trip time of a tests API request in seconds",
};

pub const API_PATCH_OPERATIONS: MetricDef = MetricDef {
    name: "catchpoint.api.patch.operations",
    metric_type: MetricType::Histogram,
    description: "Number of JSON-Patch operations sent per update",
};

pub const ALL_METRICS: &[MetricDef] = &[API_REQUESTS, API_REQUEST_DURATION, API_PATCH_OPERATIONS];
