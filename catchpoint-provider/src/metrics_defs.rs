//! Metrics definitions for resource operations.

use shared::metrics_defs::{MetricDef, MetricType};

pub const RESOURCE_OPERATIONS: MetricDef = MetricDef {
    name: "catchpoint.resource.operations",
    metric_type: MetricType::Counter,
    description: "Resource operations, tagged by resource type and operation",
};

pub const VALIDATION_FAILURES: MetricDef = MetricDef {
    name: "catchpoint.resource.validation_failures",
    metric_type: MetricType::Counter,
    description: "Resources rejected before any request was sent",
};

pub const ALL_METRICS: &[MetricDef] = &[RESOURCE_OPERATIONS, VALIDATION_FAILURES];
