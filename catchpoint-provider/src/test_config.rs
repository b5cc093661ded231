//! Flat, per-operation aggregate of everything a test document needs.
//!
//! A [`TestConfig`] is filled from a resource by the section setters, turned
//! into a wire document by the builder and then dropped. Only the fields the
//! resource's test type uses are populated; the rest keep their zero values.

use catchpoint_api::IdName;
use catchpoint_api::enums::{SETTING_TYPES, TestType};

/// Whether a section overrides the parent configuration or inherits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingType {
    #[default]
    Inherit,
    Override,
}

impl SettingType {
    pub const fn id(self) -> i32 {
        match self {
            SettingType::Inherit => 0,
            SettingType::Override => 1,
        }
    }

    pub fn id_name(self) -> IdName {
        SETTING_TYPES
            .pair_for_id(self.id())
            .unwrap_or_else(|| IdName::new(self.id(), ""))
    }

    pub fn from_id(id: i32) -> Self {
        if id == SettingType::Override.id() {
            SettingType::Override
        } else {
            SettingType::Inherit
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelConfig {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdConfig {
    pub test_time_warning: f64,
    pub test_time_critical: f64,
    pub availability_warning: f64,
    pub availability_critical: f64,
}

/// The script carried by api, transaction and scripted browser tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptConfig {
    pub test_id: i64,
    pub request_data: String,
    pub transaction_script_type: IdName,
    pub monitor: IdName,
    pub test_type: IdName,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderConfig {
    pub header_type: IdName,
    pub value: String,
    pub child_host_pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub setting_type: SettingType,
    /// Id 0 means no authentication.
    pub authentication_type: IdName,
    pub password_ids: Vec<i64>,
    pub token_ids: Vec<i64>,
    pub certificate_ids: Vec<i64>,
    pub headers: Vec<HeaderConfig>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightConfig {
    pub setting_type: SettingType,
    pub tracepoint_ids: Vec<i32>,
    pub indicator_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleConfig {
    pub setting_type: SettingType,
    pub run_schedule_id: i64,
    pub maintenance_schedule_id: i64,
    pub frequency: IdName,
    pub node_distribution: IdName,
    pub node_ids: Vec<i64>,
    pub node_group_ids: Vec<i64>,
    pub no_of_subset_nodes: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipientsConfig {
    pub subject: String,
    pub notify_on_warning: bool,
    pub notify_on_critical: bool,
    pub notify_on_improved: bool,
    pub emails: Vec<String>,
    pub contact_groups: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertRuleConfig {
    pub node_threshold_type: IdName,
    pub threshold_number_of_runs: i32,
    pub threshold_percentage_of_runs: f64,
    pub number_of_failing_nodes: i32,
    pub enable_consecutive: bool,
    pub consecutive_number_of_runs: i32,
    pub trigger_type: IdName,
    pub operation_type: IdName,
    /// Both are only set for trailing value triggers.
    pub statistical_type: IdName,
    pub historical_interval: IdName,
    pub warning_trigger: f64,
    pub critical_trigger: f64,
    pub expression: String,
    pub warning_reminder: IdName,
    pub critical_reminder: IdName,
    pub threshold_interval: IdName,
    pub use_rolling_window: bool,
    pub notification_type: IdName,
    pub alert_type: IdName,
    /// Left empty for test failure and host failure alerts.
    pub alert_sub_type: IdName,
    pub enforce_test_failure: bool,
    pub omit_scatterplot: bool,
    pub notification_groups: Vec<RecipientsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertConfig {
    pub setting_type: SettingType,
    pub rules: Vec<AlertRuleConfig>,
    pub webhook_ids: Vec<i64>,
    pub emails: Vec<String>,
    pub contact_groups: Vec<String>,
    pub subject: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedConfig {
    pub setting_type: SettingType,
    pub applied_test_flags: Vec<i32>,
    pub max_step_runtime_sec_override: i32,
    /// Present only when the test stops on document complete.
    pub wait_for_no_activity: Option<i32>,
    pub viewport_height: i32,
    pub viewport_width: i32,
    pub failure_hop_count: i32,
    pub ping_count: i32,
    pub edns_subnet: String,
    pub additional_monitor: IdName,
    pub bandwidth_throttling: IdName,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestConfig {
    pub test_type: TestType,
    pub monitor: IdName,
    pub simulate_device: IdName,
    pub chrome_version: IdName,
    pub chrome_application_version: IdName,
    pub division_id: i64,
    pub product_id: i64,
    pub folder_id: i64,
    pub test_name: String,
    pub test_description: String,
    pub test_url: String,
    pub gateway_address_or_host: String,
    pub dns_server: String,
    pub dns_query_type: IdName,
    pub enable_test_data_webhook: bool,
    pub alerts_paused: bool,
    pub enforce_certificate_pinning: bool,
    pub enforce_certificate_key_pinning: bool,
    pub start_time: String,
    pub end_time: String,
    pub status: IdName,
    pub script: ScriptConfig,
    pub labels: Vec<LabelConfig>,
    pub thresholds: ThresholdConfig,
    pub request: RequestConfig,
    pub insights: InsightConfig,
    pub schedule: ScheduleConfig,
    pub alert: AlertConfig,
    pub advanced: AdvancedConfig,
}

impl TestConfig {
    pub fn new(test_type: TestType) -> Self {
        TestConfig {
            test_type,
            ..Default::default()
        }
    }
}
