//! User-facing attribute blocks shared by every resource.
//!
//! Blocks are plain serde structs so resources can be loaded from YAML or
//! JSON documents. Enumerated attributes are strings from fixed vocabularies;
//! they are checked by the section setters before anything is sent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn default_true() -> bool {
    true
}

fn default_status() -> String {
    "active".to_string()
}

fn default_trigger_type() -> String {
    "specific value".to_string()
}

fn default_reminder() -> String {
    "none".to_string()
}

fn default_threshold_interval() -> String {
    "default".to_string()
}

fn default_notification_type() -> String {
    "default contacts".to_string()
}

/// Attributes every test kind has.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TestCommon {
    pub division_id: i64,
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub folder_id: i64,
    pub test_name: String,
    #[serde(default)]
    pub test_description: String,
    #[serde(default = "default_true")]
    pub enable_test_data_webhook: bool,
    #[serde(default)]
    pub alerts_paused: bool,
    /// RFC 3339. Empty means "now" at creation time.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default = "default_status")]
    pub status: String,
}

/// The optional nested blocks a resource may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Labels,
    Thresholds,
    RequestSettings,
    Insights,
    ScheduleSettings,
    AlertSettings,
    AdvancedSettings,
}

impl Block {
    pub const ALL: &'static [Block] = &[
        Block::Labels,
        Block::Thresholds,
        Block::RequestSettings,
        Block::Insights,
        Block::ScheduleSettings,
        Block::AlertSettings,
        Block::AdvancedSettings,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Block::Labels => "label",
            Block::Thresholds => "thresholds",
            Block::RequestSettings => "request_settings",
            Block::Insights => "insights",
            Block::ScheduleSettings => "schedule_settings",
            Block::AlertSettings => "alert_settings",
            Block::AdvancedSettings => "advanced_settings",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SettingBlocks {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label: Vec<LabelBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdsBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_settings: Option<RequestSettingsBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightsBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_settings: Option<ScheduleSettingsBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_settings: Option<AlertSettingsBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_settings: Option<AdvancedSettingsBlock>,
}

impl SettingBlocks {
    pub fn is_present(&self, block: Block) -> bool {
        match block {
            Block::Labels => !self.label.is_empty(),
            Block::Thresholds => self.thresholds.is_some(),
            Block::RequestSettings => self.request_settings.is_some(),
            Block::Insights => self.insights.is_some(),
            Block::ScheduleSettings => self.schedule_settings.is_some(),
            Block::AlertSettings => self.alert_settings.is_some(),
            Block::AdvancedSettings => self.advanced_settings.is_some(),
        }
    }

    /// Whether `block` differs between `self` and `other`.
    pub fn differs(&self, other: &SettingBlocks, block: Block) -> bool {
        match block {
            Block::Labels => self.label != other.label,
            Block::Thresholds => self.thresholds != other.thresholds,
            Block::RequestSettings => self.request_settings != other.request_settings,
            Block::Insights => self.insights != other.insights,
            Block::ScheduleSettings => self.schedule_settings != other.schedule_settings,
            Block::AlertSettings => self.alert_settings != other.alert_settings,
            Block::AdvancedSettings => self.advanced_settings != other.advanced_settings,
        }
    }

    /// Drops every block not in `supported`.
    pub fn retain(&mut self, supported: &[Block]) {
        for block in Block::ALL {
            if supported.contains(block) {
                continue;
            }
            match block {
                Block::Labels => self.label.clear(),
                Block::Thresholds => self.thresholds = None,
                Block::RequestSettings => self.request_settings = None,
                Block::Insights => self.insights = None,
                Block::ScheduleSettings => self.schedule_settings = None,
                Block::AlertSettings => self.alert_settings = None,
                Block::AdvancedSettings => self.advanced_settings = None,
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LabelBlock {
    pub key: String,
    pub values: Vec<String>,
}

/// Apdex thresholds for test time and availability.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ThresholdsBlock {
    #[serde(default)]
    pub test_time_warning: f64,
    #[serde(default)]
    pub test_time_critical: f64,
    #[serde(default)]
    pub availability_warning: f64,
    #[serde(default)]
    pub availability_critical: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AuthenticationBlock {
    /// basic, digest, ntlm or login
    pub authentication_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub password_ids: Vec<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct HeaderValueBlock {
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub child_host_pattern: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RequestSettingsBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<AuthenticationBlock>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub token_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub library_certificate_ids: Vec<i64>,
    /// Keyed by header name (`user_agent`, `accept`, `request_override`, ...).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub http_request_headers: IndexMap<String, HeaderValueBlock>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct InsightsBlock {
    #[serde(default)]
    pub tracepoint_ids: Vec<i64>,
    #[serde(default)]
    pub indicator_ids: Vec<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ScheduleSettingsBlock {
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub run_schedule_id: i64,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub maintenance_schedule_id: i64,
    pub frequency: String,
    pub node_distribution: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_group_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub no_of_subset_nodes: i32,
}

/// Recipients of a single alert rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RuleNotificationBlock {
    #[serde(default)]
    pub notify_on_warning: bool,
    #[serde(default)]
    pub notify_on_critical: bool,
    #[serde(default)]
    pub notify_on_improved: bool,
    #[serde(default)]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipient_email_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_groups: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlertRuleBlock {
    pub node_threshold_type: String,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub threshold_number_of_runs: i32,
    #[serde(default)]
    pub threshold_percentage_of_runs: f64,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub number_of_failing_nodes: i32,
    #[serde(default = "default_trigger_type")]
    pub trigger_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub statistical_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub historical_interval: String,
    #[serde(default)]
    pub warning_trigger: f64,
    #[serde(default)]
    pub critical_trigger: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub enable_consecutive: bool,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub consecutive_number_of_runs: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expression: String,
    #[serde(default = "default_reminder")]
    pub warning_reminder: String,
    #[serde(default = "default_reminder")]
    pub critical_reminder: String,
    #[serde(default = "default_threshold_interval")]
    pub threshold_interval: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_rolling_window: bool,
    #[serde(default = "default_notification_type")]
    pub notification_type: String,
    pub alert_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alert_sub_type: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub enforce_test_failure: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub omit_scatterplot: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_group: Vec<RuleNotificationBlock>,
}

impl Default for AlertRuleBlock {
    fn default() -> Self {
        AlertRuleBlock {
            node_threshold_type: String::new(),
            threshold_number_of_runs: 0,
            threshold_percentage_of_runs: 0.0,
            number_of_failing_nodes: 0,
            trigger_type: default_trigger_type(),
            operation_type: String::new(),
            statistical_type: String::new(),
            historical_interval: String::new(),
            warning_trigger: 0.0,
            critical_trigger: 0.0,
            enable_consecutive: false,
            consecutive_number_of_runs: 0,
            expression: String::new(),
            warning_reminder: default_reminder(),
            critical_reminder: default_reminder(),
            threshold_interval: default_threshold_interval(),
            use_rolling_window: false,
            notification_type: default_notification_type(),
            alert_type: String::new(),
            alert_sub_type: String::new(),
            enforce_test_failure: false,
            omit_scatterplot: false,
            notification_group: Vec::new(),
        }
    }
}

/// Test-level recipients, notified for every rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AlertNotificationBlock {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alert_webhook_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipient_email_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_groups: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AlertSettingsBlock {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alert_rule: Vec<AlertRuleBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_group: Option<AlertNotificationBlock>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AdvancedSettingsBlock {
    /// Flag names such as `verify_test_on_failure` or `enable_http2`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_test_flags: Vec<String>,
    /// Seconds after which a still running test fails.
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub enforce_test_failure_if_runs_longer_than: i32,
    /// Milliseconds without network activity after document complete. Only
    /// sent with the `stop_test_on_document_complete` flag.
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub wait_for_no_activity: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub viewport_height: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub viewport_width: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub additional_monitor: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bandwidth_throttling: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub edns_subnet: String,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub ping_count: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub failure_hop_count: i32,
}

impl AdvancedSettingsBlock {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.applied_test_flags.iter().any(|applied| applied == flag)
    }
}
