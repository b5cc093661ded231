//! Wire model of the Catchpoint v2 tests API.
//!
//! Field names follow the API's camelCase JSON exactly. Fields the API treats
//! as optional are skipped on serialization when they hold their zero value,
//! and every string, list and nested object tolerates an explicit `null` on
//! the way in.
//!
//! A trimmed test document as returned by `GET /api/v2/tests/{id}`:
//!
//! ```json
//! {
//!   "id": 1234,
//!   "divisionId": 1000,
//!   "productId": 5000,
//!   "name": "homepage",
//!   "url": "https://example.com",
//!   "status": { "id": 0, "name": "Active" },
//!   "monitor": { "id": 18, "name": "Chrome" },
//!   "testType": { "id": 0, "name": "Web" },
//!   "scheduleSettings": {
//!     "scheduleSettingType": { "id": 1, "name": "Override" },
//!     "frequency": { "id": 2, "name": "5 minutes" },
//!     "nodes": [{ "id": 101, "name": "New York - Level3", "networkType": { "id": 0, "name": "Backbone" } }]
//!   }
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};

pub type TestId = i64;

/// Deserializes `null` as the type's default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

fn is_zero_i64(value: &i64) -> bool {
    *value == 0
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

/// The API reports newly created ids either as a JSON number or a string.
pub fn deserialize_test_id<'de, D>(deserializer: D) -> Result<TestId, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(id) => Ok(id),
        NumberOrString::String(id) => id.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// An enumerated value as the API encodes it: the integer code plus a
/// display name. Both are always serialized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct IdName {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

impl IdName {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        IdName {
            id,
            name: name.into(),
        }
    }
}

/// Same shape as [`IdName`], but a zero id or empty name is left out of the
/// JSON entirely.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionalIdName {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub id: i32,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl OptionalIdName {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        OptionalIdName {
            id,
            name: name.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0 && self.name.is_empty()
    }
}

impl From<IdName> for OptionalIdName {
    fn from(value: IdName) -> Self {
        OptionalIdName {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Label {
    #[serde(default, deserialize_with = "nullable")]
    pub color: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub values: Vec<String>,
}

/// Apdex thresholds, sent as `thresholdRestModel`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_f64")]
    pub test_time_apdex_threshold_warning: f64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_f64")]
    pub test_time_apdex_threshold_critical: f64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_f64")]
    pub availability_apdex_threshold_warning: f64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_f64")]
    pub availability_apdex_threshold_critical: f64,
}

impl Thresholds {
    pub fn is_empty(&self) -> bool {
        *self == Thresholds::default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "OptionalIdName::is_empty")]
    pub authentication_method_type: OptionalIdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "OptionalIdName::is_empty")]
    pub password_status: OptionalIdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub password_ids: Vec<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HttpHeaderRequest {
    #[serde(default, deserialize_with = "nullable")]
    pub request_value: String,
    #[serde(default, deserialize_with = "nullable")]
    pub request_header_type: IdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub child_host_pattern: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestSetting {
    #[serde(default, deserialize_with = "nullable")]
    pub request_setting_type: IdName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub library_certificate_ids: Vec<i64>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub token_ids: Vec<i64>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub http_header_requests: Vec<HttpHeaderRequest>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeThreshold {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub node_threshold_type: IdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub number_of_units: i32,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_f64")]
    pub percentage_of_units: f64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub number_of_failing_units: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub consecutive_runs_enabled: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub utilize_per_node_historical_average: bool,
    #[serde(
        rename = "consecutiveRuns",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "is_zero_i32"
    )]
    pub number_of_consecutive_runs: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub warning_reminder_frequency: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub critical_reminder_frequency: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub trigger_type: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub operation_type: IdName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistical_type: Option<OptionalIdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_interval: Option<OptionalIdName>,
    #[serde(default, deserialize_with = "nullable")]
    pub threshold_interval: IdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_f64")]
    pub warning_trigger: f64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_f64")]
    pub critical_trigger: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub use_interval_rolling_window: bool,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub expression: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AlertWebhook {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i64")]
    pub id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub recipient_type: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotificationGroup {
    #[serde(default, deserialize_with = "nullable")]
    pub subject: String,
    #[serde(default, deserialize_with = "nullable")]
    pub notify_on_warning: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub notify_on_critical: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub notify_on_improved: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub alert_webhooks: Vec<AlertWebhook>,
    #[serde(default, deserialize_with = "nullable")]
    pub recipients: Vec<Recipient>,
}

/// A single alert rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertGroupItem {
    #[serde(default, deserialize_with = "nullable")]
    pub node_threshold: NodeThreshold,
    #[serde(default, deserialize_with = "nullable")]
    pub trigger: Trigger,
    #[serde(default, deserialize_with = "nullable")]
    pub notification_type: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub alert_type: IdName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_sub_type: Option<OptionalIdName>,
    #[serde(default, deserialize_with = "nullable")]
    pub enforce_test_failure: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub omit_scatterplot: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub match_all_records: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub notification_groups: Vec<NotificationGroup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertGroup {
    #[serde(default, deserialize_with = "nullable")]
    pub alert_setting_type: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub notification_group: NotificationGroup,
    #[serde(default, deserialize_with = "nullable")]
    pub alert_group_items: Vec<AlertGroupItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct InsightData {
    #[serde(default, deserialize_with = "nullable")]
    pub insight_setting_type: IdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<IdName>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub tracepoints: Vec<IdName>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub network_type: IdName,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroup {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub synthetic_network_type: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub nodes: Vec<Node>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSetting {
    #[serde(default, deserialize_with = "nullable")]
    pub schedule_setting_type: IdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i64")]
    pub run_schedule_id: i64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i64")]
    pub maintenance_schedule_id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub frequency: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub test_node_distribution: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub network_type: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub nodes: Vec<Node>,
    #[serde(default, deserialize_with = "nullable")]
    pub node_groups: Vec<NodeGroup>,
    /// Number of subset nodes picked per run.
    #[serde(
        rename = "roundRobinAmount",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "is_zero_i32"
    )]
    pub no_of_subset_nodes: i32,
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSetting {
    #[serde(default, deserialize_with = "nullable")]
    pub advanced_setting_type: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub applied_test_flags: Vec<OptionalIdName>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub max_step_runtime_sec_override: i32,
    /// Only present when the test stops on document complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_no_activity: Option<i32>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub viewport_height: i32,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub viewport_width: i32,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub failure_hop_count: i32,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub ping_count: i32,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub edns_subnet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_monitor: Option<OptionalIdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_bandwidth_throttling: Option<OptionalIdName>,
    #[serde(default, deserialize_with = "nullable")]
    pub id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChromeMonitorVersion {
    #[serde(default, deserialize_with = "nullable")]
    pub application_version_type: OptionalIdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i32")]
    pub application_version_id: i32,
}

/// The script attached to api, transaction and scripted browser tests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestRequestData {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i64")]
    pub test_id: i64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub request_data: String,
    #[serde(default, deserialize_with = "nullable")]
    pub transaction_script_type: OptionalIdName,
    #[serde(default, deserialize_with = "nullable")]
    pub test_type: OptionalIdName,
    #[serde(default, deserialize_with = "nullable")]
    pub monitor: OptionalIdName,
}

/// A complete test document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    #[serde(default, deserialize_with = "nullable")]
    pub id: TestId,
    #[serde(default, deserialize_with = "nullable")]
    pub division_id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub product_id: i64,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "is_zero_i64")]
    pub folder_id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub gateway_address_or_host: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    #[serde(rename = "thresholdRestModel", default, deserialize_with = "nullable")]
    pub thresholds: Thresholds,
    #[serde(default, deserialize_with = "nullable")]
    pub enforce_certificate_pinning: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub enforce_certificate_key_pinning: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub enable_test_data_webhook: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub alerts_paused: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub change_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub start_time: String,
    #[serde(default, deserialize_with = "nullable")]
    pub end_time: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub monitor: IdName,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub dns_server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_query_type: Option<OptionalIdName>,
    #[serde(rename = "userAgentTypeId", default, skip_serializing_if = "Option::is_none")]
    pub user_agent_type: Option<OptionalIdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_monitor_version: Option<ChromeMonitorVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_request_data: Option<TestRequestData>,
    #[serde(default, deserialize_with = "nullable")]
    pub test_type: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub request_http_method: IdName,
    #[serde(default, deserialize_with = "nullable")]
    pub request_settings: RequestSetting,
    #[serde(default, deserialize_with = "nullable")]
    pub alert_group: AlertGroup,
    #[serde(default, deserialize_with = "nullable")]
    pub insight_data: InsightData,
    #[serde(default, deserialize_with = "nullable")]
    pub schedule_settings: ScheduleSetting,
    #[serde(default, deserialize_with = "nullable")]
    pub advanced_settings: AdvancedSetting,
}

/// Uniform response envelope of every v2 endpoint.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, deserialize_with = "nullable")]
    pub messages: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub errors: Vec<ApiErrorDetail>,
    #[serde(default, deserialize_with = "nullable")]
    pub completed: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub trace_id: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorDetail {
    /// Either a number or a string depending on the endpoint.
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
}

/// `data` of a successful read.
#[derive(Deserialize, Debug, Default)]
pub struct TestsData {
    #[serde(default, deserialize_with = "nullable")]
    pub tests: Vec<Test>,
}

/// `data` of a successful create.
#[derive(Deserialize, Debug)]
pub struct CreatedTest {
    #[serde(deserialize_with = "deserialize_test_id")]
    pub id: TestId,
}
