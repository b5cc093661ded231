//! JSON-Patch documents for partial test updates.
//!
//! An update sends one array of `replace` operations. Each operation either
//! sets a single top-level field, whose value the API expects as a string, or
//! replaces a whole nested section with a freshly built value. There is no
//! patching inside a section.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Replace,
}

/// Single-valued fields that can be patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Name,
    Description,
    Monitor,
    Url,
    DnsServer,
    DnsQueryType,
    GatewayAddressOrHost,
    EnableTestDataWebhook,
    AlertsPaused,
    StartTime,
    EndTime,
    Status,
    UserAgentType,
    ChromeApplicationVersionId,
    ChromeApplicationVersionType,
}

impl FieldPath {
    pub const fn path(self) -> &'static str {
        match self {
            FieldPath::Name => "/name",
            FieldPath::Description => "/description",
            FieldPath::Monitor => "/monitor",
            FieldPath::Url => "/url",
            FieldPath::DnsServer => "/dnsServer",
            FieldPath::DnsQueryType => "/dnsQueryType",
            FieldPath::GatewayAddressOrHost => "/gatewayAddressOrHost",
            FieldPath::EnableTestDataWebhook => "/enableTestDataWebhook",
            FieldPath::AlertsPaused => "/alertsPaused",
            FieldPath::StartTime => "/startTime",
            FieldPath::EndTime => "/endTime",
            FieldPath::Status => "/status",
            FieldPath::UserAgentType => "/userAgentTypeId",
            FieldPath::ChromeApplicationVersionId => "/chromeMonitorVersion/applicationVersionId",
            FieldPath::ChromeApplicationVersionType => {
                "/chromeMonitorVersion/applicationVersionType"
            }
        }
    }
}

/// Nested sections that are always replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Labels,
    Thresholds,
    RequestData,
    AdvancedSettings,
    RequestSettings,
    InsightData,
    ScheduleSettings,
    AlertGroup,
}

impl Section {
    pub const fn path(self) -> &'static str {
        match self {
            Section::Labels => "/labels",
            Section::Thresholds => "/thresholdRestModel",
            Section::RequestData => "/testRequestData",
            Section::AdvancedSettings => "/advancedSettings",
            Section::RequestSettings => "/requestSettings",
            Section::InsightData => "/insightData",
            Section::ScheduleSettings => "/scheduleSettings",
            Section::AlertGroup => "/alertGroup",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PatchOperation {
    pub value: serde_json::Value,
    pub path: String,
    pub op: PatchOp,
}

impl PatchOperation {
    /// Replaces one field. Numbers and booleans are rendered as strings.
    pub fn field(path: FieldPath, value: impl ToString) -> Self {
        PatchOperation {
            value: serde_json::Value::String(value.to_string()),
            path: path.path().to_string(),
            op: PatchOp::Replace,
        }
    }

    /// Replaces a whole section with `value`.
    pub fn section<T: Serialize>(section: Section, value: &T) -> Result<Self, serde_json::Error> {
        Ok(PatchOperation {
            value: serde_json::to_value(value)?,
            path: section.path().to_string(),
            op: PatchOp::Replace,
        })
    }
}
