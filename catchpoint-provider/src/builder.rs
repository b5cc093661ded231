//! [`TestConfig`] into wire documents.
//!
//! Every section builder is total: a section left at its zero value builds
//! the "inherit" form the API accepts, which is also what an update sends
//! when a block is removed from the configuration.

use crate::test_config::{
    AdvancedConfig, AlertConfig, AlertRuleConfig, InsightConfig, LabelConfig, RecipientsConfig,
    RequestConfig, ScheduleConfig, ScriptConfig, TestConfig, ThresholdConfig,
};
use catchpoint_api::enums::{
    CHROME_SPECIFIC_VERSION, NETWORK_TYPES, RECIPIENT_CONTACT_GROUP, RECIPIENT_EMAIL,
    RECIPIENT_TYPES, TestType,
};
use catchpoint_api::types::{
    AdvancedSetting, AlertGroup, AlertGroupItem, AlertWebhook, Authentication,
    ChromeMonitorVersion, HttpHeaderRequest, InsightData, Label, Node, NodeGroup, NodeThreshold,
    NotificationGroup, Recipient, RequestSetting, ScheduleSetting, TestRequestData, Thresholds,
    Trigger,
};
use catchpoint_api::{IdName, OptionalIdName, PatchOperation, Section, Test};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

/// Subject the API uses when a test-level notification group sets none.
pub const DEFAULT_ALERT_SUBJECT: &str =
    "${NotificationLevel}:  test=#${TestId} - ${TestName}, alert=${AlertType}";

const LABEL_COLOR_ALPHABET: &[u8] = b"abcdef0123456789";

/// Node groups are referenced by id only; the API still wants one member.
const PLACEHOLDER_GROUP_NODE_ID: i64 = 123;

pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn random_label_color() -> String {
    let mut rng = rand::rng();
    let digits: String = (0..6)
        .map(|_| LABEL_COLOR_ALPHABET[rng.random_range(0..LABEL_COLOR_ALPHABET.len())] as char)
        .collect();
    format!("#{digits}")
}

fn backbone() -> IdName {
    NETWORK_TYPES
        .pair_for_id(0)
        .unwrap_or_else(|| IdName::new(0, "Backbone"))
}

fn recipient_type(id: i32) -> IdName {
    RECIPIENT_TYPES
        .pair_for_id(id)
        .unwrap_or_else(|| IdName::new(id, ""))
}

fn optional(pair: &IdName) -> Option<OptionalIdName> {
    (pair.id != 0).then(|| pair.clone().into())
}

/// Labels get a fresh random colour every time they are built.
pub fn build_labels(labels: &[LabelConfig]) -> Vec<Label> {
    labels
        .iter()
        .map(|label| Label {
            color: random_label_color(),
            name: label.name.clone(),
            values: label.values.clone(),
        })
        .collect()
}

pub fn build_thresholds(thresholds: &ThresholdConfig) -> Thresholds {
    Thresholds {
        test_time_apdex_threshold_warning: thresholds.test_time_warning,
        test_time_apdex_threshold_critical: thresholds.test_time_critical,
        availability_apdex_threshold_warning: thresholds.availability_warning,
        availability_apdex_threshold_critical: thresholds.availability_critical,
    }
}

pub fn build_request_settings(request: &RequestConfig) -> RequestSetting {
    let authentication = (request.authentication_type.id != 0).then(|| Authentication {
        authentication_method_type: request.authentication_type.clone().into(),
        password_status: OptionalIdName::new(1, "Set"),
        password_ids: request.password_ids.clone(),
        ..Default::default()
    });

    RequestSetting {
        request_setting_type: request.setting_type.id_name(),
        authentication,
        library_certificate_ids: request.certificate_ids.clone(),
        token_ids: request.token_ids.clone(),
        http_header_requests: request
            .headers
            .iter()
            .map(|header| HttpHeaderRequest {
                request_value: header.value.clone(),
                request_header_type: header.header_type.clone(),
                child_host_pattern: header.child_host_pattern.clone(),
            })
            .collect(),
    }
}

pub fn build_insight_data(insights: &InsightConfig) -> InsightData {
    InsightData {
        insight_setting_type: insights.setting_type.id_name(),
        indicators: insights
            .indicator_ids
            .iter()
            .map(|id| IdName::new(*id, "Indicator"))
            .collect(),
        tracepoints: insights
            .tracepoint_ids
            .iter()
            .map(|id| IdName::new(*id, "Tracepoint"))
            .collect(),
    }
}

pub fn build_schedule_settings(schedule: &ScheduleConfig) -> ScheduleSetting {
    let network_type = backbone();
    let node = |id: i64, name: &str| Node {
        id,
        name: name.to_string(),
        network_type: network_type.clone(),
    };

    ScheduleSetting {
        schedule_setting_type: schedule.setting_type.id_name(),
        run_schedule_id: schedule.run_schedule_id,
        maintenance_schedule_id: schedule.maintenance_schedule_id,
        frequency: schedule.frequency.clone(),
        test_node_distribution: schedule.node_distribution.clone(),
        network_type: network_type.clone(),
        nodes: schedule.node_ids.iter().map(|id| node(*id, "node")).collect(),
        node_groups: schedule
            .node_group_ids
            .iter()
            .map(|id| NodeGroup {
                id: *id,
                name: "DefaultNodeGroupName".to_string(),
                description: String::new(),
                synthetic_network_type: network_type.clone(),
                nodes: vec![node(PLACEHOLDER_GROUP_NODE_ID, "DefaultNodeName")],
            })
            .collect(),
        no_of_subset_nodes: schedule.no_of_subset_nodes.max(0),
        id: 0,
    }
}

fn build_recipients(emails: &[String], contact_groups: &[String]) -> Vec<Recipient> {
    let emails = emails.iter().map(|email| Recipient {
        email: email.clone(),
        recipient_type: recipient_type(RECIPIENT_EMAIL),
        ..Default::default()
    });
    let groups = contact_groups
        .iter()
        .enumerate()
        .map(|(index, name)| Recipient {
            id: index as i64 + 1,
            recipient_type: recipient_type(RECIPIENT_CONTACT_GROUP),
            name: name.clone(),
            ..Default::default()
        });
    emails.chain(groups).collect()
}

fn build_rule_notification(group: &RecipientsConfig) -> NotificationGroup {
    NotificationGroup {
        subject: group.subject.clone(),
        notify_on_warning: group.notify_on_warning,
        notify_on_critical: group.notify_on_critical,
        notify_on_improved: group.notify_on_improved,
        alert_webhooks: Vec::new(),
        recipients: build_recipients(&group.emails, &group.contact_groups),
    }
}

fn build_alert_item(rule: &AlertRuleConfig) -> AlertGroupItem {
    let trailing = rule.statistical_type.id != 0 && rule.historical_interval.id != 0;

    AlertGroupItem {
        node_threshold: NodeThreshold {
            node_threshold_type: rule.node_threshold_type.clone(),
            number_of_units: rule.threshold_number_of_runs,
            percentage_of_units: rule.threshold_percentage_of_runs,
            number_of_failing_units: rule.number_of_failing_nodes,
            consecutive_runs_enabled: rule.enable_consecutive,
            number_of_consecutive_runs: rule.consecutive_number_of_runs,
            ..Default::default()
        },
        trigger: Trigger {
            id: 0,
            warning_reminder_frequency: rule.warning_reminder.clone(),
            critical_reminder_frequency: rule.critical_reminder.clone(),
            trigger_type: rule.trigger_type.clone(),
            operation_type: rule.operation_type.clone(),
            statistical_type: trailing.then(|| rule.statistical_type.clone().into()),
            historical_interval: trailing.then(|| rule.historical_interval.clone().into()),
            threshold_interval: rule.threshold_interval.clone(),
            warning_trigger: rule.warning_trigger,
            critical_trigger: rule.critical_trigger,
            use_interval_rolling_window: rule.use_rolling_window,
            expression: rule.expression.clone(),
        },
        notification_type: rule.notification_type.clone(),
        alert_type: rule.alert_type.clone(),
        alert_sub_type: optional(&rule.alert_sub_type),
        enforce_test_failure: rule.enforce_test_failure,
        omit_scatterplot: rule.omit_scatterplot,
        match_all_records: false,
        notification_groups: rule
            .notification_groups
            .iter()
            .map(build_rule_notification)
            .collect(),
    }
}

pub fn build_alert_group(alert: &AlertConfig) -> AlertGroup {
    let subject = if alert.subject.is_empty() {
        DEFAULT_ALERT_SUBJECT.to_string()
    } else {
        alert.subject.clone()
    };

    AlertGroup {
        alert_setting_type: alert.setting_type.id_name(),
        notification_group: NotificationGroup {
            subject,
            notify_on_warning: true,
            notify_on_critical: true,
            notify_on_improved: true,
            alert_webhooks: alert
                .webhook_ids
                .iter()
                .map(|id| AlertWebhook { id: *id })
                .collect(),
            recipients: build_recipients(&alert.emails, &alert.contact_groups),
        },
        alert_group_items: alert.rules.iter().map(build_alert_item).collect(),
    }
}

pub fn build_advanced_settings(advanced: &AdvancedConfig) -> AdvancedSetting {
    AdvancedSetting {
        advanced_setting_type: advanced.setting_type.id_name(),
        applied_test_flags: advanced
            .applied_test_flags
            .iter()
            .filter(|id| **id != 0)
            .map(|id| OptionalIdName::new(*id, "Flag"))
            .collect(),
        max_step_runtime_sec_override: advanced.max_step_runtime_sec_override,
        wait_for_no_activity: advanced.wait_for_no_activity,
        viewport_height: advanced.viewport_height,
        viewport_width: advanced.viewport_width,
        failure_hop_count: advanced.failure_hop_count,
        ping_count: advanced.ping_count,
        edns_subnet: advanced.edns_subnet.clone(),
        additional_monitor: optional(&advanced.additional_monitor),
        test_bandwidth_throttling: optional(&advanced.bandwidth_throttling),
        id: 0,
    }
}

pub fn build_request_data(script: &ScriptConfig) -> TestRequestData {
    TestRequestData {
        test_id: script.test_id,
        request_data: script.request_data.clone(),
        transaction_script_type: script.transaction_script_type.clone().into(),
        test_type: script.test_type.clone().into(),
        monitor: script.monitor.clone().into(),
    }
}

/// `None` when the test pins no chrome channel.
pub fn build_chrome_version(config: &TestConfig) -> Option<ChromeMonitorVersion> {
    if config.chrome_version.id == 0 {
        return None;
    }
    let application_version_id = if config.chrome_version.id == CHROME_SPECIFIC_VERSION {
        config.chrome_application_version.id
    } else {
        0
    };
    Some(ChromeMonitorVersion {
        application_version_type: config.chrome_version.clone().into(),
        application_version_id,
    })
}

/// Builds the full document sent on creation.
pub fn build_test(config: &TestConfig, now: DateTime<Utc>) -> Test {
    let start_time = if config.start_time.is_empty() {
        timestamp(now)
    } else {
        config.start_time.clone()
    };

    let mut test = Test {
        id: 0,
        division_id: config.division_id,
        product_id: config.product_id,
        folder_id: config.folder_id,
        name: config.test_name.clone(),
        description: config.test_description.clone(),
        url: config.test_url.clone(),
        gateway_address_or_host: config.gateway_address_or_host.clone(),
        labels: build_labels(&config.labels),
        thresholds: build_thresholds(&config.thresholds),
        enforce_certificate_pinning: config.enforce_certificate_pinning,
        enforce_certificate_key_pinning: config.enforce_certificate_key_pinning,
        enable_test_data_webhook: config.enable_test_data_webhook,
        alerts_paused: config.alerts_paused,
        change_date: timestamp(now),
        start_time,
        end_time: config.end_time.clone(),
        status: config.status.clone(),
        monitor: config.monitor.clone(),
        user_agent_type: optional(&config.simulate_device),
        chrome_monitor_version: build_chrome_version(config),
        test_type: config.test_type.id_name(),
        request_http_method: IdName::new(0, "Get"),
        request_settings: build_request_settings(&config.request),
        alert_group: build_alert_group(&config.alert),
        insight_data: build_insight_data(&config.insights),
        schedule_settings: build_schedule_settings(&config.schedule),
        advanced_settings: build_advanced_settings(&config.advanced),
        ..Default::default()
    };

    if config.test_type == TestType::Dns {
        test.dns_server = config.dns_server.clone();
        test.dns_query_type = optional(&config.dns_query_type);
    }

    if config.test_type.has_request_data() {
        test.test_request_data = Some(build_request_data(&config.script));
    }

    test
}

/// Replaces `section` with its value freshly built from `config`.
pub fn section_patch(
    config: &TestConfig,
    section: Section,
) -> Result<PatchOperation, serde_json::Error> {
    match section {
        Section::Labels => PatchOperation::section(section, &build_labels(&config.labels)),
        Section::Thresholds => {
            PatchOperation::section(section, &build_thresholds(&config.thresholds))
        }
        Section::RequestData => {
            PatchOperation::section(section, &build_request_data(&config.script))
        }
        Section::AdvancedSettings => {
            PatchOperation::section(section, &build_advanced_settings(&config.advanced))
        }
        Section::RequestSettings => {
            PatchOperation::section(section, &build_request_settings(&config.request))
        }
        Section::InsightData => {
            PatchOperation::section(section, &build_insight_data(&config.insights))
        }
        Section::ScheduleSettings => {
            PatchOperation::section(section, &build_schedule_settings(&config.schedule))
        }
        Section::AlertGroup => PatchOperation::section(section, &build_alert_group(&config.alert)),
    }
}
