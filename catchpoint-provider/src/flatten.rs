//! Wire documents back into schema blocks.
//!
//! Codes are mapped to names through the same tables the setters use, so a
//! read followed by a write produces the same request. Sections the API
//! reports as inherited and empty flatten to an absent block.

use crate::builder::DEFAULT_ALERT_SUBJECT;
use crate::schema::{
    AdvancedSettingsBlock, AlertNotificationBlock, AlertRuleBlock, AlertSettingsBlock,
    AuthenticationBlock, Block, HeaderValueBlock, InsightsBlock, LabelBlock, RequestSettingsBlock,
    RuleNotificationBlock, ScheduleSettingsBlock, SettingBlocks, TestCommon, ThresholdsBlock,
};
use crate::test_config::SettingType;
use catchpoint_api::enums::{
    ADDITIONAL_MONITORS, ALERT_HOST_FAILURE, ALERT_SUB_TYPES, ALERT_TEST_FAILURE, ALERT_TYPES,
    AUTHENTICATION_TYPES, BANDWIDTH_THROTTLING, CHROME_APPLICATION_VERSIONS,
    CHROME_SPECIFIC_VERSION, CHROME_VERSIONS, CodeTable, DNS_QUERY_TYPES, FREQUENCIES,
    HISTORICAL_INTERVALS, MONITORS, NODE_DISTRIBUTIONS, NODE_THRESHOLD_TYPES, NOTIFICATION_TYPES,
    OPERATION_TYPES, RECIPIENT_CONTACT_GROUP, REMINDERS, REQUEST_HEADER_TYPES, SCRIPT_TYPES,
    STATISTICAL_TYPES, TEST_FLAGS, TEST_STATUSES, THRESHOLD_INTERVALS, TRIGGER_TRENDSHIFT,
    TRIGGER_TYPES, USER_AGENTS,
};
use catchpoint_api::types::{
    AdvancedSetting, AlertGroup, AlertGroupItem, InsightData, Label, NotificationGroup, Recipient,
    RequestSetting, ScheduleSetting, Thresholds,
};
use catchpoint_api::{IdName, OptionalIdName, Test};
use indexmap::IndexMap;

/// Table name for `id`, or `fallback` when the table does not know it.
fn name_or(table: &CodeTable, id: i32, fallback: &str) -> String {
    table
        .name(id)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

fn pair_name(table: &CodeTable, pair: &IdName) -> String {
    name_or(table, pair.id, &pair.name)
}

fn optional_name(table: &CodeTable, pair: Option<&OptionalIdName>) -> String {
    match pair {
        Some(pair) if !pair.is_empty() => name_or(table, pair.id, &pair.name),
        _ => String::new(),
    }
}

fn is_inherited(pair: &IdName) -> bool {
    SettingType::from_id(pair.id) == SettingType::Inherit
}

/// Loose check used to tell email recipients from other kinds.
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

pub fn flatten_common(test: &Test) -> TestCommon {
    TestCommon {
        division_id: test.division_id,
        product_id: test.product_id,
        folder_id: test.folder_id,
        test_name: test.name.clone(),
        test_description: test.description.clone(),
        enable_test_data_webhook: test.enable_test_data_webhook,
        alerts_paused: test.alerts_paused,
        start_time: test.start_time.clone(),
        end_time: test.end_time.clone(),
        status: pair_name(&TEST_STATUSES, &test.status).to_lowercase(),
    }
}

pub fn monitor_name(test: &Test) -> String {
    pair_name(&MONITORS, &test.monitor)
}

pub fn simulate_device_name(test: &Test) -> String {
    optional_name(&USER_AGENTS, test.user_agent_type.as_ref())
}

/// Pinned versions come back as the specific version id plus an
/// application version id; the name lives in the application table.
pub fn chrome_version_name(test: &Test) -> String {
    let Some(version) = &test.chrome_monitor_version else {
        return String::new();
    };
    let channel = &version.application_version_type;
    if channel.id == CHROME_SPECIFIC_VERSION {
        if let Some(name) = CHROME_APPLICATION_VERSIONS.name(version.application_version_id) {
            return name.to_string();
        }
    }
    optional_name(&CHROME_VERSIONS, Some(channel))
}

pub fn query_type_name(test: &Test) -> String {
    optional_name(&DNS_QUERY_TYPES, test.dns_query_type.as_ref())
}

/// Script text and script type name.
pub fn script(test: &Test) -> (String, String) {
    match &test.test_request_data {
        Some(data) => (
            data.request_data.clone(),
            optional_name(&SCRIPT_TYPES, Some(&data.transaction_script_type)),
        ),
        None => (String::new(), String::new()),
    }
}

pub fn flatten_labels(labels: &[Label]) -> Vec<LabelBlock> {
    labels
        .iter()
        .map(|label| LabelBlock {
            key: label.name.clone(),
            values: label.values.clone(),
        })
        .collect()
}

pub fn flatten_thresholds(thresholds: &Thresholds) -> Option<ThresholdsBlock> {
    if thresholds.is_empty() {
        return None;
    }
    Some(ThresholdsBlock {
        test_time_warning: thresholds.test_time_apdex_threshold_warning,
        test_time_critical: thresholds.test_time_apdex_threshold_critical,
        availability_warning: thresholds.availability_apdex_threshold_warning,
        availability_critical: thresholds.availability_apdex_threshold_critical,
    })
}

pub fn flatten_request_settings(request: &RequestSetting) -> Option<RequestSettingsBlock> {
    let authentication = request
        .authentication
        .as_ref()
        .filter(|auth| !auth.authentication_method_type.is_empty())
        .map(|auth| AuthenticationBlock {
            authentication_type: optional_name(
                &AUTHENTICATION_TYPES,
                Some(&auth.authentication_method_type),
            )
            .to_lowercase(),
            password_ids: auth.password_ids.clone(),
        });

    let http_request_headers: IndexMap<String, HeaderValueBlock> = request
        .http_header_requests
        .iter()
        .filter_map(|header| {
            let name = REQUEST_HEADER_TYPES.name(header.request_header_type.id)?;
            Some((
                name.to_string(),
                HeaderValueBlock {
                    value: header.request_value.clone(),
                    child_host_pattern: header.child_host_pattern.clone(),
                },
            ))
        })
        .collect();

    let block = RequestSettingsBlock {
        authentication,
        token_ids: request.token_ids.clone(),
        library_certificate_ids: request.library_certificate_ids.clone(),
        http_request_headers,
    };

    if is_inherited(&request.request_setting_type) && block == RequestSettingsBlock::default() {
        return None;
    }
    Some(block)
}

pub fn flatten_insights(insights: &InsightData) -> Option<InsightsBlock> {
    if insights.tracepoints.is_empty() && insights.indicators.is_empty() {
        return None;
    }
    Some(InsightsBlock {
        tracepoint_ids: insights.tracepoints.iter().map(|t| i64::from(t.id)).collect(),
        indicator_ids: insights.indicators.iter().map(|i| i64::from(i.id)).collect(),
    })
}

pub fn flatten_schedule(schedule: &ScheduleSetting) -> Option<ScheduleSettingsBlock> {
    if is_inherited(&schedule.schedule_setting_type)
        && schedule.nodes.is_empty()
        && schedule.node_groups.is_empty()
    {
        return None;
    }
    Some(ScheduleSettingsBlock {
        run_schedule_id: schedule.run_schedule_id,
        maintenance_schedule_id: schedule.maintenance_schedule_id,
        frequency: pair_name(&FREQUENCIES, &schedule.frequency),
        node_distribution: pair_name(&NODE_DISTRIBUTIONS, &schedule.test_node_distribution),
        node_ids: schedule.nodes.iter().map(|node| node.id).collect(),
        node_group_ids: schedule.node_groups.iter().map(|group| group.id).collect(),
        no_of_subset_nodes: schedule.no_of_subset_nodes,
    })
}

/// Splits recipients into email addresses and contact group names.
fn split_recipients(recipients: &[Recipient]) -> (Vec<String>, Vec<String>) {
    let mut emails = Vec::new();
    let mut contact_groups = Vec::new();
    for recipient in recipients {
        if recipient.recipient_type.id == RECIPIENT_CONTACT_GROUP {
            contact_groups.push(recipient.name.clone());
        } else if is_valid_email(&recipient.email) {
            emails.push(recipient.email.clone());
        }
    }
    (emails, contact_groups)
}

fn flatten_rule_notification(group: &NotificationGroup) -> RuleNotificationBlock {
    let (recipient_email_ids, contact_groups) = split_recipients(&group.recipients);
    RuleNotificationBlock {
        notify_on_warning: group.notify_on_warning,
        notify_on_critical: group.notify_on_critical,
        notify_on_improved: group.notify_on_improved,
        subject: group.subject.clone(),
        recipient_email_ids,
        contact_groups,
    }
}

fn flatten_rule(item: &AlertGroupItem) -> AlertRuleBlock {
    let threshold = &item.node_threshold;
    let trigger = &item.trigger;

    let forced_operation = matches!(item.alert_type.id, ALERT_TEST_FAILURE | ALERT_HOST_FAILURE)
        || trigger.trigger_type.id == TRIGGER_TRENDSHIFT;
    let operation_type = if forced_operation {
        String::new()
    } else {
        pair_name(&OPERATION_TYPES, &trigger.operation_type)
    };

    AlertRuleBlock {
        node_threshold_type: pair_name(&NODE_THRESHOLD_TYPES, &threshold.node_threshold_type),
        threshold_number_of_runs: threshold.number_of_units,
        threshold_percentage_of_runs: threshold.percentage_of_units,
        number_of_failing_nodes: threshold.number_of_failing_units,
        trigger_type: pair_name(&TRIGGER_TYPES, &trigger.trigger_type),
        operation_type,
        statistical_type: optional_name(&STATISTICAL_TYPES, trigger.statistical_type.as_ref()),
        historical_interval: optional_name(
            &HISTORICAL_INTERVALS,
            trigger.historical_interval.as_ref(),
        ),
        warning_trigger: trigger.warning_trigger,
        critical_trigger: trigger.critical_trigger,
        enable_consecutive: threshold.consecutive_runs_enabled,
        consecutive_number_of_runs: threshold.number_of_consecutive_runs,
        expression: trigger.expression.clone(),
        warning_reminder: pair_name(&REMINDERS, &trigger.warning_reminder_frequency),
        critical_reminder: pair_name(&REMINDERS, &trigger.critical_reminder_frequency),
        threshold_interval: pair_name(&THRESHOLD_INTERVALS, &trigger.threshold_interval),
        use_rolling_window: trigger.use_interval_rolling_window,
        notification_type: pair_name(&NOTIFICATION_TYPES, &item.notification_type),
        alert_type: pair_name(&ALERT_TYPES, &item.alert_type),
        alert_sub_type: optional_name(&ALERT_SUB_TYPES, item.alert_sub_type.as_ref()),
        enforce_test_failure: item.enforce_test_failure,
        omit_scatterplot: item.omit_scatterplot,
        notification_group: item
            .notification_groups
            .iter()
            .map(flatten_rule_notification)
            .collect(),
    }
}

fn flatten_notification(group: &NotificationGroup) -> Option<AlertNotificationBlock> {
    let subject = if group.subject == DEFAULT_ALERT_SUBJECT {
        String::new()
    } else {
        group.subject.clone()
    };
    if subject.is_empty() && group.recipients.is_empty() && group.alert_webhooks.is_empty() {
        return None;
    }

    let (recipient_email_ids, contact_groups) = split_recipients(&group.recipients);
    Some(AlertNotificationBlock {
        subject,
        alert_webhook_ids: group.alert_webhooks.iter().map(|hook| hook.id).collect(),
        recipient_email_ids,
        contact_groups,
    })
}

pub fn flatten_alert(alert: &AlertGroup) -> Option<AlertSettingsBlock> {
    let block = AlertSettingsBlock {
        alert_rule: alert.alert_group_items.iter().map(flatten_rule).collect(),
        notification_group: flatten_notification(&alert.notification_group),
    };
    if is_inherited(&alert.alert_setting_type) && block == AlertSettingsBlock::default() {
        return None;
    }
    Some(block)
}

pub fn flatten_advanced(advanced: &AdvancedSetting) -> Option<AdvancedSettingsBlock> {
    let block = AdvancedSettingsBlock {
        applied_test_flags: advanced
            .applied_test_flags
            .iter()
            .filter_map(|flag| TEST_FLAGS.name(flag.id))
            .map(str::to_string)
            .collect(),
        enforce_test_failure_if_runs_longer_than: advanced.max_step_runtime_sec_override,
        wait_for_no_activity: advanced.wait_for_no_activity.unwrap_or_default(),
        viewport_height: advanced.viewport_height,
        viewport_width: advanced.viewport_width,
        additional_monitor: optional_name(&ADDITIONAL_MONITORS, advanced.additional_monitor.as_ref()),
        bandwidth_throttling: optional_name(
            &BANDWIDTH_THROTTLING,
            advanced.test_bandwidth_throttling.as_ref(),
        ),
        edns_subnet: advanced.edns_subnet.clone(),
        ping_count: advanced.ping_count,
        failure_hop_count: advanced.failure_hop_count,
    };
    if is_inherited(&advanced.advanced_setting_type) && block == AdvancedSettingsBlock::default() {
        return None;
    }
    Some(block)
}

/// Flattens every section, keeping only the blocks in `supported`.
pub fn flatten_blocks(test: &Test, supported: &[Block]) -> SettingBlocks {
    let mut blocks = SettingBlocks {
        label: flatten_labels(&test.labels),
        thresholds: flatten_thresholds(&test.thresholds),
        request_settings: flatten_request_settings(&test.request_settings),
        insights: flatten_insights(&test.insight_data),
        schedule_settings: flatten_schedule(&test.schedule_settings),
        alert_settings: flatten_alert(&test.alert_group),
        advanced_settings: flatten_advanced(&test.advanced_settings),
    };
    blocks.retain(supported);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::fixture_test;
    use catchpoint_api::types::{AlertWebhook, ChromeMonitorVersion};
    use serde_json::json;

    #[test]
    fn email_check() {
        assert!(is_valid_email("ops@example.com"));
        assert!(!is_valid_email("ops@localhost"));
        assert!(!is_valid_email("example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn common_attributes() {
        let test = fixture_test();
        let common = flatten_common(&test);

        assert_eq!(common.test_name, "homepage");
        assert_eq!(common.division_id, 1000);
        assert_eq!(common.status, "active");
        assert!(common.enable_test_data_webhook);
        assert_eq!(monitor_name(&test), "chrome");
        assert_eq!(chrome_version_name(&test), "stable");
        assert_eq!(simulate_device_name(&test), "");
    }

    #[test]
    fn pinned_chrome_version_reads_application_table() {
        let mut test = fixture_test();
        test.chrome_monitor_version = Some(ChromeMonitorVersion {
            application_version_type: OptionalIdName::new(3, ""),
            application_version_id: 13,
        });
        assert_eq!(chrome_version_name(&test), "87");

        test.chrome_monitor_version = None;
        assert_eq!(chrome_version_name(&test), "");
    }

    #[test]
    fn schedule_and_alerts() {
        let test = fixture_test();
        let blocks = flatten_blocks(&test, Block::ALL);

        let schedule = blocks.schedule_settings.unwrap();
        assert_eq!(schedule.frequency, "5 minutes");
        assert_eq!(schedule.node_distribution, "random");
        assert_eq!(schedule.node_ids, vec![101, 102]);

        let alert = blocks.alert_settings.unwrap();
        let rule = &alert.alert_rule[0];
        assert_eq!(rule.alert_type, "availability");
        assert_eq!(rule.alert_sub_type, "test");
        assert_eq!(rule.operation_type, "less than");
        assert_eq!(rule.warning_reminder, "none");
        assert_eq!(rule.notification_group[0].recipient_email_ids, vec!["ops@example.com"]);
        assert_eq!(rule.notification_group[0].contact_groups, vec!["oncall"]);

        // Only the default subject and no recipients: nothing to keep.
        assert_eq!(alert.notification_group, None);
    }

    #[test]
    fn forced_operation_flattens_empty() {
        let mut test = fixture_test();
        test.alert_group.alert_group_items[0].alert_type = IdName::new(9, "TestFailure");
        let alert = flatten_alert(&test.alert_group).unwrap();
        assert_eq!(alert.alert_rule[0].operation_type, "");
        assert_eq!(alert.alert_rule[0].alert_type, "test failure");
    }

    #[test]
    fn inherited_empty_sections_are_absent() {
        let test = fixture_test();
        let blocks = flatten_blocks(&test, Block::ALL);

        assert_eq!(blocks.request_settings, None);
        assert_eq!(blocks.advanced_settings, None);
        assert_eq!(blocks.insights, None);
        assert_eq!(blocks.thresholds, None);
        assert_eq!(blocks.label[0].key, "team");
    }

    #[test]
    fn unsupported_blocks_are_dropped() {
        let test = fixture_test();
        let blocks = flatten_blocks(&test, &[Block::Labels, Block::AlertSettings]);
        assert!(blocks.schedule_settings.is_none());
        assert!(blocks.alert_settings.is_some());
    }

    #[test]
    fn request_settings_use_table_names() {
        let request: RequestSetting = serde_json::from_value(json!({
            "requestSettingType": {"id": 1, "name": "Override"},
            "authentication": {
                "authenticationMethodType": {"id": 3, "name": "NTLM"},
                "passwordIds": [5]
            },
            "httpHeaderRequests": [
                {"requestValue": "probe", "requestHeaderType": {"id": 1, "name": "UserAgent"}},
                {"requestValue": "x", "requestHeaderType": {"id": 99, "name": "Mystery"}}
            ]
        }))
        .unwrap();

        let block = flatten_request_settings(&request).unwrap();
        let auth = block.authentication.unwrap();
        assert_eq!(auth.authentication_type, "ntlm");
        assert_eq!(auth.password_ids, vec![5]);
        assert_eq!(block.http_request_headers.len(), 1);
        assert_eq!(block.http_request_headers["user_agent"].value, "probe");
    }

    #[test]
    fn notification_with_webhooks_is_kept() {
        let group = NotificationGroup {
            subject: DEFAULT_ALERT_SUBJECT.into(),
            alert_webhooks: vec![AlertWebhook { id: 12 }],
            recipients: vec![Recipient {
                email: "not-an-email".into(),
                recipient_type: IdName::new(2, "Email"),
                ..Default::default()
            }],
            ..Default::default()
        };
        let block = flatten_notification(&group).unwrap();
        assert_eq!(block.subject, "");
        assert_eq!(block.alert_webhook_ids, vec![12]);
        assert!(block.recipient_email_ids.is_empty());
    }

    #[test]
    fn advanced_flags_by_name() {
        let advanced: AdvancedSetting = serde_json::from_value(json!({
            "advancedSettingType": {"id": 1, "name": "Override"},
            "appliedTestFlags": [{"id": 4, "name": "Flag"}, {"id": 25}],
            "waitForNoActivity": 1000,
            "additionalMonitor": {"id": 11, "name": "PingTcp"},
            "pingCount": 6
        }))
        .unwrap();

        let block = flatten_advanced(&advanced).unwrap();
        assert_eq!(block.applied_test_flags, vec!["enable_http2", "stop_test_on_document_complete"]);
        assert_eq!(block.wait_for_no_activity, 1000);
        assert_eq!(block.additional_monitor, "ping tcp");
        assert_eq!(block.ping_count, 6);
    }
}
