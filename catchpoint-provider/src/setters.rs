//! Schema blocks into [`TestConfig`].
//!
//! One setter per block. Each resolves enumerated strings through the code
//! tables, applies the fallbacks the API expects and marks its section as an
//! override. Anything that would produce an invalid request body is rejected
//! here, before a request is built.

use crate::errors::ValidationError;
use crate::schema::{
    AdvancedSettingsBlock, AlertNotificationBlock, AlertRuleBlock, AlertSettingsBlock,
    InsightsBlock, LabelBlock, RequestSettingsBlock, RuleNotificationBlock, ScheduleSettingsBlock,
    SettingBlocks, ThresholdsBlock,
};
use crate::test_config::{
    AlertRuleConfig, HeaderConfig, LabelConfig, RecipientsConfig, ScriptConfig, SettingType,
    TestConfig, ThresholdConfig,
};
use catchpoint_api::IdName;
use catchpoint_api::enums::{
    ADDITIONAL_MONITORS, ALERT_AVAILABILITY, ALERT_HOST_FAILURE, ALERT_PATH, ALERT_PING,
    ALERT_SUB_TYPES, ALERT_TEST_FAILURE, ALERT_TIMING, ALERT_TYPES, AUTHENTICATION_TYPES,
    BANDWIDTH_THROTTLING, CodeTable, FLAG_STOP_TEST_ON_DOCUMENT_COMPLETE, FREQUENCIES,
    HISTORICAL_INTERVALS, NODE_DISTRIBUTIONS, NODE_THRESHOLD_AVERAGE_ACROSS_NODES,
    NODE_THRESHOLD_TYPES, NOTIFICATION_TYPES, OPERATION_TYPES, REMINDERS, REQUEST_HEADER_TYPES,
    STATISTICAL_TYPES, TEST_FLAGS, THRESHOLD_INTERVALS, TRIGGER_SPECIFIC_VALUE,
    TRIGGER_TRAILING_VALUE, TRIGGER_TRENDSHIFT, TRIGGER_TYPES, TestType,
};

/// `TestRequestData.testId` must be positive even before the test exists.
const PLACEHOLDER_SCRIPT_TEST_ID: i64 = 1;

const PING_COUNT_RANGE: (i64, i64) = (4, 20);
const FAILURE_HOP_COUNT_RANGE: (i64, i64) = (7, 20);

/// Applies every present block, in schema order.
pub fn apply_blocks(blocks: &SettingBlocks, config: &mut TestConfig) -> Result<(), ValidationError> {
    set_labels(&blocks.label, config);
    if let Some(thresholds) = &blocks.thresholds {
        set_thresholds(thresholds, config);
    }
    if let Some(request_settings) = &blocks.request_settings {
        set_request_settings(request_settings, config)?;
    }
    if let Some(insights) = &blocks.insights {
        set_insights(insights, config)?;
    }
    if let Some(schedule) = &blocks.schedule_settings {
        set_schedule_settings(schedule, config)?;
    }
    if let Some(alert) = &blocks.alert_settings {
        set_alert_settings(alert, config)?;
    }
    if let Some(advanced) = &blocks.advanced_settings {
        set_advanced_settings(advanced, config)?;
    }
    Ok(())
}

pub fn set_request_data(
    script: &str,
    monitor: IdName,
    script_type: IdName,
    config: &mut TestConfig,
) {
    config.script = ScriptConfig {
        test_id: PLACEHOLDER_SCRIPT_TEST_ID,
        request_data: script.to_string(),
        transaction_script_type: script_type,
        monitor,
        test_type: config.test_type.id_name(),
    };
}

pub fn set_labels(labels: &[LabelBlock], config: &mut TestConfig) {
    config.labels = labels
        .iter()
        .map(|label| LabelConfig {
            name: label.key.clone(),
            values: label.values.clone(),
        })
        .collect();
}

pub fn set_thresholds(thresholds: &ThresholdsBlock, config: &mut TestConfig) {
    config.thresholds = ThresholdConfig {
        test_time_warning: thresholds.test_time_warning,
        test_time_critical: thresholds.test_time_critical,
        availability_warning: thresholds.availability_warning,
        availability_critical: thresholds.availability_critical,
    };
}

pub fn set_request_settings(
    block: &RequestSettingsBlock,
    config: &mut TestConfig,
) -> Result<(), ValidationError> {
    let request = &mut config.request;

    if let Some(authentication) = &block.authentication {
        request.authentication_type = AUTHENTICATION_TYPES.resolve(&authentication.authentication_type)?;
        request.password_ids = authentication.password_ids.clone();
    }
    request.token_ids = block.token_ids.clone();
    request.certificate_ids = block.library_certificate_ids.clone();

    for name in block.http_request_headers.keys() {
        if !REQUEST_HEADER_TYPES.contains(name) {
            return Err(REQUEST_HEADER_TYPES.unknown(name).into());
        }
    }

    // Emitted in header table order, whatever order the document used.
    request.headers = REQUEST_HEADER_TYPES
        .entries()
        .iter()
        .filter_map(|(id, name)| {
            let header = block.http_request_headers.get(*name)?;
            if header.value.is_empty() {
                return None;
            }
            Some(HeaderConfig {
                header_type: IdName::new(*id, *name),
                value: header.value.clone(),
                child_host_pattern: header.child_host_pattern.clone(),
            })
        })
        .collect();

    request.setting_type = SettingType::Override;
    Ok(())
}

fn insight_ids(field: &'static str, ids: &[i64]) -> Result<Vec<i32>, ValidationError> {
    ids.iter()
        .map(|&id| {
            i32::try_from(id).map_err(|_| ValidationError::OutOfRange {
                field,
                value: id,
                min: i64::from(i32::MIN),
                max: i64::from(i32::MAX),
            })
        })
        .collect()
}

pub fn set_insights(block: &InsightsBlock, config: &mut TestConfig) -> Result<(), ValidationError> {
    config.insights.tracepoint_ids = insight_ids("tracepoint_ids", &block.tracepoint_ids)?;
    config.insights.indicator_ids = insight_ids("indicator_ids", &block.indicator_ids)?;
    config.insights.setting_type = SettingType::Override;
    Ok(())
}

pub fn set_schedule_settings(
    block: &ScheduleSettingsBlock,
    config: &mut TestConfig,
) -> Result<(), ValidationError> {
    let frequency = FREQUENCIES.resolve(&block.frequency)?;
    let node_distribution = NODE_DISTRIBUTIONS.resolve(&block.node_distribution)?;

    if block.node_ids.is_empty() && block.node_group_ids.is_empty() {
        return Err(ValidationError::MissingNodes);
    }

    let schedule = &mut config.schedule;
    schedule.setting_type = SettingType::Override;
    schedule.run_schedule_id = block.run_schedule_id;
    schedule.maintenance_schedule_id = block.maintenance_schedule_id;
    schedule.frequency = frequency;
    schedule.node_distribution = node_distribution;
    schedule.node_ids = block.node_ids.clone();
    schedule.node_group_ids = block.node_group_ids.clone();
    if block.no_of_subset_nodes > 0 {
        schedule.no_of_subset_nodes = block.no_of_subset_nodes;
    }

    Ok(())
}

/// Resolves `name`, falling back to the entry with `default_id` and logging
/// the fallback.
fn with_fallback(table: &CodeTable, name: &str, default_id: i32, field: &'static str) -> IdName {
    let pair = table.pair_or(name, default_id);
    if !table.contains(name) {
        tracing::info!(field, value = name, fallback = %pair.name, "value not set or invalid, using fallback");
    }
    pair
}

fn recipients(group: &RuleNotificationBlock) -> RecipientsConfig {
    RecipientsConfig {
        subject: group.subject.clone(),
        notify_on_warning: group.notify_on_warning,
        notify_on_critical: group.notify_on_critical,
        notify_on_improved: group.notify_on_improved,
        emails: group.recipient_email_ids.clone(),
        contact_groups: group.contact_groups.clone(),
    }
}

pub fn set_alert_rule(rule: &AlertRuleBlock) -> Result<AlertRuleConfig, ValidationError> {
    let node_threshold_type = NODE_THRESHOLD_TYPES.resolve(&rule.node_threshold_type)?;
    let alert_type = ALERT_TYPES.resolve(&rule.alert_type)?;

    let warning_reminder = with_fallback(&REMINDERS, &rule.warning_reminder, 0, "warning_reminder");
    let critical_reminder =
        with_fallback(&REMINDERS, &rule.critical_reminder, 0, "critical_reminder");
    let threshold_interval = with_fallback(
        &THRESHOLD_INTERVALS,
        &rule.threshold_interval,
        0,
        "threshold_interval",
    );
    let notification_type = with_fallback(
        &NOTIFICATION_TYPES,
        &rule.notification_type,
        0,
        "notification_type",
    );
    let trigger_type = TRIGGER_TYPES.pair_or(&rule.trigger_type, TRIGGER_SPECIFIC_VALUE);

    let mut operation_type = OPERATION_TYPES.pair(&rule.operation_type);
    let needs_operation = matches!(
        alert_type.id,
        ALERT_AVAILABILITY | ALERT_TIMING | ALERT_PING | ALERT_PATH
    );
    if operation_type.is_none() && trigger_type.id != TRIGGER_TRENDSHIFT && needs_operation {
        return Err(ValidationError::OperationTypeRequired(alert_type.name));
    }
    if matches!(alert_type.id, ALERT_TEST_FAILURE | ALERT_HOST_FAILURE)
        || trigger_type.id == TRIGGER_TRENDSHIFT
    {
        operation_type = OPERATION_TYPES.pair_for_id(0);
    }

    let (statistical_type, historical_interval) = if trigger_type.id == TRIGGER_TRAILING_VALUE {
        (
            with_fallback(&STATISTICAL_TYPES, &rule.statistical_type, 1, "statistical_type"),
            with_fallback(
                &HISTORICAL_INTERVALS,
                &rule.historical_interval,
                5,
                "historical_interval",
            ),
        )
    } else {
        (IdName::default(), IdName::default())
    };

    if node_threshold_type.id != NODE_THRESHOLD_AVERAGE_ACROSS_NODES
        && rule.threshold_number_of_runs == 0
        && rule.threshold_percentage_of_runs == 0.0
    {
        return Err(ValidationError::MissingNodeThreshold);
    }

    let alert_sub_type = if matches!(alert_type.id, ALERT_TEST_FAILURE | ALERT_HOST_FAILURE) {
        IdName::default()
    } else {
        ALERT_SUB_TYPES
            .pair(&rule.alert_sub_type)
            .ok_or_else(|| ValidationError::AlertSubTypeRequired(alert_type.name.clone()))?
    };

    Ok(AlertRuleConfig {
        node_threshold_type,
        threshold_number_of_runs: rule.threshold_number_of_runs,
        threshold_percentage_of_runs: rule.threshold_percentage_of_runs,
        number_of_failing_nodes: rule.number_of_failing_nodes,
        enable_consecutive: rule.enable_consecutive,
        consecutive_number_of_runs: rule.consecutive_number_of_runs,
        trigger_type,
        operation_type: operation_type.unwrap_or_default(),
        statistical_type,
        historical_interval,
        warning_trigger: rule.warning_trigger,
        critical_trigger: rule.critical_trigger,
        expression: rule.expression.clone(),
        warning_reminder,
        critical_reminder,
        threshold_interval,
        use_rolling_window: rule.use_rolling_window,
        notification_type,
        alert_type,
        alert_sub_type,
        enforce_test_failure: rule.enforce_test_failure,
        omit_scatterplot: rule.omit_scatterplot,
        notification_groups: rule.notification_group.iter().map(recipients).collect(),
    })
}

pub fn set_alert_settings(
    block: &AlertSettingsBlock,
    config: &mut TestConfig,
) -> Result<(), ValidationError> {
    config.alert.rules = block
        .alert_rule
        .iter()
        .map(set_alert_rule)
        .collect::<Result<_, _>>()?;

    let notification = block
        .notification_group
        .clone()
        .unwrap_or_else(AlertNotificationBlock::default);
    config.alert.webhook_ids = notification.alert_webhook_ids;
    config.alert.emails = notification.recipient_email_ids;
    config.alert.contact_groups = notification.contact_groups;
    config.alert.subject = notification.subject;
    config.alert.setting_type = SettingType::Override;

    Ok(())
}

fn check_range(field: &'static str, value: i32, (min, max): (i64, i64)) -> Result<(), ValidationError> {
    let value = i64::from(value);
    if value != 0 && !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

pub fn set_advanced_settings(
    block: &AdvancedSettingsBlock,
    config: &mut TestConfig,
) -> Result<(), ValidationError> {
    let test_type = config.test_type;
    let advanced = &mut config.advanced;

    advanced.applied_test_flags = block
        .applied_test_flags
        .iter()
        .map(|flag| TEST_FLAGS.resolve(flag).map(|pair| pair.id))
        .collect::<Result<_, _>>()?;

    if test_type.is_browser() {
        advanced.max_step_runtime_sec_override = block.enforce_test_failure_if_runs_longer_than;
        advanced.viewport_height = block.viewport_height;
        advanced.viewport_width = block.viewport_width;
        if block.has_flag(FLAG_STOP_TEST_ON_DOCUMENT_COMPLETE) {
            advanced.wait_for_no_activity = Some(block.wait_for_no_activity);
        }
        if !block.bandwidth_throttling.is_empty() {
            advanced.bandwidth_throttling = BANDWIDTH_THROTTLING.resolve(&block.bandwidth_throttling)?;
        }
    }

    if test_type == TestType::Dns {
        advanced.edns_subnet = block.edns_subnet.clone();
    }

    if test_type.supports_additional_monitor() && !block.additional_monitor.is_empty() {
        advanced.additional_monitor = ADDITIONAL_MONITORS.resolve(&block.additional_monitor)?;
    }

    if test_type == TestType::Traceroute {
        check_range("ping_count", block.ping_count, PING_COUNT_RANGE)?;
        check_range("failure_hop_count", block.failure_hop_count, FAILURE_HOP_COUNT_RANGE)?;
        advanced.ping_count = block.ping_count;
        advanced.failure_hop_count = block.failure_hop_count;
    }

    advanced.setting_type = SettingType::Override;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AuthenticationBlock, HeaderValueBlock};
    use indexmap::IndexMap;

    fn schedule(frequency: &str, node_ids: Vec<i64>, node_group_ids: Vec<i64>) -> ScheduleSettingsBlock {
        ScheduleSettingsBlock {
            frequency: frequency.into(),
            node_distribution: "random".into(),
            node_ids,
            node_group_ids,
            ..Default::default()
        }
    }

    fn availability_rule() -> AlertRuleBlock {
        AlertRuleBlock {
            node_threshold_type: "runs".into(),
            threshold_number_of_runs: 2,
            alert_type: "availability".into(),
            alert_sub_type: "test".into(),
            operation_type: "less than".into(),
            warning_trigger: 90.0,
            critical_trigger: 80.0,
            ..Default::default()
        }
    }

    #[test]
    fn schedule_resolves_names() {
        let mut config = TestConfig::new(TestType::Web);
        let mut block = schedule("5 minutes", vec![101, 102], vec![]);
        block.no_of_subset_nodes = 0;
        set_schedule_settings(&block, &mut config).unwrap();

        assert_eq!(config.schedule.setting_type, SettingType::Override);
        assert_eq!(config.schedule.frequency, IdName::new(2, "5 minutes"));
        assert_eq!(config.schedule.node_distribution, IdName::new(0, "random"));
        assert_eq!(config.schedule.node_ids, vec![101, 102]);
        assert_eq!(config.schedule.no_of_subset_nodes, 0);
    }

    #[test]
    fn schedule_needs_nodes_and_a_known_frequency() {
        let mut config = TestConfig::new(TestType::Web);
        assert_eq!(
            set_schedule_settings(&schedule("5 minutes", vec![], vec![]), &mut config),
            Err(ValidationError::MissingNodes)
        );
        set_schedule_settings(&schedule("none", vec![1], vec![]), &mut config).unwrap();
        assert_eq!(config.schedule.frequency, IdName::new(0, "none"));
        assert!(matches!(
            set_schedule_settings(&schedule("7 minutes", vec![1], vec![]), &mut config),
            Err(ValidationError::UnknownName(_))
        ));
        assert!(set_schedule_settings(&schedule("1 minute", vec![], vec![9]), &mut config).is_ok());
    }

    #[test]
    fn alert_rule_fallbacks() {
        let mut rule = availability_rule();
        rule.warning_reminder = "every now and then".into();
        rule.trigger_type = "bogus".into();
        let config = set_alert_rule(&rule).unwrap();

        assert_eq!(config.warning_reminder, IdName::new(0, "none"));
        assert_eq!(config.threshold_interval, IdName::new(0, "default"));
        assert_eq!(config.trigger_type, IdName::new(1, "specific value"));
        assert_eq!(config.operation_type, IdName::new(4, "less than"));
        assert_eq!(config.alert_sub_type, IdName::new(140, "test"));
        assert_eq!(config.statistical_type, IdName::default());
    }

    #[test]
    fn operation_type_rules() {
        let mut rule = availability_rule();
        rule.operation_type.clear();
        assert_eq!(
            set_alert_rule(&rule),
            Err(ValidationError::OperationTypeRequired("availability".into()))
        );

        rule.trigger_type = "trendshift".into();
        assert_eq!(set_alert_rule(&rule).unwrap().operation_type, IdName::new(0, "not equals"));

        let failure = AlertRuleBlock {
            node_threshold_type: "runs".into(),
            threshold_number_of_runs: 1,
            alert_type: "test failure".into(),
            operation_type: "greater than".into(),
            ..Default::default()
        };
        let config = set_alert_rule(&failure).unwrap();
        assert_eq!(config.operation_type.id, 0);
        assert_eq!(config.alert_sub_type, IdName::default());
    }

    #[test]
    fn trailing_value_carries_statistics() {
        let mut rule = availability_rule();
        rule.trigger_type = "trailing value".into();
        rule.statistical_type = "average".into();
        rule.historical_interval = "1 day".into();
        let config = set_alert_rule(&rule).unwrap();

        assert_eq!(config.statistical_type, IdName::new(1, "average"));
        assert_eq!(config.historical_interval, IdName::new(1440, "1 day"));
    }

    #[test]
    fn trailing_value_falls_back_to_average_over_five_minutes() {
        for value in ["", "median"] {
            let mut rule = availability_rule();
            rule.trigger_type = "trailing value".into();
            rule.statistical_type = value.into();
            rule.historical_interval = if value.is_empty() { "" } else { "3 minutes" }.into();
            let config = set_alert_rule(&rule).unwrap();

            assert_eq!(config.statistical_type, IdName::new(1, "average"));
            assert_eq!(config.historical_interval, IdName::new(5, "5 minutes"));
        }
    }

    #[test]
    fn unmatched_names_fall_back() {
        let cases: [(fn(&mut AlertRuleBlock), fn(&AlertRuleConfig) -> i32, i32); 5] = [
            (|r| r.warning_reminder = "sometimes".into(), |c| c.warning_reminder.id, 0),
            (|r| r.critical_reminder = "sometimes".into(), |c| c.critical_reminder.id, 0),
            (|r| r.threshold_interval = "a while".into(), |c| c.threshold_interval.id, 0),
            (|r| r.notification_type = "pager".into(), |c| c.notification_type.id, 0),
            (|r| r.trigger_type = "gut feeling".into(), |c| c.trigger_type.id, TRIGGER_SPECIFIC_VALUE),
        ];
        for (unmatched, field, expected) in cases {
            let mut rule = availability_rule();
            unmatched(&mut rule);
            let config = set_alert_rule(&rule).unwrap();
            assert_eq!(field(&config), expected);
        }
    }

    #[test]
    fn insight_ids_must_fit_the_wire() {
        let mut config = TestConfig::new(TestType::Web);
        let block = InsightsBlock {
            tracepoint_ids: vec![4],
            indicator_ids: vec![i64::from(i32::MAX) + 1],
        };
        assert!(matches!(
            set_insights(&block, &mut config),
            Err(ValidationError::OutOfRange {
                field: "indicator_ids",
                ..
            })
        ));

        let block = InsightsBlock {
            tracepoint_ids: vec![4],
            indicator_ids: vec![9],
        };
        set_insights(&block, &mut config).unwrap();
        assert_eq!(config.insights.tracepoint_ids, vec![4]);
        assert_eq!(config.insights.indicator_ids, vec![9]);
    }

    #[test]
    fn node_threshold_and_sub_type_are_required() {
        let mut rule = availability_rule();
        rule.threshold_number_of_runs = 0;
        assert_eq!(set_alert_rule(&rule), Err(ValidationError::MissingNodeThreshold));

        rule.node_threshold_type = "average across nodes".into();
        assert!(set_alert_rule(&rule).is_ok());

        rule.alert_sub_type.clear();
        assert_eq!(
            set_alert_rule(&rule),
            Err(ValidationError::AlertSubTypeRequired("availability".into()))
        );
    }

    #[test]
    fn alert_settings_collects_recipients() {
        let mut config = TestConfig::new(TestType::Web);
        let mut rule = availability_rule();
        rule.notification_group = vec![RuleNotificationBlock {
            notify_on_critical: true,
            recipient_email_ids: vec!["ops@example.com".into()],
            contact_groups: vec!["oncall".into()],
            ..Default::default()
        }];
        let block = AlertSettingsBlock {
            alert_rule: vec![rule],
            notification_group: Some(AlertNotificationBlock {
                subject: "heads up".into(),
                alert_webhook_ids: vec![77],
                recipient_email_ids: vec!["lead@example.com".into()],
                contact_groups: vec![],
            }),
        };

        set_alert_settings(&block, &mut config).unwrap();

        assert_eq!(config.alert.setting_type, SettingType::Override);
        assert_eq!(config.alert.webhook_ids, vec![77]);
        assert_eq!(config.alert.subject, "heads up");
        assert_eq!(config.alert.rules[0].notification_groups[0].contact_groups, vec!["oncall"]);
    }

    #[test]
    fn request_headers_follow_table_order() {
        let mut headers = IndexMap::new();
        headers.insert(
            "referer".to_string(),
            HeaderValueBlock {
                value: "https://example.com".into(),
                child_host_pattern: String::new(),
            },
        );
        headers.insert(
            "accept".to_string(),
            HeaderValueBlock {
                value: String::new(),
                child_host_pattern: String::new(),
            },
        );
        headers.insert(
            "user_agent".to_string(),
            HeaderValueBlock {
                value: "probe".into(),
                child_host_pattern: "*.cdn.example.com".into(),
            },
        );
        let block = RequestSettingsBlock {
            authentication: Some(AuthenticationBlock {
                authentication_type: "ntlm".into(),
                password_ids: vec![5],
            }),
            token_ids: vec![3],
            http_request_headers: headers,
            ..Default::default()
        };
        let mut config = TestConfig::new(TestType::Web);

        set_request_settings(&block, &mut config).unwrap();

        let names: Vec<_> = config.request.headers.iter().map(|h| h.header_type.name.as_str()).collect();
        assert_eq!(names, vec!["user_agent", "referer"]);
        assert_eq!(config.request.authentication_type, IdName::new(3, "ntlm"));
        assert_eq!(config.request.password_ids, vec![5]);
        assert_eq!(config.request.token_ids, vec![3]);
    }

    #[test]
    fn request_settings_reject_unknown_names() {
        let mut config = TestConfig::new(TestType::Web);
        let block = RequestSettingsBlock {
            authentication: Some(AuthenticationBlock {
                authentication_type: "kerberos".into(),
                password_ids: vec![],
            }),
            ..Default::default()
        };
        assert!(set_request_settings(&block, &mut config).is_err());

        let mut headers = IndexMap::new();
        headers.insert("x_custom".to_string(), HeaderValueBlock::default());
        let block = RequestSettingsBlock {
            http_request_headers: headers,
            ..Default::default()
        };
        assert!(set_request_settings(&block, &mut config).is_err());
    }

    #[test]
    fn advanced_settings_per_type() {
        let block = AdvancedSettingsBlock {
            applied_test_flags: vec!["verify_test_on_failure".into(), "stop_test_on_document_complete".into()],
            enforce_test_failure_if_runs_longer_than: 30,
            wait_for_no_activity: 1000,
            viewport_height: 768,
            edns_subnet: "10.0.0.0/24".into(),
            additional_monitor: "ping tcp".into(),
            bandwidth_throttling: "wifi".into(),
            ping_count: 5,
            ..Default::default()
        };

        let mut web = TestConfig::new(TestType::Web);
        set_advanced_settings(&block, &mut web).unwrap();
        assert_eq!(web.advanced.applied_test_flags, vec![2, 25]);
        assert_eq!(web.advanced.max_step_runtime_sec_override, 30);
        assert_eq!(web.advanced.wait_for_no_activity, Some(1000));
        assert_eq!(web.advanced.bandwidth_throttling, IdName::new(8, "wifi"));
        assert_eq!(web.advanced.additional_monitor, IdName::new(11, "ping tcp"));
        assert_eq!(web.advanced.edns_subnet, "");
        assert_eq!(web.advanced.ping_count, 0);

        let mut dns = TestConfig::new(TestType::Dns);
        set_advanced_settings(&block, &mut dns).unwrap();
        assert_eq!(dns.advanced.edns_subnet, "10.0.0.0/24");
        assert_eq!(dns.advanced.wait_for_no_activity, None);
        assert_eq!(dns.advanced.viewport_height, 0);

        let mut traceroute = TestConfig::new(TestType::Traceroute);
        set_advanced_settings(&block, &mut traceroute).unwrap();
        assert_eq!(traceroute.advanced.ping_count, 5);
        assert_eq!(traceroute.advanced.additional_monitor, IdName::default());
        assert_eq!(traceroute.advanced.setting_type, SettingType::Override);
    }

    #[test]
    fn traceroute_counts_are_bounded() {
        let block = AdvancedSettingsBlock {
            failure_hop_count: 3,
            ..Default::default()
        };
        let mut config = TestConfig::new(TestType::Traceroute);
        assert_eq!(
            set_advanced_settings(&block, &mut config),
            Err(ValidationError::OutOfRange {
                field: "failure_hop_count",
                value: 3,
                min: 7,
                max: 20
            })
        );
    }

    #[test]
    fn wait_for_no_activity_requires_flag() {
        let block = AdvancedSettingsBlock {
            wait_for_no_activity: 500,
            ..Default::default()
        };
        let mut config = TestConfig::new(TestType::Playwright);
        set_advanced_settings(&block, &mut config).unwrap();
        assert_eq!(config.advanced.wait_for_no_activity, None);
    }

    #[test]
    fn request_data_placeholder_id() {
        let mut config = TestConfig::new(TestType::Api);
        set_request_data("open https://example.com", IdName::new(25, "api"), IdName::new(1, "selenium"), &mut config);
        assert_eq!(config.script.test_id, 1);
        assert_eq!(config.script.test_type, IdName::new(9, "API"));
        assert_eq!(config.script.request_data, "open https://example.com");
    }
}
