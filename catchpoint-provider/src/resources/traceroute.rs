use super::{NETWORK_BLOCKS, TestResource};
use crate::errors::{Result, ValidationError};
use crate::flatten::{flatten_blocks, flatten_common, monitor_name};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::TestType;
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

fn default_monitor() -> String {
    "traceroute icmp".to_string()
}

/// Hop-by-hop route to a host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TracerouteTest {
    #[serde(flatten)]
    pub common: TestCommon,
    #[serde(default = "default_monitor")]
    pub monitor: String,
    /// Host or address to trace to.
    pub test_location: String,
    #[serde(flatten)]
    pub blocks: SettingBlocks,
}

impl TestResource for TracerouteTest {
    const RESOURCE_TYPE: &'static str = "traceroute_test";
    const TEST_TYPE: TestType = TestType::Traceroute;
    const MONITORS: &'static [&'static str] = &["traceroute icmp", "traceroute udp", "traceroute tcp"];
    const BLOCKS: &'static [Block] = NETWORK_BLOCKS;

    fn common(&self) -> &TestCommon {
        &self.common
    }

    fn blocks(&self) -> &SettingBlocks {
        &self.blocks
    }

    fn monitor(&self) -> &str {
        &self.monitor
    }

    fn validate_target(&self) -> Result<(), ValidationError> {
        if self.test_location.is_empty() {
            return Err(ValidationError::Required("test_location"));
        }
        Ok(())
    }

    fn apply_target(&self, config: &mut TestConfig) -> Result<(), ValidationError> {
        config.test_url = self.test_location.clone();
        Ok(())
    }

    fn from_test(test: &Test) -> Self {
        TracerouteTest {
            common: flatten_common(test),
            monitor: monitor_name(test),
            test_location: test.url.clone(),
            blocks: flatten_blocks(test, Self::BLOCKS),
        }
    }

    fn target_patches(
        &self,
        prior: &Self,
        _config: &TestConfig,
        patches: &mut Vec<PatchOperation>,
    ) -> Result<()> {
        if self.test_location != prior.test_location {
            patches.push(PatchOperation::field(FieldPath::Url, &self.test_location));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_test;
    use chrono::Utc;

    fn traceroute() -> TracerouteTest {
        serde_yaml::from_str(
            r#"
            division_id: 1000
            product_id: 5000
            test_name: edge route
            monitor: traceroute udp
            test_location: edge.example.com
            advanced_settings:
              ping_count: 5
              failure_hop_count: 10
            "#,
        )
        .unwrap()
    }

    #[test]
    fn hop_settings_round_trip() {
        let test = build_test(&traceroute().to_test_config().unwrap(), Utc::now());
        assert_eq!(test.monitor.id, 14);
        assert_eq!(test.url, "edge.example.com");

        let flat = TracerouteTest::from_test(&test);
        let advanced = flat.blocks.advanced_settings.unwrap();
        assert_eq!(advanced.ping_count, 5);
        assert_eq!(advanced.failure_hop_count, 10);
    }

    #[test]
    fn hop_count_out_of_range() {
        let mut traceroute = traceroute();
        if let Some(advanced) = traceroute.blocks.advanced_settings.as_mut() {
            advanced.failure_hop_count = 40;
        }
        assert!(matches!(
            traceroute.validate(),
            Err(ValidationError::OutOfRange { field: "failure_hop_count", .. })
        ));
    }

    #[test]
    fn location_patch() {
        let prior = traceroute();
        let mut desired = prior.clone();
        desired.test_location = "198.51.100.7".into();

        let patches = desired.patches(&prior).unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].path, "/url");
        assert_eq!(patches[0].value, "198.51.100.7");
    }
}
