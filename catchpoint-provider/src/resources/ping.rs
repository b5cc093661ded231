use super::{NETWORK_BLOCKS, TestResource};
use crate::errors::{Result, ValidationError};
use crate::flatten::{flatten_blocks, flatten_common, monitor_name};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::TestType;
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

fn default_monitor() -> String {
    "ping icmp".to_string()
}

/// Reachability and round trip time of a host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PingTest {
    #[serde(flatten)]
    pub common: TestCommon,
    #[serde(default = "default_monitor")]
    pub monitor: String,
    /// Host or address to ping.
    pub test_location: String,
    #[serde(flatten)]
    pub blocks: SettingBlocks,
}

impl TestResource for PingTest {
    const RESOURCE_TYPE: &'static str = "ping_test";
    const TEST_TYPE: TestType = TestType::Ping;
    const MONITORS: &'static [&'static str] = &["ping icmp", "ping tcp", "ping udp"];
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
        PingTest {
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
