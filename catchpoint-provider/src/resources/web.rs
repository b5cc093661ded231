use super::browser::{apply_device, device_patches};
use super::{ALL_BLOCKS, TestResource};
use crate::errors::{Result, ValidationError};
use crate::flatten::{chrome_version_name, flatten_blocks, flatten_common, monitor_name, simulate_device_name};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::TestType;
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

fn default_monitor() -> String {
    "chrome".to_string()
}

/// Page load test of a single url.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebTest {
    #[serde(flatten)]
    pub common: TestCommon,
    #[serde(default = "default_monitor")]
    pub monitor: String,
    pub test_url: String,
    /// Simulated device, for the mobile monitor.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub simulate: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chrome_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gateway_address_or_host: String,
    #[serde(flatten)]
    pub blocks: SettingBlocks,
}

impl TestResource for WebTest {
    const RESOURCE_TYPE: &'static str = "web_test";
    const TEST_TYPE: TestType = TestType::Web;
    const MONITORS: &'static [&'static str] = &[
        "object",
        "emulated",
        "chrome",
        "playback",
        "mobile playback",
        "mobile",
    ];
    const BLOCKS: &'static [Block] = ALL_BLOCKS;

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
        if self.test_url.is_empty() {
            return Err(ValidationError::Required("test_url"));
        }
        Ok(())
    }

    fn apply_target(&self, config: &mut TestConfig) -> Result<(), ValidationError> {
        config.test_url = self.test_url.clone();
        config.gateway_address_or_host = self.gateway_address_or_host.clone();
        apply_device(&self.simulate, &self.chrome_version, config)
    }

    fn from_test(test: &Test) -> Self {
        WebTest {
            common: flatten_common(test),
            monitor: monitor_name(test),
            test_url: test.url.clone(),
            simulate: simulate_device_name(test),
            chrome_version: chrome_version_name(test),
            gateway_address_or_host: test.gateway_address_or_host.clone(),
            blocks: flatten_blocks(test, Self::BLOCKS),
        }
    }

    fn target_patches(
        &self,
        prior: &Self,
        config: &TestConfig,
        patches: &mut Vec<PatchOperation>,
    ) -> Result<()> {
        if self.test_url != prior.test_url {
            patches.push(PatchOperation::field(FieldPath::Url, &self.test_url));
        }
        if self.gateway_address_or_host != prior.gateway_address_or_host {
            patches.push(PatchOperation::field(
                FieldPath::GatewayAddressOrHost,
                &self.gateway_address_or_host,
            ));
        }
        device_patches(
            (&self.simulate, &self.chrome_version),
            (&prior.simulate, &prior.chrome_version),
            config,
            patches,
        );
        Ok(())
    }
}
