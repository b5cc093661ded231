use super::browser::{apply_device, apply_script, device_patches, script_patches};
use super::{ALL_BLOCKS, TestResource};
use crate::errors::{Result, ValidationError};
use crate::flatten::{
    chrome_version_name, flatten_blocks, flatten_common, monitor_name, script, simulate_device_name,
};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::TestType;
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

const SCRIPT_TYPES: &[&str] = &["selenium", "javascript"];

fn default_monitor() -> String {
    "chrome".to_string()
}

fn default_script_type() -> String {
    "selenium".to_string()
}

/// Multi-step browser transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransactionTest {
    #[serde(flatten)]
    pub common: TestCommon,
    #[serde(default = "default_monitor")]
    pub monitor: String,
    pub test_script: String,
    #[serde(default = "default_script_type")]
    pub test_script_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub simulate: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chrome_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gateway_address_or_host: String,
    #[serde(flatten)]
    pub blocks: SettingBlocks,
}

impl TestResource for TransactionTest {
    const RESOURCE_TYPE: &'static str = "transaction_test";
    const TEST_TYPE: TestType = TestType::Transaction;
    const MONITORS: &'static [&'static str] = &["chrome", "playback", "mobile playback", "emulated"];
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

    fn apply_target(&self, config: &mut TestConfig) -> Result<(), ValidationError> {
        config.gateway_address_or_host = self.gateway_address_or_host.clone();
        apply_device(&self.simulate, &self.chrome_version, config)?;
        apply_script(
            Self::RESOURCE_TYPE,
            &self.test_script,
            &self.test_script_type,
            SCRIPT_TYPES,
            config,
        )
    }

    fn from_test(test: &Test) -> Self {
        let (test_script, test_script_type) = script(test);
        TransactionTest {
            common: flatten_common(test),
            monitor: monitor_name(test),
            test_script,
            test_script_type,
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
        script_patches(
            self.test_script != prior.test_script || self.test_script_type != prior.test_script_type,
            config,
            patches,
        )
    }
}
