use super::TestResource;
use crate::errors::{Result, ValidationError};
use crate::flatten::{flatten_blocks, flatten_common, monitor_name};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::TestType;
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

fn default_monitor() -> String {
    "bgp".to_string()
}

/// Route announcements of an ip prefix.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BgpTest {
    #[serde(flatten)]
    pub common: TestCommon,
    #[serde(default = "default_monitor")]
    pub monitor: String,
    /// Announced prefix such as `192.0.2.0/24`.
    pub prefix: String,
    #[serde(flatten)]
    pub blocks: SettingBlocks,
}

impl TestResource for BgpTest {
    const RESOURCE_TYPE: &'static str = "bgp_test";
    const TEST_TYPE: TestType = TestType::Bgp;
    const MONITORS: &'static [&'static str] = &["bgp", "bgp basic"];
    const BLOCKS: &'static [Block] = &[Block::Labels, Block::AlertSettings];

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
        if self.prefix.is_empty() {
            return Err(ValidationError::Required("prefix"));
        }
        Ok(())
    }

    fn apply_target(&self, config: &mut TestConfig) -> Result<(), ValidationError> {
        config.test_url = self.prefix.clone();
        Ok(())
    }

    fn from_test(test: &Test) -> Self {
        BgpTest {
            common: flatten_common(test),
            monitor: monitor_name(test),
            prefix: test.url.clone(),
            blocks: flatten_blocks(test, Self::BLOCKS),
        }
    }

    fn target_patches(
        &self,
        prior: &Self,
        _config: &TestConfig,
        patches: &mut Vec<PatchOperation>,
    ) -> Result<()> {
        if self.prefix != prior.prefix {
            patches.push(PatchOperation::field(FieldPath::Url, &self.prefix));
        }
        Ok(())
    }
}
