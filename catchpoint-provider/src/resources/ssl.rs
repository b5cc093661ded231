use super::{NETWORK_BLOCKS, TestResource};
use crate::errors::{Result, ValidationError};
use crate::flatten::{flatten_blocks, flatten_common, monitor_name};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::TestType;
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

fn default_monitor() -> String {
    "ssl".to_string()
}

/// Certificate and handshake check of an https endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SslTest {
    #[serde(flatten)]
    pub common: TestCommon,
    #[serde(default = "default_monitor")]
    pub monitor: String,
    pub test_url: String,
    #[serde(flatten)]
    pub blocks: SettingBlocks,
}

impl TestResource for SslTest {
    const RESOURCE_TYPE: &'static str = "ssl_test";
    const TEST_TYPE: TestType = TestType::Ssl;
    const MONITORS: &'static [&'static str] = &["ssl"];
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
        if self.test_url.is_empty() {
            return Err(ValidationError::Required("test_url"));
        }
        Ok(())
    }

    fn apply_target(&self, config: &mut TestConfig) -> Result<(), ValidationError> {
        config.test_url = self.test_url.clone();
        Ok(())
    }

    fn from_test(test: &Test) -> Self {
        SslTest {
            common: flatten_common(test),
            monitor: monitor_name(test),
            test_url: test.url.clone(),
            blocks: flatten_blocks(test, Self::BLOCKS),
        }
    }

    fn target_patches(
        &self,
        prior: &Self,
        _config: &TestConfig,
        patches: &mut Vec<PatchOperation>,
    ) -> Result<()> {
        if self.test_url != prior.test_url {
            patches.push(PatchOperation::field(FieldPath::Url, &self.test_url));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AdvancedSettingsBlock;

    fn ssl() -> SslTest {
        serde_yaml::from_str(
            "division_id: 1000\nproduct_id: 5000\ntest_name: cert\ntest_url: https://example.com\n",
        )
        .unwrap()
    }

    #[test]
    fn additional_monitor() {
        let mut ssl = ssl();
        ssl.blocks.advanced_settings = Some(AdvancedSettingsBlock {
            additional_monitor: "ping tcp".into(),
            ..Default::default()
        });
        let config = ssl.to_test_config().unwrap();
        assert_eq!(config.monitor.id, 31);
        assert_eq!(config.advanced.additional_monitor.id, 11);

        if let Some(advanced) = ssl.blocks.advanced_settings.as_mut() {
            advanced.additional_monitor = "carrier pigeon".into();
        }
        assert!(matches!(
            ssl.validate(),
            Err(ValidationError::UnknownName(_))
        ));
    }

    #[test]
    fn url_is_required() {
        let mut ssl = ssl();
        ssl.test_url.clear();
        assert_eq!(ssl.validate(), Err(ValidationError::Required("test_url")));
    }
}
