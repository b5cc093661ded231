use super::browser::{apply_script, script_patches};
use super::{ALL_BLOCKS, TestResource};
use crate::errors::{Result, ValidationError};
use crate::flatten::{flatten_blocks, flatten_common, monitor_name, script};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::TestType;
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

const SCRIPT_TYPES: &[&str] = &["selenium", "javascript"];

fn default_monitor() -> String {
    "api".to_string()
}

fn default_script_type() -> String {
    "selenium".to_string()
}

/// Scripted API test.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiTest {
    #[serde(flatten)]
    pub common: TestCommon,
    #[serde(default = "default_monitor")]
    pub monitor: String,
    pub test_script: String,
    #[serde(default = "default_script_type")]
    pub test_script_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gateway_address_or_host: String,
    #[serde(flatten)]
    pub blocks: SettingBlocks,
}

impl TestResource for ApiTest {
    const RESOURCE_TYPE: &'static str = "api_test";
    const TEST_TYPE: TestType = TestType::Api;
    const MONITORS: &'static [&'static str] = &["api"];
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
        ApiTest {
            common: flatten_common(test),
            monitor: monitor_name(test),
            test_script,
            test_script_type,
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
        script_patches(
            self.test_script != prior.test_script || self.test_script_type != prior.test_script_type,
            config,
            patches,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_test;
    use chrono::Utc;
    use serde_json::json;

    fn api_test() -> ApiTest {
        serde_yaml::from_str(
            r#"
            division_id: 1000
            product_id: 5000
            test_name: orders api
            test_script: |
              open("https://api.example.com/orders")
            "#,
        )
        .unwrap()
    }

    #[test]
    fn request_data_is_sent() {
        let test = build_test(&api_test().to_test_config().unwrap(), Utc::now());
        let value = serde_json::to_value(&test).unwrap();

        assert_eq!(value["testType"], json!({"id": 9, "name": "API"}));
        assert_eq!(
            value["testRequestData"],
            json!({
                "testId": 1,
                "requestData": "open(\"https://api.example.com/orders\")\n",
                "transactionScriptType": {"id": 1, "name": "selenium"},
                "testType": {"id": 9, "name": "API"},
                "monitor": {"id": 25, "name": "api"}
            })
        );
    }

    #[test]
    fn flattens_script() {
        let test = build_test(&api_test().to_test_config().unwrap(), Utc::now());
        let flat = ApiTest::from_test(&test);
        assert_eq!(flat.test_script, api_test().test_script);
        assert_eq!(flat.test_script_type, "selenium");
    }

    #[test]
    fn script_change_replaces_request_data() {
        let prior = api_test();
        let mut desired = prior.clone();
        desired.test_script_type = "javascript".into();

        let patches = desired.patches(&prior).unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].path, "/testRequestData");
        assert_eq!(patches[0].value["transactionScriptType"]["id"], 2);
    }
}
