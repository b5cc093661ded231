use super::{NETWORK_BLOCKS, TestResource};
use crate::errors::{Result, ValidationError};
use crate::flatten::{flatten_blocks, flatten_common, monitor_name, query_type_name};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::{DNS_QUERY_TYPES, TestType};
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

fn default_monitor() -> String {
    "dns experience".to_string()
}

/// Resolution of a domain, either through the full resolver chain or
/// against a single name server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DnsTest {
    #[serde(flatten)]
    pub common: TestCommon,
    #[serde(default = "default_monitor")]
    pub monitor: String,
    pub test_domain: String,
    /// Record type such as `a`, `aaaa` or `mx`.
    pub query_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dns_server: String,
    #[serde(flatten)]
    pub blocks: SettingBlocks,
}

impl TestResource for DnsTest {
    const RESOURCE_TYPE: &'static str = "dns_test";
    const TEST_TYPE: TestType = TestType::Dns;
    const MONITORS: &'static [&'static str] = &["dns experience", "dns direct"];
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
        if self.test_domain.is_empty() {
            return Err(ValidationError::Required("test_domain"));
        }
        if self.query_type.is_empty() {
            return Err(ValidationError::Required("query_type"));
        }
        Ok(())
    }

    fn apply_target(&self, config: &mut TestConfig) -> Result<(), ValidationError> {
        config.test_url = self.test_domain.clone();
        config.dns_server = self.dns_server.clone();
        config.dns_query_type = DNS_QUERY_TYPES.resolve(&self.query_type)?;
        Ok(())
    }

    fn from_test(test: &Test) -> Self {
        DnsTest {
            common: flatten_common(test),
            monitor: monitor_name(test),
            test_domain: test.url.clone(),
            query_type: query_type_name(test),
            dns_server: test.dns_server.clone(),
            blocks: flatten_blocks(test, Self::BLOCKS),
        }
    }

    fn target_patches(
        &self,
        prior: &Self,
        config: &TestConfig,
        patches: &mut Vec<PatchOperation>,
    ) -> Result<()> {
        if self.test_domain != prior.test_domain {
            patches.push(PatchOperation::field(FieldPath::Url, &self.test_domain));
        }
        if self.query_type != prior.query_type {
            patches.push(PatchOperation::field(
                FieldPath::DnsQueryType,
                config.dns_query_type.id,
            ));
        }
        if self.dns_server != prior.dns_server {
            patches.push(PatchOperation::field(FieldPath::DnsServer, &self.dns_server));
        }
        Ok(())
    }
}
