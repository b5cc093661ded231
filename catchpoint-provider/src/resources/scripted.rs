//! Playwright and Puppeteer tests. Both run a script of their own flavour in
//! a browser and share everything apart from the names.

use super::browser::{apply_device, apply_script, device_patches, script_patches};
use super::{ALL_BLOCKS, TestResource, check_allowed};
use crate::errors::{Result, ValidationError};
use crate::flatten::{
    chrome_version_name, flatten_blocks, flatten_common, monitor_name, script, simulate_device_name,
};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::test_config::TestConfig;
use catchpoint_api::enums::TestType;
use catchpoint_api::{FieldPath, PatchOperation, Test};
use serde::{Deserialize, Serialize};

const STEP_RUNTIME_LIMITS: &[i32] = &[5, 10, 15, 20, 30, 60, 90, 120];

/// Advanced setting values the scripted monitors accept.
fn check_advanced(resource: &'static str, blocks: &SettingBlocks) -> Result<(), ValidationError> {
    let Some(advanced) = &blocks.advanced_settings else {
        return Ok(());
    };
    let runtime = advanced.enforce_test_failure_if_runs_longer_than;
    if runtime != 0 && !STEP_RUNTIME_LIMITS.contains(&runtime) {
        return Err(ValidationError::NotAllowed {
            resource,
            field: "enforce_test_failure_if_runs_longer_than",
            value: runtime.to_string(),
            allowed: join(STEP_RUNTIME_LIMITS.iter()),
        });
    }
    let wait = advanced.wait_for_no_activity;
    if wait % 500 != 0 || !(0..=5000).contains(&wait) {
        return Err(ValidationError::NotAllowed {
            resource,
            field: "wait_for_no_activity",
            value: wait.to_string(),
            allowed: join((0..=5000).step_by(500).collect::<Vec<_>>().iter()),
        });
    }
    Ok(())
}

fn join<'a>(values: impl Iterator<Item = &'a i32>) -> String {
    values.map(i32::to_string).collect::<Vec<_>>().join(", ")
}

macro_rules! scripted_test {
    (
        $(#[$meta:meta])*
        $module:ident::$name:ident,
        resource = $resource:literal,
        test_type = $test_type:expr,
        monitor = $monitor:literal,
        script_type = $script_type:literal $(,)?
    ) => {
        mod $module {
            use super::*;

            fn default_monitor() -> String {
                $monitor.to_string()
            }

            fn default_script_type() -> String {
                $script_type.to_string()
            }

            $(#[$meta])*
            #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
            pub struct $name {
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

            impl TestResource for $name {
                const RESOURCE_TYPE: &'static str = $resource;
                const TEST_TYPE: TestType = $test_type;
                const MONITORS: &'static [&'static str] = &[$monitor, "chrome"];
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
                    check_allowed(
                        Self::RESOURCE_TYPE,
                        "test_script_type",
                        &self.test_script_type,
                        &[$script_type],
                    )?;
                    check_advanced(Self::RESOURCE_TYPE, &self.blocks)
                }

                fn apply_target(&self, config: &mut TestConfig) -> Result<(), ValidationError> {
                    config.gateway_address_or_host = self.gateway_address_or_host.clone();
                    apply_device(&self.simulate, &self.chrome_version, config)?;
                    apply_script(
                        Self::RESOURCE_TYPE,
                        &self.test_script,
                        &self.test_script_type,
                        &[$script_type],
                        config,
                    )
                }

                fn from_test(test: &Test) -> Self {
                    let (test_script, test_script_type) = script(test);
                    $name {
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
                        self.test_script != prior.test_script
                            || self.test_script_type != prior.test_script_type,
                        config,
                        patches,
                    )
                }
            }
        }

        pub use $module::$name;
    };
}

scripted_test!(
    /// Browser test driven by a Playwright script.
    playwright::PlaywrightTest,
    resource = "playwright_test",
    test_type = TestType::Playwright,
    monitor = "playwright",
    script_type = "playwright",
);

scripted_test!(
    /// Browser test driven by a Puppeteer script.
    puppeteer::PuppeteerTest,
    resource = "puppeteer_test",
    test_type = TestType::Puppeteer,
    monitor = "puppeteer",
    script_type = "puppeteer",
);
