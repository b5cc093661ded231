//! One typed resource per test kind, plus the operations they share.
//!
//! A resource only knows how to map its own target fields; everything common
//! to all kinds (identity, status, schedule, alerts, ...) goes through the
//! provided methods of [`TestResource`] and the generic [`create`], [`read`],
//! [`update`] and [`delete`] operations.

mod api;
mod bgp;
mod browser;
mod dns;
mod ping;
mod scripted;
mod ssl;
mod traceroute;
mod transaction;
mod web;

pub use api::ApiTest;
pub use bgp::BgpTest;
pub use dns::DnsTest;
pub use ping::PingTest;
pub use scripted::{PlaywrightTest, PuppeteerTest};
pub use ssl::SslTest;
pub use traceroute::TracerouteTest;
pub use transaction::TransactionTest;
pub use web::WebTest;

use crate::builder::{build_test, section_patch};
use crate::errors::{ProviderError, Result, ValidationError};
use crate::metrics_defs::{RESOURCE_OPERATIONS, VALIDATION_FAILURES};
use crate::schema::{Block, SettingBlocks, TestCommon};
use crate::setters::apply_blocks;
use crate::test_config::TestConfig;
use catchpoint_api::enums::{MONITORS, TEST_STATUSES, TestType};
use catchpoint_api::{FieldPath, PatchOperation, Section, Test, TestId, TestsApi};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::counter;
use std::fmt;
use std::str::FromStr;

/// Blocks every browser and script driven kind accepts.
pub(crate) const ALL_BLOCKS: &[Block] = Block::ALL;

/// Blocks of the network level kinds (dns, traceroute, ping, ssl).
pub(crate) const NETWORK_BLOCKS: &[Block] = &[
    Block::Labels,
    Block::Thresholds,
    Block::ScheduleSettings,
    Block::AlertSettings,
    Block::AdvancedSettings,
];

pub trait TestResource:
    Serialize + DeserializeOwned + Clone + fmt::Debug + PartialEq + Send + Sync
{
    /// Resource type name, as used in documents (`web_test`, ...).
    const RESOURCE_TYPE: &'static str;
    const TEST_TYPE: TestType;
    /// Monitor names this kind accepts.
    const MONITORS: &'static [&'static str];
    const BLOCKS: &'static [Block];

    fn common(&self) -> &TestCommon;

    fn blocks(&self) -> &SettingBlocks;

    fn monitor(&self) -> &str;

    /// Kind specific checks that need no code table lookups.
    fn validate_target(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Copies the kind specific fields into `config`. Runs after the common
    /// fields and the monitor are set.
    fn apply_target(&self, config: &mut TestConfig) -> Result<(), ValidationError>;

    fn from_test(test: &Test) -> Self;

    /// Patches for the kind specific fields that differ from `prior`.
    fn target_patches(
        &self,
        prior: &Self,
        config: &TestConfig,
        patches: &mut Vec<PatchOperation>,
    ) -> Result<()>;

    /// Shape checks: allowed monitor, supported blocks, required fields.
    fn check(&self) -> Result<(), ValidationError> {
        check_allowed(
            Self::RESOURCE_TYPE,
            "monitor",
            self.monitor(),
            Self::MONITORS,
        )?;
        for block in Block::ALL {
            if self.blocks().is_present(*block) && !Self::BLOCKS.contains(block) {
                return Err(ValidationError::UnsupportedBlock {
                    block: block.name(),
                    resource: Self::RESOURCE_TYPE,
                });
            }
        }
        if self.common().test_name.is_empty() {
            return Err(ValidationError::Required("test_name"));
        }
        self.validate_target()
    }

    fn to_test_config(&self) -> Result<TestConfig, ValidationError> {
        self.check()?;

        let mut config = TestConfig::new(Self::TEST_TYPE);
        apply_common(self.common(), &mut config)?;
        config.monitor = MONITORS.resolve(self.monitor())?;
        self.apply_target(&mut config)?;
        apply_blocks(self.blocks(), &mut config)?;
        Ok(config)
    }

    /// Every check a create would run, without sending anything.
    fn validate(&self) -> Result<(), ValidationError> {
        self.to_test_config().map(|_| ())
    }

    /// The patch array turning `prior` into `self`. Empty when nothing
    /// changed.
    fn patches(&self, prior: &Self) -> Result<Vec<PatchOperation>> {
        let config = self.to_test_config()?;
        let mut patches = Vec::new();

        common_patches(self.common(), prior.common(), &config, &mut patches);
        if self.monitor() != prior.monitor() {
            patches.push(PatchOperation::field(FieldPath::Monitor, config.monitor.id));
        }
        self.target_patches(prior, &config, &mut patches)?;
        block_patches(self.blocks(), prior.blocks(), Self::BLOCKS, &config, &mut patches)?;

        Ok(patches)
    }
}

pub(crate) fn check_allowed(
    resource: &'static str,
    field: &'static str,
    value: &str,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::NotAllowed {
        resource,
        field,
        value: value.to_string(),
        allowed: allowed.join(", "),
    })
}

fn apply_common(common: &TestCommon, config: &mut TestConfig) -> Result<(), ValidationError> {
    config.division_id = common.division_id;
    config.product_id = common.product_id;
    config.folder_id = common.folder_id;
    config.test_name = common.test_name.clone();
    config.test_description = common.test_description.clone();
    config.enable_test_data_webhook = common.enable_test_data_webhook;
    config.alerts_paused = common.alerts_paused;
    config.start_time = common.start_time.clone();
    config.end_time = common.end_time.clone();
    config.status = TEST_STATUSES.resolve(&common.status)?;
    Ok(())
}

fn common_patches(
    desired: &TestCommon,
    prior: &TestCommon,
    config: &TestConfig,
    patches: &mut Vec<PatchOperation>,
) {
    if desired.test_name != prior.test_name {
        patches.push(PatchOperation::field(FieldPath::Name, &desired.test_name));
    }
    if desired.test_description != prior.test_description {
        patches.push(PatchOperation::field(
            FieldPath::Description,
            &desired.test_description,
        ));
    }
    if desired.enable_test_data_webhook != prior.enable_test_data_webhook {
        patches.push(PatchOperation::field(
            FieldPath::EnableTestDataWebhook,
            desired.enable_test_data_webhook,
        ));
    }
    if desired.alerts_paused != prior.alerts_paused {
        patches.push(PatchOperation::field(
            FieldPath::AlertsPaused,
            desired.alerts_paused,
        ));
    }
    // An empty start time means "whenever it was created".
    if !desired.start_time.is_empty() && desired.start_time != prior.start_time {
        patches.push(PatchOperation::field(FieldPath::StartTime, &desired.start_time));
    }
    if desired.end_time != prior.end_time {
        patches.push(PatchOperation::field(FieldPath::EndTime, &desired.end_time));
    }
    if desired.status != prior.status {
        patches.push(PatchOperation::field(FieldPath::Status, config.status.id));
    }
}

fn section_of(block: Block) -> Section {
    match block {
        Block::Labels => Section::Labels,
        Block::Thresholds => Section::Thresholds,
        Block::RequestSettings => Section::RequestSettings,
        Block::Insights => Section::InsightData,
        Block::ScheduleSettings => Section::ScheduleSettings,
        Block::AlertSettings => Section::AlertGroup,
        Block::AdvancedSettings => Section::AdvancedSettings,
    }
}

/// Whole-section replacements for every supported block that changed.
fn block_patches(
    desired: &SettingBlocks,
    prior: &SettingBlocks,
    supported: &[Block],
    config: &TestConfig,
    patches: &mut Vec<PatchOperation>,
) -> Result<()> {
    for block in supported {
        if desired.differs(prior, *block) {
            patches.push(section_patch(config, section_of(*block))?);
        }
    }
    Ok(())
}

fn validated_config<R: TestResource>(resource: &R) -> Result<TestConfig> {
    resource.to_test_config().map_err(|err| {
        counter!(VALIDATION_FAILURES, "resource" => R::RESOURCE_TYPE).increment(1);
        tracing::error!(
            resource = R::RESOURCE_TYPE,
            test_name = %resource.common().test_name,
            error = %err,
            "invalid resource"
        );
        ProviderError::from(err)
    })
}

fn record(resource: &'static str, operation: &'static str) {
    counter!(RESOURCE_OPERATIONS, "resource" => resource, "operation" => operation).increment(1);
}

/// Creates the test and returns its id with the state read back from the
/// API.
pub async fn create<R: TestResource>(api: &dyn TestsApi, resource: &R) -> Result<(TestId, R)> {
    let config = validated_config(resource)?;
    let test = build_test(&config, Utc::now());

    tracing::info!(resource = R::RESOURCE_TYPE, test_name = %test.name, "creating test");
    let id = api.create_test(&test).await?;
    record(R::RESOURCE_TYPE, "create");
    tracing::info!(resource = R::RESOURCE_TYPE, test_id = id, "test created");

    let state = read::<R>(api, id).await?.ok_or(ProviderError::Vanished(id))?;
    Ok((id, state))
}

/// `None` when the test no longer exists.
pub async fn read<R: TestResource>(api: &dyn TestsApi, id: TestId) -> Result<Option<R>> {
    let test = api.get_test(id).await?;
    record(R::RESOURCE_TYPE, "read");

    match test {
        Some(test) => Ok(Some(R::from_test(&test))),
        None => {
            tracing::info!(resource = R::RESOURCE_TYPE, test_id = id, "test not found");
            Ok(None)
        }
    }
}

/// Sends the patches turning `prior` into `desired` and reads the result
/// back. Nothing is sent when the two agree.
pub async fn update<R: TestResource>(
    api: &dyn TestsApi,
    id: TestId,
    prior: &R,
    desired: &R,
) -> Result<R> {
    let patches = match desired.patches(prior) {
        Ok(patches) => patches,
        Err(ProviderError::Validation(err)) => {
            counter!(VALIDATION_FAILURES, "resource" => R::RESOURCE_TYPE).increment(1);
            return Err(err.into());
        }
        Err(err) => return Err(err),
    };

    if patches.is_empty() {
        tracing::debug!(resource = R::RESOURCE_TYPE, test_id = id, "no changes to send");
    } else {
        tracing::info!(
            resource = R::RESOURCE_TYPE,
            test_id = id,
            operations = patches.len(),
            "updating test"
        );
        api.update_test(id, &patches).await?;
        record(R::RESOURCE_TYPE, "update");
    }

    read::<R>(api, id).await?.ok_or(ProviderError::Vanished(id))
}

/// Like [`update`], with the current remote state as the prior state.
pub async fn update_from_remote<R: TestResource>(
    api: &dyn TestsApi,
    id: TestId,
    desired: &R,
) -> Result<R> {
    let prior = read::<R>(api, id).await?.ok_or(ProviderError::Vanished(id))?;
    update(api, id, &prior, desired).await
}

pub async fn delete(api: &dyn TestsApi, id: TestId) -> Result<()> {
    tracing::info!(test_id = id, "deleting test");
    api.delete_test(id).await?;
    counter!(RESOURCE_OPERATIONS, "resource" => "any", "operation" => "delete").increment(1);
    Ok(())
}

macro_rules! resource_kinds {
    ($($variant:ident),* $(,)?) => {
        /// A resource of any kind, keyed by its resource type name in
        /// documents:
        ///
        /// ```yaml
        /// web_test:
        ///   division_id: 1000
        ///   product_id: 5000
        ///   test_name: homepage
        ///   test_url: https://example.com
        /// ```
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
        #[serde(rename_all = "snake_case")]
        pub enum AnyTest {
            $($variant($variant),)*
        }

        /// Resource type without a resource, for reads by id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum ResourceKind {
            $($variant,)*
        }

        impl ResourceKind {
            pub const ALL: &'static [ResourceKind] = &[$(ResourceKind::$variant,)*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(ResourceKind::$variant => <$variant as TestResource>::RESOURCE_TYPE,)*
                }
            }

            pub async fn read(self, api: &dyn TestsApi, id: TestId) -> Result<Option<AnyTest>> {
                match self {
                    $(ResourceKind::$variant => {
                        Ok(read::<$variant>(api, id).await?.map(AnyTest::$variant))
                    })*
                }
            }
        }

        impl AnyTest {
            pub fn kind(&self) -> ResourceKind {
                match self {
                    $(AnyTest::$variant(_) => ResourceKind::$variant,)*
                }
            }

            pub fn validate(&self) -> Result<(), ValidationError> {
                match self {
                    $(AnyTest::$variant(test) => test.validate(),)*
                }
            }

            pub fn test_name(&self) -> &str {
                match self {
                    $(AnyTest::$variant(test) => &test.common().test_name,)*
                }
            }

            pub async fn create(&self, api: &dyn TestsApi) -> Result<(TestId, AnyTest)> {
                match self {
                    $(AnyTest::$variant(test) => {
                        let (id, state) = create(api, test).await?;
                        Ok((id, AnyTest::$variant(state)))
                    })*
                }
            }

            /// Brings the remote test `id` in line with `self`.
            pub async fn update(&self, api: &dyn TestsApi, id: TestId) -> Result<AnyTest> {
                match self {
                    $(AnyTest::$variant(test) => {
                        Ok(AnyTest::$variant(update_from_remote(api, id, test).await?))
                    })*
                }
            }
        }
    };
}

resource_kinds!(
    WebTest,
    ApiTest,
    TransactionTest,
    TracerouteTest,
    PingTest,
    BgpTest,
    DnsTest,
    SslTest,
    PlaywrightTest,
    PuppeteerTest,
);

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = ValidationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ValidationError::UnknownResourceType(name.to_string()))
    }
}
