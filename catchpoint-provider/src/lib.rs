//! Declarative management of Catchpoint synthetic tests.
//!
//! Each test kind has a typed resource (`WebTest`, `DnsTest`, ...) holding
//! the flat user-facing attributes. A resource is turned into a [`TestConfig`]
//! by the section setters, the config is turned into a wire document by the
//! builder, and documents fetched from the API are turned back into resources
//! by the flatteners. Updates are sent as JSON-Patch arrays that replace
//! changed fields and whole changed sections.

#![recursion_limit = "256"]
pub mod builder;
pub mod config;
pub mod errors;
pub mod flatten;
pub mod metrics_defs;
pub mod resources;
pub mod schema;
pub mod setters;
pub mod test_config;

#[cfg(test)]
mod testutils;

pub use config::{ProviderConfig, Settings};
pub use errors::{ProviderError, Result, ValidationError};
pub use resources::{
    AnyTest, ApiTest, BgpTest, DnsTest, PingTest, PlaywrightTest, PuppeteerTest, ResourceKind,
    SslTest, TestResource, TracerouteTest, TransactionTest, WebTest,
};
pub use test_config::{SettingType, TestConfig};
