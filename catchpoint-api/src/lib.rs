//! Client for the Catchpoint v2 tests API.
//!
//! The crate holds the static code tables the API uses for every categorical
//! field, the wire model of a test document, JSON-Patch construction for
//! partial updates and the HTTP transport itself.

pub mod client;
pub mod enums;
pub mod errors;
pub mod metrics_defs;
pub mod patch;
pub mod types;

#[cfg(test)]
mod testutils;

pub use client::{CatchpointClient, Environment, TestsApi};
pub use errors::ClientError;
pub use patch::{FieldPath, PatchOperation, Section};
pub use types::{IdName, OptionalIdName, Test, TestId};
