//! # joe-core
//!
//! Core library for the joe CLI providing:
//! - DNS zone file generation and domain validation
//! - Domain extraction from existing zone files
//! - Simulated remote zone inventory and deployment planning

pub mod error;
pub mod remote;
pub mod zone;

pub use error::{Error, Result};
pub use remote::{DeploymentPlan, RemoteZone, ZoneStatus};
pub use zone::ZoneSpec;
