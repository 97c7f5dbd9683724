//! CLI command implementations

pub mod completions;
pub mod hello;
pub mod update;
pub mod version;
pub mod welcome;
pub mod zone;
