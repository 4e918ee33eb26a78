//! Configuration
//!
//! Figment-backed configuration with TOML and environment sources.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Config, LlmConfig, PathsConfig, RetryConfig, SanitizerConfig, SchedulerConfig,
};
