//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Loaded from `draftmill.toml` and `DRAFTMILL_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{network, retry, sanitize};
use crate::types::TopicKind;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Catalog, output, and coverage paths
    pub paths: PathsConfig,

    /// Topic scheduling settings
    pub scheduler: SchedulerConfig,

    /// Reference-text sanitizer settings
    pub sanitizer: SanitizerConfig,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Generation retry settings
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            paths: PathsConfig::default(),
            scheduler: SchedulerConfig::default(),
            sanitizer: SanitizerConfig::default(),
            llm: LlmConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `MillError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(crate::types::MillError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(crate::types::MillError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(crate::types::MillError::Config(
                "retry max_attempts must be at least 1".to_string(),
            ));
        }

        if self.sanitizer.max_chars == 0 {
            return Err(crate::types::MillError::Config(
                "sanitizer max_chars must be greater than 0".to_string(),
            ));
        }

        let order = &self.scheduler.category_order;
        if order.is_empty() {
            return Err(crate::types::MillError::Config(
                "scheduler category_order must not be empty".to_string(),
            ));
        }
        for (i, kind) in order.iter().enumerate() {
            if order[i + 1..].contains(kind) {
                return Err(crate::types::MillError::Config(format!(
                    "scheduler category_order lists '{}' twice",
                    kind
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Paths Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the catalog JSON feeds
    pub catalog_dir: PathBuf,

    /// Directory documents are published into
    pub posts_dir: PathBuf,

    /// Coverage log location
    pub coverage_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("api"),
            posts_dir: PathBuf::from("_posts"),
            coverage_file: PathBuf::from("api/blog_coverage.json"),
        }
    }
}

// =============================================================================
// Scheduler Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Category priority order; earlier kinds are exhausted first
    pub category_order: Vec<TopicKind>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            category_order: TopicKind::ALL.to_vec(),
        }
    }
}

// =============================================================================
// Sanitizer Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Character budget for sanitized generation input
    pub max_chars: usize,

    /// Lines longer than this are dropped outright
    pub long_line_threshold: usize,

    /// Lines with a base64 marker longer than this are dropped
    pub blob_line_threshold: usize,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_chars: sanitize::DEFAULT_MAX_CHARS,
            long_line_threshold: sanitize::LONG_LINE_THRESHOLD,
            blob_line_threshold: sanitize::BLOB_LINE_THRESHOLD,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider type: "openai", "ollama"
    pub provider: String,

    /// Model name (provider-specific)
    pub model: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for generation (0.0 = deterministic)
    pub temperature: f32,

    /// API key (for OpenAI-compatible endpoints)
    /// Never serialized to output for security
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,

    /// Maximum tokens to generate per call
    pub max_tokens: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            temperature: 0.3,
            api_key: None,
            api_base: None,
            max_tokens: 4096,
        }
    }
}

// =============================================================================
// Retry Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts per generation call (1 initial + retries)
    pub max_attempts: usize,

    /// Base delay for exponential backoff (milliseconds)
    pub base_delay_ms: u64,

    /// Maximum delay between retries (seconds)
    pub max_delay_secs: u64,

    /// Backoff multiplier
    pub backoff_factor: f32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: retry::DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: retry::BASE_DELAY_MS,
            max_delay_secs: retry::MAX_DELAY_SECS,
            backoff_factor: retry::BACKOFF_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let mut config = Config::default();
        config.llm.temperature = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = Config::default();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut config = Config::default();
        config.scheduler.category_order = vec![TopicKind::Package, TopicKind::Package];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_category_order() {
        let config = Config::default();
        assert_eq!(
            config.scheduler.category_order,
            vec![
                TopicKind::Package,
                TopicKind::Repository,
                TopicKind::Paper,
                TopicKind::Tutorial
            ]
        );
    }
}
