//! LLM Provider Abstraction
//!
//! Defines the `LlmProvider` trait for text generation. One concrete
//! provider is selected at startup from configuration; the pipeline only
//! ever sees the trait. All providers return `LlmResponse` with token usage
//! metrics, and surface distinguishable, classified errors so the retry
//! policy can act on them.

mod ollama;
mod openai;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::types::{MillError, Result};

// =============================================================================
// Generation Request
// =============================================================================

/// One text-generation request: prompt, role hint, constraints
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The user-facing prompt
    pub prompt: String,
    /// Short role description folded into the system message,
    /// e.g. "senior technical writer"
    pub role: String,
    /// Sampling and size constraints
    pub constraints: GenerationConstraints,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            role: role.into(),
            constraints: GenerationConstraints::default(),
        }
    }

    pub fn with_constraints(mut self, constraints: GenerationConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// System message derived from the role hint
    pub fn system_message(&self) -> String {
        format!(
            "You are a {}. Respond with the requested content only, no preamble or commentary.",
            self.role
        )
    }
}

/// Sampling and size constraints for one generation call
#[derive(Debug, Clone, Copy)]
pub struct GenerationConstraints {
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Temperature (0.0 = deterministic)
    pub temperature: f32,
}

impl Default for GenerationConstraints {
    fn default() -> Self {
        Self {
            max_tokens: 4096,
            temperature: 0.3,
        }
    }
}

// =============================================================================
// LLM Response with Usage Metrics
// =============================================================================

/// Complete LLM response including generated text and usage metrics
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text
    pub text: String,
    /// Token usage metrics
    pub usage: TokenUsage,
    /// Response timing
    pub timing: ResponseTiming,
    /// Provider and model info
    pub metadata: ResponseMetadata,
}

impl LlmResponse {
    /// Create response with text only (usage unknown)
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
            metadata: ResponseMetadata::default(),
        }
    }
}

/// Token usage metrics for cost tracking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt)
    pub input_tokens: u32,
    /// Output tokens (response)
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Response timing metrics
#[derive(Debug, Clone, Default)]
pub struct ResponseTiming {
    /// Total response time in milliseconds (wall clock)
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    /// Model used
    pub model: String,
    /// Provider name
    pub provider: String,
}

/// Shared LLM provider type for use across pipeline stages
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// LLM Provider trait for text generation with usage metrics
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for the given request.
    ///
    /// Errors must carry a classified [`crate::types::LlmError`] so the
    /// retry policy can distinguish transient from fatal failures.
    async fn generate(&self, request: &GenerationRequest) -> Result<LlmResponse>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiProvider::new(config)?)),
        "ollama" => Ok(Arc::new(OllamaProvider::new(config)?)),
        _ => Err(MillError::Config(format!(
            "Unknown provider: {}. Supported: openai, ollama",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_from_role() {
        let request = GenerationRequest::new("write something", "senior technical writer");
        assert!(
            request
                .system_message()
                .starts_with("You are a senior technical writer.")
        );
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(MillError::Config(_))
        ));
    }

    #[test]
    fn test_token_usage_total() {
        assert_eq!(TokenUsage::new(100, 50).total(), 150);
    }
}
