//! Text-Generation Capability
//!
//! Provider abstraction, retry policy, and timeout management for the
//! generation-bearing pipeline stages.

pub mod provider;
pub mod retry;
pub mod timeout;

pub use provider::{
    GenerationConstraints, GenerationRequest, LlmProvider, LlmResponse, OllamaProvider,
    OpenAiProvider, ResponseMetadata, ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
pub use retry::RetryPolicy;
pub use timeout::{TimeoutConfig, with_timeout};
