//! Draftmill - Deterministic Technical-Article Generator
//!
//! Produces one long-form technical article per run from read-only topic
//! catalogs, tracking what has been covered in an append-only coverage log
//! so the rotation is deterministic and gap-free.
//!
//! ## Core Features
//!
//! - **Deterministic Scheduling**: breadth before depth across categories,
//!   then least-versioned re-treatment; no randomness
//! - **Durable Coverage**: append-only JSON log with atomic staged writes
//! - **Reference Sanitization**: bounded, idempotent cleanup of fetched
//!   reference material before it reaches a model
//! - **Staged Pipeline**: outline, draft, quality gate with one corrective
//!   pass, polish, and metadata packaging
//! - **Provider Abstraction**: OpenAI-compatible and Ollama backends behind
//!   one trait, with classified errors and a shared retry policy
//!
//! ## Quick Start
//!
//! ```ignore
//! use draftmill::{CatalogSet, CoverageStore, GenerationPipeline, TopicScheduler};
//! use draftmill::ai::create_provider;
//!
//! let catalogs = CatalogSet::load(Path::new("api"))?;
//! let store = CoverageStore::new("api/blog_coverage.json");
//! let topic = TopicScheduler::default().select_next(&catalogs, &store.load()?)?;
//! let provider = create_provider(&config.llm)?;
//! let document = GenerationPipeline::new(provider).run(&topic, None).await?;
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: read-only topic feeds and normalization
//! - [`coverage`]: coverage store and topic scheduler
//! - [`sanitize`]: reference-text sanitizer
//! - [`ai`]: provider abstraction, retry policy, timeouts
//! - [`pipeline`]: staged generation, quality gate, document writer

pub mod ai;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coverage;
pub mod pipeline;
pub mod sanitize;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorCategory, MillError, Result};

// Domain
pub use types::{CoverageEntry, Draft, FinalDocument, PostMeta, Topic, TopicKind};

// Scheduling and Coverage
pub use catalog::{CatalogItem, CatalogSet};
pub use coverage::{CoverageLog, CoverageStore, TopicScheduler};

// Sanitizer
pub use sanitize::Sanitizer;

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use pipeline::{DocumentWriter, GateReport, GateStatus, GenerationPipeline, QualityGate};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{
    GenerationRequest,
    LlmProvider,
    LlmResponse,
    RetryPolicy,
    SharedProvider,
    TimeoutConfig,
    create_provider,
    with_timeout,
};
