//! Core Domain Types
//!
//! Topics, coverage records, drafts, and the unified error type.

pub mod document;
pub mod error;
pub mod topic;

pub use document::{Draft, FinalDocument, PostMeta};
pub use error::{ErrorCategory, ErrorClassifier, LlmError, MillError, Result};
pub use topic::{CoverageEntry, Topic, TopicKind, slugify};
