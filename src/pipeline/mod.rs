//! Generation Pipeline
//!
//! Staged document production: outline, draft, quality gate with a single
//! corrective pass, polish, and metadata packaging. Every generation-bearing
//! stage goes through the shared retry policy and timeout budget; a stage
//! that exhausts its budget aborts the whole run with no side effects.
//!
//! Stage order is fixed:
//!
//! ```text
//! Outline -> Draft -> Gate --fail--> Fix -> Gate --fail--> abort
//!                       |                    |
//!                      pass                 pass
//!                       v                    v
//!                     Polish <---------------+
//!                       |
//!                       v
//!                    Package -> FinalDocument
//! ```

pub mod cleanup;
pub mod gate;
pub mod prompts;
pub mod writer;

pub use gate::{GateReport, GateStatus, QualityGate};
pub use writer::DocumentWriter;

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::ai::{
    GenerationConstraints, GenerationRequest, RetryPolicy, SharedProvider, TimeoutConfig,
    with_timeout,
};
use crate::types::{Draft, FinalDocument, MillError, PostMeta, Result, Topic};
use cleanup::{clean_content, clean_llm_output};

/// Staged document generation pipeline
pub struct GenerationPipeline {
    provider: SharedProvider,
    retry: RetryPolicy,
    timeouts: TimeoutConfig,
    constraints: GenerationConstraints,
    gate: QualityGate,
}

impl GenerationPipeline {
    pub fn new(provider: SharedProvider) -> Self {
        Self {
            provider,
            retry: RetryPolicy::default(),
            timeouts: TimeoutConfig::default(),
            constraints: GenerationConstraints::default(),
            gate: QualityGate::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_constraints(mut self, constraints: GenerationConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_gate(mut self, gate: QualityGate) -> Self {
        self.gate = gate;
        self
    }

    /// Produce an accepted document for the topic.
    ///
    /// `context` is sanitized reference material; the prompts instruct the
    /// model to stay within it. Returns [`MillError::ValidationFatal`] when
    /// hard quality checks still fail after the single corrective pass.
    #[instrument(skip(self, context), fields(kind = %topic.kind, id = %topic.id, version = topic.version))]
    pub async fn run(&self, topic: &Topic, context: Option<&str>) -> Result<FinalDocument> {
        info!(title = %topic.title, "pipeline started");

        let outline = self
            .generate("outline", prompts::OUTLINE_ROLE, prompts::outline(topic, context))
            .await?;

        let raw_draft = self
            .generate(
                "draft",
                prompts::WRITER_ROLE,
                prompts::draft(topic, context, &outline),
            )
            .await?;

        // Validate against provisional metadata; final metadata comes from
        // the packaging stage once the body is settled.
        let mut draft = Draft::new(PostMeta::from_topic(topic), clean_llm_output(&raw_draft));
        let mut report = self.gate.validate(&draft, topic.kind);

        if !report.passed() {
            info!(issues = report.issues.len(), "draft rejected, running fix pass");
            let fixed = self
                .generate(
                    "fix",
                    prompts::FIXER_ROLE,
                    prompts::fix(&draft.body, &report.issues),
                )
                .await?;
            draft.body = clean_llm_output(&fixed);
            report = self.gate.validate(&draft, topic.kind);
            if !report.passed() {
                return Err(MillError::ValidationFatal {
                    issues: report.issues,
                });
            }
        }
        if !report.issues.is_empty() {
            debug!(issues = ?report.issues, "accepted with soft issues");
        }

        let polished = self
            .generate("polish", prompts::EDITOR_ROLE, prompts::polish(&draft.body))
            .await?;
        let polished_body = clean_llm_output(&polished);
        let candidate = Draft::new(draft.meta.clone(), polished_body);
        // A formatting pass must not regress the draft below the gate.
        if self.gate.validate(&candidate, topic.kind).passed() {
            draft = candidate;
        } else {
            warn!("polish pass regressed the draft, keeping pre-polish body");
        }

        let packaged = self
            .generate(
                "package",
                prompts::PUBLISHER_ROLE,
                prompts::package(topic, &draft.body),
            )
            .await?;
        draft.meta = parse_package_meta(&packaged, topic);
        draft.body = clean_content(&draft.body);

        info!(
            words = draft.word_count(),
            title = %draft.meta.title,
            "pipeline finished"
        );
        Ok(FinalDocument::accepted(draft))
    }

    /// One generation call under the shared retry policy and timeout budget
    async fn generate(&self, stage: &str, role: &str, prompt: String) -> Result<String> {
        let request = GenerationRequest::new(prompt, role).with_constraints(self.constraints);
        let timeout = self.timeouts.llm_request;
        let provider = Arc::clone(&self.provider);

        let response = self
            .retry
            .run(stage, || {
                let provider = Arc::clone(&provider);
                let request = request.clone();
                async move {
                    with_timeout(timeout, async { provider.generate(&request).await }, stage).await
                }
            })
            .await?;

        debug!(
            stage,
            tokens = response.usage.total(),
            elapsed_ms = response.timing.total_ms,
            "stage complete"
        );
        Ok(response.text)
    }
}

/// Parse the packaging stage's JSON output, tolerating prose around the
/// object. Unusable output falls back to topic-derived metadata.
fn parse_package_meta(text: &str, topic: &Topic) -> PostMeta {
    // Only look for the closing brace after the opening one; stray braces
    // in surrounding prose must not invert the slice.
    let object = text.find('{').and_then(|start| {
        text[start..]
            .rfind('}')
            .map(|end| &text[start..start + end + 1])
    });

    match object.and_then(|json| serde_json::from_str::<PostMeta>(json).ok()) {
        Some(meta) if !meta.title.trim().is_empty() => {
            let mut meta = meta;
            if meta.excerpt.trim().is_empty() {
                meta.excerpt = PostMeta::from_topic(topic).excerpt;
            }
            if meta.tags.is_empty() {
                meta.tags = PostMeta::from_topic(topic).tags;
            }
            meta
        }
        _ => {
            warn!("packaging stage output unusable, using topic-derived metadata");
            PostMeta::from_topic(topic)
        }
    }
}
