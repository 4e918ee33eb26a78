//! Draft and Document Types
//!
//! A `Draft` is the pipeline-owned work in progress: publish metadata plus a
//! markdown body. A `FinalDocument` is a draft that has passed the quality
//! gate; only the gate constructs one, and only the writer persists it.

use serde::{Deserialize, Serialize};

use super::topic::Topic;

/// Publish metadata destined for the document front matter.
///
/// Produced by the packaging stage as JSON; falls back to the topic's own
/// fields when the stage output cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostMeta {
    /// Fallback metadata derived from the topic itself
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            title: topic.title.clone(),
            excerpt: topic
                .summary
                .clone()
                .unwrap_or_else(|| format!("Learn about {}", topic.title)),
            tags: if topic.tags.is_empty() {
                vec!["ai".to_string()]
            } else {
                topic.tags.clone()
            },
        }
    }
}

/// A document under construction, owned by the pipeline until handed to the
/// writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub meta: PostMeta,
    pub body: String,
}

impl Draft {
    pub fn new(meta: PostMeta, body: impl Into<String>) -> Self {
        Self {
            meta,
            body: body.into(),
        }
    }

    /// Whitespace-separated word count of the body
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }

    /// Number of fenced code blocks in the body
    pub fn code_block_count(&self) -> usize {
        self.body
            .lines()
            .filter(|line| line.trim_start().starts_with("```"))
            .count()
            / 2
    }
}

/// A draft that has passed the quality gate.
///
/// Constructed only via [`FinalDocument::accepted`], which the pipeline
/// calls once a draft has passed validation.
#[derive(Debug, Clone)]
pub struct FinalDocument {
    draft: Draft,
}

impl FinalDocument {
    pub(crate) fn accepted(draft: Draft) -> Self {
        Self { draft }
    }

    pub fn meta(&self) -> &PostMeta {
        &self.draft.meta
    }

    pub fn body(&self) -> &str {
        &self.draft.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::topic::TopicKind;

    fn topic() -> Topic {
        Topic {
            kind: TopicKind::Package,
            id: "httpx".into(),
            title: "Httpx".into(),
            url: None,
            summary: Some("HTTP client for Python".into()),
            tags: vec!["python".into(), "http".into()],
            version: 1,
        }
    }

    #[test]
    fn test_meta_fallback_uses_topic_fields() {
        let meta = PostMeta::from_topic(&topic());
        assert_eq!(meta.title, "Httpx");
        assert_eq!(meta.excerpt, "HTTP client for Python");
        assert_eq!(meta.tags, vec!["python", "http"]);
    }

    #[test]
    fn test_meta_fallback_defaults() {
        let mut t = topic();
        t.summary = None;
        t.tags.clear();
        let meta = PostMeta::from_topic(&t);
        assert_eq!(meta.excerpt, "Learn about Httpx");
        assert_eq!(meta.tags, vec!["ai"]);
    }

    #[test]
    fn test_word_and_code_block_counts() {
        let draft = Draft::new(
            PostMeta::from_topic(&topic()),
            "## Intro\n\nSome words here.\n\n```python\nprint('hi')\n```\n",
        );
        assert_eq!(draft.word_count(), 8);
        assert_eq!(draft.code_block_count(), 1);
    }
}
