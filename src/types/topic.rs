//! Topic and Coverage Types
//!
//! A `Topic` is one subject to produce, identified by `(kind, id)` with a
//! version number counting repeat treatments. A `CoverageEntry` is the
//! immutable record of one produced document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog category of a topic, in default priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicKind {
    Package,
    Repository,
    Paper,
    Tutorial,
}

impl TopicKind {
    /// All kinds in the default category priority order
    pub const ALL: [TopicKind; 4] = [
        TopicKind::Package,
        TopicKind::Repository,
        TopicKind::Paper,
        TopicKind::Tutorial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Repository => "repository",
            Self::Paper => "paper",
            Self::Tutorial => "tutorial",
        }
    }

    /// Whether documents about this kind of topic are expected to carry
    /// runnable code examples
    pub fn expects_code_examples(&self) -> bool {
        matches!(self, Self::Package | Self::Repository | Self::Tutorial)
    }
}

impl std::fmt::Display for TopicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TopicKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "package" => Ok(Self::Package),
            "repository" | "repo" => Ok(Self::Repository),
            "paper" => Ok(Self::Paper),
            "tutorial" => Ok(Self::Tutorial),
            _ => Err(format!(
                "Unknown topic kind: {}. Valid values: package, repository, paper, tutorial",
                s
            )),
        }
    }
}

/// One subject to produce a document for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub kind: TopicKind,
    /// Unique within `kind`
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    /// Counts repeat treatments of the same `(kind, id)`; starts at 1
    pub version: u32,
}

impl Topic {
    /// URL-safe slug for filenames, derived from the title
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

/// Immutable record of one produced document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageEntry {
    pub kind: TopicKind,
    pub id: String,
    pub version: u32,
    /// Publication date, `YYYY-MM-DD`
    pub date: String,
    pub filename: String,
}

impl CoverageEntry {
    pub fn new(topic: &Topic, date: DateTime<Utc>, filename: impl Into<String>) -> Self {
        Self {
            kind: topic.kind,
            id: topic.id.clone(),
            version: topic.version,
            date: date.format("%Y-%m-%d").to_string(),
            filename: filename.into(),
        }
    }
}

/// Convert text to a URL-friendly slug: lowercase, non-alphanumeric runs
/// collapse to `-`, leading/trailing dashes trimmed
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_dash = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "topic".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in TopicKind::ALL {
            let parsed: TopicKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert_eq!("repo".parse::<TopicKind>().unwrap(), TopicKind::Repository);
        assert!("video".parse::<TopicKind>().is_err());
    }

    #[test]
    fn test_expects_code_examples() {
        assert!(TopicKind::Package.expects_code_examples());
        assert!(TopicKind::Tutorial.expects_code_examples());
        assert!(!TopicKind::Paper.expects_code_examples());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("LangChain: LLM Apps!"), "langchain-llm-apps");
        assert_eq!(slugify("  --  "), "topic");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_coverage_entry_from_topic() {
        let topic = Topic {
            kind: TopicKind::Package,
            id: "langchain".into(),
            title: "Langchain".into(),
            url: None,
            summary: None,
            tags: vec![],
            version: 2,
        };
        let date = "2025-06-01T09:00:00Z".parse().unwrap();
        let entry = CoverageEntry::new(&topic, date, "2025-06-01-package-langchain-v2.md");
        assert_eq!(entry.kind, TopicKind::Package);
        assert_eq!(entry.version, 2);
        assert_eq!(entry.date, "2025-06-01");
    }
}
