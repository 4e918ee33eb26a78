//! Read-Only Topic Catalogs
//!
//! Loads the per-category JSON feeds produced by the external
//! data-acquisition collaborator and normalizes their entries into topic
//! candidates. Catalogs are supplied whole to every scheduling decision and
//! are never mutated here.
//!
//! ## Feed formats
//!
//! - `packages.json`: `{"packages": [{"name", "url"}]}`
//! - `repositories.json`: `{"repositories": [{"name": "owner/repo", "url"}]}`
//! - `papers.json`: `{"papers": [{"name", "url"}]}`
//! - `tutorials.json`: a list (or `{"tutorials": [...]}`) of
//!   `{"title", "url", "excerpt", "tags"}`

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::{Result, Topic, TopicKind, slugify};

/// One normalized catalog candidate, ready to become a `Topic`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Unique within its category
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
}

impl CatalogItem {
    /// Construct a topic at the given version for this candidate
    pub fn to_topic(&self, kind: TopicKind, version: u32) -> Topic {
        Topic {
            kind,
            id: self.id.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            summary: self.summary.clone(),
            tags: self.tags.clone(),
            version,
        }
    }
}

/// All catalogs, one ordered candidate list per category
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    pub packages: Vec<CatalogItem>,
    pub repositories: Vec<CatalogItem>,
    pub papers: Vec<CatalogItem>,
    pub tutorials: Vec<CatalogItem>,
}

impl CatalogSet {
    /// Load all category feeds from a directory. Missing feeds yield empty
    /// categories; a present but unparsable feed is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let packages = load_feed::<PackageFeed>(&dir.join("packages.json"))?
            .map(|f| f.packages)
            .unwrap_or_default()
            .iter()
            .filter_map(normalize_package)
            .collect();

        let repositories = load_feed::<RepositoryFeed>(&dir.join("repositories.json"))?
            .map(|f| f.repositories)
            .unwrap_or_default()
            .iter()
            .filter_map(normalize_repository)
            .collect();

        let papers = load_feed::<PaperFeed>(&dir.join("papers.json"))?
            .map(|f| f.papers)
            .unwrap_or_default()
            .iter()
            .filter_map(normalize_paper)
            .collect();

        let tutorials = load_feed::<TutorialFeed>(&dir.join("tutorials.json"))?
            .map(TutorialFeed::into_entries)
            .unwrap_or_default()
            .iter()
            .filter_map(normalize_tutorial)
            .collect();

        let set = Self {
            packages,
            repositories,
            papers,
            tutorials,
        };
        debug!(
            packages = set.packages.len(),
            repositories = set.repositories.len(),
            papers = set.papers.len(),
            tutorials = set.tutorials.len(),
            "catalogs loaded"
        );
        Ok(set)
    }

    /// Candidates for one category, in catalog-stable order
    pub fn candidates(&self, kind: TopicKind) -> &[CatalogItem] {
        match kind {
            TopicKind::Package => &self.packages,
            TopicKind::Repository => &self.repositories,
            TopicKind::Paper => &self.papers,
            TopicKind::Tutorial => &self.tutorials,
        }
    }

    /// True when every category is empty
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
            && self.repositories.is_empty()
            && self.papers.is_empty()
            && self.tutorials.is_empty()
    }

    /// Total candidates across every category
    pub fn total_len(&self) -> usize {
        self.packages.len() + self.repositories.len() + self.papers.len() + self.tutorials.len()
    }
}

// =============================================================================
// Raw feed shapes
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
struct RawEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    title: String,
    url: Option<String>,
    excerpt: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct PackageFeed {
    #[serde(default)]
    packages: Vec<RawEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct RepositoryFeed {
    #[serde(default)]
    repositories: Vec<RawEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct PaperFeed {
    #[serde(default)]
    papers: Vec<RawEntry>,
}

/// Tutorials feed has shipped both as a bare list and as a wrapped object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TutorialFeed {
    List(Vec<RawEntry>),
    Wrapped {
        #[serde(default)]
        tutorials: Vec<RawEntry>,
    },
}

impl TutorialFeed {
    fn into_entries(self) -> Vec<RawEntry> {
        match self {
            Self::List(entries) => entries,
            Self::Wrapped { tutorials } => tutorials,
        }
    }
}

fn load_feed<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        warn!("catalog feed missing: {}", path.display());
        return Ok(None);
    }
    let raw = fs::read_to_string(path)?;
    let feed = serde_json::from_str(&raw)?;
    Ok(Some(feed))
}

// =============================================================================
// Normalization
// =============================================================================

fn normalize_package(entry: &RawEntry) -> Option<CatalogItem> {
    if entry.name.is_empty() {
        return None;
    }
    Some(CatalogItem {
        id: entry.name.clone(),
        title: title_case(&entry.name.replace('-', " ")),
        url: entry.url.clone(),
        summary: Some(format!("Python package: {}", entry.name)),
        tags: vec!["python".into(), "package".into(), "pypi".into()],
    })
}

fn normalize_repository(entry: &RawEntry) -> Option<CatalogItem> {
    let (_, repo) = entry.name.split_once('/')?;
    Some(CatalogItem {
        id: entry.name.clone(),
        title: title_case(&repo.replace('-', " ")),
        url: entry.url.clone(),
        summary: Some("GitHub repository".into()),
        tags: vec!["github".into(), "repository".into()],
    })
}

fn normalize_paper(entry: &RawEntry) -> Option<CatalogItem> {
    if entry.name.is_empty() {
        return None;
    }
    Some(CatalogItem {
        id: entry.name.clone(),
        title: entry.name.clone(),
        url: entry.url.clone(),
        summary: Some("Research paper".into()),
        tags: vec!["research".into(), "paper".into()],
    })
}

fn normalize_tutorial(entry: &RawEntry) -> Option<CatalogItem> {
    if entry.title.is_empty() {
        return None;
    }
    let tags = match &entry.tags {
        Some(tags) if !tags.is_empty() => tags.iter().take(6).cloned().collect(),
        _ => vec!["tutorial".into()],
    };
    Some(CatalogItem {
        id: slugify(&entry.title),
        title: entry.title.clone(),
        url: entry.url.clone(),
        summary: entry.excerpt.clone(),
        tags,
    })
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn entry(name: &str) -> RawEntry {
        RawEntry {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_package() {
        let item = normalize_package(&entry("scikit-learn")).unwrap();
        assert_eq!(item.id, "scikit-learn");
        assert_eq!(item.title, "Scikit Learn");
        assert_eq!(item.summary.as_deref(), Some("Python package: scikit-learn"));
        assert!(normalize_package(&entry("")).is_none());
    }

    #[test]
    fn test_normalize_repository_requires_owner() {
        let item = normalize_repository(&entry("huggingface/transformers")).unwrap();
        assert_eq!(item.id, "huggingface/transformers");
        assert_eq!(item.title, "Transformers");
        assert!(normalize_repository(&entry("no-owner")).is_none());
    }

    #[test]
    fn test_normalize_tutorial_slug_id() {
        let raw = RawEntry {
            title: "Build a RAG App".to_string(),
            tags: Some(vec!["rag".into(), "llm".into()]),
            ..Default::default()
        };
        let item = normalize_tutorial(&raw).unwrap();
        assert_eq!(item.id, "build-a-rag-app");
        assert_eq!(item.tags, vec!["rag", "llm"]);
    }

    #[test]
    fn test_load_missing_feeds_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let set = CatalogSet::load(dir.path()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.total_len(), 0);
    }

    #[test]
    fn test_load_feeds_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("packages.json"),
            r#"{"packages": [{"name": "httpx"}, {"name": "fastapi"}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("tutorials.json"),
            r#"[{"title": "Intro to Polars"}]"#,
        )
        .unwrap();

        let set = CatalogSet::load(dir.path()).unwrap();
        let ids: Vec<_> = set
            .candidates(TopicKind::Package)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["httpx", "fastapi"]);
        assert_eq!(set.candidates(TopicKind::Tutorial).len(), 1);
        assert_eq!(set.total_len(), 3);
    }

    #[test]
    fn test_load_rejects_corrupt_feed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("papers.json"), "not json").unwrap();
        assert!(CatalogSet::load(dir.path()).is_err());
    }

    #[test]
    fn test_to_topic_carries_fields() {
        let item = normalize_package(&entry("polars")).unwrap();
        let topic = item.to_topic(TopicKind::Package, 2);
        assert_eq!(topic.kind, TopicKind::Package);
        assert_eq!(topic.id, "polars");
        assert_eq!(topic.version, 2);
    }
}
