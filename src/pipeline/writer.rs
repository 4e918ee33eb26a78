//! Document Writer
//!
//! Persists an accepted document as a dated Markdown file with Jekyll front
//! matter and records it in the coverage store. The document write and the
//! coverage append succeed or fail together: if the coverage record cannot
//! be written, the document file is removed again so the store never claims
//! a document that does not exist and no document exists without a record.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::constants::document as doc_constants;
use crate::coverage::CoverageStore;
use crate::types::{CoverageEntry, FinalDocument, MillError, Result, Topic};

/// Writes accepted documents and records coverage atomically
#[derive(Debug)]
pub struct DocumentWriter {
    posts_dir: PathBuf,
    store: CoverageStore,
}

impl DocumentWriter {
    pub fn new(posts_dir: impl Into<PathBuf>, store: CoverageStore) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            store,
        }
    }

    /// Persist the document and append its coverage record.
    ///
    /// Returns the recorded entry. On coverage failure the just-written
    /// document file is removed before the error is returned.
    pub fn publish(
        &self,
        topic: &Topic,
        document: &FinalDocument,
        now: DateTime<Utc>,
    ) -> Result<CoverageEntry> {
        fs::create_dir_all(&self.posts_dir)?;

        let filename = self.unique_filename(topic, now);
        let path = self.posts_dir.join(&filename);
        let rendered = render_document(document, now)?;

        fs::write(&path, rendered)
            .map_err(|e| MillError::Persistence(format!("writing {}: {}", path.display(), e)))?;

        let entry = CoverageEntry::new(topic, now, filename.clone());
        if let Err(err) = self.store.append(entry.clone()) {
            // Roll the document back so store and directory stay consistent.
            if let Err(cleanup) = fs::remove_file(&path) {
                warn!(
                    path = %path.display(),
                    error = %cleanup,
                    "failed to remove document after coverage append failure"
                );
            }
            return Err(err);
        }

        info!(
            filename = %filename,
            kind = %topic.kind,
            id = %topic.id,
            version = topic.version,
            "document published"
        );
        Ok(entry)
    }

    /// `{date}-{kind}-{slug}[-vN].md`, falling back to a time-of-day suffix
    /// if that name is already taken
    fn unique_filename(&self, topic: &Topic, now: DateTime<Utc>) -> String {
        let base = base_filename(topic, now);
        let candidate = format!("{base}.md");
        if !self.posts_dir.join(&candidate).exists() {
            return candidate;
        }
        format!("{base}-{}.md", now.format("%H%M%S"))
    }
}

fn base_filename(topic: &Topic, now: DateTime<Utc>) -> String {
    let mut name = format!("{}-{}-{}", now.format("%Y-%m-%d"), topic.kind, topic.slug());
    if topic.version > 1 {
        name.push_str(&format!("-v{}", topic.version));
    }
    name
}

/// Jekyll front matter, serialized in declaration order
#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    date: String,
    last_modified_at: String,
    categories: [&'static str; 2],
    tags: Vec<&'a str>,
    excerpt: &'a str,
    toc: bool,
    toc_label: &'static str,
    toc_sticky: bool,
    author: &'static str,
}

/// Render the full document: Jekyll front matter followed by the body
fn render_document(document: &FinalDocument, now: DateTime<Utc>) -> Result<String> {
    let meta = document.meta();
    let date = now.format(doc_constants::DATE_FORMAT).to_string();

    let front = FrontMatter {
        title: &meta.title,
        date: date.clone(),
        last_modified_at: date,
        categories: ["Engineering", "AI"],
        tags: meta
            .tags
            .iter()
            .take(doc_constants::MAX_TAGS)
            .map(String::as_str)
            .collect(),
        excerpt: &meta.excerpt,
        toc: true,
        toc_label: "Contents",
        toc_sticky: true,
        author: "Draftmill",
    };
    let yaml = serde_yaml::to_string(&front)?;

    let mut out = format!("---\n{yaml}---\n\n{}", document.body());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Draft, PostMeta, TopicKind};

    fn topic(version: u32) -> Topic {
        Topic {
            kind: TopicKind::Package,
            id: "httpx".into(),
            title: "Httpx".into(),
            url: None,
            summary: Some("HTTP client".into()),
            tags: vec!["python".into(), "http".into()],
            version,
        }
    }

    fn document(title: &str) -> FinalDocument {
        FinalDocument::accepted(Draft::new(
            PostMeta {
                title: title.into(),
                excerpt: "A practical tour.".into(),
                tags: vec!["python".into(), "http".into()],
            },
            "## Introduction\n\nReal content here.\n",
        ))
    }

    fn now() -> DateTime<Utc> {
        "2025-06-01T12:30:45Z".parse().unwrap()
    }

    fn writer(dir: &Path) -> DocumentWriter {
        let store = CoverageStore::new(dir.join("coverage.json"));
        DocumentWriter::new(dir.join("_posts"), store)
    }

    #[test]
    fn test_publish_writes_document_and_coverage() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer(dir.path());

        let entry = writer
            .publish(&topic(1), &document("Httpx Deep Dive"), now())
            .unwrap();

        assert_eq!(entry.filename, "2025-06-01-package-httpx.md");
        let rendered =
            fs::read_to_string(dir.path().join("_posts").join(&entry.filename)).unwrap();
        assert!(rendered.starts_with("---\n"));
        assert!(rendered.contains("title: Httpx Deep Dive"));
        assert!(rendered.contains("date: 2025-06-01T09:00:00+00:00"));
        assert!(rendered.contains("- python\n"));
        assert!(rendered.contains("## Introduction"));

        let store = CoverageStore::new(dir.path().join("coverage.json"));
        assert_eq!(store.load().unwrap().max_version(TopicKind::Package, "httpx"), 1);
    }

    #[test]
    fn test_version_suffix_only_for_repeats() {
        assert_eq!(base_filename(&topic(1), now()), "2025-06-01-package-httpx");
        assert_eq!(
            base_filename(&topic(2), now()),
            "2025-06-01-package-httpx-v2"
        );
    }

    #[test]
    fn test_collision_gets_time_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("2025-06-01-package-httpx.md"), "existing").unwrap();

        let writer = writer(dir.path());
        let entry = writer
            .publish(&topic(1), &document("Httpx"), now())
            .unwrap();
        assert_eq!(entry.filename, "2025-06-01-package-httpx-123045.md");
    }

    #[test]
    fn test_coverage_failure_rolls_back_document() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer(dir.path());

        // Version 3 with nothing recorded breaks the gap-free invariant.
        let err = writer
            .publish(&topic(3), &document("Httpx"), now())
            .unwrap_err();
        assert!(matches!(err, MillError::Persistence(_)));

        let leftover: Vec<_> = fs::read_dir(dir.path().join("_posts"))
            .unwrap()
            .collect();
        assert!(leftover.is_empty());
        assert!(!dir.path().join("coverage.json").exists());
    }

    #[test]
    fn test_awkward_metadata_stays_parseable_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer(dir.path());
        let entry = writer
            .publish(&topic(1), &document("The \"Best\" Client: a tour"), now())
            .unwrap();
        let rendered =
            fs::read_to_string(dir.path().join("_posts").join(&entry.filename)).unwrap();

        let front = rendered
            .strip_prefix("---\n")
            .and_then(|rest| rest.split("\n---\n").next())
            .unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(front).unwrap();
        assert_eq!(parsed["title"], "The \"Best\" Client: a tour");
        assert_eq!(parsed["author"], "Draftmill");
    }

    #[test]
    fn test_tags_capped() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer(dir.path());
        let doc = FinalDocument::accepted(Draft::new(
            PostMeta {
                title: "T".into(),
                excerpt: "E".into(),
                tags: (0..12).map(|i| format!("tag{i}")).collect(),
            },
            "## Body\n",
        ));
        let entry = writer.publish(&topic(1), &doc, now()).unwrap();
        let rendered =
            fs::read_to_string(dir.path().join("_posts").join(&entry.filename)).unwrap();
        assert_eq!(rendered.matches("- tag").count(), 8);
    }
}
