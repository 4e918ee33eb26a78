//! Quality Gate
//!
//! Validates a draft against structural and content rules before it may be
//! published. Hard checks reject the draft outright and trigger the
//! pipeline's single corrective pass; soft checks are recorded as issues but
//! do not fail the draft on their own. Validation is pure: the same draft
//! always yields the same report.

use crate::constants::gate as consts;
use crate::types::{Draft, TopicKind};

/// Validation verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Pass,
    Fail,
}

/// Outcome of one validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateReport {
    pub status: GateStatus,
    /// Hard failures and soft issues, in check order
    pub issues: Vec<String>,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        self.status == GateStatus::Pass
    }
}

/// Structural and content validator for drafts
#[derive(Debug, Clone)]
pub struct QualityGate {
    min_words: usize,
    target_words: usize,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self {
            min_words: consts::MIN_WORD_COUNT,
            target_words: consts::TARGET_WORD_COUNT,
        }
    }
}

impl QualityGate {
    pub fn new(min_words: usize, target_words: usize) -> Self {
        Self {
            min_words,
            target_words,
        }
    }

    /// Validate a draft for a topic of the given kind.
    ///
    /// A draft satisfying every hard and soft check gets `Pass` with an
    /// empty issue list; re-validating an unmodified draft returns an
    /// identical report.
    pub fn validate(&self, draft: &Draft, kind: TopicKind) -> GateReport {
        let mut issues = Vec::new();
        let mut hard_failed = false;

        // Hard: required front-matter fields.
        if draft.meta.title.trim().is_empty() {
            issues.push("front matter is missing a title".to_string());
            hard_failed = true;
        }
        if draft.meta.excerpt.trim().is_empty() {
            issues.push("front matter is missing an excerpt".to_string());
            hard_failed = true;
        }

        // Hard: non-empty body opening with the structural delimiter.
        let body = draft.body.trim();
        if body.is_empty() {
            issues.push("body is empty".to_string());
            hard_failed = true;
        } else if !body.starts_with(consts::BODY_DELIMITER) {
            issues.push(format!(
                "body must begin with a '{}' heading",
                consts::BODY_DELIMITER.trim_end()
            ));
            hard_failed = true;
        }

        // Hard: degenerate word count.
        let words = draft.word_count();
        if words < self.min_words {
            issues.push(format!(
                "word count {} is below the minimum {}",
                words, self.min_words
            ));
            hard_failed = true;
        } else if words < self.target_words {
            // Soft: short of the richer target.
            issues.push(format!(
                "word count {} is below the target {}",
                words, self.target_words
            ));
        }

        // Soft: topics of this kind should show runnable examples.
        if kind.expects_code_examples() && draft.code_block_count() == 0 {
            issues.push(format!(
                "no code examples, expected for a {} topic",
                kind
            ));
        }

        // Soft: flagged generic filler.
        let lower = draft.body.to_lowercase();
        for phrase in consts::FILLER_PHRASES {
            if lower.contains(phrase) {
                issues.push(format!("contains filler phrase: \"{}\"", phrase));
            }
        }

        GateReport {
            status: if hard_failed {
                GateStatus::Fail
            } else {
                GateStatus::Pass
            },
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostMeta;

    fn meta() -> PostMeta {
        PostMeta {
            title: "Httpx Deep Dive".into(),
            excerpt: "A practical tour of httpx.".into(),
            tags: vec!["python".into()],
        }
    }

    fn good_body() -> String {
        let paragraph = "This sentence pads the article with real words. ".repeat(70);
        format!(
            "## Introduction\n\n{}\n\n```python\nimport httpx\nprint(httpx.get('https://example.com'))\n```\n",
            paragraph
        )
    }

    #[test]
    fn test_clean_draft_passes_with_no_issues() {
        let gate = QualityGate::default();
        let draft = Draft::new(meta(), good_body());
        let report = gate.validate(&draft, TopicKind::Package);
        assert!(report.passed());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let gate = QualityGate::default();
        let draft = Draft::new(meta(), good_body());
        let first = gate.validate(&draft, TopicKind::Package);
        let second = gate.validate(&draft, TopicKind::Package);
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_word_count_is_hard_failure() {
        let gate = QualityGate::default();
        let draft = Draft::new(meta(), "## Short\n\nOnly a few words here.");
        let report = gate.validate(&draft, TopicKind::Paper);
        assert!(!report.passed());
        assert!(report.issues.iter().any(|i| i.contains("below the minimum")));
    }

    #[test]
    fn test_missing_delimiter_is_hard_failure() {
        let gate = QualityGate::default();
        let body = "No heading here. ".repeat(50);
        let draft = Draft::new(meta(), body);
        let report = gate.validate(&draft, TopicKind::Paper);
        assert!(!report.passed());
        assert!(report.issues.iter().any(|i| i.contains("must begin")));
    }

    #[test]
    fn test_empty_body_is_hard_failure() {
        let gate = QualityGate::default();
        let draft = Draft::new(meta(), "  \n ");
        let report = gate.validate(&draft, TopicKind::Paper);
        assert!(!report.passed());
    }

    #[test]
    fn test_missing_front_matter_fields_are_hard_failures() {
        let gate = QualityGate::default();
        let mut bad_meta = meta();
        bad_meta.title = String::new();
        bad_meta.excerpt = "  ".into();
        let draft = Draft::new(bad_meta, good_body());
        let report = gate.validate(&draft, TopicKind::Package);
        assert!(!report.passed());
        assert_eq!(
            report.issues.iter().filter(|i| i.contains("front matter")).count(),
            2
        );
    }

    #[test]
    fn test_soft_issues_do_not_fail() {
        let gate = QualityGate::default();
        // 150 words, no code: over the minimum, under the target.
        let body = format!("## Intro\n\n{}", "word ".repeat(150));
        let draft = Draft::new(meta(), body);
        let report = gate.validate(&draft, TopicKind::Package);
        assert!(report.passed());
        assert!(report.issues.iter().any(|i| i.contains("below the target")));
        assert!(report.issues.iter().any(|i| i.contains("no code examples")));
    }

    #[test]
    fn test_paper_does_not_expect_code() {
        let gate = QualityGate::default();
        let body = format!("## Intro\n\n{}", "word ".repeat(600));
        let draft = Draft::new(meta(), body);
        let report = gate.validate(&draft, TopicKind::Paper);
        assert!(report.passed());
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_filler_phrase_is_soft_issue() {
        let gate = QualityGate::default();
        let body = format!(
            "## Intro\n\nIn today's fast-paced world, things move fast. {}\n\n```python\nprint(1)\n```\n",
            "word ".repeat(600)
        );
        let draft = Draft::new(meta(), body);
        let report = gate.validate(&draft, TopicKind::Package);
        assert!(report.passed());
        assert!(report.issues.iter().any(|i| i.contains("filler phrase")));
    }
}
