//! Topic Scheduler
//!
//! Deterministically picks the next topic from the catalogs and the coverage
//! snapshot. Breadth before depth: no subject is treated a second time until
//! every subject across every category has been treated once, and repeat
//! treatments go to the subject with the smallest version so re-coverage
//! spreads evenly instead of clustering.
//!
//! No randomness and no I/O; both inputs are passed in explicitly so the
//! algorithm is testable in isolation.

use tracing::{debug, info};

use crate::catalog::CatalogSet;
use crate::types::{MillError, Result, Topic, TopicKind};

use super::store::CoverageLog;

/// Deterministic next-topic selection over read-only catalogs
#[derive(Debug, Clone)]
pub struct TopicScheduler {
    /// Category priority order; earlier kinds are exhausted first
    category_order: Vec<TopicKind>,
}

impl Default for TopicScheduler {
    fn default() -> Self {
        Self {
            category_order: TopicKind::ALL.to_vec(),
        }
    }
}

impl TopicScheduler {
    pub fn new(category_order: Vec<TopicKind>) -> Self {
        Self { category_order }
    }

    /// Select the next topic to produce.
    ///
    /// 1. First `(kind, id)` never covered, walking categories in priority
    ///    order and each catalog in its supplied order, at version 1.
    /// 2. Once everything has been covered at least once, the candidate with
    ///    the smallest recorded version (ties broken by category order, then
    ///    catalog order) at version `max + 1`.
    /// 3. Entirely empty catalogs are a configuration error.
    pub fn select_next(&self, catalogs: &CatalogSet, coverage: &CoverageLog) -> Result<Topic> {
        if catalogs.is_empty() {
            return Err(MillError::Scheduling(
                "no catalog entries available".to_string(),
            ));
        }

        // Breadth pass: first uncovered candidate wins.
        for &kind in &self.category_order {
            for item in catalogs.candidates(kind) {
                if coverage.max_version(kind, &item.id) == 0 {
                    info!(kind = %kind, id = %item.id, "selected uncovered topic");
                    return Ok(item.to_topic(kind, 1));
                }
            }
        }

        // Version-increment pass: everything covered at least once, pick the
        // least-treated subject. Strictly-less comparison keeps the earliest
        // category/catalog position on ties.
        let mut best: Option<(u32, TopicKind, &crate::catalog::CatalogItem)> = None;
        for &kind in &self.category_order {
            for item in catalogs.candidates(kind) {
                let version = coverage.max_version(kind, &item.id);
                if best.is_none_or(|(v, _, _)| version < v) {
                    best = Some((version, kind, item));
                }
            }
        }

        match best {
            Some((max_version, kind, item)) => {
                debug!(
                    kind = %kind,
                    id = %item.id,
                    next_version = max_version + 1,
                    "all topics covered, re-treating least-versioned subject"
                );
                Ok(item.to_topic(kind, max_version + 1))
            }
            // Unreachable given the emptiness check, but never panic.
            None => Err(MillError::Scheduling(
                "no catalog entries available".to_string(),
            )),
        }
    }
}
