//! Coverage Tracking and Topic Scheduling
//!
//! The store owns the append-only record of what has been produced; the
//! scheduler consumes a snapshot of it plus the read-only catalogs to pick
//! the next topic deterministically.

mod scheduler;
mod store;

pub use scheduler::TopicScheduler;
pub use store::{CoverageLog, CoverageStore};
