//! Status Command
//!
//! Summarize the coverage log and catalog progress.

use console::style;

use crate::catalog::CatalogSet;
use crate::config::ConfigLoader;
use crate::coverage::CoverageStore;
use crate::types::{Result, TopicKind};

pub fn run(format: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    let catalogs = CatalogSet::load(&config.paths.catalog_dir)?;
    let coverage = CoverageStore::new(&config.paths.coverage_file).load()?;

    let per_kind: Vec<(TopicKind, usize, usize)> = TopicKind::ALL
        .iter()
        .map(|&kind| {
            let candidates = catalogs.candidates(kind);
            let covered = candidates
                .iter()
                .filter(|c| coverage.max_version(kind, &c.id) > 0)
                .count();
            (kind, covered, candidates.len())
        })
        .collect();

    if format == "json" {
        let status = serde_json::json!({
            "documents": coverage.len(),
            "catalog_total": catalogs.total_len(),
            "categories": per_kind
                .iter()
                .map(|(kind, covered, total)| {
                    serde_json::json!({
                        "kind": kind.as_str(),
                        "covered": covered,
                        "total": total,
                    })
                })
                .collect::<Vec<_>>(),
            "last": coverage.entries().last(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", style("Coverage status").bold());
    println!("══════════════════════════════════════");
    println!("Documents produced: {}", coverage.len());
    println!();
    println!("Per category (covered/catalog):");
    for (kind, covered, total) in per_kind {
        println!("  {:<11} {}/{}", format!("{kind}:"), covered, total);
    }
    if let Some(last) = coverage.entries().last() {
        println!();
        println!("Last published: {} ({})", last.filename, last.date);
    }
    Ok(())
}
