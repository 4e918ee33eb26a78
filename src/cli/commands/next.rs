//! Next Command
//!
//! Show what the scheduler would pick, without generating or recording
//! anything.

use console::style;

use crate::catalog::CatalogSet;
use crate::config::ConfigLoader;
use crate::coverage::{CoverageStore, TopicScheduler};
use crate::types::Result;

pub fn run(format: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    let catalogs = CatalogSet::load(&config.paths.catalog_dir)?;
    let coverage = CoverageStore::new(&config.paths.coverage_file).load()?;
    let scheduler = TopicScheduler::new(config.scheduler.category_order.clone());
    let topic = scheduler.select_next(&catalogs, &coverage)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&topic)?);
    } else {
        println!("{}", style("Next topic").bold());
        println!("  Kind:    {}", topic.kind);
        println!("  Id:      {}", topic.id);
        println!("  Title:   {}", topic.title);
        println!("  Version: {}", topic.version);
        if let Some(url) = &topic.url {
            println!("  URL:     {}", url);
        }
    }
    Ok(())
}
