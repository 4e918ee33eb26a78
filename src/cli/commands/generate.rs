//! Generate Command
//!
//! One full production run: pick the next topic, optionally sanitize
//! reference material, drive the generation pipeline, and publish the
//! accepted document.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use console::style;

use crate::ai::{GenerationConstraints, RetryPolicy, TimeoutConfig, create_provider};
use crate::catalog::CatalogSet;
use crate::config::ConfigLoader;
use crate::coverage::{CoverageStore, TopicScheduler};
use crate::pipeline::{DocumentWriter, GenerationPipeline};
use crate::sanitize::Sanitizer;
use crate::types::Result;

pub struct GenerateOptions {
    /// Reference material (e.g. a fetched README) to ground the article in
    pub context_file: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Select and print the topic without generating anything
    pub dry_run: bool,
}

pub async fn run(options: GenerateOptions) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    if let Some(provider) = options.provider {
        config.llm.provider = provider;
    }
    if let Some(model) = options.model {
        config.llm.model = Some(model);
    }
    config.validate()?;

    let catalogs = CatalogSet::load(&config.paths.catalog_dir)?;
    let store = CoverageStore::new(&config.paths.coverage_file);
    let coverage = store.load()?;
    let scheduler = TopicScheduler::new(config.scheduler.category_order.clone());
    let topic = scheduler.select_next(&catalogs, &coverage)?;

    println!(
        "{} {} [{}] v{}",
        style("Topic:").bold(),
        topic.title,
        topic.kind,
        topic.version
    );

    if options.dry_run {
        println!("{}", style("Dry run, nothing generated.").dim());
        return Ok(());
    }

    let context = match &options.context_file {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let sanitizer = Sanitizer::from_config(&config.sanitizer);
            Some(sanitizer.sanitize(&raw, config.sanitizer.max_chars))
        }
        None => None,
    };

    let provider = create_provider(&config.llm)?;
    println!(
        "{} {} ({})",
        style("Provider:").bold(),
        provider.name(),
        provider.model()
    );

    let pipeline = GenerationPipeline::new(provider)
        .with_retry(RetryPolicy::from_config(&config.retry))
        .with_timeouts(TimeoutConfig::with_llm_request_secs(config.llm.timeout_secs))
        .with_constraints(GenerationConstraints {
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
        });

    let document = pipeline.run(&topic, context.as_deref()).await?;

    let writer = DocumentWriter::new(&config.paths.posts_dir, store);
    let entry = writer.publish(&topic, &document, Utc::now())?;

    println!(
        "{} {}",
        style("✓ Published").green().bold(),
        config.paths.posts_dir.join(&entry.filename).display()
    );
    Ok(())
}
