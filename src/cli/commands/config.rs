//! Config Command
//!
//! Inspect the merged configuration.
//!
//! Usage:
//!   draftmill config show [-f json]
//!   draftmill config path

use crate::config::ConfigLoader;
use crate::types::{MillError, Result};

/// Show the merged effective configuration. Secrets are skipped during
/// serialization and never printed.
pub fn show(format: &str) -> Result<()> {
    let config = ConfigLoader::load()?;
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        let rendered = toml::to_string_pretty(&config)
            .map_err(|e| MillError::Config(format!("Failed to render config: {}", e)))?;
        println!("{}", rendered);
    }
    Ok(())
}

/// Show the configuration file path and whether it exists
pub fn path() -> Result<()> {
    let path = ConfigLoader::project_config_path();
    println!(
        "{} ({})",
        path.display(),
        if path.exists() { "present" } else { "absent" }
    );
    Ok(())
}
