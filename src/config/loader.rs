//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Project config (draftmill.toml)
//! 3. Environment variables (DRAFTMILL_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{MillError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → project file → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // e.g. DRAFTMILL_LLM_PROVIDER -> llm.provider
        figment = figment.merge(Env::prefixed("DRAFTMILL_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| MillError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| MillError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from("draftmill.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draftmill.toml");
        fs::write(
            &path,
            r#"
[llm]
provider = "openai"
temperature = 0.7

[sanitizer]
max_chars = 5000
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.sanitizer.max_chars, 5000);
        // untouched sections keep defaults
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draftmill.toml");
        fs::write(&path, "[llm]\ntemperature = 9.0\n").unwrap();

        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ConfigLoader::load_from_file(Path::new("/nonexistent/draftmill.toml")).unwrap();
        assert_eq!(config.llm.provider, "ollama");
    }
}
