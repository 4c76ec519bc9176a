use crate::config::AnalysisConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering built-in defaults, a TOML file, an
    /// optional JSON file of the same stem, then `RETAIL_`-prefixed environment variables.
    ///
    /// Nested keys in the environment use `__`, e.g. `RETAIL_OVERSTOCK__MAX_QTY_SOLD=15`.
    /// A missing TOML or JSON file is not an error; defaults fill the gap.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or a value has the wrong type.
    pub fn load(path: impl AsRef<Path>) -> Result<AnalysisConfig> {
        let path = path.as_ref();
        let config: AnalysisConfig = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        tracing::debug!(path = %path.display(), ?config, "Configuration loaded");
        Ok(config)
    }

    /// Loads the default `config/Config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_default() -> Result<AnalysisConfig> {
        Self::load("config/Config.toml")
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AnalysisConfig::default()))
            .merge(Toml::file(path))
            .merge(Json::file(path.with_extension("json")))
            .merge(Env::prefixed("RETAIL_").split("__"))
    }
}
