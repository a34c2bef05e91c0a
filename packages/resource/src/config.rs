use std::path::Path;

use common::config::{AuditConfig, ConversionConfig};
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load from config/resource.toml
        Self::build(File::with_name("config/resource").required(false))
    }

    /// Load with `path` as the file source instead of `config/resource`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let s = Config::builder()
            .set_default("audit.default_auditor", "system")?
            .set_default("conversion.batch_size", 100)?
            .add_source(file)
            // Override from environment (e.g., RESOURCE__AUDIT__DEFAULT_AUDITOR)
            .add_source(Environment::with_prefix("RESOURCE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
