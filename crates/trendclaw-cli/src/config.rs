use serde::Deserialize;
use std::path::{Path, PathBuf};
use trendclaw_skills::SkillsConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub skills: SkillsConfig,
}

impl Config {
    /// Get the global config path: ~/.trendclaw/trendclaw.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".trendclaw").join("trendclaw.toml"))
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.trendclaw/trendclaw.toml (optional)
    /// 2. Local override: ./trendclaw.toml (workspace, optional)
    /// 3. Explicit `--config` file (required when given)
    /// 4. Environment variables with the TRENDCLAW__ prefix (highest priority)
    ///
    /// Anything left unset falls back to the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let mut config_builder = config::Config::builder();

        if let Some(global) = Self::global_config_path() {
            config_builder = config_builder.add_source(config::File::from(global).required(false));
        }

        config_builder =
            config_builder.add_source(config::File::with_name("trendclaw").required(false));

        if let Some(path) = explicit {
            config_builder = config_builder.add_source(config::File::from(path));
        }

        // e.g. TRENDCLAW__LOGGING__LEVEL=debug
        config_builder = config_builder
            .add_source(config::Environment::with_prefix("TRENDCLAW").separator("__"));

        let config: Self = config_builder.build()?.try_deserialize()?;
        Ok(config)
    }
}
