use serde::Deserialize;

use crate::log_repo::MAX_BATCH_SIZE;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
    /// Rows per INSERT batch when storing parsed records, at most MAX_BATCH_SIZE.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Upper bound on an uploaded log body.
    #[serde(default = "default_max_log_bytes")]
    pub max_log_bytes: usize,
    /// Render and store every view CSV at upload time.
    #[serde(default = "default_cache_views")]
    pub cache_views: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_log_bytes: default_max_log_bytes(),
            cache_views: default_cache_views(),
        }
    }
}

fn default_max_log_bytes() -> usize {
    32 * 1024 * 1024
}

fn default_cache_views() -> bool {
    true
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            (1..=MAX_BATCH_SIZE).contains(&self.database.batch_size),
            "database.batch_size must be between 1 and {}, got {}",
            MAX_BATCH_SIZE,
            self.database.batch_size
        );
        anyhow::ensure!(
            self.analysis.max_log_bytes > 0,
            "analysis.max_log_bytes must be > 0, got {}",
            self.analysis.max_log_bytes
        );
        Ok(())
    }
}
