//! Run configuration.
//!
//! Built once per run and immutable afterwards. Defaults carry the
//! production values; a TOML file and environment variables can override
//! them.

use serde::Deserialize;

use crate::error::{AppResult, ConfigError, FileError};

/// Run configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Query variants dispatched this run, in order.
    pub variants: Vec<String>,
    /// Transaction code of the order list view.
    pub transaction: String,
    /// Fixed number of session slots.
    pub max_sessions: usize,
    /// Numeric function profile handed to the mass-conversion action.
    pub conversion_profile: u32,
    /// Variant loaded for its display layout by the reload stage.
    pub reload_variant: String,
    /// Port of the local GUI scripting bridge.
    pub bridge_port: u16,
    /// Per-slot startup timeout in seconds.
    pub startup_timeout_secs: u64,
    /// Directory the per-run CSV exports land in.
    pub export_dir: String,
    /// Error log appended on run-level failures.
    pub error_log_file: String,
    /// Shared status log (JSON lines).
    pub status_log_file: String,
    /// Sheet/category label of the status entries.
    pub status_category: String,
    /// Show per-row classification traces in the log.
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variants: vec![
                "PLAUF_M_BESTAND".to_string(),
                "PLAUF_O_BESTAND".to_string(),
                "PLAUF_CSR".to_string(),
            ],
            transaction: "COHV".to_string(),
            max_sessions: 6,
            conversion_profile: 1,
            reload_variant: "PLAUF_M_BESTAND".to_string(),
            bridge_port: 8471,
            startup_timeout_secs: 60,
            export_dir: "exports".to_string(),
            error_log_file: "error.log".to_string(),
            status_log_file: "status.jsonl".to_string(),
            status_category: "COHV_MASS_CONVERSION".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// Loads `path` as TOML; absent keys keep their defaults.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| FileError::read(path, e))?;
        let config = toml::from_str(&content).map_err(|source| FileError::TomlParse {
            path: path.to_string(),
            source,
        })?;
        Ok(config)
    }

    /// Applies environment overrides on top of this configuration.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(value) = std::env::var("COHV_VARIANTS") {
            self.variants = value
                .split(',')
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect();
        }
        if let Some(value) = env_parse("COHV_MAX_SESSIONS") {
            self.max_sessions = value;
        }
        if let Some(value) = env_parse("COHV_BRIDGE_PORT") {
            self.bridge_port = value;
        }
        if let Some(value) = env_parse("COHV_CONVERSION_PROFILE") {
            self.conversion_profile = value;
        }
        if let Ok(value) = std::env::var("COHV_EXPORT_DIR") {
            self.export_dir = value;
        }
        if let Some(value) = env_parse("COHV_VERBOSE") {
            self.verbose_logging = value;
        }
        self
    }

    /// Full load path used by the binary: optional config file, then
    /// environment overrides.
    pub fn load(config_file: Option<&str>) -> AppResult<Self> {
        let base = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// A run without variants has nothing to dispatch.
    pub fn validate(&self) -> AppResult<()> {
        if self.variants.is_empty() {
            return Err(ConfigError::EmptyVariantList.into());
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(var: &str) -> Option<T> {
    std::env::var(var).ok().and_then(|v| v.parse().ok())
}
