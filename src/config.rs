// src/config.rs
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{DocError, Result};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

pub const ENV_API_BASE: &str = "CONDUCTDOC_API_BASE";
pub const ENV_DOC_ORIGIN: &str = "CONDUCTDOC_DOC_ORIGIN";
pub const ENV_TIMEOUT_SECS: &str = "CONDUCTDOC_TIMEOUT_SECS";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where `POST /generate-docs` and `GET /health` are sent.
    pub api_base: String,
    /// Origin that generated `doc_url` paths are resolved against.
    pub doc_origin: String,
    /// Upper bound on a single generation request.
    pub timeout_secs: u64,
}

/// One layer of partial settings. The TOML file, the environment and the
/// command line each produce one; higher layers win field by field.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default)]
    pub doc_origin: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ConfigLayer {
    /// Reads a TOML layer from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&data)?)
    }

    /// Builds a layer from `CONDUCTDOC_*` variables via `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup(ENV_TIMEOUT_SECS).filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                DocError::Config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?),
            None => None,
        };

        Ok(Self {
            api_base: lookup(ENV_API_BASE).filter(|s| !s.trim().is_empty()),
            doc_origin: lookup(ENV_DOC_ORIGIN).filter(|s| !s.trim().is_empty()),
            timeout_secs,
        })
    }

    /// Fills unset fields of `self` from `lower`.
    pub fn over(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            api_base: self.api_base.or(lower.api_base),
            doc_origin: self.doc_origin.or(lower.doc_origin),
            timeout_secs: self.timeout_secs.or(lower.timeout_secs),
        }
    }
}

/// `<config_dir>/conductdoc/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("conductdoc").join("config.toml"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            doc_origin: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, the environment and `cli`,
    /// in increasing order of precedence.
    ///
    /// An explicit `path` must exist; the default location is only read if present.
    pub fn load(path: Option<&Path>, cli: ConfigLayer) -> Result<Self> {
        let file = match path {
            Some(path) => ConfigLayer::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    log::debug!("reading config from {}", path.display());
                    ConfigLayer::from_file(&path)?
                }
                _ => ConfigLayer::default(),
            },
        };
        let env = ConfigLayer::from_lookup(|key| std::env::var(key).ok())?;

        Self::from_layers(cli.over(env).over(file))
    }

    /// Applies defaults to a merged layer and validates the result.
    pub fn from_layers(layer: ConfigLayer) -> Result<Self> {
        let api_base = layer
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        // Generated docs are served by the API host unless told otherwise.
        let doc_origin = layer.doc_origin.unwrap_or_else(|| api_base.clone());
        let timeout_secs = layer.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let config = AppConfig {
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            doc_origin: doc_origin.trim().trim_end_matches('/').to_string(),
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("api_base", &self.api_base), ("doc_origin", &self.doc_origin)] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(DocError::Config(format!(
                    "{} must be an http:// or https:// URL, got '{}'",
                    name, value
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(DocError::Config("timeout_secs must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
