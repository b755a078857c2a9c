//! Vericode Config - Secret provisioning for front-ends
//!
//! The secret comes from `VERICODE_SECRET_KEY` when set, otherwise from the
//! `VERICODE_SECRET_KEY` field of a JSON config file (`config.json`, or the
//! path in `VERICODE_CONFIG`). The same file may carry a `defaults` object
//! overriding the built-in generation parameters.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use vericode_core::{GenerationParams, SecretKey, VericodeError};

/// Environment variable holding the secret
pub const SECRET_ENV: &str = "VERICODE_SECRET_KEY";

/// Environment variable overriding the config file path
pub const CONFIG_PATH_ENV: &str = "VERICODE_CONFIG";

/// Config file used when `VERICODE_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("VERICODE_SECRET_KEY not set in environment or {0}")]
    MissingSecret(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] VericodeError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Optional overrides for generation parameters
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParamDefaults {
    pub period: Option<u64>,
    pub length: Option<usize>,
    pub use_digits: Option<bool>,
    pub use_uppercase: Option<bool>,
    pub use_lowercase: Option<bool>,
}

impl ParamDefaults {
    /// Layer these overrides onto `base`
    pub fn apply(&self, base: GenerationParams) -> GenerationParams {
        let mut params = base;
        if let Some(period) = self.period {
            params = params.with_period(period);
        }
        if let Some(length) = self.length {
            params = params.with_length(length);
        }
        if let Some(on) = self.use_digits {
            params = params.with_digits(on);
        }
        if let Some(on) = self.use_uppercase {
            params = params.with_uppercase(on);
        }
        if let Some(on) = self.use_lowercase {
            params = params.with_lowercase(on);
        }
        params
    }
}

/// On-disk config file layout
#[derive(Default, Deserialize)]
struct FileConfig {
    #[serde(rename = "VERICODE_SECRET_KEY")]
    secret_key: Option<String>,
    #[serde(default)]
    defaults: ParamDefaults,
}

impl std::fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfig")
            .field("has_secret", &self.secret_key.is_some())
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// Resolved settings for a front-end
#[derive(Debug)]
pub struct Settings {
    pub secret: SecretKey,
    pub params: GenerationParams,
}

impl Settings {
    /// Resolve from the process environment and the config file
    pub fn load() -> ConfigResult<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let env_secret = std::env::var(SECRET_ENV).ok();
        Self::from_sources(env_secret, &path)
    }

    /// Resolve from an explicit env value and config path.
    /// A non-empty env secret wins; the file is still read for defaults
    /// when it exists.
    pub fn from_sources(env_secret: Option<String>, path: &Path) -> ConfigResult<Self> {
        let file = read_file(path)?;

        let secret = match env_secret.filter(|s| !s.is_empty()) {
            Some(s) => {
                tracing::debug!("secret loaded from environment");
                s
            }
            None => match file.secret_key.filter(|s| !s.is_empty()) {
                Some(s) => {
                    tracing::debug!(path = %path.display(), "secret loaded from config file");
                    s
                }
                None => return Err(ConfigError::MissingSecret(path.to_path_buf())),
            },
        };

        let secret = SecretKey::try_from(secret)?;
        let params = file.defaults.apply(GenerationParams::default());
        params.check()?;

        Ok(Settings { secret, params })
    }
}

/// Missing file is an empty config; unreadable or malformed is an error
fn read_file(path: &Path) -> ConfigResult<FileConfig> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(FileConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
