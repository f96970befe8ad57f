use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::AppError;

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string of the networked backend; unset means SQLite
    #[serde(default)]
    pub url: Option<String>,
    /// SQLite database file
    pub path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// `*` or a comma separated list of origins
    pub allowed_origins: String,
}

/// Cross-origin policy derived from [`WebConfig::allowed_origins`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl DatabaseConfig {
    /// The networked connection string, if one is configured
    pub fn networked_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

impl WebConfig {
    pub fn origins(&self) -> AllowedOrigins {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|origin| origin == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: None,
                path: PathBuf::from(DEFAULT_DB_PATH),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
            web: WebConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
            },
        }
    }
}

/// Well-known environment variables and the keys they override
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("DB_PATH", "database.path"),
    ("ALLOWED_ORIGINS", "web.allowed_origins"),
    ("PORT", "web.port"),
];

impl Config {
    /// Load configuration from an optional file and the process environment
    pub fn load(config_file: &Path) -> Result<Self> {
        Self::load_from(config_file, std::env::vars().collect())
    }

    /// Load configuration from an optional file and the given variables
    ///
    /// Precedence, lowest first: defaults, the TOML file, `MEALS_*`
    /// variables, then `DATABASE_URL`, `DB_PATH`, `ALLOWED_ORIGINS`
    /// and `PORT`. Empty variables are ignored.
    pub fn load_from(config_file: &Path, vars: HashMap<String, String>) -> Result<Self> {
        let file_name = config_file.to_string_lossy();

        let mut builder = config::Config::builder()
            .set_default("database.path", DEFAULT_DB_PATH)?
            .set_default("database.max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .set_default("web.host", DEFAULT_HOST)?
            .set_default("web.port", i64::from(DEFAULT_PORT))?
            .set_default("web.allowed_origins", DEFAULT_ALLOWED_ORIGINS)?
            .add_source(config::File::new(&file_name, config::FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(Some(vars.clone())),
            );

        for (var, key) in LEGACY_ENV_KEYS {
            if let Some(value) = vars.get(*var).map(|v| v.trim()).filter(|v| !v.is_empty()) {
                debug!("Configuration key {} set from {}", key, var);
                builder = builder.set_override(*key, value)?;
            }
        }

        let config = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| {
                AppError::configuration(format!("invalid configuration (file: {}): {}", file_name, e))
            })?;
        Ok(config)
    }
}
