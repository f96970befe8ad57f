//! Storage backend selection and connection setup
//!
//! Exactly one backend is chosen at startup:
//! - PostgreSQL when a networked connection string is configured
//! - SQLite (a single local file) otherwise

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, AppResult, RepositoryResult};
use crate::repositories::{MealRepository, PostgresMealRepository, SqliteMealRepository};

/// Connected storage backend
#[derive(Clone)]
pub struct Database {
    repository: Arc<dyn MealRepository>,
    database_type: DatabaseType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    SQLite,
    PostgreSQL,
}

impl Database {
    /// Connect to the backend described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let database_type = Self::detect_database_type(config)?;
        info!("Connecting to {} database", database_type.as_str());

        let repository: Arc<dyn MealRepository> = match database_type {
            DatabaseType::SQLite => Arc::new(Self::connect_sqlite(config).await?),
            DatabaseType::PostgreSQL => Arc::new(Self::connect_postgres(config).await?),
        };

        debug!("Database connection established successfully");
        Ok(Self::from_repository(repository))
    }

    /// Wrap an already constructed repository
    pub fn from_repository(repository: Arc<dyn MealRepository>) -> Self {
        let database_type = repository.driver();
        Self {
            repository,
            database_type,
        }
    }

    /// Detect the backend from the configured connection string
    fn detect_database_type(config: &DatabaseConfig) -> AppResult<DatabaseType> {
        match config.networked_url() {
            None => Ok(DatabaseType::SQLite),
            Some(url) if url.starts_with("postgres:") || url.starts_with("postgresql:") => {
                Ok(DatabaseType::PostgreSQL)
            }
            Some(url) => Err(AppError::configuration(format!(
                "unsupported database URL format: {} (expected postgres:// or postgresql://)",
                redact_url(url)
            ))),
        }
    }

    async fn connect_sqlite(config: &DatabaseConfig) -> Result<SqliteMealRepository> {
        Self::ensure_parent_directory(&config.path)?;

        let created = !config.path.exists();
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open SQLite database at {}", config.path.display()))?;

        if created {
            info!("Created SQLite database file: {}", config.path.display());
        }

        Ok(SqliteMealRepository::new(pool))
    }

    async fn connect_postgres(config: &DatabaseConfig) -> Result<PostgresMealRepository> {
        let url = config.networked_url().unwrap_or_default();

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await
            .with_context(|| format!("Failed to connect to database at '{}'", redact_url(url)))?;

        Ok(PostgresMealRepository::new(pool))
    }

    /// Create parent directories of the SQLite file if they don't exist
    fn ensure_parent_directory(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory for SQLite database: {}", parent.display())
                })?;
                info!("Created directory for SQLite database: {}", parent.display());
            }
        }
        Ok(())
    }

    /// Create the backing table if needed; safe to call on every startup
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        info!("Ensuring meals schema for {}", self.database_type.as_str());
        self.repository.ensure_schema().await?;
        info!("Meals schema ready");
        Ok(())
    }

    /// Shared handle to the active repository
    pub fn repository(&self) -> Arc<dyn MealRepository> {
        self.repository.clone()
    }

    /// Get the database type
    pub fn database_type(&self) -> DatabaseType {
        self.database_type
    }
}

impl DatabaseType {
    /// Driver name reported by the health check
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseType::SQLite => "sqlite",
            DatabaseType::PostgreSQL => "postgres",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query parameters whose values are masked by [`redact_url`]
const SENSITIVE_PARAMS: &[&str] = &["password", "pass", "passwd", "pwd"];

/// Mask credentials in a connection string before logging it
///
/// Covers both the `user:password@` authority and password query
/// parameters. Unparseable input is not echoed back.
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return "[unparseable url]".to_string();
    };

    if parsed.password().is_some() {
        let _ = parsed.set_password(Some("***"));
    }

    let has_sensitive = parsed
        .query_pairs()
        .any(|(key, _)| is_sensitive_param(&key));
    if has_sensitive {
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(key, value)| {
                let value = if is_sensitive_param(&key) {
                    "***".to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();
        parsed.query_pairs_mut().clear().extend_pairs(pairs);
    }

    parsed.to_string()
}

fn is_sensitive_param(key: &str) -> bool {
    SENSITIVE_PARAMS
        .iter()
        .any(|param| key.eq_ignore_ascii_case(param))
}
