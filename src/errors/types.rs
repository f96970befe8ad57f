//! Error type definitions for the meal planner
//!
//! Storage failures are classified once, at the repository boundary, so the
//! web layer only has to map the top-level [`AppError`] onto status codes.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input rejected before reaching storage
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} for {id}")]
    NotFound { resource: String, id: String },

    /// The storage engine could not be reached
    #[error("Storage backend unavailable: {message}")]
    BackendUnavailable { message: String },

    /// Repository layer errors other than connectivity
    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    /// Invalid startup configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database connection failures
    #[error("Database connection failed: {message}")]
    ConnectionFailed { message: String },

    /// SQL query execution failures
    #[error("Query failed: {query} - {message}")]
    QueryFailed { query: String, message: String },

    /// Payload serialization/deserialization failures
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, I: Into<String>>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::ConnectionFailed { message } => Self::BackendUnavailable { message },
            other => Self::Repository(other),
        }
    }
}

impl RepositoryError {
    /// Create a query failed error
    pub fn query_failed<Q: Into<String>, M: Into<String>>(query: Q, message: M) -> Self {
        Self::QueryFailed {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Create a connection failed error
    pub fn connection_failed<M: Into<String>>(message: M) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Classify a sqlx failure raised while running `query`
    ///
    /// Pool exhaustion, I/O and TLS failures mean the backend is unreachable;
    /// everything else is reported as a failed query.
    pub fn from_sqlx<Q: Into<String>>(query: Q, error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::connection_failed(error.to_string()),
            other => Self::query_failed(query, other.to_string()),
        }
    }

    /// Whether this error means the storage engine could not be reached
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeouts_are_connectivity_failures() {
        let error = RepositoryError::from_sqlx("get meal", sqlx::Error::PoolTimedOut);
        assert!(error.is_connectivity());

        let app: AppError = error.into();
        assert!(matches!(app, AppError::BackendUnavailable { .. }));
    }

    #[test]
    fn io_errors_are_connectivity_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = RepositoryError::from_sqlx("upsert meal", sqlx::Error::Io(io));
        assert!(error.is_connectivity());
    }

    #[test]
    fn other_failures_keep_the_query_name() {
        let error = RepositoryError::from_sqlx("get meal", sqlx::Error::RowNotFound);
        match &error {
            RepositoryError::QueryFailed { query, .. } => assert_eq!(query, "get meal"),
            other => panic!("unexpected error: {other:?}"),
        }

        let app: AppError = error.into();
        assert!(matches!(app, AppError::Repository(_)));
    }
}
