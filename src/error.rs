//! The error type shared by the store, the domain operations, and configuration loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttendanceError {
    /// A lookup by id found nothing.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Malformed or missing input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A write referenced a row that does not exist.
    #[error("{entity} {id} does not exist")]
    MissingReference { entity: &'static str, id: i32 },

    #[error("database error: {0}")]
    Store(#[from] diesel::result::Error),

    #[error("failed to connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),

    #[error("database schema version {found} is newer than the supported version {supported}")]
    UnsupportedSchemaVersion { found: i32, supported: i32 },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("roster error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AttendanceError {
    /// Returns `true` when this error means a requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, AttendanceError>;
