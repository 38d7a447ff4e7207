//! Error types for roamer-driver

use roamer_config::DriverType;
use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DriverError {
    /// Could not open or configure the connection
    #[error("database connection failed: {0}")]
    Connection(String),

    /// A statement or script failed
    #[error("SQL execution failed: {0}")]
    Execution(String),

    /// Support for the driver was not compiled in
    #[error("{0} support not available in this build")]
    Unavailable(DriverType),

    /// The DSN could not be understood
    #[error("invalid DSN '{0}'")]
    InvalidDsn(String),
}

/// Result type alias for DriverError
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        DriverError::Execution(err.to_string())
    }
}

#[cfg(feature = "mysql")]
impl From<mysql::Error> for DriverError {
    fn from(err: mysql::Error) -> Self {
        match err {
            mysql::Error::UrlError(e) => DriverError::InvalidDsn(e.to_string()),
            mysql::Error::IoError(e) => DriverError::Connection(e.to_string()),
            other => DriverError::Execution(other.to_string()),
        }
    }
}
