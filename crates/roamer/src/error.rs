use std::io;
use std::path::PathBuf;

use roamer_driver::DriverError;
use roamer_loader::RepositoryError;
use roamer_planner::PlannerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error("failed to read migration script {path}: {source}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("operation has already been run")]
    AlreadyRun,
    #[error(
        "cannot run operation with incorrect From migration: operation starts at {expected}, database is at {actual}"
    )]
    IncorrectFrom { expected: String, actual: String },
    #[error("migration {migration_id}: {source}")]
    OperationFailed {
        migration_id: String,
        #[source]
        source: Box<EnvironmentError>,
    },
    #[error("this environment requires roamer {required} or newer (running {current})")]
    VersionTooOld { required: String, current: String },
    #[error("invalid minimum version '{0}'")]
    InvalidMinimumVersion(String),
    #[error("invalid history table name '{0}'")]
    InvalidHistoryTable(String),
}

impl EnvironmentError {
    /// True when the error ultimately means an id did not match any migration.
    pub fn is_migration_not_found(&self) -> bool {
        match self {
            EnvironmentError::Planner(PlannerError::MigrationNotFound(_)) => true,
            EnvironmentError::OperationFailed { source, .. } => source.is_migration_not_found(),
            _ => false,
        }
    }

    /// Id of the migration that failed, when this error came from running an operation.
    pub fn failed_migration(&self) -> Option<&str> {
        match self {
            EnvironmentError::OperationFailed { migration_id, .. } => Some(migration_id),
            _ => None,
        }
    }
}
