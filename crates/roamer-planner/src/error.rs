use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlannerError {
    #[error("invalid input '{0}'")]
    InvalidInput(String),
    #[error("offset '{0}' is out of bounds")]
    OffsetBound(String),
    #[error("migration not found: {0}")]
    MigrationNotFound(String),
}
