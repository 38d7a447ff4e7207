use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read migrations directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read migration file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write migration file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("migration '{base_name}' is missing its pair file '{missing}'")]
    MissingPair { base_name: String, missing: String },
    #[error("migration file '{0}' did not end in recognized suffixes '_down.sql' or '_up.sql'")]
    UnrecognizedFile(String),
    #[error("there are two migrations with ID {0}")]
    DuplicateId(String),
    #[error("migration file '{0}' is missing a description line")]
    MissingDescription(String),
    #[error("migration file '{0}' has too many description lines")]
    DuplicateDescription(String),
    #[error("migration file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}
