//! roamer: paired up/down SQL migrations
//!
//! An [`Environment`] ties together the configuration in `roamer.toml`, a
//! local connection config, the migration scripts on disk, and a history
//! table in the target database. Moves between points in the migration
//! sequence are planned as an [`Operation`] and run against the database.
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut env = roamer::Environment::from_disk(Path::new("./"), "local")?;
//! let target = env.list_all_migrations().last().cloned();
//! let from = env
//!     .last_applied_migration()?
//!     .map(|a| env.migration_by_id(&a.id).cloned())
//!     .transpose()?;
//! env.new_operation(from.as_ref(), target.as_ref())?.run()?;
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod error;
pub mod history;
pub mod operation;
pub mod version;

pub use environment::Environment;
pub use error::EnvironmentError;
pub use history::HistoryLedger;
pub use operation::Operation;
pub use version::{check_minimum_version, version_string};

pub use roamer_config::{DriverType, LocalConfig, ResolvedConfig, RoamerConfig};
pub use roamer_core::{AppliedMigration, Direction, Migration};
pub use roamer_driver::{Driver, DriverError};
pub use roamer_loader::{CreatedMigration, RepositoryError};
pub use roamer_planner::{PlannerError, Violation};
