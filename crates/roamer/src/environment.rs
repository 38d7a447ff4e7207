use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use roamer_config::ResolvedConfig;
use roamer_core::{AppliedMigration, Direction, Migration};
use roamer_driver::{Driver, driver_available, open_driver};
use roamer_loader::{
    CreatedMigration, create_migration, load_config, load_local_config, load_migrations_from_dir,
};
use roamer_planner::{
    Violation, find_migration, first_violation, plan_operation, resolve_id_or_offset,
    verify_exist, verify_no_dirty, verify_order, verify_safe_to_apply,
};

use crate::error::EnvironmentError;
use crate::history::{HistoryLedger, is_valid_table_name};
use crate::operation::Operation;
use crate::version::check_minimum_version;

/// The context roamer operates in: configuration, an open connection, and the
/// ordered migrations found on disk.
pub struct Environment {
    config: ResolvedConfig,
    driver: Box<dyn Driver>,
    ledger: HistoryLedger,
    migrations: Vec<Migration>,
    migrations_dir: PathBuf,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("driver", &self.driver.db_type())
            .field("history_table", &self.ledger.table_name())
            .field("migrations", &self.migrations.len())
            .field("migrations_dir", &self.migrations_dir)
            .finish()
    }
}

impl Environment {
    /// Build an environment from resolved configuration, an open driver, and
    /// the directory holding the migration scripts.
    pub fn new(
        config: ResolvedConfig,
        driver: Box<dyn Driver>,
        migrations_dir: impl Into<PathBuf>,
    ) -> Result<Self, EnvironmentError> {
        if let Some(required) = &config.minimum_version {
            check_minimum_version(required)?;
        }
        if !is_valid_table_name(config.history_table()) {
            return Err(EnvironmentError::InvalidHistoryTable(
                config.history_table().to_string(),
            ));
        }

        let migrations_dir = migrations_dir.into();
        let migrations = load_migrations_from_dir(&migrations_dir)?;
        let ledger = HistoryLedger::new(config.history_table());

        Ok(Self {
            config,
            driver,
            ledger,
            migrations,
            migrations_dir,
        })
    }

    /// Open the environment rooted at `env_dir`, reading `roamer.toml` and
    /// `roamer.<local_name>.toml` and connecting to the configured database.
    pub fn from_disk(env_dir: &Path, local_name: &str) -> Result<Self> {
        let metadata = fs::metadata(env_dir)
            .with_context(|| format!("environment '{}' does not exist", env_dir.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!(
                "environment path '{}' is a file, not a folder! Provide the directory containing roamer.toml, not the file itself.",
                env_dir.display()
            );
        }

        let config = load_config(env_dir)?;
        let local = load_local_config(env_dir, local_name)?;
        let resolved = config.resolve(&local);

        if let Some(required) = &resolved.minimum_version {
            check_minimum_version(required)?;
        }
        if !driver_available(resolved.driver) {
            anyhow::bail!("{} support not available in this build", resolved.driver);
        }

        let driver = open_driver(resolved.driver, &resolved.dsn)
            .with_context(|| format!("connect to {} database", resolved.driver))?;
        let migrations_dir = env_dir.join(config.migration_directory());

        Ok(Self::new(resolved, driver, migrations_dir)?)
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Name of the table used to track applied migrations.
    pub fn history_table_name(&self) -> &str {
        self.ledger.table_name()
    }

    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// All migrations on disk, in order.
    pub fn list_all_migrations(&self) -> &[Migration] {
        &self.migrations
    }

    pub fn migration_by_id(&self, id: &str) -> Result<&Migration, EnvironmentError> {
        Ok(find_migration(&self.migrations, id)?)
    }

    /// Applied migrations recorded in the database, oldest first.
    pub fn list_applied_migrations(&mut self) -> Result<Vec<AppliedMigration>, EnvironmentError> {
        Ok(self.ledger.list_applied(self.driver.as_mut())?)
    }

    pub fn last_applied_migration(
        &mut self,
    ) -> Result<Option<AppliedMigration>, EnvironmentError> {
        Ok(self.ledger.last_applied(self.driver.as_mut())?)
    }

    /// Resolve a migration id, absolute offset (`@2`), or relative offset (`@+1`).
    pub fn resolve_id_or_offset(
        &mut self,
        token: &str,
    ) -> Result<Option<Migration>, EnvironmentError> {
        let last = if is_relative_offset(token) {
            self.last_applied_migration()?
        } else {
            None
        };
        let last_id = last.as_ref().map(|a| a.id.as_str());
        Ok(resolve_id_or_offset(token, &self.migrations, last_id)?.cloned())
    }

    pub fn verify_no_dirty(&mut self) -> Result<bool, EnvironmentError> {
        Ok(verify_no_dirty(&self.list_applied_migrations()?))
    }

    pub fn verify_exist(&mut self) -> Result<bool, EnvironmentError> {
        let applied = self.list_applied_migrations()?;
        Ok(verify_exist(&self.migrations, &applied))
    }

    pub fn verify_order(&mut self) -> Result<bool, EnvironmentError> {
        let applied = self.list_applied_migrations()?;
        Ok(verify_order(&self.migrations, &applied))
    }

    /// The first safety check that fails, if any.
    pub fn first_violation(&mut self) -> Result<Option<Violation>, EnvironmentError> {
        let applied = self.list_applied_migrations()?;
        Ok(first_violation(&self.migrations, &applied))
    }

    /// Whether it is safe to apply further migrations.
    pub fn verify_safe_to_apply(&mut self) -> Result<bool, EnvironmentError> {
        let applied = self.list_applied_migrations()?;
        Ok(verify_safe_to_apply(&self.migrations, &applied))
    }

    /// Plan a move between two points. `None` means "no migrations applied".
    pub fn new_operation(
        &mut self,
        from: Option<&Migration>,
        to: Option<&Migration>,
    ) -> Result<Operation<'_>, EnvironmentError> {
        let plan = plan_operation(
            &self.migrations,
            from.map(|m| m.id.as_str()),
            to.map(|m| m.id.as_str()),
        )?;
        Ok(Operation::new(self, from.cloned(), to.cloned(), plan))
    }

    /// Apply a single migration in one direction.
    ///
    /// The dirty marker, the script, and the marker clear are three separate
    /// commits. If the script fails the row stays dirty and the error is
    /// returned; recovering is a manual step.
    pub fn apply_migration(
        &mut self,
        migration: &Migration,
        direction: Direction,
        stamp: bool,
    ) -> Result<(), EnvironmentError> {
        let script = if stamp {
            None
        } else {
            let path = migration.script_path(direction);
            Some(
                fs::read_to_string(path).map_err(|source| EnvironmentError::ReadScript {
                    path: path.to_path_buf(),
                    source,
                })?,
            )
        };

        let driver = self.driver.as_mut();
        self.ledger.ensure_table(driver)?;
        self.ledger
            .record_applying(driver, &migration.id, direction, Utc::now().timestamp())?;

        if let Some(script) = script.filter(|s| !s.trim().is_empty()) {
            if let Err(err) = driver.execute_batch(&script) {
                log::warn!(
                    "{} migration {} failed, leaving it dirty: {}",
                    direction,
                    migration.id,
                    err
                );
                return Err(err.into());
            }
        }

        match direction {
            Direction::Up => self.ledger.record_applied(driver, &migration.id)?,
            Direction::Down => self.ledger.record_reverted(driver, &migration.id)?,
        }
        log::info!(
            "{} {} migration {} - {}",
            if stamp { "stamped" } else { "applied" },
            direction,
            migration.id,
            migration.description
        );
        Ok(())
    }

    /// Write a new templated migration pair and reload the sequence.
    pub fn create_migration(
        &mut self,
        description: &str,
    ) -> Result<CreatedMigration, EnvironmentError> {
        let created = create_migration(&self.migrations_dir, description, &self.migrations)?;
        self.migrations = load_migrations_from_dir(&self.migrations_dir)?;
        Ok(created)
    }

    pub(crate) fn migration_at(&self, index: usize) -> &Migration {
        &self.migrations[index]
    }
}

fn is_relative_offset(token: &str) -> bool {
    token.starts_with("@+") || token.starts_with("@-")
}
