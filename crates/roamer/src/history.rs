use roamer_core::{AppliedMigration, Direction};
use roamer_driver::{Driver, DriverResult, SqlValue};

/// Reads and writes the table of applied migrations.
///
/// Every method issues independent statements; nothing here opens a
/// transaction, so a dirty marker written before a script runs stays
/// visible if the script or the process fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLedger {
    table: String,
}

/// Whether `name` is safe to splice into SQL as a table identifier.
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl HistoryLedger {
    /// The caller is responsible for checking `table` with [`is_valid_table_name`].
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn table_exists(&self, driver: &mut dyn Driver) -> DriverResult<bool> {
        driver.table_exists(&self.table)
    }

    /// Create the history table if this is the first migration ever applied.
    pub fn ensure_table(&self, driver: &mut dyn Driver) -> DriverResult<()> {
        if self.table_exists(driver)? {
            return Ok(());
        }
        log::info!("creating history table {}", self.table);
        driver.execute_batch(&format!(
            "CREATE TABLE {} (id VARCHAR(255) NOT NULL PRIMARY KEY, appliedAt BIGINT NOT NULL, dirty BOOLEAN NOT NULL)",
            self.table
        ))
    }

    /// Mark a migration as in flight before its script runs.
    ///
    /// Going up inserts a new dirty row; going down flags the existing row.
    pub fn record_applying(
        &self,
        driver: &mut dyn Driver,
        id: &str,
        direction: Direction,
        applied_at: i64,
    ) -> DriverResult<()> {
        log::debug!("marking {} dirty ({})", id, direction);
        match direction {
            Direction::Up => driver.execute(
                &format!(
                    "INSERT INTO {} (id, appliedAt, dirty) VALUES (?, ?, 1)",
                    self.table
                ),
                &[SqlValue::from(id), SqlValue::from(applied_at)],
            )?,
            Direction::Down => driver.execute(
                &format!("UPDATE {} SET dirty = 1 WHERE id = ?", self.table),
                &[SqlValue::from(id)],
            )?,
        };
        Ok(())
    }

    /// Clear the dirty flag after an up script succeeded.
    pub fn record_applied(&self, driver: &mut dyn Driver, id: &str) -> DriverResult<()> {
        driver.execute(
            &format!("UPDATE {} SET dirty = 0 WHERE id = ?", self.table),
            &[SqlValue::from(id)],
        )?;
        Ok(())
    }

    /// Remove the row after a down script succeeded.
    pub fn record_reverted(&self, driver: &mut dyn Driver, id: &str) -> DriverResult<()> {
        driver.execute(
            &format!("DELETE FROM {} WHERE id = ?", self.table),
            &[SqlValue::from(id)],
        )?;
        Ok(())
    }

    /// All rows, oldest first. Empty if the table has not been created yet.
    pub fn list_applied(&self, driver: &mut dyn Driver) -> DriverResult<Vec<AppliedMigration>> {
        if !self.table_exists(driver)? {
            return Ok(Vec::new());
        }
        driver.query_history(&format!(
            "SELECT id, appliedAt, dirty FROM {} ORDER BY appliedAt ASC, id ASC",
            self.table
        ))
    }

    /// Most recently applied row, if any.
    pub fn last_applied(&self, driver: &mut dyn Driver) -> DriverResult<Option<AppliedMigration>> {
        if !self.table_exists(driver)? {
            return Ok(None);
        }
        let rows = driver.query_history(&format!(
            "SELECT id, appliedAt, dirty FROM {} ORDER BY appliedAt DESC, id DESC LIMIT 1",
            self.table
        ))?;
        Ok(rows.into_iter().next())
    }
}
