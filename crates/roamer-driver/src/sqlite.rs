//! SQLite driver implementation

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use roamer_core::AppliedMigration;

use crate::error::{DriverError, DriverResult};
use crate::traits::{Driver, SqlValue};

/// SQLite connection
pub struct SqliteDriver {
    conn: Connection,
}

impl SqliteDriver {
    /// Open a database file, creating it if needed. `:memory:` opens an in-memory database.
    pub fn open(dsn: &str) -> DriverResult<Self> {
        let conn = if dsn == ":memory:" {
            Connection::open_in_memory()
        } else {
            Connection::open(dsn)
        }
        .map_err(|e| DriverError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Create an in-memory database
    pub fn in_memory() -> DriverResult<Self> {
        Self::open(":memory:")
    }
}

fn to_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Text(s) => Value::Text(s.clone()),
        SqlValue::Integer(i) => Value::Integer(*i),
    }
}

impl Driver for SqliteDriver {
    fn table_exists(&mut self, name: &str) -> DriverResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count == 1)
    }

    fn execute_batch(&mut self, sql: &str) -> DriverResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DriverResult<usize> {
        let values = params.iter().map(to_value);
        Ok(self.conn.execute(sql, params_from_iter(values))?)
    }

    fn query_history(&mut self, sql: &str) -> DriverResult<Vec<AppliedMigration>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(AppliedMigration {
                id: row.get(0)?,
                applied_at: row.get(1)?,
                dirty: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn db_type(&self) -> &'static str {
        "sqlite3"
    }
}
