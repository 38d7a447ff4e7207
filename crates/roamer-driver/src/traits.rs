//! Driver trait definition

use roamer_core::AppliedMigration;

use crate::error::DriverResult;

/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

/// Capabilities roamer needs from a database connection.
///
/// Statements run in autocommit mode: each call commits on its own.
pub trait Driver {
    /// Check whether a table exists in the connected database/schema
    fn table_exists(&mut self, name: &str) -> DriverResult<bool>;

    /// Execute a script of one or more statements verbatim
    fn execute_batch(&mut self, sql: &str) -> DriverResult<()>;

    /// Execute a single parameterised statement (`?` placeholders), returning affected rows
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DriverResult<usize>;

    /// Run a query selecting `id, appliedAt, dirty` and collect the rows
    fn query_history(&mut self, sql: &str) -> DriverResult<Vec<AppliedMigration>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn table_exists(&mut self, name: &str) -> DriverResult<bool> {
        (**self).table_exists(name)
    }

    fn execute_batch(&mut self, sql: &str) -> DriverResult<()> {
        (**self).execute_batch(sql)
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DriverResult<usize> {
        (**self).execute(sql, params)
    }

    fn query_history(&mut self, sql: &str) -> DriverResult<Vec<AppliedMigration>> {
        (**self).query_history(sql)
    }

    fn db_type(&self) -> &'static str {
        (**self).db_type()
    }
}
