//! MySQL driver implementation

use mysql::prelude::Queryable;
use mysql::{Conn, Opts, Params, Value};
use roamer_core::AppliedMigration;

use crate::dsn::mysql_url;
use crate::error::{DriverError, DriverResult};
use crate::traits::{Driver, SqlValue};

/// MySQL connection
pub struct MySqlDriver {
    conn: Conn,
}

impl MySqlDriver {
    /// Connect using a `mysql://` URL or a `user:password@tcp(host:port)/db` DSN.
    pub fn open(dsn: &str) -> DriverResult<Self> {
        let url = mysql_url(dsn)?;
        let opts = Opts::from_url(&url).map_err(|e| DriverError::InvalidDsn(e.to_string()))?;
        if opts.get_db_name().is_none() {
            return Err(DriverError::InvalidDsn(
                "a database name is required".to_string(),
            ));
        }
        let conn = Conn::new(opts).map_err(|e| DriverError::Connection(e.to_string()))?;
        Ok(Self { conn })
    }
}

fn to_params(params: &[SqlValue]) -> Params {
    if params.is_empty() {
        return Params::Empty;
    }
    Params::Positional(
        params
            .iter()
            .map(|p| match p {
                SqlValue::Text(s) => Value::from(s.as_str()),
                SqlValue::Integer(i) => Value::from(*i),
            })
            .collect(),
    )
}

impl Driver for MySqlDriver {
    fn table_exists(&mut self, name: &str) -> DriverResult<bool> {
        let count: Option<u64> = self.conn.exec_first(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = DATABASE() AND table_name = ?",
            (name,),
        )?;
        match count {
            Some(count) => Ok(count == 1),
            None => Err(DriverError::Execution(
                "did not expect no response to COUNT(*)".to_string(),
            )),
        }
    }

    fn execute_batch(&mut self, sql: &str) -> DriverResult<()> {
        // The text protocol runs multi-statement scripts and drains every result set.
        self.conn.query_drop(sql)?;
        Ok(())
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DriverResult<usize> {
        self.conn.exec_drop(sql, to_params(params))?;
        Ok(self.conn.affected_rows() as usize)
    }

    fn query_history(&mut self, sql: &str) -> DriverResult<Vec<AppliedMigration>> {
        let rows = self
            .conn
            .query_map(sql, |(id, applied_at, dirty): (String, i64, bool)| {
                AppliedMigration {
                    id,
                    applied_at,
                    dirty,
                }
            })?;
        Ok(rows)
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }
}
