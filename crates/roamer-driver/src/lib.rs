//! roamer-driver: database capability layer
//!
//! The migration engine talks to databases only through the [`Driver`]
//! trait. Concrete drivers are compiled in through cargo features and picked
//! once, from the configured [`DriverType`], by [`open_driver`].

pub mod dsn;
pub mod error;
#[cfg(feature = "mysql")]
pub mod mysql_driver;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod traits;

pub use error::{DriverError, DriverResult};
#[cfg(feature = "mysql")]
pub use mysql_driver::MySqlDriver;
use roamer_config::DriverType;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDriver;
pub use traits::{Driver, SqlValue};

/// Whether support for a driver type was compiled into this build.
pub fn driver_available(driver: DriverType) -> bool {
    match driver {
        DriverType::MySql => cfg!(feature = "mysql"),
        DriverType::Sqlite3 => cfg!(feature = "sqlite"),
    }
}

/// Open a connection for the configured driver type.
#[cfg_attr(
    not(any(feature = "sqlite", feature = "mysql")),
    allow(unused_variables)
)]
pub fn open_driver(driver: DriverType, dsn: &str) -> DriverResult<Box<dyn Driver>> {
    log::debug!("opening {} connection", driver);
    match driver {
        #[cfg(feature = "mysql")]
        DriverType::MySql => Ok(Box::new(MySqlDriver::open(dsn)?)),
        #[cfg(feature = "sqlite")]
        DriverType::Sqlite3 => Ok(Box::new(SqliteDriver::open(dsn)?)),
        #[allow(unreachable_patterns)]
        other => Err(DriverError::Unavailable(other)),
    }
}
