use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;
use roamer_config::{DatabaseSection, DriverType, LocalConfig};
use roamer_loader::{local_config_path, write_new_config};

/// Default DSN written for a SQLite environment.
const DEFAULT_SQLITE_DSN: &str = "roamer.db";

/// Local config written by `init` and `setup`, with optional overrides.
pub fn new_local_config(driver: Option<DriverType>, dsn: Option<String>) -> LocalConfig {
    let defaults = DatabaseSection::default();
    let driver = driver.unwrap_or(defaults.driver);
    let dsn = dsn.unwrap_or_else(|| match driver {
        DriverType::Sqlite3 => DEFAULT_SQLITE_DSN.to_string(),
        DriverType::MySql => defaults.dsn,
    });
    LocalConfig {
        database: DatabaseSection {
            driver,
            dsn,
            history_table: None,
        },
    }
}

pub fn cmd_setup(
    env_dir: &Path,
    local_name: &str,
    driver: Option<DriverType>,
    dsn: Option<String>,
) -> Result<()> {
    let path = local_config_path(env_dir, local_name);
    if path.exists() {
        bail!(
            "A roamer.{local_name}.toml file already exists!\nIt looks like you already have a roamer environment set up."
        );
    }

    write_new_config(&path, &new_local_config(driver, dsn))?;
    println!(
        "{} {}",
        "Created".bright_green(),
        path.display().to_string().bright_white()
    );
    println!("You should edit it to include your database connection details.");
    Ok(())
}
