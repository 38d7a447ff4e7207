use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use roamer_config::{DriverType, RoamerConfig};
use roamer_loader::{config_path, local_config_path, write_new_config};

use super::setup::new_local_config;

pub fn cmd_init(
    env_dir: &Path,
    local_name: &str,
    driver: Option<DriverType>,
    dsn: Option<String>,
) -> Result<()> {
    let config = RoamerConfig::default();
    let config_file = config_path(env_dir);
    let local_file = local_config_path(env_dir, local_name);
    let migrations_dir = env_dir.join(config.migration_directory());

    if config_file.exists() {
        bail!("A roamer.toml file already exists!\nPerhaps you meant `roamer setup`?");
    }
    if local_file.exists() {
        bail!(
            "A roamer.{local_name}.toml file already exists!\nIt looks like you already have a roamer environment set up."
        );
    }
    if migrations_dir.exists() {
        bail!(
            "A migrations directory already exists!\nYou need to remove or move this directory first."
        );
    }

    write_new_config(&config_file, &config)?;
    write_new_config(&local_file, &new_local_config(driver, dsn))?;
    fs::create_dir_all(&migrations_dir).with_context(|| {
        format!("create migrations directory: {}", migrations_dir.display())
    })?;

    println!(
        "{} {}, {}, and {}",
        "Created".bright_green(),
        config_file.display().to_string().bright_white(),
        local_file.display().to_string().bright_white(),
        migrations_dir.display().to_string().bright_white()
    );
    println!(
        "If you're using version control software, make sure to exclude roamer.{local_name}.toml from it!"
    );
    Ok(())
}
