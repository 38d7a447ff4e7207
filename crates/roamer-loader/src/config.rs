use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roamer_config::{LocalConfig, RoamerConfig};
use serde::Serialize;

/// Name of the shared config file inside an environment directory.
pub const CONFIG_FILE_NAME: &str = "roamer.toml";
/// Local config name used when none is given.
pub const DEFAULT_LOCAL_NAME: &str = "local";

/// Path of the shared config file for an environment.
pub fn config_path(env_dir: &Path) -> PathBuf {
    env_dir.join(CONFIG_FILE_NAME)
}

/// Path of a named local config file, e.g. `roamer.local.toml`.
pub fn local_config_path(env_dir: &Path, local_name: &str) -> PathBuf {
    env_dir.join(format!("roamer.{local_name}.toml"))
}

/// Load `roamer.toml` from an environment directory.
pub fn load_config(env_dir: &Path) -> Result<RoamerConfig> {
    let path = config_path(env_dir);
    if !path.exists() {
        anyhow::bail!(
            "environment is missing {CONFIG_FILE_NAME} at {}. Run 'roamer init' first.",
            path.display()
        );
    }

    let content = fs::read_to_string(&path).context("read roamer.toml")?;
    let config: RoamerConfig = toml::from_str(&content).context("parse roamer.toml")?;
    Ok(config)
}

/// Load `roamer.<local_name>.toml` from an environment directory.
pub fn load_local_config(env_dir: &Path, local_name: &str) -> Result<LocalConfig> {
    let path = local_config_path(env_dir, local_name);
    if !path.exists() {
        anyhow::bail!(
            "environment is missing local config file {}. Run 'roamer setup' to create one.",
            path.display()
        );
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("read local config: {}", path.display()))?;
    let config: LocalConfig = toml::from_str(&content)
        .with_context(|| format!("parse local config: {}", path.display()))?;
    Ok(config)
}

/// Serialize a config to TOML and write it, refusing to overwrite.
pub fn write_new_config<T: Serialize>(path: &Path, config: &T) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    let text = toml::to_string_pretty(config).context("serialize config")?;
    fs::write(path, text).with_context(|| format!("write file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roamer_config::DriverType;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_missing_file() {
        let tmp = tempdir().unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("missing roamer.toml"));
    }

    #[test]
    fn test_load_local_config_missing_file() {
        let tmp = tempdir().unwrap();
        let err = load_local_config(tmp.path(), "local").unwrap_err();
        assert!(err.to_string().contains("roamer.local.toml"));
    }

    #[test]
    fn test_written_configs_load_back() {
        let tmp = tempdir().unwrap();
        write_new_config(&config_path(tmp.path()), &RoamerConfig::default()).unwrap();
        write_new_config(
            &local_config_path(tmp.path(), "ci"),
            &LocalConfig::default(),
        )
        .unwrap();

        assert_eq!(load_config(tmp.path()).unwrap(), RoamerConfig::default());
        let local = load_local_config(tmp.path(), "ci").unwrap();
        assert_eq!(local.database.driver, DriverType::MySql);
    }

    #[test]
    fn test_write_new_config_refuses_overwrite() {
        let tmp = tempdir().unwrap();
        let path = config_path(tmp.path());
        write_new_config(&path, &RoamerConfig::default()).unwrap();
        let err = write_new_config(&path, &RoamerConfig::default()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_load_config_rejects_unknown_key() {
        let tmp = tempdir().unwrap();
        fs::write(config_path(tmp.path()), "[environment]\nbogus = 1\n").unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("bogus"));
    }
}
