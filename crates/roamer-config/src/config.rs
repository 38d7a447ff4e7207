use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::driver_type::DriverType;

/// Default name of the table that records applied migrations.
pub const DEFAULT_HISTORY_TABLE: &str = "roamer_history";

pub fn default_migration_directory() -> PathBuf {
    PathBuf::from("migrations/")
}

pub fn default_history_table() -> String {
    DEFAULT_HISTORY_TABLE.to_string()
}

/// `[environment]` section of `roamer.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentSection {
    /// Migrations directory, relative to the directory holding `roamer.toml`.
    #[serde(default = "default_migration_directory")]
    pub migration_directory: PathBuf,
    #[serde(default = "default_history_table")]
    pub history_table: String,
    /// Oldest roamer version allowed to operate on this environment.
    /// Empty means no requirement.
    #[serde(default)]
    pub minimum_version: String,
}

impl Default for EnvironmentSection {
    fn default() -> Self {
        Self {
            migration_directory: default_migration_directory(),
            history_table: default_history_table(),
            minimum_version: String::new(),
        }
    }
}

/// Shared configuration, checked into version control as `roamer.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoamerConfig {
    #[serde(default)]
    pub environment: EnvironmentSection,
}

/// `[database]` section of a local config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    pub driver: DriverType,
    pub dsn: String,
    /// Overrides `environment.history_table` for this machine only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_table: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            driver: DriverType::MySql,
            dsn: "user:password@tcp(localhost:3306)/dbname".to_string(),
            history_table: None,
        }
    }
}

/// Per-machine configuration (`roamer.local.toml` and friends), kept out of
/// version control because it carries connection credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalConfig {
    #[serde(default)]
    pub database: DatabaseSection,
}

impl RoamerConfig {
    pub fn migration_directory(&self) -> &Path {
        &self.environment.migration_directory
    }

    pub fn minimum_version(&self) -> Option<&str> {
        let v = self.environment.minimum_version.trim();
        if v.is_empty() { None } else { Some(v) }
    }

    /// Layer a local config over this one. Local values win where both set one.
    pub fn resolve(&self, local: &LocalConfig) -> ResolvedConfig {
        ResolvedConfig {
            migration_directory: self.environment.migration_directory.clone(),
            history_table: local
                .database
                .history_table
                .clone()
                .unwrap_or_else(|| self.environment.history_table.clone()),
            minimum_version: self.minimum_version().map(str::to_string),
            driver: local.database.driver,
            dsn: local.database.dsn.clone(),
        }
    }
}

/// Effective settings after merging the environment and local layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub migration_directory: PathBuf,
    pub history_table: String,
    pub minimum_version: Option<String>,
    pub driver: DriverType,
    pub dsn: String,
}

impl ResolvedConfig {
    pub fn migration_directory(&self) -> &Path {
        &self.migration_directory
    }

    pub fn history_table(&self) -> &str {
        &self.history_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roamer_config_default() {
        let config = RoamerConfig::default();

        assert_eq!(config.migration_directory(), Path::new("migrations/"));
        assert_eq!(config.environment.history_table, "roamer_history");
        assert_eq!(config.minimum_version(), None);
    }

    #[test]
    fn test_local_config_default_is_mysql() {
        let local = LocalConfig::default();
        assert_eq!(local.database.driver, DriverType::MySql);
        assert!(local.database.history_table.is_none());
    }

    #[test]
    fn test_resolve_uses_environment_table_when_local_is_silent() {
        let config = RoamerConfig::default();
        let local = LocalConfig {
            database: DatabaseSection {
                driver: DriverType::Sqlite3,
                dsn: "test.db".into(),
                history_table: None,
            },
        };

        let resolved = config.resolve(&local);
        assert_eq!(resolved.history_table(), "roamer_history");
        assert_eq!(resolved.driver, DriverType::Sqlite3);
        assert_eq!(resolved.dsn, "test.db");
        assert_eq!(resolved.migration_directory(), Path::new("migrations/"));
    }

    #[test]
    fn test_resolve_local_overrides_history_table() {
        let config = RoamerConfig {
            environment: EnvironmentSection {
                minimum_version: " 0.1.0 ".into(),
                ..Default::default()
            },
        };
        let local = LocalConfig {
            database: DatabaseSection {
                history_table: Some("custom_history".into()),
                ..Default::default()
            },
        };

        let resolved = config.resolve(&local);
        assert_eq!(resolved.history_table(), "custom_history");
        assert_eq!(resolved.minimum_version.as_deref(), Some("0.1.0"));
    }

    #[test]
    fn test_parse_toml_with_missing_keys_uses_defaults() {
        let config: RoamerConfig = toml::from_str("[environment]\n").unwrap();
        assert_eq!(config, RoamerConfig::default());
    }

    #[test]
    fn test_parse_toml_rejects_unknown_keys() {
        let err = toml::from_str::<RoamerConfig>("[environment]\nmigrations = \"x\"\n").unwrap_err();
        assert!(err.to_string().contains("migrations"));
    }

    #[test]
    fn test_parse_local_toml() {
        let local: LocalConfig =
            toml::from_str("[database]\ndriver = \"sqlite3\"\ndsn = \"file.db\"\n").unwrap();
        assert_eq!(local.database.driver, DriverType::Sqlite3);
        assert_eq!(local.database.dsn, "file.db");
    }

    #[test]
    fn test_parse_local_toml_rejects_unknown_driver() {
        let result = toml::from_str::<LocalConfig>("[database]\ndriver = \"oracle\"\ndsn = \"\"\n");
        assert!(result.is_err());
    }
}
