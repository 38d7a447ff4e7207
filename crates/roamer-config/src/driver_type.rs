use std::fmt;

#[cfg(feature = "cli")]
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported database engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(ValueEnum))]
pub enum DriverType {
    #[serde(rename = "mysql")]
    #[cfg_attr(feature = "cli", value(name = "mysql"))]
    MySql,
    #[serde(rename = "sqlite3")]
    #[cfg_attr(feature = "cli", value(name = "sqlite3"))]
    Sqlite3,
}

impl Default for DriverType {
    fn default() -> Self {
        DriverType::MySql
    }
}

impl DriverType {
    /// Name used in config files and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            DriverType::MySql => "mysql",
            DriverType::Sqlite3 => "sqlite3",
        }
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::DriverType;

    #[test]
    fn default_is_mysql() {
        assert_eq!(DriverType::default(), DriverType::MySql);
    }

    #[test]
    fn display_matches_config_name() {
        assert_eq!(DriverType::MySql.to_string(), "mysql");
        assert_eq!(DriverType::Sqlite3.to_string(), "sqlite3");
    }
}
