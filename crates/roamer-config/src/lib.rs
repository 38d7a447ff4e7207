pub mod config;
pub mod driver_type;

pub use config::{
    DEFAULT_HISTORY_TABLE, DatabaseSection, EnvironmentSection, LocalConfig, ResolvedConfig,
    RoamerConfig, default_history_table, default_migration_directory,
};
pub use driver_type::DriverType;

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    #[test]
    fn default_values_are_standard_paths() {
        let cfg = RoamerConfig::default();
        assert_eq!(cfg.migration_directory(), Path::new("migrations/"));
        assert_eq!(cfg.environment.history_table, DEFAULT_HISTORY_TABLE);
    }

    #[test]
    fn overrides_work_via_struct_update() {
        let cfg = RoamerConfig {
            environment: EnvironmentSection {
                migration_directory: PathBuf::from("db/changes"),
                ..Default::default()
            },
        };

        assert_eq!(cfg.migration_directory(), Path::new("db/changes"));
        assert_eq!(cfg.environment.history_table, "roamer_history");
    }
}
