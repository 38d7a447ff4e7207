pub mod config;
pub mod error;
pub mod migrations;
pub mod template;

pub use config::{
    CONFIG_FILE_NAME, DEFAULT_LOCAL_NAME, config_path, load_config, load_local_config,
    local_config_path, write_new_config,
};
pub use error::RepositoryError;
pub use migrations::{extract_description, load_migrations_from_dir, script_paths};
pub use template::{CreatedMigration, create_migration, slugify};
