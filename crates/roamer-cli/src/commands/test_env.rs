use std::fs;
use std::path::Path;

use roamer::{DriverType, Environment};

use super::init::cmd_init;

/// Initialise an environment in `dir` backed by an in-memory SQLite database.
pub fn sqlite_environment(dir: &Path) -> Environment {
    cmd_init(dir, "local", Some(DriverType::Sqlite3), Some(":memory:".into())).unwrap();
    Environment::from_disk(dir, "local").unwrap()
}

pub fn write_pair(env_dir: &Path, base: &str, up: &str, down: &str) {
    let dir = env_dir.join("migrations");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(format!("{base}_up.sql")),
        format!("-- Description: {base}\n{up}\n"),
    )
    .unwrap();
    fs::write(
        dir.join(format!("{base}_down.sql")),
        format!("-- Description: {base}\n{down}\n"),
    )
    .unwrap();
}

/// Environment with migrations `1_foo`, `2_bar`, `3_baz`.
pub fn three_migration_environment(dir: &Path) -> Environment {
    cmd_init(dir, "local", Some(DriverType::Sqlite3), Some(":memory:".into())).unwrap();
    for (base, table) in [("1_foo", "foo"), ("2_bar", "bar"), ("3_baz", "baz")] {
        write_pair(
            dir,
            base,
            &format!("CREATE TABLE {table} (id INTEGER PRIMARY KEY);"),
            &format!("DROP TABLE {table};"),
        );
    }
    Environment::from_disk(dir, "local").unwrap()
}
