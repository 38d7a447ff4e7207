use std::path::{Path, PathBuf};

/// Filename suffix of a script that applies a migration.
pub const UP_SUFFIX: &str = "_up.sql";
/// Filename suffix of a script that reverts a migration.
pub const DOWN_SUFFIX: &str = "_down.sql";

/// A single reversible change, backed by a pair of SQL scripts on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub id: String,
    pub description: String,
    /// Position in the ordered migration sequence.
    pub index: usize,
    pub up_path: PathBuf,
    pub down_path: PathBuf,
}

impl Migration {
    /// Script to execute when moving in the given direction.
    pub fn script_path(&self, direction: crate::Direction) -> &Path {
        match direction {
            crate::Direction::Up => &self.up_path,
            crate::Direction::Down => &self.down_path,
        }
    }
}

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub id: String,
    /// Unix timestamp (seconds) at which the migration was recorded.
    pub applied_at: i64,
    pub dirty: bool,
}

/// Extract the migration id from a base name such as `1600000000_create_users`.
///
/// The id is everything before the first underscore; a base name without an
/// underscore is its own id.
pub fn migration_id(base_name: &str) -> &str {
    base_name.split('_').next().unwrap_or(base_name)
}

/// Index of `id` within `migrations`, if present.
pub fn position_of(migrations: &[Migration], id: &str) -> Option<usize> {
    migrations.iter().position(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;
    use rstest::rstest;

    #[rstest]
    #[case("1600000000_create_users", "1600000000")]
    #[case("1_foo", "1")]
    #[case("42", "42")]
    #[case("7_with_many_parts", "7")]
    fn migration_id_is_prefix_before_first_underscore(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(migration_id(base), expected);
    }

    #[test]
    fn script_path_follows_direction() {
        let m = Migration {
            id: "1".into(),
            description: "first".into(),
            index: 0,
            up_path: PathBuf::from("1_first_up.sql"),
            down_path: PathBuf::from("1_first_down.sql"),
        };
        assert_eq!(m.script_path(Direction::Up), Path::new("1_first_up.sql"));
        assert_eq!(m.script_path(Direction::Down), Path::new("1_first_down.sql"));
    }

    #[test]
    fn position_of_finds_index() {
        let make = |id: &str, index| Migration {
            id: id.into(),
            description: String::new(),
            index,
            up_path: PathBuf::new(),
            down_path: PathBuf::new(),
        };
        let migrations = vec![make("1", 0), make("2", 1)];
        assert_eq!(position_of(&migrations, "2"), Some(1));
        assert_eq!(position_of(&migrations, "3"), None);
    }
}
