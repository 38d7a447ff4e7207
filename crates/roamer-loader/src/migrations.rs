use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use roamer_core::{DOWN_SUFFIX, Migration, UP_SUFFIX, migration_id};

use crate::error::RepositoryError;

static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^-- Description: (.*?)\r?$").expect("description pattern is valid")
});

/// Load the ordered migration sequence from a directory of paired
/// `<id>_<slug>_up.sql` / `<id>_<slug>_down.sql` files.
///
/// Every entry in the directory must be part of a pair; anything else is an
/// error rather than being skipped.
pub fn load_migrations_from_dir(dir: &Path) -> Result<Vec<Migration>, RepositoryError> {
    let entries = fs::read_dir(dir).map_err(|source| RepositoryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut filenames = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| RepositoryError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        filenames.push(entry.file_name().to_string_lossy().into_owned());
    }
    filenames.sort();

    // Base names in filename order, taken from the down scripts.
    let mut base_names = Vec::new();
    let mut down_bases = HashSet::new();
    let mut up_bases = BTreeSet::new();
    for filename in &filenames {
        if let Some(base) = filename.strip_suffix(DOWN_SUFFIX) {
            down_bases.insert(base.to_string());
            base_names.push(base.to_string());
        } else if let Some(base) = filename.strip_suffix(UP_SUFFIX) {
            up_bases.insert(base.to_string());
        } else {
            return Err(RepositoryError::UnrecognizedFile(filename.clone()));
        }
    }

    for base in &base_names {
        if !up_bases.contains(base) {
            return Err(RepositoryError::MissingPair {
                base_name: base.clone(),
                missing: format!("{base}{UP_SUFFIX}"),
            });
        }
    }
    if let Some(base) = up_bases.iter().find(|b| !down_bases.contains(*b)) {
        return Err(RepositoryError::MissingPair {
            base_name: base.clone(),
            missing: format!("{base}{DOWN_SUFFIX}"),
        });
    }

    let mut seen_ids = HashSet::new();
    let mut migrations = Vec::with_capacity(base_names.len());
    for (index, base) in base_names.iter().enumerate() {
        let id = migration_id(base);
        if !seen_ids.insert(id.to_string()) {
            return Err(RepositoryError::DuplicateId(id.to_string()));
        }

        let down_name = format!("{base}{DOWN_SUFFIX}");
        let down_path = dir.join(&down_name);
        let down_text = fs::read_to_string(&down_path).map_err(|source| {
            RepositoryError::ReadFile {
                path: down_path.clone(),
                source,
            }
        })?;

        migrations.push(Migration {
            id: id.to_string(),
            description: extract_description(&down_name, &down_text)?,
            index,
            up_path: dir.join(format!("{base}{UP_SUFFIX}")),
            down_path,
        });
    }

    warn_on_misordered_ids(&migrations);
    log::debug!(
        "loaded {} migration(s) from {}",
        migrations.len(),
        dir.display()
    );
    Ok(migrations)
}

/// Pull the single `-- Description: ...` line out of a down script.
pub fn extract_description(filename: &str, text: &str) -> Result<String, RepositoryError> {
    let mut matches = DESCRIPTION_RE.captures_iter(text);
    let first = matches
        .next()
        .ok_or_else(|| RepositoryError::MissingDescription(filename.to_string()))?;
    if matches.next().is_some() {
        return Err(RepositoryError::DuplicateDescription(filename.to_string()));
    }
    Ok(first[1].to_string())
}

// Filename order is authoritative, but ids of different widths sort
// lexicographically rather than numerically.
fn warn_on_misordered_ids(migrations: &[Migration]) {
    for pair in migrations.windows(2) {
        if let (Ok(a), Ok(b)) = (pair[0].id.parse::<u64>(), pair[1].id.parse::<u64>()) {
            if a > b {
                log::warn!(
                    "migration {} sorts after {} by filename but has a smaller id",
                    pair[1].id,
                    pair[0].id
                );
            }
        }
    }
}

/// Path of the script pair for a base name inside `dir`.
pub fn script_paths(dir: &Path, base_name: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{base_name}{UP_SUFFIX}")),
        dir.join(format!("{base_name}{DOWN_SUFFIX}")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write_pair(dir: &Path, base: &str, description: &str) {
        fs::write(
            dir.join(format!("{base}_up.sql")),
            format!("-- Description: {description}\nCREATE TABLE t{base} (id INTEGER);\n"),
        )
        .unwrap();
        fs::write(
            dir.join(format!("{base}_down.sql")),
            format!("-- Description: {description}\nDROP TABLE t{base};\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_load_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let migrations = load_migrations_from_dir(tmp.path()).unwrap();
        assert!(migrations.is_empty());
    }

    #[test]
    fn test_load_missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_migrations_from_dir(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, RepositoryError::ReadDir { .. }));
    }

    #[test]
    fn test_load_sorts_by_filename_and_assigns_index() {
        let tmp = TempDir::new().unwrap();
        write_pair(tmp.path(), "1600000003_baz", "third");
        write_pair(tmp.path(), "1600000001_foo", "first");
        write_pair(tmp.path(), "1600000002_bar", "second");

        let migrations = load_migrations_from_dir(tmp.path()).unwrap();
        let ids: Vec<_> = migrations.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1600000001", "1600000002", "1600000003"]);
        for (i, m) in migrations.iter().enumerate() {
            assert_eq!(m.index, i);
        }
        assert_eq!(migrations[0].description, "first");
        assert_eq!(
            migrations[1].up_path,
            tmp.path().join("1600000002_bar_up.sql")
        );
        assert_eq!(
            migrations[1].down_path,
            tmp.path().join("1600000002_bar_down.sql")
        );
    }

    #[test]
    fn test_up_without_down_names_base() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("1000_a_up.sql"), "SELECT 1;").unwrap();

        let err = load_migrations_from_dir(tmp.path()).unwrap_err();
        match err {
            RepositoryError::MissingPair { base_name, missing } => {
                assert_eq!(base_name, "1000_a");
                assert_eq!(missing, "1000_a_down.sql");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_down_without_up_names_base() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("1000_a_down.sql"),
            "-- Description: a\nSELECT 1;",
        )
        .unwrap();

        let err = load_migrations_from_dir(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("1000_a"));
        assert!(matches!(err, RepositoryError::MissingPair { .. }));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write_pair(tmp.path(), "1000_a", "a");
        write_pair(tmp.path(), "1000_b", "b");

        let err = load_migrations_from_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateId(ref id) if id == "1000"));
    }

    #[rstest]
    #[case("README.md")]
    #[case("1000_a.sql")]
    #[case(".gitkeep")]
    fn test_unrecognized_file_is_rejected(#[case] name: &str) {
        let tmp = TempDir::new().unwrap();
        write_pair(tmp.path(), "1000_a", "a");
        fs::write(tmp.path().join(name), "").unwrap();

        let err = load_migrations_from_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, RepositoryError::UnrecognizedFile(ref f) if f == name));
    }

    #[rstest]
    #[case::plain("-- Description: add users\nCREATE TABLE x;", Some("add users"))]
    #[case::crlf("-- Description: add users\r\nDROP TABLE x;\r\n", Some("add users"))]
    #[case::not_first_line("DROP TABLE x;\n-- Description: later\n", Some("later"))]
    #[case::no_trailing_newline("-- Description: eof", Some("eof"))]
    #[case::indented("  -- Description: nope\n", None)]
    #[case::missing("DROP TABLE x;\n", None)]
    fn test_extract_description(#[case] text: &str, #[case] expected: Option<&str>) {
        let result = extract_description("x_down.sql", text);
        match expected {
            Some(description) => assert_eq!(result.unwrap(), description),
            None => assert!(matches!(
                result.unwrap_err(),
                RepositoryError::MissingDescription(_)
            )),
        }
    }

    #[test]
    fn test_extract_description_rejects_duplicates() {
        let text = "-- Description: one\n-- Description: two\n";
        let err = extract_description("x_down.sql", text).unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateDescription(ref f) if f == "x_down.sql"));
    }

    #[test]
    fn test_missing_description_in_down_script_fails_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("1000_a_up.sql"), "SELECT 1;").unwrap();
        fs::write(tmp.path().join("1000_a_down.sql"), "SELECT 1;").unwrap();

        let err = load_migrations_from_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, RepositoryError::MissingDescription(ref f) if f == "1000_a_down.sql"));
    }
}
