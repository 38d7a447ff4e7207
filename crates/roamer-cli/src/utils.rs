use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use roamer::{Environment, Migration, Violation};

pub const NO_MIGRATIONS: &str =
    "There are no migrations.\nGet started by doing `roamer create <description>`";

/// Fail unless `path` is an existing directory.
pub fn check_environment_dir(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            bail!("Environment '{}' does not exist.", path.display())
        }
        Err(err) => {
            return Err(err).with_context(|| format!("inspect environment {}", path.display()));
        }
    };
    if !metadata.is_dir() {
        bail!(
            "Environment '{}' is actually a file!\nMake sure your environment is the directory containing your roamer.toml file, not the file itself!",
            path.display()
        );
    }
    Ok(())
}

pub fn open_environment(env_dir: &Path, local_name: &str) -> Result<Environment> {
    log::debug!(
        "opening environment {} with local config '{}'",
        env_dir.display(),
        local_name
    );
    Environment::from_disk(env_dir, local_name)
        .with_context(|| format!("open environment {}", env_dir.display()))
}

/// Explanation printed when a check fails before migrations are applied.
pub fn violation_message(violation: Violation) -> String {
    let text = violation.to_string();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Refuse to continue if any safety check fails.
pub fn require_safe(env: &mut Environment) -> Result<()> {
    if let Some(violation) = env.first_violation()? {
        bail!(
            "{}\nIt is not safe to apply additional migrations at this time.\nFor more information, and help resolving the issue, do `roamer status`.",
            violation_message(violation)
        );
    }
    Ok(())
}

/// Manual recovery steps for a dirty migration.
pub fn dirty_recovery_instructions(history_table: &str) -> String {
    format!(
        "You must connect to the database and manually resolve the issue.\nThen, update the {history_table} table and, depending on how you resolved the issue, either delete the migration or set the dirty flag to 0."
    )
}

/// Id of a migration endpoint, `[nothing]` for the empty state.
pub fn endpoint_label(migration: Option<&Migration>) -> &str {
    migration.map_or("[nothing]", |m| m.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn check_environment_dir_accepts_directory() {
        let tmp = tempdir().unwrap();
        assert!(check_environment_dir(tmp.path()).is_ok());
    }

    #[test]
    fn check_environment_dir_rejects_missing() {
        let tmp = tempdir().unwrap();
        let err = check_environment_dir(&tmp.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn check_environment_dir_rejects_file() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("roamer.toml");
        fs::write(&file, "").unwrap();
        let err = check_environment_dir(&file).unwrap_err();
        assert!(err.to_string().contains("is actually a file"));
    }

    #[rstest]
    #[case::dirty(Violation::Dirty, "One or more migrations are marked as dirty.")]
    #[case::missing(
        Violation::Missing,
        "There are migrations in the database that do not exist on disk."
    )]
    #[case::out_of_order(
        Violation::OutOfOrder,
        "The migrations on disk do not match the order of migrations applied to the database."
    )]
    fn violation_messages(#[case] violation: Violation, #[case] expected: &str) {
        assert_eq!(violation_message(violation), expected);
    }

    #[test]
    fn recovery_instructions_name_the_table() {
        let text = dirty_recovery_instructions("my_history");
        assert!(text.contains("update the my_history table"));
    }

    #[test]
    fn endpoint_label_for_nothing() {
        assert_eq!(endpoint_label(None), "[nothing]");
        let m = Migration {
            id: "17".into(),
            description: "x".into(),
            index: 0,
            up_path: PathBuf::from("17_x_up.sql"),
            down_path: PathBuf::from("17_x_down.sql"),
        };
        assert_eq!(endpoint_label(Some(&m)), "17");
    }
}
