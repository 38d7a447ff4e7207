use std::collections::HashSet;

use anyhow::{Result, bail};
use colored::Colorize;
use roamer::{AppliedMigration, Environment, Migration};

use crate::utils::{NO_MIGRATIONS, dirty_recovery_instructions};

const COLUMN_SPACING: &str = "    ";

/// Render the status table: applied migrations in ledger order, then the
/// ones not yet applied, followed by legends for any markers used.
pub fn render_status(
    migrations: &[Migration],
    applied: &[AppliedMigration],
    history_table: &str,
) -> String {
    let width = migrations
        .iter()
        .map(|m| m.id.len())
        .chain(applied.iter().map(|a| a.id.len()))
        .max()
        .unwrap_or(0)
        .max(2);

    let mut lines = vec![format!(
        " {:<width$}{COLUMN_SPACING}{}",
        "ID".bold(),
        "Description".bold()
    )];

    let mut have_dirty = false;
    for row in applied {
        let marker = if row.dirty {
            have_dirty = true;
            "!".red().bold()
        } else {
            " ".normal()
        };
        let description = match migrations.iter().find(|m| m.id == row.id) {
            Some(m) => m.description.normal(),
            None => "*** ERROR: missing corresponding migration file!".red().bold(),
        };
        lines.push(format!(
            "{marker}{:<width$}{COLUMN_SPACING}{description}",
            row.id
        ));
    }

    let applied_ids: HashSet<&str> = applied.iter().map(|a| a.id.as_str()).collect();
    let mut have_unapplied = false;
    for m in migrations.iter().filter(|m| !applied_ids.contains(m.id.as_str())) {
        have_unapplied = true;
        lines.push(format!(
            "{}{:<width$}{COLUMN_SPACING}{}",
            "*".yellow(),
            m.id,
            m.description
        ));
    }

    if have_unapplied {
        lines.push(String::new());
        lines.push("(* = migration has not been applied)".to_string());
    }
    if have_dirty {
        lines.push(String::new());
        lines.push("(! = migration is dirty)".to_string());
        lines.push(
            "One or more migrations are marked as dirty. The database may be in an inconsistent state."
                .to_string(),
        );
        lines.push(dirty_recovery_instructions(history_table));
    }

    lines.join("\n")
}

pub fn cmd_status(env: &mut Environment) -> Result<()> {
    let applied = env.list_applied_migrations()?;
    if env.list_all_migrations().is_empty() && applied.is_empty() {
        bail!(NO_MIGRATIONS);
    }

    println!(
        "{}",
        render_status(env.list_all_migrations(), &applied, env.history_table_name())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_env::{sqlite_environment, three_migration_environment};
    use roamer::Direction;
    use rstest::rstest;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn migration(id: &str, description: &str, index: usize) -> Migration {
        Migration {
            id: id.into(),
            description: description.into(),
            index,
            up_path: PathBuf::from(format!("{id}_up.sql")),
            down_path: PathBuf::from(format!("{id}_down.sql")),
        }
    }

    fn applied(id: &str, dirty: bool) -> AppliedMigration {
        AppliedMigration {
            id: id.into(),
            applied_at: 100,
            dirty,
        }
    }

    #[test]
    fn render_all_applied() {
        colored::control::set_override(false);
        let migrations = vec![migration("1", "Create users", 0), migration("2", "Add email", 1)];
        let out = render_status(
            &migrations,
            &[applied("1", false), applied("2", false)],
            "roamer_history",
        );

        assert!(out.contains(" 1     Create users"));
        assert!(out.contains(" 2     Add email"));
        assert!(!out.contains("has not been applied"));
        assert!(!out.contains("dirty"));
    }

    #[rstest]
    #[case::unapplied(vec![applied("1", false)], "*2     Add email", "(* = migration has not been applied)")]
    #[case::dirty(vec![applied("1", false), applied("2", true)], "!2     Add email", "update the roamer_history table")]
    #[case::missing(vec![applied("1", false), applied("9", false)], " 9     *** ERROR: missing corresponding migration file!", "*2     Add email")]
    fn render_markers(
        #[case] rows: Vec<AppliedMigration>,
        #[case] expected_row: &str,
        #[case] expected_note: &str,
    ) {
        colored::control::set_override(false);
        let migrations = vec![migration("1", "Create users", 0), migration("2", "Add email", 1)];
        let out = render_status(&migrations, &rows, "roamer_history");
        assert!(out.contains(expected_row), "{out}");
        assert!(out.contains(expected_note), "{out}");
    }

    #[test]
    fn cmd_status_without_migrations_fails() {
        let tmp = tempdir().unwrap();
        let mut env = sqlite_environment(tmp.path());
        let err = cmd_status(&mut env).unwrap_err();
        assert!(err.to_string().contains("There are no migrations."));
    }

    #[test]
    fn cmd_status_with_migrations_succeeds() {
        let tmp = tempdir().unwrap();
        let mut env = three_migration_environment(tmp.path());
        let first = env.migration_by_id("1").unwrap().clone();
        env.apply_migration(&first, Direction::Up, false).unwrap();
        assert!(cmd_status(&mut env).is_ok());
    }
}
