use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use roamer_core::Migration;

use crate::error::RepositoryError;
use crate::migrations::script_paths;

/// Paths of a freshly written migration pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedMigration {
    pub id: String,
    pub up_path: PathBuf,
    pub down_path: PathBuf,
}

/// Write a new templated up/down pair for `description` into `dir`.
///
/// The id is the current unix time, bumped past the newest existing id so
/// that two migrations created within the same second still sort in
/// creation order.
pub fn create_migration(
    dir: &Path,
    description: &str,
    existing: &[Migration],
) -> Result<CreatedMigration, RepositoryError> {
    let id = next_migration_id(Utc::now().timestamp(), existing);
    let base_name = format!("{id}_{}", slugify(description));
    let (up_path, down_path) = script_paths(dir, &base_name);

    for path in [&up_path, &down_path] {
        if path.exists() {
            return Err(RepositoryError::AlreadyExists(path.clone()));
        }
    }

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| RepositoryError::WriteFile {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    write_script(&up_path, &render_script(description, "up"))?;
    write_script(&down_path, &render_script(description, "down"))?;
    log::info!("created migration {}", base_name);

    Ok(CreatedMigration {
        id: id.to_string(),
        up_path,
        down_path,
    })
}

fn write_script(path: &Path, contents: &str) -> Result<(), RepositoryError> {
    fs::write(path, contents).map_err(|source| RepositoryError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

fn next_migration_id(now: i64, existing: &[Migration]) -> i64 {
    let newest = existing
        .iter()
        .filter_map(|m| m.id.parse::<i64>().ok())
        .max();
    match newest {
        Some(newest) if newest >= now => newest + 1,
        _ => now,
    }
}

fn render_script(description: &str, direction: &str) -> String {
    let description = description.lines().next().unwrap_or_default().trim();
    format!("-- Description: {description}\n-- Write your {direction} migration here.\n")
}

/// Lowercase, underscore-separated form of a description for filenames.
pub fn slugify(description: &str) -> String {
    let slug = description
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() || ch == ' ' { ch } else { '_' })
        .collect::<String>()
        .split(|c: char| c == ' ' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        "migration".to_string()
    } else {
        slug
    }
}
