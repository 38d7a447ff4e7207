use roamer_core::{Migration, position_of};

use crate::error::PlannerError;

/// Resolve a migration id or offset token against the ordered migrations.
///
/// Tokens:
/// - `@N`: absolute position, `@0` being "no migrations applied"
/// - `@+N` / `@-N`: relative to the position after `last_applied_id`
/// - anything else: a literal migration id
///
/// Returns `Ok(None)` when the token refers to the state before the first
/// migration.
pub fn resolve_id_or_offset<'a>(
    token: &str,
    migrations: &'a [Migration],
    last_applied_id: Option<&str>,
) -> Result<Option<&'a Migration>, PlannerError> {
    if token.is_empty() {
        return Err(PlannerError::InvalidInput(token.to_string()));
    }

    let Some(offset) = token.strip_prefix('@') else {
        return find_migration(migrations, token).map(Some);
    };

    let (relative, digits) = match offset.as_bytes().first() {
        Some(b'+') | Some(b'-') => (true, &offset[1..]),
        Some(_) => (false, offset),
        None => return Err(PlannerError::InvalidInput(token.to_string())),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PlannerError::InvalidInput(token.to_string()));
    }
    let value: i64 = offset
        .parse()
        .map_err(|_| PlannerError::InvalidInput(token.to_string()))?;

    let position = if relative {
        let base = match last_applied_id {
            Some(id) => position_of(migrations, id)
                .ok_or_else(|| PlannerError::MigrationNotFound(id.to_string()))?
                as i64,
            None => -1,
        };
        (base + 1).checked_add(value)
    } else {
        Some(value)
    };

    let position = position
        .filter(|p| (0..=migrations.len() as i64).contains(p))
        .ok_or_else(|| PlannerError::OffsetBound(token.to_string()))?;

    if position == 0 {
        Ok(None)
    } else {
        Ok(Some(&migrations[position as usize - 1]))
    }
}

/// Exact id lookup.
pub fn find_migration<'a>(
    migrations: &'a [Migration],
    id: &str,
) -> Result<&'a Migration, PlannerError> {
    migrations
        .iter()
        .find(|m| m.id == id)
        .ok_or_else(|| PlannerError::MigrationNotFound(id.to_string()))
}
