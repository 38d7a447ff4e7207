use std::fmt;

use roamer_core::{AppliedMigration, Migration};

/// A reason it is unsafe to apply further migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// At least one applied migration is marked dirty.
    Dirty,
    /// An applied migration has no corresponding files on disk.
    Missing,
    /// The applied history is not a prefix of the migrations on disk.
    OutOfOrder,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Dirty => f.write_str("one or more migrations are marked as dirty"),
            Violation::Missing => {
                f.write_str("there are migrations in the database that do not exist on disk")
            }
            Violation::OutOfOrder => f.write_str(
                "the migrations on disk do not match the order of migrations applied to the database",
            ),
        }
    }
}

/// Every applied migration is clean.
pub fn verify_no_dirty(applied: &[AppliedMigration]) -> bool {
    applied.iter().all(|a| !a.dirty)
}

/// Every applied migration still exists on disk.
pub fn verify_exist(migrations: &[Migration], applied: &[AppliedMigration]) -> bool {
    applied
        .iter()
        .all(|a| migrations.iter().any(|m| m.id == a.id))
}

/// The applied history matches the on-disk order position by position.
pub fn verify_order(migrations: &[Migration], applied: &[AppliedMigration]) -> bool {
    applied.len() <= migrations.len()
        && applied
            .iter()
            .zip(migrations)
            .all(|(a, m)| a.id == m.id)
}

/// First failing check, in the order dirty, missing, out-of-order.
pub fn first_violation(
    migrations: &[Migration],
    applied: &[AppliedMigration],
) -> Option<Violation> {
    if !verify_no_dirty(applied) {
        Some(Violation::Dirty)
    } else if !verify_exist(migrations, applied) {
        Some(Violation::Missing)
    } else if !verify_order(migrations, applied) {
        Some(Violation::OutOfOrder)
    } else {
        None
    }
}

pub fn verify_safe_to_apply(migrations: &[Migration], applied: &[AppliedMigration]) -> bool {
    first_violation(migrations, applied).is_none()
}
