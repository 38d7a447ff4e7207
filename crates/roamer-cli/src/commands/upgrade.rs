use anyhow::{Result, bail};
use roamer::Environment;

use super::go::cmd_go;
use crate::utils::{NO_MIGRATIONS, require_safe};

/// Go to the newest migration on disk.
pub fn cmd_upgrade(env: &mut Environment, force: bool, stamp: bool) -> Result<()> {
    require_safe(env)?;

    let Some(latest) = env.list_all_migrations().last().map(|m| m.id.clone()) else {
        bail!(NO_MIGRATIONS);
    };

    if let Some(last) = env.last_applied_migration()? {
        if last.id == latest {
            println!("The database is already up-to-date.");
            return Ok(());
        }
    }

    cmd_go(env, &latest, force, stamp)
}
