use anyhow::{Result, bail};
use colored::Colorize;
use dialoguer::Confirm;
use roamer::{Direction, Environment, EnvironmentError};

use crate::utils::{dirty_recovery_instructions, endpoint_label, require_safe};

/// Move the database to `target`, a migration id or offset.
pub fn cmd_go(env: &mut Environment, target: &str, force: bool, stamp: bool) -> Result<()> {
    require_safe(env)?;

    let last = env.last_applied_migration()?;
    let target_migration = match env.resolve_id_or_offset(target) {
        Ok(m) => m,
        Err(err) if err.is_migration_not_found() => {
            bail!("Migration {target} does not exist.")
        }
        Err(err) => return Err(err.into()),
    };

    match (&last, &target_migration) {
        (Some(l), Some(t)) if l.id == t.id => {
            bail!("The database is already at migration {}.", t.id)
        }
        (None, None) => bail!("The database is already at no migrations."),
        _ => {}
    }

    let from = last
        .map(|a| env.migration_by_id(&a.id).cloned())
        .transpose()?;
    let history_table = env.history_table_name().to_string();
    let to_label = endpoint_label(target_migration.as_ref()).to_string();

    let mut op = env.new_operation(from.as_ref(), target_migration.as_ref())?;
    op.set_stamp(stamp);
    println!(
        "Going {} -> {} ({})\n",
        endpoint_label(from.as_ref()).bright_white(),
        to_label.bright_white(),
        op.distance_string().bright_yellow()
    );

    if op.direction() == Direction::Down && !force {
        let proceed = Confirm::new()
            .with_prompt(
                "You're about to run one or more down migrations, which can result in data loss. Continue?",
            )
            .default(false)
            .interact()?;
        println!();
        if !proceed {
            bail!("Migration cancelled. No changes have been made.");
        }
    }

    let verb = if stamp { "Stamping" } else { "Applying" };
    op.on_pre_migration(move |m, direction| {
        println!(
            "{} {} migration {} - {}",
            verb,
            direction,
            m.id.bright_magenta(),
            m.description
        );
    });

    if let Err(err) = op.run() {
        report_failure(&err, &history_table);
        return Err(err.into());
    }

    println!(
        "\n{} {}.",
        "The database is now at migration".bright_green(),
        to_label.bright_white()
    );
    Ok(())
}

fn report_failure(err: &EnvironmentError, history_table: &str) {
    let Some(id) = err.failed_migration() else {
        return;
    };
    println!(
        "{}\n",
        format!("There was an error applying migration {id}!").red().bold()
    );
    println!("The database may now be in an inconsistent state. The migration has been marked as dirty.");
    println!("{}\n", dirty_recovery_instructions(history_table));
}
