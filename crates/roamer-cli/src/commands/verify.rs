use anyhow::{Result, bail};
use colored::Colorize;
use roamer::Environment;

pub fn cmd_verify(env: &mut Environment) -> Result<()> {
    let checks = [
        ("No migrations are marked as dirty", env.verify_no_dirty()?),
        ("Every applied migration exists on disk", env.verify_exist()?),
        ("Applied migrations match the order on disk", env.verify_order()?),
    ];

    for (label, ok) in &checks {
        let mark = if *ok { "✓".green() } else { "✗".red() };
        println!("  {mark} {label}");
    }

    if checks.iter().any(|(_, ok)| !ok) {
        bail!(
            "It is not safe to apply additional migrations at this time.\nFor more information, and help resolving the issue, do `roamer status`."
        );
    }
    println!("{}", "It is safe to apply migrations.".bright_green());
    Ok(())
}
