use anyhow::Result;
use colored::Colorize;
use roamer::Environment;

pub fn cmd_create(env: &mut Environment, description: &str) -> Result<()> {
    let created = env.create_migration(description)?;

    println!(
        "{} {}",
        "Created migration:".bright_green().bold(),
        created.id.bright_magenta()
    );
    println!(
        "  {} {}",
        "Up:".cyan(),
        created.up_path.display().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Down:".cyan(),
        created.down_path.display().to_string().bright_white()
    );
    Ok(())
}
