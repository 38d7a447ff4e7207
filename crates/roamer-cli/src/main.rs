use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use roamer_config::DriverType;

mod commands;
mod utils;
use commands::{cmd_create, cmd_go, cmd_init, cmd_setup, cmd_status, cmd_upgrade, cmd_verify};
use utils::{check_environment_dir, open_environment};

/// roamer command-line interface.
#[derive(Parser, Debug)]
#[command(name = "roamer", author, version, about)]
struct Cli {
    /// The directory to use as an environment.
    #[arg(long = "env", global = true, default_value = "./")]
    env: PathBuf,
    /// The local config to use, read from roamer.<NAME>.toml.
    #[arg(long = "local-config", global = true, default_value = "local")]
    local_config: String,
    /// Skip any prompts for down migrations.
    #[arg(long, global = true)]
    force: bool,
    /// Only update the history table, without running the migration scripts.
    #[arg(long, global = true)]
    stamp: bool,
    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Quiet output (errors only).
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set up a new environment.
    Init {
        #[arg(long, value_enum)]
        driver: Option<DriverType>,
        #[arg(long)]
        dsn: Option<String>,
    },
    /// Set up an existing environment with database connection options.
    Setup {
        #[arg(long, value_enum)]
        driver: Option<DriverType>,
        #[arg(long)]
        dsn: Option<String>,
    },
    /// Create a new migration.
    Create { description: String },
    /// Show applied and pending migrations.
    Status,
    /// Migrate the database to the given migration id or offset (@N, @+N, @-N).
    Go {
        #[arg(allow_hyphen_values = true)]
        target: String,
    },
    /// Upgrade the database to the latest migration.
    Upgrade,
    /// Check that it is safe to apply migrations.
    Verify,
}

fn init_logging(cli: &Cli) {
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    check_environment_dir(&cli.env)?;

    match cli.command {
        Commands::Init { driver, dsn } => cmd_init(&cli.env, &cli.local_config, driver, dsn),
        Commands::Setup { driver, dsn } => cmd_setup(&cli.env, &cli.local_config, driver, dsn),
        Commands::Create { description } => {
            let mut env = open_environment(&cli.env, &cli.local_config)?;
            cmd_create(&mut env, &description)
        }
        Commands::Status => {
            let mut env = open_environment(&cli.env, &cli.local_config)?;
            cmd_status(&mut env)
        }
        Commands::Go { target } => {
            let mut env = open_environment(&cli.env, &cli.local_config)?;
            cmd_go(&mut env, &target, cli.force, cli.stamp)
        }
        Commands::Upgrade => {
            let mut env = open_environment(&cli.env, &cli.local_config)?;
            cmd_upgrade(&mut env, cli.force, cli.stamp)
        }
        Commands::Verify => {
            let mut env = open_environment(&cli.env, &cli.local_config)?;
            cmd_verify(&mut env)
        }
    }
}
