//! usercrud CLI
//!
//! Opens the database, applies the schema, runs one command, closes the
//! database. Any failure is printed to stderr and exits with status 1.

use clap::{Parser, Subcommand};
use usercrud_core::logging_facility;
use usercrud_core::ExError;
use usercrud_store::db;
use usercrud_store::migrations::apply_migrations;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "usercrud")]
#[command(about = "usercrud - user records over SQLite", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: config::Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply the schema and report it
    Migrate(commands::migrate::MigrateArgs),
    /// User operations
    User(commands::user::UserArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.config.log_profile());

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ExError> {
    let Cli { config, command } = cli;

    let mut conn = db::open(Some(config.db.as_path()))?;

    let result = apply_migrations(&conn).and_then(|()| match command {
        Commands::Migrate(args) => commands::migrate::execute(args),
        Commands::User(args) => commands::user::execute(args, &config, &conn),
        Commands::Seed(args) => commands::seed::execute(args, &config, &mut conn),
    });

    let closed = db::close(conn);
    result.and(closed)
}
