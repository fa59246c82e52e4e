//! mixcat CLI - beverage catalog server
//!
//! Subcommands:
//! - `serve`   - run the HTTP server (runs migrations first)
//! - `migrate` - run schema migrations and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::migrate::{run_migrate, MigrateArgs};
use commands::serve::{run_serve, ServeArgs};

#[derive(Parser, Debug)]
#[command(name = "mixcat", version, about = "Beverage catalog server")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Run schema migrations and exit
    Migrate(MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up DATABASE_URL and friends from a local .env, if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(cli.debug)?;

    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Migrate(args) => run_migrate(args).await,
    }
}
