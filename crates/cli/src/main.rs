//! Listing CLI - Database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Run document store and session migrations
//! listing-cli migrate
//!
//! # Only the session table
//! listing-cli migrate --sessions-only
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "listing-cli")]
#[command(author, version, about = "Listing service CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        /// Only create the session store table
        #[arg(long)]
        sessions_only: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::migrate::MigrationError> {
    match cli.command {
        Commands::Migrate { sessions_only } => commands::migrate::run(sessions_only).await,
    }
}
