//! AvukatAjanda CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations to the configured SQLite database
//! ajanda-cli migrate
//!
//! # Fill the configured database with demo clients and cases
//! ajanda-cli seed --clients 10 --cases-per-client 3
//!
//! # Print the dashboard counters
//! ajanda-cli stats
//! ```
//!
//! All commands read the same environment (and `.env`) as the server.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ajanda-cli")]
#[command(author, version, about = "AvukatAjanda CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert demo clients and cases
    Seed {
        /// Number of clients to create
        #[arg(long, default_value_t = 5)]
        clients: u32,

        /// Number of cases opened for each client
        #[arg(long, default_value_t = 2)]
        cases_per_client: u32,
    },
    /// Print dashboard counters
    Stats,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed {
            clients,
            cases_per_client,
        } => {
            commands::seed::run(clients, cases_per_client).await?;
        }
        Commands::Stats => commands::stats::run().await?,
    }
    Ok(())
}
