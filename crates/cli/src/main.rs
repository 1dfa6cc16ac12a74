//! Soiree CLI - database migrations and guest management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! soiree migrate
//!
//! # Insert a handful of sample guests
//! soiree seed
//!
//! # Show every guest in admin order
//! soiree guest list
//!
//! # Change a guest's approval state from the terminal
//! soiree guest set-status -e ada@example.com -s approved
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_DATABASE_URL` (or `DATABASE_URL`) - `SQLite` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "soiree")]
#[command(author, version, about = "Soiree CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert sample guests for local development
    Seed,
    /// Manage guest registrations
    Guest {
        #[command(subcommand)]
        action: GuestAction,
    },
}

#[derive(Subcommand)]
enum GuestAction {
    /// List every guest in admin order (pending first, newest first)
    List,
    /// Set a guest's approval state by email
    SetStatus {
        /// Guest email address
        #[arg(short, long)]
        email: String,

        /// Approval state (`pending`, `approved`, `rejected`)
        #[arg(short, long)]
        status: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Guest { action } => match action {
            GuestAction::List => commands::guests::list().await?,
            GuestAction::SetStatus { email, status } => {
                commands::guests::set_status(&email, &status).await?;
            }
        },
    }
    Ok(())
}
