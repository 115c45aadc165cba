//! Otomono CLI - operational tools for the jersey storefront.
//!
//! # Usage
//!
//! ```bash
//! # Promote queued orders to the document store
//! otomono-cli sync
//!
//! # List orders, newest first
//! otomono-cli orders list
//! otomono-cli orders list --status pending
//!
//! # Render a pattern sheet to a file
//! otomono-cli export --pattern chevron --primary "#1e40af" --out chevron.png
//! ```
//!
//! # Commands
//!
//! - `sync` - Promote queued orders from the local queue
//! - `orders list` - List orders from the first tier that answers
//! - `export` - Render a jersey sheet to PNG or PDF

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::export::ExportArgs;

#[derive(Parser)]
#[command(name = "otomono-cli")]
#[command(author, version, about = "Otomono CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Promote queued orders to the document store
    Sync,
    /// Inspect orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Render a jersey sheet to PNG or PDF
    Export {
        /// Pattern id (`solid`, `vertical-stripes`, `chevron`, ...)
        #[arg(long, default_value = "solid")]
        pattern: String,

        /// Primary color as `#rrggbb`
        #[arg(long, default_value = "#1e40af")]
        primary: String,

        /// Secondary color as `#rrggbb`
        #[arg(long, default_value = "#ffffff")]
        secondary: String,

        /// Jersey side (`front` or `back`)
        #[arg(long, default_value = "front")]
        view: String,

        /// Player name lettering
        #[arg(long)]
        player_name: Option<String>,

        /// Player number (0-99)
        #[arg(long)]
        player_number: Option<String>,

        /// Team name lettering
        #[arg(long)]
        team_name: Option<String>,

        /// Output file, `.png` or `.pdf`
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, newest first
    List {
        /// Filter by status (`pending`, `processing`, `completed`, `cancelled`)
        #[arg(short, long)]
        status: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Sync => commands::sync::run().await?,
        Commands::Orders { action } => match action {
            OrdersAction::List { status } => commands::orders::list(status.as_deref()).await?,
        },
        Commands::Export {
            pattern,
            primary,
            secondary,
            view,
            player_name,
            player_number,
            team_name,
            out,
        } => {
            let args = ExportArgs {
                pattern,
                primary,
                secondary,
                view,
                player_name,
                player_number,
                team_name,
            };
            commands::export::run(args, &out)?;
        }
    }
    Ok(())
}
