mod client;
mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ghfeed_core::CollectionKind;

use crate::client::{Client, DEFAULT_SERVER_URL};

#[derive(Parser)]
#[command(name = "ghfeed")]
#[command(about = "Browse GitHub activity feeds and keep read-later and favorite lists")]
struct Cli {
    /// ghfeed-server base URL
    #[arg(long, env = "GHFEED_SERVER", default_value = DEFAULT_SERVER_URL, global = true)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of a user's public activity
    Activity {
        username: String,

        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Only show activity whose type or repository contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Manage the read-later list
    ReadLater {
        #[command(subcommand)]
        action: SavedAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: SavedAction,
    },
}

#[derive(Subcommand)]
enum SavedAction {
    /// List saved activity
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Save an activity from a user's feed
    Add {
        username: String,

        /// Activity id, as shown by `ghfeed activity`
        id: String,

        /// Feed page the activity is on
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Remove a saved activity
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::connect(&cli.server).await?;

    match cli.command {
        Commands::Activity {
            username,
            page,
            search,
        } => commands::activity::run(&client, &username, page, search.as_deref()).await,
        Commands::ReadLater { action } => run_saved(&client, CollectionKind::ReadLater, action).await,
        Commands::Favorites { action } => run_saved(&client, CollectionKind::Favorites, action).await,
    }
}

async fn run_saved(client: &Client, kind: CollectionKind, action: SavedAction) -> Result<()> {
    match action {
        SavedAction::List { search } => commands::saved::list(client, kind, search.as_deref()).await,
        SavedAction::Add { username, id, page } => {
            commands::saved::add(client, kind, &username, &id, page).await
        }
        SavedAction::Remove { id } => commands::saved::remove(client, kind, &id).await,
    }
}
