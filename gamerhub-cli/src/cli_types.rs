//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gamerhub")]
#[command(about = "Steam library sync and gaming news ingestion", long_about = None)]
pub(crate) struct Cli {
    /// Database file (defaults to <data dir>/gamerhub/gamerhub.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory for downloaded cover images (defaults to <data dir>/gamerhub/media)
    #[arg(long, global = true)]
    pub media_dir: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage platform users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Sync and inspect game libraries
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Fetch, list and prune news articles
    News {
        #[command(subcommand)]
        action: NewsAction,
    },

    /// Import games from the IGDB catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Show row counts and recent batch runs
    Stats {
        /// Number of recent runs to show
        #[arg(long, default_value_t = 5)]
        runs: usize,
    },

    /// Manage API credentials configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum UserAction {
    /// Create a user
    Add {
        /// Unique username
        username: String,
    },

    /// List all users
    List,
}

#[derive(Subcommand)]
pub(crate) enum LibraryAction {
    /// Sync a user's Steam library
    Sync {
        /// Username to sync
        #[arg(short, long)]
        user: String,

        /// SteamID64 to sync (defaults to the one stored on the user)
        #[arg(long)]
        steam_id: Option<String>,

        /// Steam Web API key (overrides env and config file)
        #[arg(long)]
        steam_key: Option<String>,
    },

    /// Unlink a user's Steam account and remove their Steam entries
    Disconnect {
        /// Username to disconnect
        #[arg(short, long)]
        user: String,
    },

    /// List a user's library
    List {
        /// Username to list
        #[arg(short, long)]
        user: String,
    },

    /// Manually set the status of a game in a user's library
    Status {
        /// Username
        #[arg(short, long)]
        user: String,

        /// Game title (case-insensitive)
        title: String,

        /// New status: unplayed, playing, replaying, completed, dropped
        status: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum NewsAction {
    /// Fetch all feeds, store new articles and prune old ones
    Fetch {
        /// YAML file of news sources to seed instead of the built-in defaults
        #[arg(long)]
        sources: Option<PathBuf>,
    },

    /// List stored articles, newest first
    List {
        /// Only show this category (invest, devs, hardware, general)
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of articles
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Delete articles older than the retention window
    Prune,

    /// List configured news sources
    Sources,
}

#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// Import one page of popular games from IGDB
    Import {
        /// IGDB (Twitch) client id (overrides env and config file)
        #[arg(long)]
        client_id: Option<String>,

        /// IGDB (Twitch) client secret (overrides env and config file)
        #[arg(long)]
        client_secret: Option<String>,

        /// Number of records to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current credentials and their sources
    Show,

    /// Store credentials in the config file
    Set {
        /// Steam Web API key
        #[arg(long)]
        steam_key: Option<String>,

        /// IGDB (Twitch) client id
        #[arg(long)]
        client_id: Option<String>,

        /// IGDB (Twitch) client secret
        #[arg(long)]
        client_secret: Option<String>,
    },

    /// Print the config file path
    Path,
}
