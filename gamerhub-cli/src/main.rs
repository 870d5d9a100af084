//! gamerhub CLI
//!
//! Batch entry points for syncing Steam libraries, ingesting gaming news and
//! importing the IGDB catalog into the gamerhub store.

mod cli_types;
mod commands;
mod error;
mod logging;
mod spinner;

use clap::Parser;

use cli_types::{
    CatalogAction, Cli, Commands, ConfigAction, LibraryAction, NewsAction, UserAction,
};
use commands::AppContext;
pub(crate) use error::CliError;
pub(crate) use logging::log_blank;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to initialise logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        db,
        media_dir,
        quiet,
        verbose,
        command,
        ..
    } = cli;
    // Config commands never touch the database, so the context is built per command.
    let context = || AppContext::new(db.clone(), media_dir.clone(), quiet, verbose);

    match command {
        Commands::User { action } => {
            let ctx = context()?;
            match action {
                UserAction::Add { username } => commands::user::run_user_add(&ctx, &username),
                UserAction::List => commands::user::run_user_list(&ctx),
            }
        }
        Commands::Library { action } => {
            let ctx = context()?;
            match action {
                LibraryAction::Sync {
                    user,
                    steam_id,
                    steam_key,
                } => commands::library::run_library_sync(&ctx, &user, steam_id, steam_key),
                LibraryAction::Disconnect { user } => {
                    commands::library::run_library_disconnect(&ctx, &user)
                }
                LibraryAction::List { user } => commands::library::run_library_list(&ctx, &user),
                LibraryAction::Status {
                    user,
                    title,
                    status,
                } => commands::library::run_library_status(&ctx, &user, &title, &status),
            }
        }
        Commands::News { action } => {
            let ctx = context()?;
            match action {
                NewsAction::Fetch { sources } => commands::news::run_news_fetch(&ctx, sources),
                NewsAction::List { category, limit } => {
                    commands::news::run_news_list(&ctx, category.as_deref(), limit)
                }
                NewsAction::Prune => commands::news::run_news_prune(&ctx),
                NewsAction::Sources => commands::news::run_news_sources(&ctx),
            }
        }
        Commands::Catalog { action } => {
            let ctx = context()?;
            match action {
                CatalogAction::Import {
                    client_id,
                    client_secret,
                    offset,
                } => commands::catalog::run_catalog_import(&ctx, client_id, client_secret, offset),
            }
        }
        Commands::Stats { runs } => commands::stats::run_stats(&context()?, runs),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::Set {
                steam_key,
                client_id,
                client_secret,
            } => commands::config::run_config_set(steam_key, client_id, client_secret),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    }
}
