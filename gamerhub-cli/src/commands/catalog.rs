use gamerhub_fetch::{Credentials, IgdbClient, ImageClient};
use gamerhub_import::{CatalogImportError, CoverFetcher};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::AppContext;

/// Import one page of the IGDB catalog.
///
/// An authentication or fetch failure aborts the import with a logged error
/// but leaves the exit status at zero.
pub(crate) fn run_catalog_import(
    ctx: &AppContext,
    client_id: Option<String>,
    client_secret: Option<String>,
    offset: u32,
) -> Result<(), CliError> {
    let creds = Credentials::load().with_overrides(None, client_id, client_secret);
    let (id, secret) = creds.require_igdb().map_err(CliError::config)?;
    let conn = ctx.open_db()?;

    let progress = ctx.progress();
    progress.on_phase("Authenticating with IGDB");
    let igdb = match IgdbClient::authenticate(id, secret) {
        Ok(client) => client,
        Err(e) => {
            drop(progress);
            log::error!("IGDB authentication failed: {e}");
            return Ok(());
        }
    };
    let images = ImageClient::new().map_err(CliError::network)?;
    let media = ctx.media();
    let covers = CoverFetcher::new(&images, &media);

    let result =
        gamerhub_import::import_catalog(&conn, &igdb, &covers, offset, Some(progress.as_ref()));
    drop(progress);

    let stats = match result {
        Ok(stats) => stats,
        Err(CatalogImportError::Fetch(_)) => return Ok(()),
        Err(CatalogImportError::Db(e)) => return Err(CliError::database(e)),
    };

    crate::log_blank();
    log::info!(
        "{}",
        format!("IGDB import (offset {offset})").if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Fetched:  {:>6}", stats.fetched);
    log::info!("  Created:  {:>6}", stats.created);
    log::info!("  Updated:  {:>6}", stats.updated);
    if stats.skipped > 0 {
        log::info!(
            "  Skipped:  {:>6}",
            stats.skipped.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    log::info!(
        "  Covers:   {:>6} saved, {} failed",
        stats.covers_saved,
        stats.covers_failed,
    );
    if stats.fetched == u64::from(gamerhub_fetch::igdb::PAGE_SIZE) {
        log::info!(
            "More games available: rerun with --offset {}",
            offset.saturating_add(gamerhub_fetch::igdb::PAGE_SIZE),
        );
    }
    Ok(())
}
