//! Bulk import of games from the IGDB catalog.

use gamerhub_catalog::types::ImportLog;
use gamerhub_db::{operations, OperationError};
use gamerhub_fetch::{CatalogSource, FetchError, IgdbGame};
use rusqlite::Connection;
use thiserror::Error;

use crate::media::{CoverFetcher, igdb_cover_path};
use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum CatalogImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Catalog fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Statistics from one catalog page import.
#[derive(Debug, Default)]
pub struct CatalogStats {
    pub fetched: u64,
    pub created: u64,
    pub updated: u64,
    pub skipped: u64,
    pub covers_saved: u64,
    pub covers_failed: u64,
}

/// Import one page of the catalog starting at `offset`.
///
/// A failed page fetch aborts the import. Records without an id or name are
/// skipped; cover downloads are best-effort.
pub fn import_catalog(
    conn: &Connection,
    source: &dyn CatalogSource,
    covers: &CoverFetcher<'_>,
    offset: u32,
    progress: Option<&dyn ImportProgress>,
) -> Result<CatalogStats, CatalogImportError> {
    if let Some(p) = progress {
        p.on_phase(&format!("Fetching catalog page at offset {offset}"));
    }
    let games = source.fetch_games(offset).inspect_err(|e| {
        log::error!("Failed to fetch games: {e}");
    })?;

    let mut stats = CatalogStats {
        fetched: games.len() as u64,
        ..Default::default()
    };
    log::info!("Fetched {} games", games.len());

    for (i, game) in games.iter().enumerate() {
        let Some((igdb_id, title)) = identity(game) else {
            log::warn!("Skipping catalog record without id or name: {game:?}");
            stats.skipped += 1;
            continue;
        };

        let release_date = game.release_date();
        let (game_id, created) =
            operations::upsert_game_by_igdb_id(conn, igdb_id, title, release_date.as_deref())?;
        if created {
            stats.created += 1;
        } else {
            stats.updated += 1;
        }
        log::debug!("{}: {title}", if created { "Created" } else { "Updated" });

        if let Some(url) = game.cover_url() {
            match covers.fetch(&url, &igdb_cover_path(igdb_id), title) {
                Some(path) => {
                    operations::set_game_cover(conn, game_id, &path)?;
                    stats.covers_saved += 1;
                }
                None => stats.covers_failed += 1,
            }
        }

        if let Some(p) = progress {
            p.on_item(i + 1, games.len(), title);
        }
    }

    let log_entry = ImportLog {
        id: 0,
        kind: "catalog".to_string(),
        source_name: format!("igdb@{offset}"),
        imported_at: crate::format_timestamp(chrono::Utc::now()),
        records_created: stats.created as i64,
        records_updated: stats.updated as i64,
        records_skipped: stats.skipped as i64,
        records_failed: stats.covers_failed as i64,
    };
    operations::insert_import_log(conn, &log_entry)?;

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Catalog import complete: {} created, {} updated, {} skipped",
            stats.created, stats.updated, stats.skipped
        ));
    }
    Ok(stats)
}

fn identity(game: &IgdbGame) -> Option<(i64, &str)> {
    let id = game.id?;
    let name = game.name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
    Some((id, name))
}
