//! Steam library sync.
//!
//! Fetches a user's owned games, resolves each one to a local game
//! (creating it when unknown), and upserts the library entry with a status
//! reconciled against whatever the user already had.

use gamerhub_catalog::types::*;
use gamerhub_db::{operations, queries, OperationError};
use gamerhub_fetch::{FetchError, OwnedGame, OwnedGamesSource, cover_url};
use rusqlite::Connection;
use thiserror::Error;

use crate::media::{CoverFetcher, steam_cover_path};
use crate::progress::ImportProgress;
use crate::status::{PlaySignals, reconcile};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("Steam fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("No user with id {0}")]
    UnknownUser(i64),
}

/// Statistics from one user's sync.
#[derive(Debug, Default)]
pub struct SyncStats {
    pub games_seen: u64,
    pub games_created: u64,
    pub games_matched: u64,
    pub entries_created: u64,
    pub entries_updated: u64,
    pub status_changes: u64,
    pub skipped: u64,
    pub covers_saved: u64,
    pub covers_failed: u64,
}

/// Sync a user's Steam library into the store.
///
/// The Steam id is recorded on the user before fetching. A fetch failure
/// aborts the sync; entries already written by this pass are kept.
pub fn sync_steam_library(
    conn: &Connection,
    user_id: i64,
    steam_id: &str,
    source: &dyn OwnedGamesSource,
    covers: &CoverFetcher<'_>,
    now: i64,
    progress: Option<&dyn ImportProgress>,
) -> Result<SyncStats, SyncError> {
    let user = queries::get_user(conn, user_id)?.ok_or(SyncError::UnknownUser(user_id))?;
    operations::set_user_steam_id(conn, user.id, Some(steam_id))?;

    if let Some(p) = progress {
        p.on_phase(&format!("Fetching Steam library for {}", user.username));
    }
    let owned = source.owned_games(steam_id).inspect_err(|e| {
        log::error!("Steam sync for {} aborted: {e}", user.username);
    })?;

    let mut stats = SyncStats::default();
    let total = owned.len();
    for (i, game) in owned.iter().enumerate() {
        stats.games_seen += 1;
        let Some(title) = game.title() else {
            log::warn!("Skipping Steam app {} with no name", game.appid);
            stats.skipped += 1;
            continue;
        };

        sync_one(conn, user.id, game, title, covers, now, &mut stats)?;

        if let Some(p) = progress {
            p.on_item(i + 1, total, title);
        }
    }

    log_sync(conn, &user.username, &stats)?;

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Synced {} games for {} ({} new entries, {} status changes)",
            stats.games_seen - stats.skipped,
            user.username,
            stats.entries_created,
            stats.status_changes
        ));
    }
    Ok(stats)
}

fn sync_one(
    conn: &Connection,
    user_id: i64,
    game: &OwnedGame,
    title: &str,
    covers: &CoverFetcher<'_>,
    now: i64,
    stats: &mut SyncStats,
) -> Result<(), SyncError> {
    let (game_id, created) = resolve_game(conn, game.appid, title)?;
    if created {
        stats.games_created += 1;
        log::info!("Created game from Steam: {title}");
        match covers.fetch(&cover_url(game.appid), &steam_cover_path(game.appid), title) {
            Some(path) => {
                operations::set_game_cover(conn, game_id, &path)?;
                stats.covers_saved += 1;
            }
            None => stats.covers_failed += 1,
        }
    } else {
        stats.games_matched += 1;
    }

    let signals = PlaySignals {
        playtime_forever: game.playtime_forever,
        playtime_2weeks: game.playtime_2weeks,
        last_played: game.last_played(),
    };
    let existing = queries::find_library_entry(conn, user_id, game_id)?;
    let existing_status = existing.as_ref().map(|e| e.status);
    let status = reconcile(existing_status, &signals, now);

    operations::upsert_library_entry(
        conn,
        user_id,
        game_id,
        game.playtime_forever,
        STEAM_PLATFORM,
        status,
    )?;

    match existing_status {
        None => stats.entries_created += 1,
        Some(old) => {
            stats.entries_updated += 1;
            if old != status {
                log::info!("{title}: {old} -> {status}");
                stats.status_changes += 1;
            }
        }
    }
    Ok(())
}

/// Find the local game for a Steam app, creating it when unknown.
///
/// Lookup is by app id, then by case-insensitive title. A title match that
/// has no app id yet adopts this one; a title match bound to a different app
/// id is treated as a different game. Returns the game id and whether it
/// was created.
pub fn resolve_game(
    conn: &Connection,
    appid: i64,
    title: &str,
) -> Result<(i64, bool), OperationError> {
    if let Some(game) = queries::find_game_by_steam_appid(conn, appid)? {
        return Ok((game.id, false));
    }

    if let Some(game) = queries::find_game_by_title(conn, title)? {
        match game.steam_appid {
            None => {
                operations::set_game_steam_appid(conn, game.id, appid)?;
                return Ok((game.id, false));
            }
            Some(other) => {
                log::debug!("'{title}' is already bound to app {other}; creating app {appid}");
            }
        }
    }

    let id = operations::insert_game(conn, title, Some(appid))?;
    Ok((id, true))
}

/// Unlink a user's Steam account and remove their Steam library entries.
/// Returns the number of entries removed.
pub fn disconnect_steam(conn: &Connection, user_id: i64) -> Result<usize, SyncError> {
    let user = queries::get_user(conn, user_id)?.ok_or(SyncError::UnknownUser(user_id))?;
    operations::set_user_steam_id(conn, user.id, None)?;
    let removed = operations::delete_library_entries_for_platform(conn, user.id, STEAM_PLATFORM)?;
    log::info!("Disconnected Steam for {} ({removed} entries removed)", user.username);
    Ok(removed)
}

fn log_sync(conn: &Connection, username: &str, stats: &SyncStats) -> Result<i64, SyncError> {
    let log_entry = ImportLog {
        id: 0,
        kind: "library-sync".to_string(),
        source_name: username.to_string(),
        imported_at: crate::format_timestamp(chrono::Utc::now()),
        records_created: stats.entries_created as i64,
        records_updated: stats.entries_updated as i64,
        records_skipped: stats.skipped as i64,
        records_failed: 0,
    };
    Ok(operations::insert_import_log(conn, &log_entry)?)
}
