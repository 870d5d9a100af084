//! Write operations for users, games, library entries and news.

use gamerhub_catalog::types::*;
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

fn ensure_changed(changed: usize, entity_type: &str, id: i64) -> Result<(), OperationError> {
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// ── User Operations ─────────────────────────────────────────────────────────

/// Insert a new user. Returns the generated ID.
pub fn insert_user(conn: &Connection, username: &str) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO users (username) VALUES (?1)",
        params![username],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Set or clear the Steam account linked to a user.
pub fn set_user_steam_id(
    conn: &Connection,
    user_id: i64,
    steam_id: Option<&str>,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE users SET steam_id = ?1 WHERE id = ?2",
        params![steam_id, user_id],
    )?;
    ensure_changed(changed, "user", user_id)
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game with no IGDB id. Returns the generated ID.
pub fn insert_game(
    conn: &Connection,
    title: &str,
    steam_appid: Option<i64>,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO games (title, steam_appid) VALUES (?1, ?2)",
        params![title, steam_appid],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Set the stored cover image path of a game.
pub fn set_game_cover(
    conn: &Connection,
    game_id: i64,
    cover_image: &str,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET cover_image = ?1 WHERE id = ?2",
        params![cover_image, game_id],
    )?;
    ensure_changed(changed, "game", game_id)
}

/// Record the Steam app id of a game.
pub fn set_game_steam_appid(
    conn: &Connection,
    game_id: i64,
    steam_appid: i64,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET steam_appid = ?1 WHERE id = ?2",
        params![steam_appid, game_id],
    )?;
    ensure_changed(changed, "game", game_id)
}

/// Insert or update a game keyed by its IGDB id.
///
/// Returns the game ID and whether a new row was created.
pub fn upsert_game_by_igdb_id(
    conn: &Connection,
    igdb_id: i64,
    title: &str,
    release_date: Option<&str>,
) -> Result<(i64, bool), OperationError> {
    let existing: Option<i64> = match conn.query_row(
        "SELECT id FROM games WHERE igdb_id = ?1",
        params![igdb_id],
        |row| row.get(0),
    ) {
        Ok(id) => Some(id),
        Err(rusqlite::Error::QueryReturnedNoRows) => None,
        Err(e) => return Err(e.into()),
    };

    match existing {
        Some(id) => {
            conn.execute(
                "UPDATE games SET title = ?1, release_date = ?2 WHERE id = ?3",
                params![title, release_date, id],
            )?;
            Ok((id, false))
        }
        None => {
            conn.execute(
                "INSERT INTO games (title, release_date, igdb_id) VALUES (?1, ?2, ?3)",
                params![title, release_date, igdb_id],
            )?;
            Ok((conn.last_insert_rowid(), true))
        }
    }
}

// ── Library Operations ──────────────────────────────────────────────────────

/// Insert or update the library entry for a (user, game) pair.
///
/// `added_at` is only set on insert.
pub fn upsert_library_entry(
    conn: &Connection,
    user_id: i64,
    game_id: i64,
    playtime_forever: i64,
    platform: &str,
    status: LibraryStatus,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO library_entries (user_id, game_id, playtime_forever, platform, status)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id, game_id) DO UPDATE SET
             playtime_forever = excluded.playtime_forever,
             platform = excluded.platform,
             status = excluded.status",
        params![user_id, game_id, playtime_forever, platform, status.as_str()],
    )?;
    let id: i64 = conn.query_row(
        "SELECT id FROM library_entries WHERE user_id = ?1 AND game_id = ?2",
        params![user_id, game_id],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Manually set the status of a library entry.
pub fn set_library_status(
    conn: &Connection,
    user_id: i64,
    game_id: i64,
    status: LibraryStatus,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE library_entries SET status = ?1 WHERE user_id = ?2 AND game_id = ?3",
        params![status.as_str(), user_id, game_id],
    )?;
    ensure_changed(changed, "library entry for game", game_id)
}

/// Delete a user's library entries whose platform matches case-insensitively.
/// Returns the number of rows removed.
pub fn delete_library_entries_for_platform(
    conn: &Connection,
    user_id: i64,
    platform: &str,
) -> Result<usize, OperationError> {
    let deleted = conn.execute(
        "DELETE FROM library_entries WHERE user_id = ?1 AND LOWER(platform) = LOWER(?2)",
        params![user_id, platform],
    )?;
    Ok(deleted)
}

// ── News Operations ─────────────────────────────────────────────────────────

/// Get or create a news source keyed by feed URL.
///
/// Existing sources are left untouched. Returns the source ID and whether
/// it was created.
pub fn upsert_news_source(
    conn: &Connection,
    seed: &NewsSourceSeed,
) -> Result<(i64, bool), OperationError> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO news_sources (name, rss_url, category, icon)
         VALUES (?1, ?2, ?3, ?4)",
        params![seed.name, seed.url, seed.category.as_str(), seed.icon],
    )?;
    let id: i64 = conn.query_row(
        "SELECT id FROM news_sources WHERE rss_url = ?1",
        params![seed.url],
        |row| row.get(0),
    )?;
    Ok((id, inserted > 0))
}

/// Insert a news article. The `id` field is ignored. Returns the generated ID.
pub fn insert_news(conn: &Connection, article: &NewsArticle) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO news (source_id, title, link, image_url, description, pub_date, category)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            article.source_id,
            article.title,
            article.link,
            article.image_url,
            article.description,
            article.pub_date,
            article.category.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Delete every article published strictly before `cutoff` (RFC 3339 UTC).
/// Returns the number of rows removed.
pub fn delete_news_before(conn: &Connection, cutoff: &str) -> Result<usize, OperationError> {
    let deleted = conn.execute("DELETE FROM news WHERE pub_date < ?1", params![cutoff])?;
    Ok(deleted)
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// Record a batch run.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (kind, source_name, imported_at,
             records_created, records_updated, records_skipped, records_failed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.kind,
            log.source_name,
            log.imported_at,
            log.records_created,
            log.records_updated,
            log.records_skipped,
            log.records_failed,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
