//! Read queries for the store.
//!
//! Provides lookups used by the batch procedures and the listings shown by
//! the CLI.

use gamerhub_catalog::types::*;
use rusqlite::{Connection, OptionalExtension, params};

use crate::operations::OperationError;

const USER_COLUMNS: &str = "id, username, steam_id, created_at";
const GAME_COLUMNS: &str =
    "id, title, cover_image, release_date, igdb_id, steam_appid, created_at";
const ENTRY_COLUMNS: &str = "id, user_id, game_id, playtime_forever, platform, status, added_at";

// ── Users ───────────────────────────────────────────────────────────────────

/// Find a user by exact username.
pub fn find_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<User>, OperationError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
    conn.query_row(&sql, params![username], row_to_user)
        .optional()
        .map_err(Into::into)
}

/// Get a user by ID.
pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, OperationError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_user)
        .optional()
        .map_err(Into::into)
}

/// List all users in username order.
pub fn list_users(conn: &Connection) -> Result<Vec<User>, OperationError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY username");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_user)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Games ───────────────────────────────────────────────────────────────────

/// Find a game by case-insensitive exact title. The oldest match wins.
pub fn find_game_by_title(conn: &Connection, title: &str) -> Result<Option<Game>, OperationError> {
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE LOWER(title) = LOWER(?1) ORDER BY id LIMIT 1"
    );
    conn.query_row(&sql, params![title], row_to_game)
        .optional()
        .map_err(Into::into)
}

/// Find a game by Steam app id.
pub fn find_game_by_steam_appid(
    conn: &Connection,
    steam_appid: i64,
) -> Result<Option<Game>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE steam_appid = ?1");
    conn.query_row(&sql, params![steam_appid], row_to_game)
        .optional()
        .map_err(Into::into)
}

/// Find a game by IGDB id.
pub fn find_game_by_igdb_id(
    conn: &Connection,
    igdb_id: i64,
) -> Result<Option<Game>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE igdb_id = ?1");
    conn.query_row(&sql, params![igdb_id], row_to_game)
        .optional()
        .map_err(Into::into)
}

/// Get a game by ID.
pub fn get_game(conn: &Connection, id: i64) -> Result<Option<Game>, OperationError> {
    let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1");
    conn.query_row(&sql, params![id], row_to_game)
        .optional()
        .map_err(Into::into)
}

// ── Library ─────────────────────────────────────────────────────────────────

/// Find the library entry for a (user, game) pair.
pub fn find_library_entry(
    conn: &Connection,
    user_id: i64,
    game_id: i64,
) -> Result<Option<LibraryEntry>, OperationError> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM library_entries WHERE user_id = ?1 AND game_id = ?2"
    );
    conn.query_row(&sql, params![user_id, game_id], row_to_entry)
        .optional()
        .map_err(Into::into)
}

/// List a user's library joined with game titles, in title order.
pub fn library_for_user(
    conn: &Connection,
    user_id: i64,
) -> Result<Vec<LibraryItem>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.user_id, l.game_id, l.playtime_forever, l.platform, l.status,
                l.added_at, g.title
         FROM library_entries l
         JOIN games g ON g.id = l.game_id
         WHERE l.user_id = ?1
         ORDER BY LOWER(g.title), g.id",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        Ok(LibraryItem {
            entry: row_to_entry(row)?,
            title: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── News ────────────────────────────────────────────────────────────────────

/// Whether an article with this link is already stored.
pub fn news_link_exists(conn: &Connection, link: &str) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM news WHERE link = ?1)",
        params![link],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// List all news sources in insertion order.
pub fn list_news_sources(conn: &Connection) -> Result<Vec<NewsSource>, OperationError> {
    let mut stmt =
        conn.prepare("SELECT id, name, rss_url, category, icon FROM news_sources ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        let category: String = row.get(3)?;
        Ok(NewsSource {
            id: row.get(0)?,
            name: row.get(1)?,
            rss_url: row.get(2)?,
            category: NewsCategory::from_str_loose(&category),
            icon: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List articles newest first, optionally filtered by category.
pub fn list_news(
    conn: &Connection,
    category: Option<NewsCategory>,
    limit: usize,
) -> Result<Vec<NewsArticle>, OperationError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(
        "SELECT id, source_id, title, link, image_url, description, pub_date, category
         FROM news
         WHERE ?1 IS NULL OR category = ?1
         ORDER BY pub_date DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(
        params![category.map(|c| c.as_str()), limit],
        row_to_article,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// List the most recent batch runs, newest first.
pub fn list_import_logs(conn: &Connection, limit: usize) -> Result<Vec<ImportLog>, OperationError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(
        "SELECT id, kind, source_name, imported_at,
                records_created, records_updated, records_skipped, records_failed
         FROM import_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            kind: row.get(1)?,
            source_name: row.get(2)?,
            imported_at: row.get(3)?,
            records_created: row.get(4)?,
            records_updated: row.get(5)?,
            records_skipped: row.get(6)?,
            records_failed: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts for each table.
#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    pub users: i64,
    pub games: i64,
    pub library_entries: i64,
    pub news_sources: i64,
    pub news: i64,
    pub import_runs: i64,
}

pub fn store_stats(conn: &Connection) -> Result<StoreStats, OperationError> {
    let count = |table: &str| -> Result<i64, rusqlite::Error> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
    };
    Ok(StoreStats {
        users: count("users")?,
        games: count("games")?,
        library_entries: count("library_entries")?,
        news_sources: count("news_sources")?,
        news: count("news")?,
        import_runs: count("import_log")?,
    })
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        steam_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        title: row.get(1)?,
        cover_image: row.get(2)?,
        release_date: row.get(3)?,
        igdb_id: row.get(4)?,
        steam_appid: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<LibraryEntry> {
    let status: String = row.get(5)?;
    Ok(LibraryEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        game_id: row.get(2)?,
        playtime_forever: row.get(3)?,
        platform: row.get(4)?,
        status: LibraryStatus::from_str_loose(&status),
        added_at: row.get(6)?,
    })
}

fn row_to_article(row: &rusqlite::Row<'_>) -> rusqlite::Result<NewsArticle> {
    let category: String = row.get(7)?;
    Ok(NewsArticle {
        id: row.get(0)?,
        source_id: row.get(1)?,
        title: row.get(2)?,
        link: row.get(3)?,
        image_url: row.get(4)?,
        description: row.get(5)?,
        pub_date: row.get(6)?,
        category: NewsCategory::from_str_loose(&category),
    })
}
