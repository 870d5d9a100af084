//! SQLite persistence layer for users, games, libraries and news.
//!
//! Provides schema creation, write operations, and query APIs
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, delete_library_entries_for_platform, delete_news_before, insert_game,
    insert_import_log, insert_news, insert_user, set_game_cover, set_game_steam_appid,
    set_library_status, set_user_steam_id, upsert_game_by_igdb_id, upsert_library_entry,
    upsert_news_source,
};
pub use queries::{
    StoreStats, find_game_by_igdb_id, find_game_by_steam_appid, find_game_by_title,
    find_library_entry, find_user_by_username, get_game, get_user, library_for_user,
    list_import_logs, list_news, list_news_sources, list_users, news_link_exists, store_stats,
};
pub use rusqlite::Connection;
pub use schema::{open_database, open_memory};
