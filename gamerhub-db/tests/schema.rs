use gamerhub_db::schema::{CURRENT_VERSION, create_schema, get_schema_version};
use gamerhub_db::{open_database, open_memory};

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "users",
        "games",
        "library_entries",
        "news_sources",
        "news",
        "import_log",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table {table} should exist");
    }
}

#[test]
fn open_database_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.db");
    let conn = open_database(&path).unwrap();
    assert!(path.exists());
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    drop(conn);

    // Reopening an up-to-date store leaves the version alone.
    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn migrates_version_one_games_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (
                 version INTEGER NOT NULL,
                 applied_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             INSERT INTO schema_version (version) VALUES (1);
             CREATE TABLE games (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 title TEXT NOT NULL,
                 cover_image TEXT,
                 release_date TEXT,
                 igdb_id INTEGER UNIQUE,
                 created_at TEXT NOT NULL DEFAULT (datetime('now'))
             );
             INSERT INTO games (title) VALUES ('Portal');",
        )
        .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);

    let mut stmt = conn.prepare("PRAGMA table_info(games)").unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(columns.contains(&"steam_appid".to_string()));

    let appid: Option<i64> = conn
        .query_row("SELECT steam_appid FROM games WHERE title = 'Portal'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(appid, None);
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER NOT NULL, applied_at TEXT);
             INSERT INTO schema_version (version) VALUES (99);",
        )
        .unwrap();
    }
    let err = open_database(&path).unwrap_err();
    assert!(err.to_string().contains("found 99"));
}
