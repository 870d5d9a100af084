use gamerhub_catalog::types::*;
use gamerhub_db::*;

fn article(source_id: i64, link: &str, pub_date: &str, category: NewsCategory) -> NewsArticle {
    NewsArticle {
        id: 0,
        source_id,
        title: format!("Story at {link}"),
        link: link.to_string(),
        image_url: None,
        description: String::new(),
        pub_date: pub_date.to_string(),
        category,
    }
}

fn seed(url: &str) -> NewsSourceSeed {
    NewsSourceSeed {
        name: "Feed".to_string(),
        url: url.to_string(),
        category: NewsCategory::Hardware,
        icon: None,
    }
}

#[test]
fn duplicate_username_rejected() {
    let conn = open_memory().unwrap();
    insert_user(&conn, "alice").unwrap();
    assert!(insert_user(&conn, "alice").is_err());
}

#[test]
fn steam_id_can_be_set_and_cleared() {
    let conn = open_memory().unwrap();
    let id = insert_user(&conn, "alice").unwrap();

    set_user_steam_id(&conn, id, Some("76561197960287930")).unwrap();
    let user = get_user(&conn, id).unwrap().unwrap();
    assert_eq!(user.steam_id.as_deref(), Some("76561197960287930"));

    set_user_steam_id(&conn, id, None).unwrap();
    let user = get_user(&conn, id).unwrap().unwrap();
    assert_eq!(user.steam_id, None);
}

#[test]
fn updating_missing_user_is_not_found() {
    let conn = open_memory().unwrap();
    let err = set_user_steam_id(&conn, 42, None).unwrap_err();
    assert!(matches!(err, OperationError::NotFound { .. }));
}

#[test]
fn steam_appid_is_unique() {
    let conn = open_memory().unwrap();
    insert_game(&conn, "Portal", Some(400)).unwrap();
    assert!(insert_game(&conn, "Portal (copy)", Some(400)).is_err());
    // Games without an app id do not collide.
    insert_game(&conn, "Tetris", None).unwrap();
    insert_game(&conn, "Doom", None).unwrap();
}

#[test]
fn upsert_game_by_igdb_id_creates_then_updates() {
    let conn = open_memory().unwrap();
    let (id, created) = upsert_game_by_igdb_id(&conn, 1942, "The Witcher 3", None).unwrap();
    assert!(created);

    let (again, created) =
        upsert_game_by_igdb_id(&conn, 1942, "The Witcher 3: Wild Hunt", Some("2015-05-19"))
            .unwrap();
    assert!(!created);
    assert_eq!(id, again);

    let game = get_game(&conn, id).unwrap().unwrap();
    assert_eq!(game.title, "The Witcher 3: Wild Hunt");
    assert_eq!(game.release_date.as_deref(), Some("2015-05-19"));
    assert_eq!(game.igdb_id, Some(1942));
}

#[test]
fn library_entry_upsert_keeps_one_row_per_pair() {
    let conn = open_memory().unwrap();
    let user = insert_user(&conn, "alice").unwrap();
    let game = insert_game(&conn, "Portal", Some(400)).unwrap();

    let first =
        upsert_library_entry(&conn, user, game, 0, STEAM_PLATFORM, LibraryStatus::Unplayed)
            .unwrap();
    let second =
        upsert_library_entry(&conn, user, game, 90, STEAM_PLATFORM, LibraryStatus::Playing)
            .unwrap();
    assert_eq!(first, second);

    let entry = find_library_entry(&conn, user, game).unwrap().unwrap();
    assert_eq!(entry.playtime_forever, 90);
    assert_eq!(entry.status, LibraryStatus::Playing);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM library_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn set_library_status_requires_entry() {
    let conn = open_memory().unwrap();
    let user = insert_user(&conn, "alice").unwrap();
    let game = insert_game(&conn, "Portal", None).unwrap();
    assert!(set_library_status(&conn, user, game, LibraryStatus::Completed).is_err());

    upsert_library_entry(&conn, user, game, 10, "PC", LibraryStatus::Playing).unwrap();
    set_library_status(&conn, user, game, LibraryStatus::Completed).unwrap();
    let entry = find_library_entry(&conn, user, game).unwrap().unwrap();
    assert_eq!(entry.status, LibraryStatus::Completed);
}

#[test]
fn delete_platform_entries_ignores_case_and_other_users() {
    let conn = open_memory().unwrap();
    let alice = insert_user(&conn, "alice").unwrap();
    let bob = insert_user(&conn, "bob").unwrap();
    let portal = insert_game(&conn, "Portal", None).unwrap();
    let zelda = insert_game(&conn, "Zelda", None).unwrap();
    let doom = insert_game(&conn, "Doom", None).unwrap();

    upsert_library_entry(&conn, alice, portal, 0, "Steam", LibraryStatus::Unplayed).unwrap();
    upsert_library_entry(&conn, alice, doom, 0, "STEAM", LibraryStatus::Unplayed).unwrap();
    upsert_library_entry(&conn, alice, zelda, 0, "Switch", LibraryStatus::Unplayed).unwrap();
    upsert_library_entry(&conn, bob, portal, 0, "Steam", LibraryStatus::Unplayed).unwrap();

    let removed = delete_library_entries_for_platform(&conn, alice, "steam").unwrap();
    assert_eq!(removed, 2);
    assert_eq!(library_for_user(&conn, alice).unwrap().len(), 1);
    assert_eq!(library_for_user(&conn, bob).unwrap().len(), 1);
}

#[test]
fn news_source_is_get_or_create() {
    let conn = open_memory().unwrap();
    let (id, created) = upsert_news_source(&conn, &seed("https://example.com/rss")).unwrap();
    assert!(created);

    let mut renamed = seed("https://example.com/rss");
    renamed.name = "Renamed".to_string();
    let (again, created) = upsert_news_source(&conn, &renamed).unwrap();
    assert!(!created);
    assert_eq!(id, again);

    let sources = list_news_sources(&conn).unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "Feed");
    assert_eq!(sources[0].category, NewsCategory::Hardware);
}

#[test]
fn news_link_is_unique() {
    let conn = open_memory().unwrap();
    let (source, _) = upsert_news_source(&conn, &seed("https://example.com/rss")).unwrap();
    let a = article(source, "https://example.com/a", "2026-01-01T00:00:00Z", NewsCategory::General);
    insert_news(&conn, &a).unwrap();
    assert!(insert_news(&conn, &a).is_err());
    assert!(news_link_exists(&conn, "https://example.com/a").unwrap());
    assert!(!news_link_exists(&conn, "https://example.com/b").unwrap());
}

#[test]
fn delete_news_before_is_strict() {
    let conn = open_memory().unwrap();
    let (source, _) = upsert_news_source(&conn, &seed("https://example.com/rss")).unwrap();
    for (link, date) in [
        ("https://example.com/old", "2026-01-01T00:00:00Z"),
        ("https://example.com/edge", "2026-02-01T00:00:00Z"),
        ("https://example.com/new", "2026-03-01T00:00:00Z"),
    ] {
        insert_news(&conn, &article(source, link, date, NewsCategory::General)).unwrap();
    }

    let removed = delete_news_before(&conn, "2026-02-01T00:00:00Z").unwrap();
    assert_eq!(removed, 1);
    assert!(news_link_exists(&conn, "https://example.com/edge").unwrap());
}

#[test]
fn import_log_round_trip() {
    let conn = open_memory().unwrap();
    let log = ImportLog {
        id: 0,
        kind: "news".to_string(),
        source_name: "IGN".to_string(),
        imported_at: "2026-10-16T12:00:00Z".to_string(),
        records_created: 7,
        records_updated: 0,
        records_skipped: 3,
        records_failed: 0,
    };
    insert_import_log(&conn, &log).unwrap();
    let logs = list_import_logs(&conn, 10).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].records_created, 7);
    assert_eq!(logs[0].records_skipped, 3);
}
