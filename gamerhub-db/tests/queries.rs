use gamerhub_catalog::types::*;
use gamerhub_db::*;

fn setup_db() -> Connection {
    let conn = open_memory().unwrap();
    let alice = insert_user(&conn, "alice").unwrap();
    let portal = insert_game(&conn, "Portal", Some(400)).unwrap();
    let hades = insert_game(&conn, "Hades", Some(1145360)).unwrap();
    upsert_library_entry(&conn, alice, portal, 120, STEAM_PLATFORM, LibraryStatus::Completed)
        .unwrap();
    upsert_library_entry(&conn, alice, hades, 30, STEAM_PLATFORM, LibraryStatus::Playing)
        .unwrap();

    let (source, _) = upsert_news_source(
        &conn,
        &NewsSourceSeed {
            name: "Feed".to_string(),
            url: "https://example.com/rss".to_string(),
            category: NewsCategory::General,
            icon: None,
        },
    )
    .unwrap();
    for (i, (date, category)) in [
        ("2026-10-01T00:00:00Z", NewsCategory::Hardware),
        ("2026-10-03T00:00:00Z", NewsCategory::Invest),
        ("2026-10-02T00:00:00Z", NewsCategory::Hardware),
    ]
    .into_iter()
    .enumerate()
    {
        insert_news(
            &conn,
            &NewsArticle {
                id: 0,
                source_id: source,
                title: format!("Story {i}"),
                link: format!("https://example.com/{i}"),
                image_url: None,
                description: String::new(),
                pub_date: date.to_string(),
                category,
            },
        )
        .unwrap();
    }
    conn
}

#[test]
fn find_user_by_username_returns_none_when_missing() {
    let conn = setup_db();
    assert!(find_user_by_username(&conn, "alice").unwrap().is_some());
    assert!(find_user_by_username(&conn, "mallory").unwrap().is_none());
}

#[test]
fn list_users_in_name_order() {
    let conn = setup_db();
    insert_user(&conn, "aaron").unwrap();
    let names: Vec<String> = list_users(&conn)
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, ["aaron", "alice"]);
}

#[test]
fn find_game_by_title_is_case_insensitive() {
    let conn = setup_db();
    let game = find_game_by_title(&conn, "pORTAL").unwrap().unwrap();
    assert_eq!(game.steam_appid, Some(400));
    assert!(find_game_by_title(&conn, "Portal 2").unwrap().is_none());
}

#[test]
fn find_game_by_title_prefers_oldest() {
    let conn = setup_db();
    let newer = insert_game(&conn, "PORTAL", None).unwrap();
    let game = find_game_by_title(&conn, "portal").unwrap().unwrap();
    assert_ne!(game.id, newer);
}

#[test]
fn find_game_by_appid_and_igdb_id() {
    let conn = setup_db();
    let hades = find_game_by_steam_appid(&conn, 1145360).unwrap().unwrap();
    assert_eq!(hades.title, "Hades");
    assert!(find_game_by_steam_appid(&conn, 1).unwrap().is_none());

    let (id, _) = upsert_game_by_igdb_id(&conn, 113112, "Hades II", None).unwrap();
    assert_eq!(find_game_by_igdb_id(&conn, 113112).unwrap().unwrap().id, id);
}

#[test]
fn library_listing_is_in_title_order() {
    let conn = setup_db();
    let alice = find_user_by_username(&conn, "alice").unwrap().unwrap();
    let items = library_for_user(&conn, alice.id).unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Hades", "Portal"]);
    assert_eq!(items[1].entry.status, LibraryStatus::Completed);
    assert_eq!(items[1].entry.platform, "Steam");
}

#[test]
fn list_news_newest_first() {
    let conn = setup_db();
    let news = list_news(&conn, None, 10).unwrap();
    let dates: Vec<&str> = news.iter().map(|n| n.pub_date.as_str()).collect();
    assert_eq!(
        dates,
        ["2026-10-03T00:00:00Z", "2026-10-02T00:00:00Z", "2026-10-01T00:00:00Z"]
    );
}

#[test]
fn list_news_filters_and_limits() {
    let conn = setup_db();
    let hardware = list_news(&conn, Some(NewsCategory::Hardware), 10).unwrap();
    assert_eq!(hardware.len(), 2);
    assert!(hardware.iter().all(|n| n.category == NewsCategory::Hardware));

    let limited = list_news(&conn, None, 1).unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].category, NewsCategory::Invest);

    assert!(list_news(&conn, Some(NewsCategory::Devs), 10).unwrap().is_empty());
}

#[test]
fn store_stats_counts_rows() {
    let conn = setup_db();
    let stats = store_stats(&conn).unwrap();
    assert_eq!(stats.users, 1);
    assert_eq!(stats.games, 2);
    assert_eq!(stats.library_entries, 2);
    assert_eq!(stats.news_sources, 1);
    assert_eq!(stats.news, 3);
    assert_eq!(stats.import_runs, 0);
}
