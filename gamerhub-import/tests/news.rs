use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use gamerhub_catalog::types::*;
use gamerhub_catalog::default_news_sources;
use gamerhub_db::*;
use gamerhub_fetch::{FeedEntry, FeedSource, FetchError};
use gamerhub_import::*;

/// Serves canned entries per feed URL; unknown URLs fail like a dead host.
struct FakeFeeds {
    feeds: HashMap<String, Vec<FeedEntry>>,
}

impl FeedSource for FakeFeeds {
    fn fetch_feed(&self, url: &str) -> Result<Vec<FeedEntry>, FetchError> {
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::parse(format!("no feed at {url}")))
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

fn entry(title: &str, link: &str) -> FeedEntry {
    FeedEntry {
        title: Some(title.to_string()),
        link: Some(link.to_string()),
        description: Some("<p>Body</p>".to_string()),
        ..Default::default()
    }
}

fn seed(name: &str, url: &str, category: NewsCategory) -> NewsSourceSeed {
    NewsSourceSeed {
        name: name.to_string(),
        url: url.to_string(),
        category,
        icon: None,
    }
}

fn article(link: &str, pub_date: DateTime<Utc>) -> NewsArticle {
    NewsArticle {
        id: 0,
        source_id: 1,
        title: "Old".to_string(),
        link: link.to_string(),
        image_url: None,
        description: String::new(),
        pub_date: format_timestamp(pub_date),
        category: NewsCategory::General,
    }
}

#[test]
fn seeding_defaults_is_idempotent() {
    let conn = open_memory().unwrap();
    assert_eq!(seed_sources(&conn, &default_news_sources()).unwrap(), 4);
    assert_eq!(seed_sources(&conn, &default_news_sources()).unwrap(), 0);
    assert_eq!(list_news_sources(&conn).unwrap().len(), 4);
}

#[test]
fn same_link_in_two_feeds_yields_one_row() {
    let conn = open_memory().unwrap();
    seed_sources(
        &conn,
        &[
            seed("A", "https://a.example/rss", NewsCategory::General),
            seed("B", "https://b.example/rss", NewsCategory::General),
        ],
    )
    .unwrap();
    let shared = entry("Shared story", "https://news.example/shared");
    let feeds = FakeFeeds {
        feeds: HashMap::from([
            ("https://a.example/rss".to_string(), vec![shared.clone()]),
            ("https://b.example/rss".to_string(), vec![shared.clone(), shared]),
        ]),
    };

    let stats = ingest_news(&conn, &feeds, now(), None).unwrap();
    assert_eq!(stats.articles_created, 1);
    assert_eq!(stats.duplicates, 2);
    assert_eq!(list_news(&conn, None, 100).unwrap().len(), 1);

    // A second run finds nothing new.
    let stats = ingest_news(&conn, &feeds, now(), None).unwrap();
    assert_eq!(stats.articles_created, 0);
}

#[test]
fn only_first_ten_entries_are_taken() {
    let conn = open_memory().unwrap();
    seed_sources(&conn, &[seed("A", "https://a.example/rss", NewsCategory::General)]).unwrap();
    let entries = (0..15)
        .map(|i| entry(&format!("Story {i}"), &format!("https://a.example/{i}")))
        .collect();
    let feeds = FakeFeeds {
        feeds: HashMap::from([("https://a.example/rss".to_string(), entries)]),
    };

    let stats = ingest_news(&conn, &feeds, now(), None).unwrap();
    assert_eq!(stats.articles_created, 10);
    assert!(news_link_exists(&conn, "https://a.example/9").unwrap());
    assert!(!news_link_exists(&conn, "https://a.example/10").unwrap());
}

#[test]
fn failing_source_does_not_stop_others() {
    let conn = open_memory().unwrap();
    seed_sources(
        &conn,
        &[
            seed("Dead", "https://dead.example/rss", NewsCategory::General),
            seed("Live", "https://live.example/rss", NewsCategory::Hardware),
        ],
    )
    .unwrap();
    let feeds = FakeFeeds {
        feeds: HashMap::from([(
            "https://live.example/rss".to_string(),
            vec![entry("Weekly roundup", "https://live.example/1")],
        )]),
    };

    let stats = ingest_news(&conn, &feeds, now(), None).unwrap();
    assert_eq!(stats.sources_failed, 1);
    assert_eq!(stats.sources_ok, 1);
    let news = list_news(&conn, None, 10).unwrap();
    assert_eq!(news.len(), 1);
    assert_eq!(news[0].category, NewsCategory::Hardware);
}

#[test]
fn malformed_entries_are_skipped() {
    let conn = open_memory().unwrap();
    seed_sources(&conn, &[seed("A", "https://a.example/rss", NewsCategory::General)]).unwrap();
    let mut no_link = entry("No link", "");
    no_link.link = None;
    let mut no_title = entry("", "https://a.example/untitled");
    no_title.title = None;
    let feeds = FakeFeeds {
        feeds: HashMap::from([(
            "https://a.example/rss".to_string(),
            vec![no_link, no_title, entry("Fine", "https://a.example/fine")],
        )]),
    };

    let stats = ingest_news(&conn, &feeds, now(), None).unwrap();
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.articles_created, 1);
}

#[test]
fn keyword_category_overrides_source_default() {
    let conn = open_memory().unwrap();
    seed_sources(&conn, &[seed("HW", "https://hw.example/rss", NewsCategory::Hardware)]).unwrap();
    let feeds = FakeFeeds {
        feeds: HashMap::from([(
            "https://hw.example/rss".to_string(),
            vec![entry("Chipmaker stock jumps on GPU demand", "https://hw.example/1")],
        )]),
    };

    ingest_news(&conn, &feeds, now(), None).unwrap();
    let news = list_news(&conn, None, 10).unwrap();
    assert_eq!(news[0].category, NewsCategory::Invest);
}

#[test]
fn retention_sweep_uses_ninety_days() {
    let conn = open_memory().unwrap();
    seed_sources(&conn, &[seed("A", "https://a.example/rss", NewsCategory::General)]).unwrap();
    insert_news(&conn, &article("https://a.example/91", now() - Duration::days(91))).unwrap();
    insert_news(&conn, &article("https://a.example/89", now() - Duration::days(89))).unwrap();

    let removed = prune_news(&conn, now()).unwrap();
    assert_eq!(removed, 1);
    assert!(!news_link_exists(&conn, "https://a.example/91").unwrap());
    assert!(news_link_exists(&conn, "https://a.example/89").unwrap());
}

#[test]
fn ingest_runs_the_sweep_and_logs_runs() {
    let conn = open_memory().unwrap();
    seed_sources(&conn, &[seed("A", "https://a.example/rss", NewsCategory::General)]).unwrap();
    insert_news(&conn, &article("https://a.example/old", now() - Duration::days(120))).unwrap();
    let feeds = FakeFeeds {
        feeds: HashMap::from([("https://a.example/rss".to_string(), vec![])]),
    };

    let stats = ingest_news(&conn, &feeds, now(), None).unwrap();
    assert_eq!(stats.pruned, 1);
    let logs = list_import_logs(&conn, 10).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].kind, "news");
    assert_eq!(logs[0].source_name, "A");
}

#[test]
fn store_failure_in_one_source_does_not_stop_others() {
    let conn = open_memory().unwrap();
    seed_sources(
        &conn,
        &[
            seed("A", "https://a.example/rss", NewsCategory::General),
            seed("B", "https://b.example/rss", NewsCategory::General),
        ],
    )
    .unwrap();
    insert_news(&conn, &article("https://a.example/old", now() - Duration::days(120))).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_link BEFORE INSERT ON news
         WHEN NEW.link = 'https://a.example/bad'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
    let feeds = FakeFeeds {
        feeds: HashMap::from([
            (
                "https://a.example/rss".to_string(),
                vec![
                    entry("Good", "https://a.example/good"),
                    entry("Bad", "https://a.example/bad"),
                ],
            ),
            (
                "https://b.example/rss".to_string(),
                vec![entry("Other", "https://b.example/1")],
            ),
        ]),
    };

    let stats = ingest_news(&conn, &feeds, now(), None).unwrap();
    assert_eq!(stats.sources_failed, 1);
    assert_eq!(stats.sources_ok, 1);
    assert_eq!(stats.articles_created, 1);
    assert_eq!(stats.pruned, 1);
    // The failed source is rolled back as a whole.
    assert!(!news_link_exists(&conn, "https://a.example/good").unwrap());
    assert!(news_link_exists(&conn, "https://b.example/1").unwrap());
    assert!(!news_link_exists(&conn, "https://a.example/old").unwrap());
    let logs = list_import_logs(&conn, 10).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].source_name, "B");
}
