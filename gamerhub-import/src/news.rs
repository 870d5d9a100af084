//! News ingestion: feed fetch, article preparation, classification and the
//! retention sweep.

use chrono::{DateTime, Duration, Utc};
use gamerhub_catalog::types::*;
use gamerhub_db::{operations, queries, OperationError};
use gamerhub_fetch::{FeedEntry, FeedSource};
use rusqlite::Connection;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::classify::classify;
use crate::format_timestamp;
use crate::progress::ImportProgress;

/// Entries taken from the top of each feed per run.
pub const ENTRIES_PER_SOURCE: usize = 10;
/// Articles older than this are deleted by the retention sweep.
pub const RETENTION_DAYS: i64 = 90;
/// Cleaned descriptions longer than this many characters are truncated.
pub const DESCRIPTION_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Statistics from one ingestion run.
#[derive(Debug, Default)]
pub struct NewsStats {
    pub sources_ok: u64,
    pub sources_failed: u64,
    pub articles_created: u64,
    pub duplicates: u64,
    pub skipped: u64,
    pub pruned: u64,
}

/// Get-or-create each source by feed URL. Returns how many were created.
pub fn seed_sources(conn: &Connection, seeds: &[NewsSourceSeed]) -> Result<usize, NewsError> {
    let mut created = 0;
    for seed in seeds {
        let (_, is_new) = operations::upsert_news_source(conn, seed)?;
        if is_new {
            log::info!("Added news source {} ({})", seed.name, seed.url);
            created += 1;
        }
    }
    Ok(created)
}

/// Fetch every stored source and persist new articles, then run the
/// retention sweep.
///
/// A fetch, parse or store failure for one source is logged and the run
/// moves on to the next source. A source that fails while storing keeps
/// none of its articles from this run.
pub fn ingest_news(
    conn: &Connection,
    feeds: &dyn FeedSource,
    now: DateTime<Utc>,
    progress: Option<&dyn ImportProgress>,
) -> Result<NewsStats, NewsError> {
    let mut stats = NewsStats::default();

    for source in queries::list_news_sources(conn)? {
        if let Some(p) = progress {
            p.on_phase(&format!("Fetching {}", source.name));
        }
        let entries = match feeds.fetch_feed(&source.rss_url) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Error fetching {}: {e}", source.name);
                stats.sources_failed += 1;
                continue;
            }
        };
        let mut source_stats = NewsStats::default();
        match ingest_source(conn, &source, &entries, now, &mut source_stats, progress) {
            Ok(()) => {
                stats.sources_ok += 1;
                stats.articles_created += source_stats.articles_created;
                stats.duplicates += source_stats.duplicates;
                stats.skipped += source_stats.skipped;
            }
            Err(e) => {
                log::error!("Error storing articles from {}: {e}", source.name);
                stats.sources_failed += 1;
            }
        }
    }

    stats.pruned = prune_news(conn, now)? as u64;

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Saved {} articles from {} sources ({} failed), pruned {}",
            stats.articles_created, stats.sources_ok, stats.sources_failed, stats.pruned
        ));
    }
    Ok(stats)
}

fn ingest_source(
    conn: &Connection,
    source: &NewsSource,
    entries: &[FeedEntry],
    now: DateTime<Utc>,
    stats: &mut NewsStats,
    progress: Option<&dyn ImportProgress>,
) -> Result<(), NewsError> {
    let tx = conn.unchecked_transaction()?;
    let mut created = 0u64;
    let mut skipped = 0u64;
    let total = entries.len().min(ENTRIES_PER_SOURCE);

    for (i, entry) in entries.iter().take(ENTRIES_PER_SOURCE).enumerate() {
        let Some(article) = prepare_article(source, entry, now) else {
            log::warn!(
                "{}: skipping entry without {}",
                source.name,
                if entry.link.is_none() { "link" } else { "title" }
            );
            stats.skipped += 1;
            skipped += 1;
            continue;
        };

        if queries::news_link_exists(&tx, &article.link)? {
            stats.duplicates += 1;
            skipped += 1;
            continue;
        }

        operations::insert_news(&tx, &article)?;
        log::info!("  Saved: {} [{}]", article.title, article.category);
        stats.articles_created += 1;
        created += 1;

        if let Some(p) = progress {
            p.on_item(i + 1, total, &article.title);
        }
    }

    let log_entry = ImportLog {
        id: 0,
        kind: "news".to_string(),
        source_name: source.name.clone(),
        imported_at: format_timestamp(now),
        records_created: created as i64,
        records_updated: 0,
        records_skipped: skipped as i64,
        records_failed: 0,
    };
    operations::insert_import_log(&tx, &log_entry)?;

    tx.commit()?;
    Ok(())
}

/// Turn a feed entry into an article ready to insert, or `None` when the
/// entry has no link or no title.
pub fn prepare_article(
    source: &NewsSource,
    entry: &FeedEntry,
    now: DateTime<Utc>,
) -> Option<NewsArticle> {
    let link = entry.link.as_deref().map(str::trim).filter(|l| !l.is_empty())?;
    let title = html_text(entry.title.as_deref()?);
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let html = entry.description.as_deref().unwrap_or_default();
    let description = clean_description(html);
    let category = classify(title, &description, source.category);

    Some(NewsArticle {
        id: 0,
        source_id: source.id,
        title: title.to_string(),
        link: link.to_string(),
        image_url: extract_image(entry),
        description,
        pub_date: format_timestamp(entry.published.unwrap_or(now)),
        category,
    })
}

/// Pick the article image: `media:content`, then `media:thumbnail`, then the
/// first `<img src>` in the description.
pub fn extract_image(entry: &FeedEntry) -> Option<String> {
    if let Some(url) = entry.media_content.clone() {
        return Some(url);
    }
    if let Some(url) = entry.media_thumbnail.clone() {
        return Some(url);
    }
    let html = entry.description.as_deref()?;
    let selector = Selector::parse("img[src]").ok()?;
    Html::parse_fragment(html)
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string)
}

/// Strip markup to plain text and cap the length. Whitespace is kept as-is.
pub fn clean_description(html: &str) -> String {
    truncate_chars(&html_text(html), DESCRIPTION_LIMIT)
}

/// Text content of an HTML fragment, with entities decoded.
fn html_text(html: &str) -> String {
    Html::parse_fragment(html).root_element().text().collect()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Delete articles published more than [`RETENTION_DAYS`] before `now`.
pub fn prune_news(conn: &Connection, now: DateTime<Utc>) -> Result<usize, NewsError> {
    let cutoff = now - Duration::days(RETENTION_DAYS);
    let removed = operations::delete_news_before(conn, &format_timestamp(cutoff))?;
    if removed > 0 {
        log::info!("Pruned {removed} articles older than {RETENTION_DAYS} days");
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "tests/news_tests.rs"]
mod tests;
