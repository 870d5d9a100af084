use std::path::PathBuf;

use gamerhub_catalog::{NewsCategory, NewsSourceSeed};
use gamerhub_fetch::FeedClient;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{AppContext, truncate_str};

/// Seed the news sources, fetch every feed and run the retention sweep.
pub(crate) fn run_news_fetch(ctx: &AppContext, sources: Option<PathBuf>) -> Result<(), CliError> {
    let seeds: Vec<NewsSourceSeed> = match &sources {
        Some(path) => gamerhub_catalog::load_news_sources(path)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))?,
        None => gamerhub_catalog::default_news_sources(),
    };

    let conn = ctx.open_db()?;
    let added = gamerhub_import::seed_sources(&conn, &seeds).map_err(CliError::database)?;
    if added > 0 {
        log::info!("Added {added} news sources");
    }

    let feeds = FeedClient::new().map_err(CliError::network)?;
    let progress = ctx.progress();
    let result =
        gamerhub_import::ingest_news(&conn, &feeds, chrono::Utc::now(), Some(progress.as_ref()));
    drop(progress);
    let stats = result.map_err(CliError::database)?;

    crate::log_blank();
    log::info!("{}", "News ingestion".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Sources fetched: {:>6}", stats.sources_ok);
    if stats.sources_failed > 0 {
        log::info!(
            "  Sources failed:  {:>6}",
            stats.sources_failed.if_supports_color(Stdout, |t| t.red()),
        );
    }
    log::info!("  New articles:    {:>6}", stats.articles_created);
    log::info!("  Already stored:  {:>6}", stats.duplicates);
    if stats.skipped > 0 {
        log::info!(
            "  Skipped:         {:>6}",
            stats.skipped.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    log::info!("  Pruned:          {:>6}", stats.pruned);
    Ok(())
}

pub(crate) fn run_news_list(
    ctx: &AppContext,
    category: Option<&str>,
    limit: usize,
) -> Result<(), CliError> {
    let category = category.map(parse_category).transpose()?;
    let conn = ctx.open_db()?;
    let articles = gamerhub_db::list_news(&conn, category, limit).map_err(CliError::database)?;

    if articles.is_empty() {
        log::info!("No articles stored. Run 'gamerhub news fetch' first.");
        return Ok(());
    }

    for article in &articles {
        let date = article.pub_date.get(..10).unwrap_or(article.pub_date.as_str());
        log::info!(
            "{} {} {}",
            date.if_supports_color(Stdout, |t| t.dimmed()),
            format!("[{}]", article.category).if_supports_color(Stdout, |t| t.cyan()),
            article.title.if_supports_color(Stdout, |t| t.bold()),
        );
        if !article.description.is_empty() {
            log::info!("    {}", truncate_str(&article.description, 120));
        }
        log::info!(
            "    {}",
            article.link.if_supports_color(Stdout, |t| t.underline()),
        );
    }
    Ok(())
}

pub(crate) fn run_news_prune(ctx: &AppContext) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let removed =
        gamerhub_import::prune_news(&conn, chrono::Utc::now()).map_err(CliError::database)?;
    log::info!(
        "Removed {} articles older than {} days",
        removed,
        gamerhub_import::news::RETENTION_DAYS,
    );
    Ok(())
}

pub(crate) fn run_news_sources(ctx: &AppContext) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let sources = gamerhub_db::list_news_sources(&conn).map_err(CliError::database)?;

    if sources.is_empty() {
        log::info!("No news sources. 'gamerhub news fetch' adds the defaults.");
        return Ok(());
    }

    log::info!("{}", "News sources".if_supports_color(Stdout, |t| t.bold()));
    for source in &sources {
        log::info!(
            "  {:<24} {:<9} {}",
            source.name.if_supports_color(Stdout, |t| t.cyan()),
            source.category,
            source.rss_url.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Parse a category filter strictly; "esports" is not a stored category.
fn parse_category(s: &str) -> Result<NewsCategory, CliError> {
    match s.trim().to_lowercase().as_str() {
        "invest" => Ok(NewsCategory::Invest),
        "devs" => Ok(NewsCategory::Devs),
        "hardware" => Ok(NewsCategory::Hardware),
        "general" => Ok(NewsCategory::General),
        other => Err(CliError::invalid_argument(format!(
            "unknown category '{other}' (expected invest, devs, hardware or general)"
        ))),
    }
}
