use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::AppContext;

pub(crate) fn run_stats(ctx: &AppContext, runs: usize) -> Result<(), CliError> {
    if !ctx.db_path.exists() {
        log::warn!("No database found at {}", ctx.db_path.display());
        log::info!("Run 'gamerhub user add <username>' or 'gamerhub news fetch' to create one.");
        return Ok(());
    }

    let conn = ctx.open_db()?;
    let stats = gamerhub_db::store_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query stats: {}", e)))?;

    log::info!(
        "{}",
        "gamerhub Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", ctx.db_path.display());
    crate::log_blank();
    log::info!("  Users:            {:>8}", stats.users);
    log::info!("  Games:            {:>8}", stats.games);
    log::info!("  Library entries:  {:>8}", stats.library_entries);
    log::info!("  News sources:     {:>8}", stats.news_sources);
    log::info!("  Articles:         {:>8}", stats.news);
    log::info!("  Batch runs:       {:>8}", stats.import_runs);

    if runs == 0 {
        return Ok(());
    }
    let logs = gamerhub_db::list_import_logs(&conn, runs)
        .map_err(|e| CliError::database(format!("Failed to query import log: {}", e)))?;
    if logs.is_empty() {
        return Ok(());
    }

    crate::log_blank();
    log::info!("{}", "Recent runs".if_supports_color(Stdout, |t| t.bold()));
    for run in &logs {
        log::info!(
            "  {}  {:<12} {:<24} +{} ~{} skipped {} failed {}",
            run.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
            run.kind,
            super::truncate_str(&run.source_name, 24),
            run.records_created,
            run.records_updated,
            run.records_skipped,
            run.records_failed,
        );
    }
    Ok(())
}
