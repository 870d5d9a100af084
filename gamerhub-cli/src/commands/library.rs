use gamerhub_catalog::LibraryStatus;
use gamerhub_fetch::{Credentials, ImageClient, SteamClient};
use gamerhub_import::{CoverFetcher, SyncError};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{AppContext, require_user, truncate_str};

/// Sync one user's Steam library.
///
/// Upstream failures are logged by the sync itself and do not change the
/// exit status.
pub(crate) fn run_library_sync(
    ctx: &AppContext,
    username: &str,
    steam_id: Option<String>,
    steam_key: Option<String>,
) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let user = require_user(&conn, username)?;

    let steam_id = steam_id
        .or_else(|| user.steam_id.clone())
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            CliError::invalid_argument(format!(
                "user '{}' has no linked Steam account; pass --steam-id",
                user.username
            ))
        })?;

    let creds = Credentials::load().with_overrides(steam_key, None, None);
    let api_key = creds.require_steam_api_key().map_err(CliError::config)?;
    let steam = SteamClient::new(api_key).map_err(CliError::network)?;
    let images = ImageClient::new().map_err(CliError::network)?;
    let media = ctx.media();
    let covers = CoverFetcher::new(&images, &media);

    let progress = ctx.progress();
    let now = chrono::Utc::now().timestamp();
    let result = gamerhub_import::sync_steam_library(
        &conn,
        user.id,
        &steam_id,
        &steam,
        &covers,
        now,
        Some(progress.as_ref()),
    );
    drop(progress);

    let stats = match result {
        Ok(stats) => stats,
        Err(SyncError::Fetch(e)) => {
            if e.is_auth() {
                log::warn!("Check the Steam API key with 'gamerhub config show'.");
            }
            return Ok(());
        }
        Err(SyncError::UnknownUser(_)) => return Err(CliError::unknown_user(username)),
        Err(SyncError::Db(e)) => return Err(CliError::database(e)),
    };

    crate::log_blank();
    log::info!(
        "{}",
        format!("Steam sync for {}", user.username).if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Owned games:     {:>6}", stats.games_seen);
    log::info!("  New games:       {:>6}", stats.games_created);
    log::info!("  Matched games:   {:>6}", stats.games_matched);
    log::info!("  New entries:     {:>6}", stats.entries_created);
    log::info!("  Updated entries: {:>6}", stats.entries_updated);
    log::info!("  Status changes:  {:>6}", stats.status_changes);
    if stats.skipped > 0 {
        log::info!(
            "  Skipped:         {:>6}",
            stats.skipped.if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if stats.covers_saved + stats.covers_failed > 0 {
        log::info!(
            "  Covers:          {:>6} saved, {} failed",
            stats.covers_saved,
            stats.covers_failed,
        );
    }
    Ok(())
}

pub(crate) fn run_library_disconnect(ctx: &AppContext, username: &str) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let user = require_user(&conn, username)?;

    if user.steam_id.is_none() {
        log::info!("{} has no linked Steam account.", user.username);
    }
    let removed = gamerhub_import::disconnect_steam(&conn, user.id).map_err(CliError::database)?;
    log::info!(
        "{} Disconnected Steam for {} ({} library entries removed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        user.username,
        removed,
    );
    Ok(())
}

pub(crate) fn run_library_list(ctx: &AppContext, username: &str) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let user = require_user(&conn, username)?;
    let items = gamerhub_db::library_for_user(&conn, user.id).map_err(CliError::database)?;

    if items.is_empty() {
        log::info!("{}'s library is empty.", user.username);
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{}'s library ({} games)", user.username, items.len())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for item in &items {
        let hours = item.entry.playtime_forever as f64 / 60.0;
        log::info!(
            "  {:<40} {} {:>8.1}h  {}",
            truncate_str(&item.title, 40),
            status_label(item.entry.status, 10),
            hours,
            item.entry.platform.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Manually set a status. Completed, replaying and dropped stick across
/// later syncs.
pub(crate) fn run_library_status(
    ctx: &AppContext,
    username: &str,
    title: &str,
    status: &str,
) -> Result<(), CliError> {
    let status = parse_status(status)?;
    let conn = ctx.open_db()?;
    let user = require_user(&conn, username)?;

    let game = gamerhub_db::find_game_by_title(&conn, title)
        .map_err(CliError::database)?
        .ok_or_else(|| CliError::invalid_argument(format!("no game titled '{title}'")))?;
    if gamerhub_db::find_library_entry(&conn, user.id, game.id)
        .map_err(CliError::database)?
        .is_none()
    {
        return Err(CliError::invalid_argument(format!(
            "'{}' is not in {}'s library",
            game.title, user.username
        )));
    }

    gamerhub_db::set_library_status(&conn, user.id, game.id, status)
        .map_err(CliError::database)?;
    log::info!(
        "{} {} is now {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        game.title,
        status_label(status, 0),
    );
    Ok(())
}

/// Parse a status name strictly; unlike `LibraryStatus::from_str_loose`,
/// unknown names are rejected.
fn parse_status(s: &str) -> Result<LibraryStatus, CliError> {
    let wanted = s.trim().to_lowercase();
    LibraryStatus::ALL
        .into_iter()
        .find(|status| status.as_str() == wanted)
        .ok_or_else(|| {
            let names: Vec<&str> = LibraryStatus::ALL.iter().map(|s| s.as_str()).collect();
            CliError::invalid_argument(format!(
                "unknown status '{s}' (expected one of: {})",
                names.join(", ")
            ))
        })
}

/// Colored status name, padded to `width` before coloring.
fn status_label(status: LibraryStatus, width: usize) -> String {
    let label = format!("{:<width$}", status.as_str());
    let label = label.as_str();
    match status {
        LibraryStatus::Playing => label.if_supports_color(Stdout, |t| t.green()).to_string(),
        LibraryStatus::Completed => label.if_supports_color(Stdout, |t| t.cyan()).to_string(),
        LibraryStatus::Dropped => label.if_supports_color(Stdout, |t| t.red()).to_string(),
        LibraryStatus::Replaying => label.if_supports_color(Stdout, |t| t.magenta()).to_string(),
        LibraryStatus::Unplayed => label.if_supports_color(Stdout, |t| t.dimmed()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_status_accepts_any_case() {
        assert_eq!(parse_status("Completed").unwrap(), LibraryStatus::Completed);
        assert_eq!(parse_status(" dropped ").unwrap(), LibraryStatus::Dropped);
    }

    #[test]
    fn parse_status_rejects_unknown_names() {
        let err = parse_status("finished").unwrap_err();
        assert!(err.to_string().contains("unplayed, playing, replaying, completed, dropped"));
    }
}
