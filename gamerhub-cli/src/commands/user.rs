use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::AppContext;

pub(crate) fn run_user_add(ctx: &AppContext, username: &str) -> Result<(), CliError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CliError::invalid_argument("username must not be empty"));
    }

    let conn = ctx.open_db()?;
    if gamerhub_db::find_user_by_username(&conn, username)
        .map_err(CliError::database)?
        .is_some()
    {
        return Err(CliError::invalid_argument(format!(
            "user '{username}' already exists"
        )));
    }

    let id = gamerhub_db::insert_user(&conn, username).map_err(CliError::database)?;
    log::info!(
        "{} Created user {} (id {})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        username.if_supports_color(Stdout, |t| t.bold()),
        id,
    );
    Ok(())
}

pub(crate) fn run_user_list(ctx: &AppContext) -> Result<(), CliError> {
    let conn = ctx.open_db()?;
    let users = gamerhub_db::list_users(&conn).map_err(CliError::database)?;

    if users.is_empty() {
        log::info!("No users. Create one with 'gamerhub user add <username>'.");
        return Ok(());
    }

    log::info!("{}", "Users".if_supports_color(Stdout, |t| t.bold()));
    for user in &users {
        let steam = match &user.steam_id {
            Some(id) => format!("steam {id}"),
            None => "no steam account".to_string(),
        };
        log::info!(
            "  {:<20} {}",
            user.username.if_supports_color(Stdout, |t| t.cyan()),
            steam.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}
