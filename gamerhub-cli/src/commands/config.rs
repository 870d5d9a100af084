use gamerhub_fetch::{CredentialSource, Credentials};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 4 {
        "****".to_string()
    } else {
        let prefix: String = s.chars().take(2).collect();
        format!("{prefix}****")
    }
}

/// Show current credentials and their sources.
pub(crate) fn run_config_show() {
    let path = gamerhub_fetch::config_path();
    let sources = gamerhub_fetch::credential_sources();
    let creds = Credentials::load();

    log::info!(
        "{}",
        "gamerhub Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let fields: [(&str, &CredentialSource, Option<&String>, bool); 3] = [
        (
            "steam_api_key",
            &sources.steam_api_key,
            creds.steam_api_key.as_ref(),
            true,
        ),
        (
            "igdb_client_id",
            &sources.igdb_client_id,
            creds.igdb_client_id.as_ref(),
            false,
        ),
        (
            "igdb_client_secret",
            &sources.igdb_client_secret,
            creds.igdb_client_secret.as_ref(),
            true,
        ),
    ];

    for (name, source, value, is_secret) in fields {
        let source_str = format!("({})", source);
        let label = format!("{}:", name);
        match value {
            Some(v) => {
                let shown = if is_secret { mask_value(v) } else { v.clone() };
                log::info!(
                    "  {} {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    shown,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                log::info!(
                    "  {} {} {}",
                    label.if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
}

/// Merge the given values into the config file. Values not passed keep
/// whatever the file already holds.
pub(crate) fn run_config_set(
    steam_key: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Result<(), CliError> {
    if steam_key.is_none() && client_id.is_none() && client_secret.is_none() {
        return Err(CliError::invalid_argument(
            "nothing to set; pass --steam-key, --client-id or --client-secret",
        ));
    }

    let merged =
        Credentials::load_from_file().with_overrides(steam_key, client_id, client_secret);

    match gamerhub_fetch::save_to_file(&merged) {
        Ok(path) => {
            log::info!(
                "{} Credentials saved to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                path.display(),
            );
            Ok(())
        }
        Err(e) => {
            log::info!(
                "{} Failed to save credentials",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            );
            Err(CliError::config(e))
        }
    }
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    match gamerhub_fetch::config_path() {
        Some(p) => println!("{}", p.display()),
        None => log::warn!("Could not determine config directory"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_value_keeps_two_chars() {
        assert_eq!(mask_value("ABCDEF123456"), "AB****");
    }

    #[test]
    fn mask_value_hides_short_values_entirely() {
        assert_eq!(mask_value("abc"), "****");
        assert_eq!(mask_value(""), "****");
    }
}
