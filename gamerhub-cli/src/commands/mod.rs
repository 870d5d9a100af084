pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod library;
pub(crate) mod news;
pub(crate) mod stats;
pub(crate) mod user;

use std::path::PathBuf;

use gamerhub_catalog::User;
use gamerhub_db::Connection;
use gamerhub_import::{ImportProgress, MediaStore};

use crate::CliError;
use crate::spinner::batch_progress;

/// Paths and flags shared by every store-backed command.
pub(crate) struct AppContext {
    pub db_path: PathBuf,
    pub media_dir: PathBuf,
    pub quiet: bool,
    pub verbose: bool,
}

impl AppContext {
    /// Resolve the database and media locations, falling back to the
    /// platform data directory.
    pub(crate) fn new(
        db_path: Option<PathBuf>,
        media_dir: Option<PathBuf>,
        quiet: bool,
        verbose: bool,
    ) -> Result<Self, CliError> {
        let data_dir = || {
            dirs::data_dir().map(|d| d.join("gamerhub")).ok_or_else(|| {
                CliError::config("Could not determine data directory; pass --db and --media-dir")
            })
        };
        let db_path = match db_path {
            Some(p) => p,
            None => data_dir()?.join("gamerhub.db"),
        };
        let media_dir = match media_dir {
            Some(p) => p,
            None => data_dir()?.join("media"),
        };
        Ok(Self {
            db_path,
            media_dir,
            quiet,
            verbose,
        })
    }

    pub(crate) fn open_db(&self) -> Result<Connection, CliError> {
        log::debug!("Using database {}", self.db_path.display());
        gamerhub_db::open_database(&self.db_path).map_err(|e| {
            CliError::database(format!(
                "Failed to open database {}: {}",
                self.db_path.display(),
                e
            ))
        })
    }

    pub(crate) fn media(&self) -> MediaStore {
        MediaStore::new(&self.media_dir)
    }

    pub(crate) fn progress(&self) -> Box<dyn ImportProgress> {
        batch_progress(self.quiet, self.verbose)
    }
}

/// Look up a user by username, failing when it does not exist.
pub(crate) fn require_user(conn: &Connection, username: &str) -> Result<User, CliError> {
    gamerhub_db::find_user_by_username(conn, username)
        .map_err(CliError::database)?
        .ok_or_else(|| CliError::unknown_user(username))
}

/// Truncate a string to at most `max` characters, appending "..." if truncated.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
#[path = "../tests/commands_tests.rs"]
mod tests;
