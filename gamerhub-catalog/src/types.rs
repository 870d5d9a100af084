//! Data model types for the platform's persistent state.
//!
//! These types represent users, games, library entries, news sources,
//! news articles and import tracking.

use serde::{Deserialize, Serialize};

/// Platform label written on library entries created by a Steam sync.
pub const STEAM_PLATFORM: &str = "Steam";

// ── User ────────────────────────────────────────────────────────────────────

/// A platform user. Only the fields the batch procedures need are modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Steam account identifier (SteamID64), if the user linked one.
    pub steam_id: Option<String>,
    pub created_at: String,
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A game known to the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub title: String,
    /// Path of the stored cover image, relative to the media root.
    pub cover_image: Option<String>,
    /// Release date as `YYYY-MM-DD`.
    pub release_date: Option<String>,
    pub igdb_id: Option<i64>,
    pub steam_appid: Option<i64>,
    pub created_at: String,
}

// ── Library ─────────────────────────────────────────────────────────────────

/// Play status of a game in a user's library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryStatus {
    Unplayed,
    Playing,
    Replaying,
    Completed,
    Dropped,
}

impl LibraryStatus {
    pub const ALL: [LibraryStatus; 5] = [
        Self::Unplayed,
        Self::Playing,
        Self::Replaying,
        Self::Completed,
        Self::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unplayed => "unplayed",
            Self::Playing => "playing",
            Self::Replaying => "replaying",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "playing" => Self::Playing,
            "replaying" => Self::Replaying,
            "completed" => Self::Completed,
            "dropped" => Self::Dropped,
            _ => Self::Unplayed,
        }
    }

    /// Sticky statuses are never overwritten by an automated sync.
    pub fn is_sticky(&self) -> bool {
        matches!(self, Self::Completed | Self::Replaying | Self::Dropped)
    }
}

impl std::fmt::Display for LibraryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A game owned by a user. Unique per (user, game).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    /// Cumulative playtime in minutes.
    pub playtime_forever: i64,
    pub platform: String,
    pub status: LibraryStatus,
    pub added_at: String,
}

/// A library entry joined with its game title, for listings.
#[derive(Debug, Clone)]
pub struct LibraryItem {
    pub entry: LibraryEntry,
    pub title: String,
}

// ── News ────────────────────────────────────────────────────────────────────

/// Topic category of a news source or article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Invest,
    Devs,
    Hardware,
    General,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invest => "invest",
            Self::Devs => "devs",
            Self::Hardware => "hardware",
            Self::General => "general",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "invest" | "investment" => Self::Invest,
            "devs" | "dev" | "development" => Self::Devs,
            "hardware" => Self::Hardware,
            _ => Self::General,
        }
    }
}

impl std::fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSource {
    pub id: i64,
    pub name: String,
    pub rss_url: String,
    /// Category used when no keyword set matches an article.
    pub category: NewsCategory,
    pub icon: Option<String>,
}

/// A news source definition, loaded from YAML or the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSourceSeed {
    pub name: String,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: NewsCategory,
    #[serde(default)]
    pub icon: Option<String>,
}

fn default_category() -> NewsCategory {
    NewsCategory::General
}

/// A stored news article. `link` is globally unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsArticle {
    pub id: i64,
    pub source_id: i64,
    pub title: String,
    pub link: String,
    pub image_url: Option<String>,
    pub description: String,
    /// Publication time, RFC 3339 UTC with second precision.
    pub pub_date: String,
    pub category: NewsCategory,
}

// ── Import Log ──────────────────────────────────────────────────────────────

/// A record of one batch run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    /// "library-sync", "news", or "catalog".
    pub kind: String,
    pub source_name: String,
    pub imported_at: String,
    pub records_created: i64,
    pub records_updated: i64,
    pub records_skipped: i64,
    pub records_failed: i64,
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
