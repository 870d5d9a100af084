//! Steam Web API client for `IPlayerService/GetOwnedGames`.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{FetchError, snippet};
use crate::http::{STEAM_TIMEOUT, build_client};
use crate::source::OwnedGamesSource;

const OWNED_GAMES_URL: &str = "https://api.steampowered.com/IPlayerService/GetOwnedGames/v0001/";

/// One game from a Steam owned-games response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OwnedGame {
    pub appid: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// Cumulative playtime in minutes.
    #[serde(default)]
    pub playtime_forever: i64,
    /// Playtime over the last two weeks in minutes.
    #[serde(default)]
    pub playtime_2weeks: i64,
    /// Unix seconds of the last session; Steam reports 0 for "never".
    #[serde(default)]
    pub rtime_last_played: i64,
}

impl OwnedGame {
    pub fn last_played(&self) -> Option<i64> {
        (self.rtime_last_played > 0).then_some(self.rtime_last_played)
    }

    /// The game name, if present and non-blank.
    pub fn title(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct OwnedGamesEnvelope {
    response: OwnedGamesResponse,
}

#[derive(Debug, Deserialize)]
struct OwnedGamesResponse {
    #[serde(default)]
    games: Vec<OwnedGame>,
}

/// Parse a GetOwnedGames JSON body.
///
/// A body with an empty `response` object (private profile) yields no games;
/// a body without `response` at all is malformed.
pub fn parse_owned_games(body: &str) -> Result<Vec<OwnedGame>, FetchError> {
    let envelope: OwnedGamesEnvelope = serde_json::from_str(body).map_err(|e| {
        FetchError::parse(format!(
            "Failed to parse owned games: {e}. Response: {}",
            snippet(body)
        ))
    })?;
    Ok(envelope.response.games)
}

/// Public CDN URL of a game's portrait library artwork.
pub fn cover_url(appid: i64) -> String {
    format!("https://steamcdn-a.akamaihd.net/steam/apps/{appid}/library_600x900.jpg")
}

/// Blocking client for the Steam Web API.
pub struct SteamClient {
    http: Client,
    api_key: String,
}

impl SteamClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            http: build_client(STEAM_TIMEOUT)?,
            api_key: api_key.into(),
        })
    }
}

impl OwnedGamesSource for SteamClient {
    fn owned_games(&self, steam_id: &str) -> Result<Vec<OwnedGame>, FetchError> {
        let response = self
            .http
            .get(OWNED_GAMES_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("steamid", steam_id),
                ("format", "json"),
                ("include_appinfo", "1"),
            ])
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Auth("Steam rejected the API key".to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: OWNED_GAMES_URL.to_string(),
            });
        }

        let text = response.text()?;
        let games = parse_owned_games(&text)?;
        log::debug!("Steam returned {} owned games for {steam_id}", games.len());
        Ok(games)
    }
}

#[cfg(test)]
#[path = "tests/steam_tests.rs"]
mod tests;
