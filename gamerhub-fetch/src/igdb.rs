//! IGDB catalog client (Twitch client-credentials auth + `/v4/games`).

use chrono::DateTime;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{FetchError, snippet};
use crate::http::{IGDB_TIMEOUT, build_client};
use crate::source::CatalogSource;

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const GAMES_URL: &str = "https://api.igdb.com/v4/games";
/// Records requested per page.
pub const PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IgdbCover {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IgdbGenre {
    #[serde(default)]
    pub name: Option<String>,
}

/// One record of an IGDB `/games` response. Every field is optional so a
/// single malformed record does not fail the whole page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IgdbGame {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub cover: Option<IgdbCover>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub genres: Vec<IgdbGenre>,
}

impl IgdbGame {
    /// Release date as `YYYY-MM-DD`.
    pub fn release_date(&self) -> Option<String> {
        let secs = self.first_release_date?;
        DateTime::from_timestamp(secs, 0).map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Full-size HTTPS cover URL, if the record has one.
    pub fn cover_url(&self) -> Option<String> {
        self.cover
            .as_ref()
            .and_then(|c| c.url.as_deref())
            .filter(|u| !u.is_empty())
            .map(normalize_cover_url)
    }
}

/// The Apicalypse query for one page of the catalog.
pub fn query_body(offset: u32) -> String {
    format!(
        "fields name, first_release_date, cover.url, summary, genres.name; \
         sort rating_count desc; limit {PAGE_SIZE}; offset {offset};"
    )
}

/// IGDB returns protocol-relative thumbnail URLs; make them absolute and
/// request the 1080p rendition.
pub fn normalize_cover_url(url: &str) -> String {
    let absolute = match url.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    };
    absolute.replace("t_thumb", "t_1080p")
}

/// Parse a `/games` JSON body.
pub fn parse_games(body: &str) -> Result<Vec<IgdbGame>, FetchError> {
    serde_json::from_str(body).map_err(|e| {
        FetchError::parse(format!(
            "Failed to parse IGDB games: {e}. Response: {}",
            snippet(body)
        ))
    })
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Authenticated IGDB client.
pub struct IgdbClient {
    http: Client,
    client_id: String,
    access_token: String,
}

impl IgdbClient {
    /// Obtain an app access token via the client-credentials grant.
    pub fn authenticate(client_id: &str, client_secret: &str) -> Result<Self, FetchError> {
        let http = build_client(IGDB_TIMEOUT)?;
        let response = http
            .post(TOKEN_URL)
            .query(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .map_err(|e| FetchError::Auth(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Auth(format!(
                "token endpoint returned HTTP {}",
                status.as_u16()
            )));
        }
        let token: TokenResponse = response
            .json()
            .map_err(|e| FetchError::Auth(format!("unexpected token response: {e}")))?;

        log::debug!("Obtained IGDB access token");
        Ok(Self {
            http,
            client_id: client_id.to_string(),
            access_token: token.access_token,
        })
    }
}

impl CatalogSource for IgdbClient {
    fn fetch_games(&self, offset: u32) -> Result<Vec<IgdbGame>, FetchError> {
        let response = self
            .http
            .post(GAMES_URL)
            .header("Client-ID", &self.client_id)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Accept", "application/json")
            .body(query_body(offset))
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::Auth("IGDB rejected the access token".to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: GAMES_URL.to_string(),
            });
        }
        parse_games(&response.text()?)
    }
}

#[cfg(test)]
#[path = "tests/igdb_tests.rs"]
mod tests;
