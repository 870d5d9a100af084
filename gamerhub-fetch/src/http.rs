//! Shared blocking HTTP plumbing.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::FetchError;
use crate::source::ImageSource;

pub const STEAM_TIMEOUT: Duration = Duration::from_secs(10);
pub const COVER_TIMEOUT: Duration = Duration::from_secs(5);
pub const FEED_TIMEOUT: Duration = Duration::from_secs(30);
pub const IGDB_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("gamerhub/", env!("CARGO_PKG_VERSION"));

/// Build a blocking client with the given overall request timeout.
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// GET a URL and return the body. Any non-2xx status is an error.
pub fn get_bytes(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.bytes()?.to_vec())
}

/// Downloads cover images with a short timeout.
pub struct ImageClient {
    http: Client,
}

impl ImageClient {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            http: build_client(COVER_TIMEOUT)?,
        })
    }
}

impl ImageSource for ImageClient {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let bytes = get_bytes(&self.http, url)?;
        if bytes.is_empty() {
            return Err(FetchError::parse(format!("empty image body from {url}")));
        }
        Ok(bytes)
    }
}
