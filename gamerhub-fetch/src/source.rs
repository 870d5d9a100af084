//! Seams between the batch procedures and the network.
//!
//! Each upstream is reached through one of these traits so that the import
//! procedures can be driven by in-memory fakes.

use crate::error::FetchError;
use crate::feed::FeedEntry;
use crate::igdb::IgdbGame;
use crate::steam::OwnedGame;

/// Lists the games a Steam account owns.
pub trait OwnedGamesSource {
    fn owned_games(&self, steam_id: &str) -> Result<Vec<OwnedGame>, FetchError>;
}

/// Downloads an image by URL.
pub trait ImageSource {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches and parses an RSS or Atom feed.
pub trait FeedSource {
    fn fetch_feed(&self, url: &str) -> Result<Vec<FeedEntry>, FetchError>;
}

/// Pages through the external game catalog.
pub trait CatalogSource {
    fn fetch_games(&self, offset: u32) -> Result<Vec<IgdbGame>, FetchError>;
}
