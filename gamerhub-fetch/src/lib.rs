//! Outbound HTTP clients for the Steam Web API, the IGDB catalog, RSS/Atom
//! feeds and cover images, plus credential resolution.

pub mod credentials;
pub mod error;
pub mod feed;
pub mod http;
pub mod igdb;
pub mod source;
pub mod steam;

pub use credentials::{
    CredentialSource, CredentialSources, Credentials, config_path, credential_sources,
    save_to_file,
};
pub use error::FetchError;
pub use feed::{FeedClient, FeedEntry, parse_feed};
pub use http::ImageClient;
pub use igdb::{IgdbClient, IgdbCover, IgdbGame, normalize_cover_url, query_body};
pub use source::{CatalogSource, FeedSource, ImageSource, OwnedGamesSource};
pub use steam::{OwnedGame, SteamClient, cover_url, parse_owned_games};
