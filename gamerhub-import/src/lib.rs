//! Batch procedures that pull external data into the store.
//!
//! This crate owns the library sync, news ingestion and catalog import
//! logic, along with the pure policies they rely on (status reconciliation
//! and keyword classification).

pub mod catalog_import;
pub mod classify;
pub mod library_sync;
pub mod media;
pub mod news;
pub mod progress;
pub mod status;

pub use catalog_import::{CatalogImportError, CatalogStats, import_catalog};
pub use classify::classify;
pub use library_sync::{SyncError, SyncStats, disconnect_steam, resolve_game, sync_steam_library};
pub use media::{CoverFetcher, MediaStore};
pub use news::{
    NewsError, NewsStats, clean_description, extract_image, ingest_news, prune_news,
    seed_sources,
};
pub use progress::{ImportProgress, LogProgress};
pub use status::{PlaySignals, candidate_status, reconcile};

/// Format a timestamp the way the store keeps it: RFC 3339, UTC, seconds.
pub fn format_timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
