//! Local storage for downloaded cover images.

use std::path::{Path, PathBuf};

use gamerhub_fetch::ImageSource;

/// Directory tree holding media files. Paths stored in the database are
/// relative to its root and use `/` separators.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a stored relative path.
    pub fn path_for(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Write a file, creating parent directories as needed.
    pub fn save(&self, relative: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.path_for(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Relative path for a cover fetched from Steam.
pub fn steam_cover_path(appid: i64) -> String {
    format!("games/steam_{appid}.jpg")
}

/// Relative path for a cover fetched from IGDB.
pub fn igdb_cover_path(igdb_id: i64) -> String {
    format!("games/igdb_{igdb_id}.jpg")
}

/// Best-effort cover download into a [`MediaStore`].
pub struct CoverFetcher<'a> {
    images: &'a dyn ImageSource,
    media: &'a MediaStore,
}

impl<'a> CoverFetcher<'a> {
    pub fn new(images: &'a dyn ImageSource, media: &'a MediaStore) -> Self {
        Self { images, media }
    }

    /// Download `url` and store it at `relative`. Failures are logged and
    /// yield `None`; they never abort the caller.
    pub fn fetch(&self, url: &str, relative: &str, title: &str) -> Option<String> {
        let bytes = match self.images.fetch_image(url) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to fetch cover for {title}: {e}");
                return None;
            }
        };
        match self.media.save(relative, &bytes) {
            Ok(path) => {
                log::debug!("Saved cover for {title} to {}", path.display());
                Some(relative.to_string())
            }
            Err(e) => {
                log::warn!("Failed to store cover for {title}: {e}");
                None
            }
        }
    }
}
