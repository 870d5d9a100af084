//! YAML loading for news-source seed data.
//!
//! A seed file is a YAML sequence of `{name, url, category, icon}` entries.
//! When no file is given, the built-in defaults are used.

use crate::types::{NewsCategory, NewsSourceSeed};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("File not found: {0}")]
    NotFound(String),
}

/// Load news sources from a YAML file containing a list of sources.
pub fn load_news_sources(path: &Path) -> Result<Vec<NewsSourceSeed>, YamlError> {
    if !path.is_file() {
        return Err(YamlError::NotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// The feeds the platform ships with, one per category.
pub fn default_news_sources() -> Vec<NewsSourceSeed> {
    vec![
        NewsSourceSeed {
            name: "GamesIndustry.biz".to_string(),
            url: "https://www.gamesindustry.biz/rss/gamesindustry/feed".to_string(),
            category: NewsCategory::Invest,
            icon: Some("https://assets.gamesindustry.biz/favicon.ico".to_string()),
        },
        NewsSourceSeed {
            name: "Game Developer".to_string(),
            url: "https://www.gamedeveloper.com/rss.xml".to_string(),
            category: NewsCategory::Devs,
            icon: Some("https://www.gamedeveloper.com/favicon.ico".to_string()),
        },
        NewsSourceSeed {
            name: "Tom's Hardware".to_string(),
            url: "https://www.tomshardware.com/feeds/all".to_string(),
            category: NewsCategory::Hardware,
            icon: Some("https://www.tomshardware.com/favicon.ico".to_string()),
        },
        NewsSourceSeed {
            name: "IGN".to_string(),
            url: "https://www.ign.com/rss/articles/feed?tags=games".to_string(),
            category: NewsCategory::General,
            icon: Some(
                "https://assets1.ignimgs.com/2015/05/27/ign-logo-jpg__thumb.jpg".to_string(),
            ),
        },
    ]
}
