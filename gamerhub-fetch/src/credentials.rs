use std::path::{Path, PathBuf};

use crate::error::FetchError;

pub const STEAM_API_KEY_VAR: &str = "STEAM_API_KEY";
pub const IGDB_CLIENT_ID_VAR: &str = "IGDB_CLIENT_ID";
pub const IGDB_CLIENT_SECRET_VAR: &str = "IGDB_CLIENT_SECRET";

/// Secrets for the upstream services. Nothing is compiled in; every value
/// comes from a CLI flag, the environment, or the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub steam_api_key: Option<String>,
    pub igdb_client_id: Option<String>,
    pub igdb_client_secret: Option<String>,
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug)]
pub struct CredentialSources {
    pub steam_api_key: CredentialSource,
    pub igdb_client_id: CredentialSource,
    pub igdb_client_secret: CredentialSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
pub(crate) struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    steam: Option<SteamConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    igdb: Option<IgdbConfig>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct SteamConfig {
    api_key: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct IgdbConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl ConfigFile {
    fn steam_api_key(&self) -> Option<String> {
        self.steam.as_ref().and_then(|s| s.api_key.clone())
    }

    fn igdb_client_id(&self) -> Option<String> {
        self.igdb.as_ref().and_then(|c| c.client_id.clone())
    }

    fn igdb_client_secret(&self) -> Option<String> {
        self.igdb.as_ref().and_then(|c| c.client_secret.clone())
    }
}

impl Credentials {
    /// Load credentials from environment variables and the config file.
    ///
    /// Priority: env vars > config file. Missing values stay `None`; callers
    /// that need one use the `require_*` accessors.
    pub fn load() -> Self {
        Self::resolve(|var| std::env::var(var).ok(), load_config_file())
    }

    /// Credentials stored in the config file alone, ignoring the environment.
    pub fn load_from_file() -> Self {
        Self::resolve(|_| None, load_config_file())
    }

    pub(crate) fn resolve(
        env: impl Fn(&str) -> Option<String>,
        config: Option<ConfigFile>,
    ) -> Self {
        let config = config.unwrap_or_default();
        let lookup = |var: &str| non_blank(env(var));
        Self {
            steam_api_key: lookup(STEAM_API_KEY_VAR).or_else(|| config.steam_api_key()),
            igdb_client_id: lookup(IGDB_CLIENT_ID_VAR).or_else(|| config.igdb_client_id()),
            igdb_client_secret: lookup(IGDB_CLIENT_SECRET_VAR)
                .or_else(|| config.igdb_client_secret()),
        }
    }

    /// Apply explicit values (e.g., from CLI args) on top of loaded ones.
    pub fn with_overrides(
        mut self,
        steam_api_key: Option<String>,
        igdb_client_id: Option<String>,
        igdb_client_secret: Option<String>,
    ) -> Self {
        if let Some(key) = steam_api_key {
            self.steam_api_key = Some(key);
        }
        if let Some(id) = igdb_client_id {
            self.igdb_client_id = Some(id);
        }
        if let Some(secret) = igdb_client_secret {
            self.igdb_client_secret = Some(secret);
        }
        self
    }

    pub fn require_steam_api_key(&self) -> Result<&str, FetchError> {
        self.steam_api_key.as_deref().ok_or_else(|| {
            FetchError::config(format!(
                "Missing Steam API key. Pass --steam-key, set {STEAM_API_KEY_VAR}, or add it to the config file"
            ))
        })
    }

    /// The IGDB client id and secret, both of which are required.
    pub fn require_igdb(&self) -> Result<(&str, &str), FetchError> {
        let id = self.igdb_client_id.as_deref().ok_or_else(|| {
            FetchError::config(format!(
                "Missing IGDB client id. Pass --client-id, set {IGDB_CLIENT_ID_VAR}, or add it to the config file"
            ))
        })?;
        let secret = self.igdb_client_secret.as_deref().ok_or_else(|| {
            FetchError::config(format!(
                "Missing IGDB client secret. Pass --client-secret, set {IGDB_CLIENT_SECRET_VAR}, or add it to the config file"
            ))
        })?;
        Ok((id, secret))
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gamerhub").join("config.toml"))
}

/// Save credentials to the config file, creating parent directories as needed.
/// Returns the path the file was written to.
pub fn save_to_file(creds: &Credentials) -> Result<PathBuf, FetchError> {
    let path = config_path()
        .ok_or_else(|| FetchError::config("Could not determine config directory"))?;
    write_config(&path, creds)?;
    Ok(path)
}

pub(crate) fn write_config(path: &Path, creds: &Credentials) -> Result<(), FetchError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        steam: creds.steam_api_key.as_ref().map(|key| SteamConfig {
            api_key: Some(key.clone()),
        }),
        igdb: (creds.igdb_client_id.is_some() || creds.igdb_client_secret.is_some()).then(
            || IgdbConfig {
                client_id: creds.igdb_client_id.clone(),
                client_secret: creds.igdb_client_secret.clone(),
            },
        ),
    };

    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| FetchError::config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    sources_from(|var| std::env::var(var).ok(), load_config_file())
}

/// Blank environment values count as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn sources_from(
    env: impl Fn(&str) -> Option<String>,
    config: Option<ConfigFile>,
) -> CredentialSources {
    let config = config.unwrap_or_default();
    let pick = |var: &'static str, in_config: bool| {
        if non_blank(env(var)).is_some() {
            CredentialSource::EnvVar(var)
        } else if in_config {
            CredentialSource::ConfigFile
        } else {
            CredentialSource::Missing
        }
    };

    CredentialSources {
        steam_api_key: pick(STEAM_API_KEY_VAR, config.steam_api_key().is_some()),
        igdb_client_id: pick(IGDB_CLIENT_ID_VAR, config.igdb_client_id().is_some()),
        igdb_client_secret: pick(IGDB_CLIENT_SECRET_VAR, config.igdb_client_secret().is_some()),
    }
}

fn load_config_file() -> Option<ConfigFile> {
    read_config(&config_path()?)
}

pub(crate) fn read_config(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring unreadable config file {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/credentials_tests.rs"]
mod tests;
