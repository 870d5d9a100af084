use super::*;

fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |var| {
        pairs
            .iter()
            .find(|(k, _)| *k == var)
            .map(|(_, v)| v.to_string())
    }
}

fn config_with_everything() -> ConfigFile {
    toml::from_str(
        r#"
        [steam]
        api_key = "file-steam"

        [igdb]
        client_id = "file-id"
        client_secret = "file-secret"
        "#,
    )
    .unwrap()
}

#[test]
fn env_beats_config_file() {
    let creds = Credentials::resolve(
        env_of(&[("STEAM_API_KEY", "env-steam")]),
        Some(config_with_everything()),
    );
    assert_eq!(creds.steam_api_key.as_deref(), Some("env-steam"));
    assert_eq!(creds.igdb_client_id.as_deref(), Some("file-id"));
    assert_eq!(creds.igdb_client_secret.as_deref(), Some("file-secret"));
}

#[test]
fn blank_env_is_ignored() {
    let creds = Credentials::resolve(
        env_of(&[("STEAM_API_KEY", "  ")]),
        Some(config_with_everything()),
    );
    assert_eq!(creds.steam_api_key.as_deref(), Some("file-steam"));
}

#[test]
fn overrides_beat_everything() {
    let creds = Credentials::resolve(env_of(&[]), Some(config_with_everything()))
        .with_overrides(Some("cli".to_string()), None, None);
    assert_eq!(creds.steam_api_key.as_deref(), Some("cli"));
    assert_eq!(creds.igdb_client_id.as_deref(), Some("file-id"));
}

#[test]
fn missing_values_are_config_errors() {
    let creds = Credentials::resolve(env_of(&[("IGDB_CLIENT_ID", "id")]), None);
    assert!(matches!(
        creds.require_steam_api_key(),
        Err(FetchError::Config(_))
    ));
    let err = creds.require_igdb().unwrap_err();
    assert!(err.to_string().contains("client secret"));
}

#[test]
fn sources_report_provenance() {
    let sources = sources_from(
        env_of(&[("IGDB_CLIENT_ID", "env-id")]),
        Some(config_with_everything()),
    );
    assert_eq!(sources.igdb_client_id, CredentialSource::EnvVar("IGDB_CLIENT_ID"));
    assert_eq!(sources.steam_api_key, CredentialSource::ConfigFile);

    let sources = sources_from(env_of(&[]), None);
    assert_eq!(sources.igdb_client_secret, CredentialSource::Missing);
    assert_eq!(sources.igdb_client_secret.to_string(), "not set");
}

#[test]
fn blank_env_is_not_reported_as_source() {
    let sources = sources_from(
        env_of(&[("STEAM_API_KEY", ""), ("IGDB_CLIENT_ID", "   ")]),
        Some(config_with_everything()),
    );
    assert_eq!(sources.steam_api_key, CredentialSource::ConfigFile);
    assert_eq!(sources.igdb_client_id, CredentialSource::ConfigFile);

    let sources = sources_from(env_of(&[("IGDB_CLIENT_SECRET", "")]), None);
    assert_eq!(sources.igdb_client_secret, CredentialSource::Missing);
}

#[test]
fn written_config_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gamerhub").join("config.toml");
    let creds = Credentials {
        steam_api_key: Some("k".to_string()),
        igdb_client_id: None,
        igdb_client_secret: Some("s".to_string()),
    };
    write_config(&path, &creds).unwrap();

    let loaded = Credentials::resolve(|_| None, read_config(&path));
    assert_eq!(loaded, creds);
}

#[test]
fn unreadable_config_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();
    assert!(read_config(&path).is_none());
}
