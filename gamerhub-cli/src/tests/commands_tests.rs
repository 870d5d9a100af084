use std::path::PathBuf;

use super::*;

#[test]
fn truncate_str_leaves_short_strings() {
    assert_eq!(truncate_str("Hades", 10), "Hades");
    assert_eq!(truncate_str("exactly10!", 10), "exactly10!");
}

#[test]
fn truncate_str_appends_ellipsis() {
    assert_eq!(truncate_str("The Witcher 3: Wild Hunt", 10), "The Wit...");
}

#[test]
fn truncate_str_counts_characters_not_bytes() {
    assert_eq!(truncate_str("ゼルダの伝説 ブレス オブ ザ ワイルド", 8), "ゼルダの伝...");
}

#[test]
fn explicit_paths_override_data_dir() {
    let ctx = AppContext::new(
        Some(PathBuf::from("/tmp/x.db")),
        Some(PathBuf::from("/tmp/media")),
        true,
        false,
    )
    .unwrap();
    assert_eq!(ctx.db_path, PathBuf::from("/tmp/x.db"));
    assert_eq!(ctx.media_dir, PathBuf::from("/tmp/media"));
    assert!(ctx.quiet);
}

#[test]
fn require_user_reports_unknown_username() {
    let conn = gamerhub_db::open_memory().unwrap();
    gamerhub_db::insert_user(&conn, "alice").unwrap();

    assert_eq!(require_user(&conn, "alice").unwrap().username, "alice");
    let err = require_user(&conn, "bob").unwrap_err();
    assert!(matches!(err, CliError::UnknownUser(ref name) if name == "bob"));
}
