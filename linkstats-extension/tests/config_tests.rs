use linkstats_extension::{DEFAULT_NOTICE_TEXT, ExtensionConfig, ExtensionError, LinkFixture};
use linkstats_extension::{LinkService, PlayerNames};
use linkstats_model::{Scope, Trigger};
use linkstats_types::{AccountId, PlayerId};
use pretty_assertions::assert_eq;
use std::io::Write;

// ── ExtensionConfig ──────────────────────────────────────────────

#[test]
fn defaults_enable_every_trigger() {
    let config = ExtensionConfig::default();
    assert_eq!(config.notice_text, DEFAULT_NOTICE_TEXT);
    for trigger in Trigger::ALL {
        assert!(config.is_enabled(trigger));
    }
}

#[test]
fn parse_empty_file_gives_defaults() {
    assert_eq!(ExtensionConfig::parse("").unwrap(), ExtensionConfig::default());
}

#[test]
fn parse_overrides() {
    let config = ExtensionConfig::parse(
        r#"
        notice_text = "Bot offline"
        triggers = ["player_join", "periodic"]
        "#,
    )
    .unwrap();
    assert_eq!(config.notice_text, "Bot offline");
    assert_eq!(config.scope_for(Trigger::PlayerJoin), Some(Scope::Player));
    assert_eq!(config.scope_for(Trigger::PlayerLeave), None);
    assert_eq!(config.scope_for(Trigger::Registration), None);
    assert_eq!(config.scope_for(Trigger::Periodic), Some(Scope::Server));
}

#[test]
fn parse_rejects_unknown_trigger() {
    let err = ExtensionConfig::parse(r#"triggers = ["server_boot"]"#).unwrap_err();
    assert!(matches!(err, ExtensionError::Config(_)));
}

#[test]
fn load_from_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExtensionConfig::load_from(&dir.path().join("linkstats.toml"));
    assert_eq!(config, ExtensionConfig::default());
}

#[test]
fn load_from_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "notice_text = \"Hold on\"").unwrap();
    let config = ExtensionConfig::load_from(file.path());
    assert_eq!(config.notice_text, "Hold on");
}

#[test]
fn load_from_malformed_file_falls_back() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "notice_text = [").unwrap();
    let config = ExtensionConfig::load_from(file.path());
    assert_eq!(config, ExtensionConfig::default());
}

// ── LinkFixture ──────────────────────────────────────────────────

const FIXTURE: &str = r#"
ready = false

[[players]]
id = "069a79f4-44e9-4726-a5be-fca90e38aaf5"
name = "Bob"
account = 80351110224678912

[[players]]
id = "853c80ef-3c37-49fd-aa49-938b674adae6"
name = "Carol"

[[accounts]]
id = 80351110224678912
tag = "bob"
created_at_millis = 1451606400000

[group]
[[group.members]]
account = 80351110224678912
nickname = "Bobby"
joined_at_millis = 1483228800000
role_names = ["Admin", "Builder"]
"#;

#[test]
fn fixture_builds_service() {
    let service = LinkFixture::parse(FIXTURE).unwrap().into_service();
    let bob = PlayerId::parse("069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap();
    let carol = PlayerId::parse("853c80ef-3c37-49fd-aa49-938b674adae6").unwrap();
    let account = AccountId::new(80351110224678912);

    assert!(!service.is_ready());
    assert_eq!(service.linked_account_id(bob), Some(account));
    assert_eq!(service.linked_player(account), Some(bob));
    assert_eq!(service.linked_account_id(carol), None);
    assert_eq!(service.linked_account_count(), 1);
    assert_eq!(service.display_name(carol).as_deref(), Some("Carol"));

    let group = service.primary_group().unwrap();
    assert_eq!(group.member_count(), 1);
    let member = group.member(account).unwrap();
    assert_eq!(member.role_names, vec!["Admin".to_string(), "Builder".to_string()]);
}

#[test]
fn fixture_defaults_to_ready_without_group() {
    let service = LinkFixture::parse("").unwrap().into_service();
    assert!(service.is_ready());
    assert!(service.primary_group().is_none());
}
