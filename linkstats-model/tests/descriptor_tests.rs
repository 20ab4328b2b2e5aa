use linkstats_model::{NumberFormat, ProviderDescriptor, Scope, Trigger, ValueKind};
use pretty_assertions::assert_eq;

// ── Shorthand constructors ───────────────────────────────────────

#[test]
fn boolean_defaults() {
    let d = ProviderDescriptor::boolean("hasLinkedAccount", Scope::Player);
    assert_eq!(d.name, "hasLinkedAccount");
    assert_eq!(d.text, "hasLinkedAccount");
    assert_eq!(d.kind, ValueKind::Boolean);
    assert_eq!(d.scope, Scope::Player);
    assert_eq!(d.priority, 0);
    assert_eq!(d.condition, None);
    assert!(!d.hidden);
    assert!(!d.readiness_exempt);
}

#[test]
fn each_shorthand_sets_its_kind() {
    assert_eq!(ProviderDescriptor::string("s", Scope::Server).kind, ValueKind::String);
    assert_eq!(ProviderDescriptor::integer("i", Scope::Server).kind, ValueKind::Integer);
    assert_eq!(
        ProviderDescriptor::percentage("p", Scope::Server).kind,
        ValueKind::Percentage
    );
}

#[test]
fn chained_setters() {
    let d = ProviderDescriptor::integer("joinDate", Scope::Player)
        .text("Join Date")
        .description("When the account joined the group")
        .priority(97)
        .conditional_on("hasMember")
        .date();
    assert_eq!(d.text, "Join Date");
    assert_eq!(d.priority, 97);
    assert_eq!(d.condition.as_deref(), Some("hasMember"));
    assert_eq!(d.format, NumberFormat::DateYear);
}

#[test]
fn flags() {
    let d = ProviderDescriptor::string("notice", Scope::Server)
        .hidden()
        .in_player_table()
        .readiness_exempt();
    assert!(d.hidden);
    assert!(d.show_in_player_table);
    assert!(d.readiness_exempt);
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn descriptor_json_omits_empty_optionals() {
    let d = ProviderDescriptor::boolean("hasMember", Scope::Player);
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["kind"], "boolean");
    assert_eq!(json["scope"], "player");
    assert!(json.get("condition").is_none());
    assert!(json.get("description").is_none());
}

#[test]
fn descriptor_deserializes_with_defaults() {
    let json = r#"{"name": "roles", "text": "Roles", "kind": "string", "scope": "player"}"#;
    let d: ProviderDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(d, ProviderDescriptor::string("roles", Scope::Player).text("Roles"));
}

// ── Trigger ──────────────────────────────────────────────────────

#[test]
fn player_triggers_request_player_scope() {
    assert_eq!(Trigger::PlayerJoin.scope(), Scope::Player);
    assert_eq!(Trigger::PlayerLeave.scope(), Scope::Player);
}

#[test]
fn server_triggers_request_server_scope() {
    assert_eq!(Trigger::Registration.scope(), Scope::Server);
    assert_eq!(Trigger::Periodic.scope(), Scope::Server);
}

#[test]
fn trigger_serde_names() {
    let json = serde_json::to_string(&Trigger::ALL).unwrap();
    assert_eq!(json, r#"["player_join","player_leave","registration","periodic"]"#);
}
