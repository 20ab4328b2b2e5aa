use linkstats_extension::{ExtensionError, InMemoryLinkService, ProviderRegistry, Target};
use linkstats_model::{ProviderDescriptor, Scope, ValueKind};
use pretty_assertions::assert_eq;

fn yes(name: &str) -> ProviderDescriptor {
    ProviderDescriptor::boolean(name, Scope::Player)
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn empty_registry_builds() {
    let registry = ProviderRegistry::builder().build().unwrap();
    assert!(registry.is_empty());
}

#[test]
fn duplicate_name_in_scope_is_rejected() {
    let err = ProviderRegistry::builder()
        .boolean(yes("a"), |_| Ok(true))
        .boolean(yes("a"), |_| Ok(false))
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ExtensionError::DuplicateProvider { scope: Scope::Player, ref name } if name == "a"
    ));
}

#[test]
fn same_name_in_different_scopes_is_allowed() {
    let registry = ProviderRegistry::builder()
        .boolean(yes("count"), |_| Ok(true))
        .integer(ProviderDescriptor::integer("count", Scope::Server), |_| Ok(3))
        .build()
        .unwrap();
    assert_eq!(registry.len(Scope::Player), 1);
    assert_eq!(registry.len(Scope::Server), 1);
}

#[test]
fn unknown_condition_is_rejected() {
    let err = ProviderRegistry::builder()
        .boolean(yes("a").conditional_on("missing"), |_| Ok(true))
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ExtensionError::UnknownCondition { ref provider, ref condition }
            if provider == "a" && condition == "missing"
    ));
}

#[test]
fn non_boolean_condition_is_rejected() {
    let err = ProviderRegistry::builder()
        .string(ProviderDescriptor::string("name", Scope::Player), |_| Ok("x".into()))
        .boolean(yes("a").conditional_on("name"), |_| Ok(true))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ExtensionError::ConditionNotBoolean { .. }));
}

#[test]
fn condition_from_other_scope_is_rejected() {
    let err = ProviderRegistry::builder()
        .boolean(ProviderDescriptor::boolean("online", Scope::Server), |_| Ok(true))
        .boolean(yes("a").conditional_on("online"), |_| Ok(true))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ExtensionError::ConditionScopeMismatch { .. }));
}

#[test]
fn self_condition_is_a_cycle() {
    let err = ProviderRegistry::builder()
        .boolean(yes("a").conditional_on("a"), |_| Ok(true))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ExtensionError::ConditionCycle(ref name) if name == "a"));
}

#[test]
fn two_provider_cycle_is_rejected() {
    let err = ProviderRegistry::builder()
        .boolean(yes("a").conditional_on("b"), |_| Ok(true))
        .boolean(yes("b").conditional_on("a"), |_| Ok(true))
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, ExtensionError::ConditionCycle(_)));
}

#[test]
fn chained_conditions_are_allowed() {
    let registry = ProviderRegistry::builder()
        .boolean(yes("a"), |_| Ok(true))
        .boolean(yes("b").conditional_on("a"), |_| Ok(true))
        .boolean(yes("c").conditional_on("b"), |_| Ok(true))
        .build()
        .unwrap();
    assert_eq!(registry.len(Scope::Player), 3);
}

#[test]
fn declared_kind_must_match_compute_kind() {
    let err = ProviderRegistry::builder()
        .string(ProviderDescriptor::integer("n", Scope::Server), |_| Ok("1".into()))
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ExtensionError::KindMismatch {
            declared: ValueKind::Integer,
            actual: ValueKind::String,
            ..
        }
    ));
}

#[test]
fn only_one_notice_provider() {
    let err = ProviderRegistry::builder()
        .notice(ProviderDescriptor::string("n1", Scope::Server), "one")
        .notice(ProviderDescriptor::string("n2", Scope::Server), "two")
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ExtensionError::MultipleNoticeProviders { ref first, ref second }
            if first == "n1" && second == "n2"
    ));
}

// ── Registration surface ─────────────────────────────────────────

#[test]
fn descriptors_sorted_by_priority_then_registration_order() {
    let registry = ProviderRegistry::builder()
        .boolean(yes("low").priority(1), |_| Ok(true))
        .boolean(yes("tie-first").priority(50), |_| Ok(true))
        .boolean(yes("high").priority(100), |_| Ok(true))
        .boolean(yes("tie-second").priority(50), |_| Ok(true))
        .build()
        .unwrap();

    let names: Vec<&str> = registry
        .descriptors(Scope::Player)
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["high", "tie-first", "tie-second", "low"]);
}

#[test]
fn notice_descriptor_is_marked_exempt() {
    let registry = ProviderRegistry::builder()
        .notice(ProviderDescriptor::string("notice", Scope::Server), "down")
        .build()
        .unwrap();
    let descriptor = registry.descriptor(Scope::Server, "notice").unwrap();
    assert!(descriptor.readiness_exempt);
    assert_eq!(descriptor.kind, ValueKind::String);
}

#[test]
fn invoke_unknown_provider() {
    let registry = ProviderRegistry::builder().build().unwrap();
    let service = InMemoryLinkService::new();
    let err = registry.invoke(&service, Target::Server, "nope").unwrap_err();
    assert!(matches!(
        err,
        ExtensionError::UnknownProvider { scope: Scope::Server, ref name } if name == "nope"
    ));
}

#[test]
fn invoke_looks_in_the_target_scope_only() {
    let registry = ProviderRegistry::builder()
        .integer(ProviderDescriptor::integer("total", Scope::Server), |_| Ok(1))
        .build()
        .unwrap();
    let service = InMemoryLinkService::new();
    let target = Target::Player(linkstats_types::PlayerId::new());
    assert!(registry.invoke(&service, target, "total").is_err());
}
