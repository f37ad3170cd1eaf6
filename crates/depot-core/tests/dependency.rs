use depot_core::coordinate::MediationKey;
use depot_core::dependency::{find_managed, merge_managed, Exclusion, ManagedDependency};
use depot_core::scope::Scope;

fn key(g: &str, a: &str) -> MediationKey {
    MediationKey::new(g, a, None, None)
}

#[test]
fn exclusion_parse_group_and_artifact() {
    let excl = Exclusion::parse("org.foo:bar").unwrap();
    assert_eq!(excl.group_id, "org.foo");
    assert_eq!(excl.artifact_id, "bar");
}

#[test]
fn exclusion_parse_bare_group_is_wildcard() {
    let excl = Exclusion::parse("org.foo").unwrap();
    assert_eq!(excl.artifact_id, "*");
    assert!(excl.matches(&key("org.foo", "anything")));
}

#[test]
fn exclusion_parse_rejects_garbage() {
    assert!(Exclusion::parse("").is_none());
    assert!(Exclusion::parse("a:b:c").is_none());
    assert!(Exclusion::parse(":b").is_none());
}

#[test]
fn exclusion_matches_exact_key_only() {
    let excl = Exclusion::new("org.foo", "bar");
    assert!(excl.matches(&key("org.foo", "bar")));
    assert!(!excl.matches(&key("org.foo", "baz")));
    assert!(!excl.matches(&key("org.other", "bar")));
}

#[test]
fn exclusion_matches_any_classifier() {
    let excl = Exclusion::new("org.foo", "bar");
    assert!(excl.matches(&MediationKey::new("org.foo", "bar", Some("jar"), Some("tests"))));
}

#[test]
fn full_wildcard_matches_everything() {
    let excl = Exclusion::new("*", "*");
    assert!(excl.matches(&key("x", "y")));
}

#[test]
fn merge_managed_keeps_existing_entries() {
    let mut into = vec![ManagedDependency {
        key: key("g", "a"),
        version: Some("1.0".into()),
        scope: None,
    }];
    let from = vec![
        ManagedDependency {
            key: key("g", "a"),
            version: Some("2.0".into()),
            scope: Some(Scope::Runtime),
        },
        ManagedDependency {
            key: key("g", "b"),
            version: Some("3.0".into()),
            scope: None,
        },
    ];
    merge_managed(&mut into, &from);
    assert_eq!(into.len(), 2);
    assert_eq!(
        find_managed(&into, &key("g", "a")).unwrap().version.as_deref(),
        Some("1.0")
    );
    assert_eq!(
        find_managed(&into, &key("g", "b")).unwrap().version.as_deref(),
        Some("3.0")
    );
}
