use depot_core::coordinate::{Coordinate, MediationKey};

#[test]
fn coordinate_parse_three_parts() {
    let coord = Coordinate::parse("com.example:my-lib:1.0.0").unwrap();
    assert_eq!(coord.group_id, "com.example");
    assert_eq!(coord.artifact_id, "my-lib");
    assert_eq!(coord.version, "1.0.0");
    assert_eq!(coord.type_, "jar");
    assert!(coord.classifier.is_none());
}

#[test]
fn coordinate_parse_with_type() {
    let coord = Coordinate::parse("com.example:bom:pom:2.0").unwrap();
    assert_eq!(coord.type_, "pom");
    assert_eq!(coord.version, "2.0");
}

#[test]
fn coordinate_parse_with_classifier() {
    let coord = Coordinate::parse("com.example:lib:jar:sources:2.0").unwrap();
    assert_eq!(coord.classifier.as_deref(), Some("sources"));
    assert_eq!(coord.version, "2.0");
}

#[test]
fn coordinate_parse_two_parts_fails() {
    assert!(Coordinate::parse("group:artifact").is_err());
}

#[test]
fn coordinate_parse_empty_component_fails() {
    assert!(Coordinate::parse("group::1.0").is_err());
    assert!(Coordinate::parse("").is_err());
}

#[test]
fn coordinate_parse_six_parts_fails() {
    assert!(Coordinate::parse("a:b:c:d:e:f").is_err());
}

#[test]
fn coordinate_display_roundtrip() {
    for s in [
        "com.example:my-lib:1.0.0",
        "com.example:bom:pom:2.0",
        "com.example:lib:jar:sources:2.0",
    ] {
        let coord = Coordinate::parse(s).unwrap();
        assert_eq!(coord.to_string(), s);
    }
}

#[test]
fn key_covers_all_fields() {
    let plain = Coordinate::new("g", "a", "1.0");
    let sources = plain.clone().with_classifier("sources");
    let other_version = plain.with_version("2.0");
    assert_eq!(plain.key(), "g:a:jar::1.0");
    assert_ne!(plain.key(), sources.key());
    assert_ne!(plain.key(), other_version.key());
    assert_ne!(plain, other_version);
}

#[test]
fn mediation_key_ignores_version() {
    let a = Coordinate::new("org.foo", "bar", "1.0");
    let b = Coordinate::new("org.foo", "bar", "2.0");
    assert_eq!(a.mediation_key(), b.mediation_key());
    assert_eq!(a.mediation_key().to_string(), "org.foo:bar");
}

#[test]
fn mediation_key_distinguishes_classifier_and_type() {
    let jar = Coordinate::new("org.foo", "bar", "1.0");
    let tests = jar.clone().with_classifier("tests");
    let pom = jar.clone().with_type("pom");
    assert_ne!(jar.mediation_key(), tests.mediation_key());
    assert_ne!(jar.mediation_key(), pom.mediation_key());
    assert_eq!(
        tests.mediation_key(),
        MediationKey::new("org.foo", "bar", None, Some("tests"))
    );
}
