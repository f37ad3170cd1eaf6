use depot_core::config::{dirs_path, DepotConfig, CONFIG_FILE};
use depot_core::scope::Scope;
use tempfile::TempDir;

#[test]
fn test_default_scope_is_test() {
    let config = DepotConfig::default();
    assert_eq!(config.resolve.scope, Scope::Test);
    assert!(!config.resolve.include_optional);
}

#[test]
fn test_default_local_repository() {
    let config = DepotConfig::default();
    assert_eq!(config.repository.local, "~/.m2/repository");
    assert!(config.repository_path().ends_with(".m2/repository"));
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = DepotConfig::parse_toml("").unwrap();
    assert_eq!(config.resolve.scope, Scope::Test);
}

#[test]
fn test_parse_from_toml() {
    let toml = r#"
[resolve]
scope = "runtime"
include-optional = true

[repository]
local = "/srv/maven"
"#;
    let config = DepotConfig::parse_toml(toml).unwrap();
    assert_eq!(config.resolve.scope, Scope::Runtime);
    assert!(config.resolve.include_optional);
    assert_eq!(config.repository_path(), std::path::PathBuf::from("/srv/maven"));
}

#[test]
fn test_unknown_scope_is_config_error() {
    let err = DepotConfig::parse_toml("[resolve]\nscope = \"import\"\n").unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"), "got: {err}");
}

#[test]
fn test_load_finds_project_config_in_ancestor() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(CONFIG_FILE),
        "[resolve]\nscope = \"compile\"\n",
    )
    .unwrap();
    let nested = tmp.path().join("module").join("sub");
    std::fs::create_dir_all(&nested).unwrap();
    let config = DepotConfig::load(&nested).unwrap();
    assert_eq!(config.resolve.scope, Scope::Compile);
}

#[test]
fn test_from_path_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(DepotConfig::from_path(&tmp.path().join("nope.toml")).is_err());
}

#[test]
fn test_dirs_path_contains_depot() {
    assert!(dirs_path().ends_with(".depot"));
}
