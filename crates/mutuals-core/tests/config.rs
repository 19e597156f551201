use std::collections::HashMap;

use mutuals_core::config::{dirs_path, GlobalConfig, DEFAULT_API_HOST, ENV_API_KEY, ENV_BASE_URL};

#[test]
fn test_global_config_default_api() {
    let config = GlobalConfig::default();
    assert_eq!(config.api.host, DEFAULT_API_HOST);
    assert!(config.api.key.is_none());
    assert_eq!(config.api.batch_size, 1000);
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.api.max_in_flight, 8);
}

#[test]
fn test_global_config_default_search() {
    let config = GlobalConfig::default();
    assert_eq!(config.search.max_depth, 3);
    assert_eq!(config.search.concurrency, 4);
}

#[test]
fn test_empty_toml_uses_serde_defaults() {
    let config: GlobalConfig = toml::from_str("").unwrap();
    assert_eq!(config.api.host, DEFAULT_API_HOST);
    assert_eq!(config.search.max_depth, 3);
}

#[test]
fn test_dirs_path_contains_mutuals() {
    let path = dirs_path();
    assert!(path.ends_with(".mutuals"));
}

#[test]
fn test_global_config_parse_from_toml() {
    let toml = r#"
[api]
host = "scraper.example.com"
key = "secret"
base-url = "http://localhost:9000/"
batch-size = 250
timeout-secs = 5
max-in-flight = 2

[search]
max-depth = 4
concurrency = 1
"#;
    let config: GlobalConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.api.host, "scraper.example.com");
    assert_eq!(config.api.key.as_deref(), Some("secret"));
    assert_eq!(config.api.base_url(), "http://localhost:9000");
    assert_eq!(config.api.effective_batch_size(), 250);
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.api.max_in_flight, 2);
    assert_eq!(config.search.max_depth, 4);
    assert_eq!(config.search.concurrency, 1);
}

#[test]
fn test_base_url_defaults_to_https_host() {
    let config = GlobalConfig::default();
    assert_eq!(
        config.api.base_url(),
        format!("https://{DEFAULT_API_HOST}")
    );
}

#[test]
fn test_batch_size_is_clamped() {
    let mut config = GlobalConfig::default();
    config.api.batch_size = 5000;
    assert_eq!(config.api.effective_batch_size(), 1000);
    config.api.batch_size = 0;
    assert_eq!(config.api.effective_batch_size(), 1);
}

#[test]
fn test_require_key_missing() {
    let config = GlobalConfig::default();
    let err = config.api.require_key().unwrap_err();
    assert!(err.to_string().contains("No API key configured"), "got: {err}");
}

#[test]
fn test_require_key_blank_is_missing() {
    let mut config = GlobalConfig::default();
    config.api.key = Some("   ".to_string());
    assert!(config.api.require_key().is_err());
}

#[test]
fn test_env_overrides_file_values() {
    let mut config: GlobalConfig = toml::from_str("[api]\nkey = \"from-file\"\n").unwrap();
    let env: HashMap<&str, &str> = [
        (ENV_API_KEY, "from-env"),
        (ENV_BASE_URL, "http://127.0.0.1:8080"),
    ]
    .into_iter()
    .collect();
    config.apply_env(|name| env.get(name).map(|v| v.to_string()));
    assert_eq!(config.api.key.as_deref(), Some("from-env"));
    assert_eq!(config.api.base_url(), "http://127.0.0.1:8080");
    assert_eq!(config.api.host, DEFAULT_API_HOST);
}

#[test]
fn test_empty_env_values_are_ignored() {
    let mut config: GlobalConfig = toml::from_str("[api]\nkey = \"from-file\"\n").unwrap();
    config.apply_env(|name| (name == ENV_API_KEY).then(String::new));
    assert_eq!(config.api.key.as_deref(), Some("from-file"));
}

#[test]
fn test_load_from_missing_file_gives_defaults() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert!(config.api.key.is_none());
}

#[test]
fn test_load_from_invalid_file_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[api\nkey =").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"), "got: {err}");
}
