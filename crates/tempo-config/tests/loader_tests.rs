use std::io::Write;

use tempo_config::ConfigLoader;

// Env-var override behavior is deliberately not covered here: tests in one
// binary share a process, and std::env mutation races across #[test] threads.

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let loader = ConfigLoader::load(Some(&path)).unwrap();
    let config = loader.get();
    assert_eq!(config.backend.agent_url, "http://localhost:8000");
    assert_eq!(config.memory.l2_capacity, 50);
}

#[test]
fn test_load_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempo.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(
        f,
        r#"
[backend]
agent_url = "https://agi.example.com"
user_id = "alice"

[memory]
l1_window = 8

[logging]
format = "json"
"#
    )
    .unwrap();

    let loader = ConfigLoader::load(Some(&path)).unwrap();
    let config = loader.get();
    assert_eq!(config.backend.agent_url, "https://agi.example.com");
    assert_eq!(config.backend.user_id.as_deref(), Some("alice"));
    assert_eq!(config.memory.l1_window, 8);
    assert_eq!(config.memory.l2_capacity, 50);
    assert_eq!(config.logging.format, "json");
    assert_eq!(loader.path(), path);
}

#[test]
fn test_invalid_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempo.toml");
    std::fs::write(&path, "[memory]\nl2_capacity = 0\n").unwrap();
    assert!(ConfigLoader::load(Some(&path)).is_err());
}

#[test]
fn test_unparseable_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tempo.toml");
    std::fs::write(&path, "this is not toml {{{").unwrap();
    assert!(ConfigLoader::load(Some(&path)).is_err());
}
