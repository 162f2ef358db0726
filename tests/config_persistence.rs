//! Config file round-trip tests.

use sprig::FeedbackConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn config_round_trips_through_disk() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("sprig.toml");

    let mut config = FeedbackConfig::default();
    config.fallback.seed = Some(17);
    config.prompt.max_entry_chars = 800;

    let raw = toml::to_string(&config).expect("failed to serialize config");
    fs::write(&path, raw).expect("failed to write config");

    let loaded = FeedbackConfig::load(&path).expect("failed to load config");
    assert_eq!(loaded.fallback.seed, Some(17));
    assert_eq!(loaded.prompt.max_entry_chars, 800);
    // Untouched sections keep their defaults.
    assert_eq!(loaded.prompt.max_hints, 3);
}

#[test]
fn unknown_fields_are_tolerated() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("sprig.toml");

    fs::write(
        &path,
        r#"
        future_section = { answer = 42 }

        [prompt]
        max_hint_chars = 120
        "#,
    )
    .expect("failed to write config");

    let loaded = FeedbackConfig::load(&path).expect("failed to load config");
    assert_eq!(loaded.prompt.max_hint_chars, 120);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = FeedbackConfig::load_or_default(dir.path().join("absent.toml"));
    assert_eq!(config.prompt.max_entry_chars, 1200);
}
