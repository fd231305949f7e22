//! Integration tests for config parsing against the real config.toml.

use std::path::PathBuf;

use pageflash_core::{Config, NumberLocale, format_number};

fn project_root() -> PathBuf {
    // Navigate from crates/pageflash-core/ up to project root
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent() // crates/
        .unwrap()
        .parent() // workspace root
        .unwrap()
        .to_path_buf()
}

#[test]
fn test_load_real_config() {
    let config_path = project_root().join("config.toml");

    let config = Config::load(&config_path).expect("Failed to load config.toml");

    assert!(config.notifications.timeout_ms > 0);
    assert!(
        config.notifications.discovered_timeout_ms > config.notifications.timeout_ms,
        "Pre-rendered messages should outlive runtime ones"
    );
    assert!(!config.effects.confetti_colors.is_empty());
}

#[test]
fn test_real_config_validates() {
    let config_path = project_root().join("config.toml");
    let config = Config::load(&config_path).unwrap();

    config.validate().expect("Real config.toml should be valid");
    assert!(config.warnings().is_empty());
}

#[test]
fn test_real_config_locale_formats_numbers() {
    let config_path = project_root().join("config.toml");
    let config = Config::load(&config_path).unwrap();

    let locale = config.locale.number_locale().unwrap();
    assert_eq!(locale, NumberLocale::Indonesian);
    assert_eq!(format_number(1500000.0, locale), "1.500.000");
}

#[test]
fn test_config_summary() {
    let config_path = project_root().join("config.toml");
    let config = Config::load(&config_path).unwrap();

    let summary = config.summary();

    assert!(summary.contains("Notifications:"));
    assert!(summary.contains("Locale:"));
    assert!(summary.contains("Validation:"));
    assert!(summary.contains("Effects:"));
    assert!(summary.contains("timeout: 5000ms"));
}

#[test]
fn test_find_and_load_with_explicit_path() {
    let config_path = project_root().join("config.toml");

    let result = Config::find_and_load(Some(&config_path)).unwrap();

    assert!(!result.used_defaults);
    assert_eq!(result.source, Some(config_path));
    result.config.validate().unwrap();
}

#[test]
fn test_find_and_load_explicit_missing_path_is_error() {
    let missing = project_root().join("does-not-exist.toml");
    assert!(Config::find_and_load(Some(&missing)).is_err());
}
