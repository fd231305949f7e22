//! Configuration types and parsing.
//!
//! The Config type is a plain, serialization-friendly schema. Values that
//! the runtime needs in another shape (durations, parsed locales) are exposed
//! through small accessor methods rather than stored twice.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml::Table;

use crate::error::{Error, Result};
use crate::format::NumberLocale;

/// Embedded default configuration TOML, compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../../config.toml");

/// Result of loading a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Path where config was found, if any.
    pub source: Option<PathBuf>,
    /// Whether defaults were used (no config file found).
    pub used_defaults: bool,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Notification timing and placement.
    pub notifications: NotificationsConfig,

    /// Number formatting locale.
    pub locale: LocaleConfig,

    /// Form validation rules.
    pub validation: ValidationConfig,

    /// User-facing strings.
    pub messages: MessagesConfig,

    /// Decorative effects (bubbles, confetti, reveal, typewriter).
    pub effects: EffectsConfig,
}

impl Config {
    /// Load configuration from the embedded default TOML string.
    pub fn from_default_toml() -> Result<Self> {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, merging with embedded defaults.
    ///
    /// Returns an error if the file doesn't exist or can't be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_with_defaults(&content)
    }

    /// Parse a TOML string, deep-merging it over the embedded defaults.
    ///
    /// User values win; missing sections and fields keep their defaults.
    pub fn load_with_defaults(user_toml: &str) -> Result<Self> {
        let mut base: Table = toml::from_str(DEFAULT_CONFIG_TOML)?;
        let user: Table = toml::from_str(user_toml)?;

        deep_merge_toml(&mut base, user);

        let config: Config = base.try_into()?;
        Ok(config)
    }

    /// Find and load configuration using the XDG lookup chain.
    ///
    /// If `explicit_path` is `Some`, that path is used directly and an error
    /// is returned if it doesn't exist or can't be parsed (no fallback).
    ///
    /// If `explicit_path` is `None`, searches in order:
    /// 1. `$XDG_CONFIG_HOME/pageflash/config.toml`
    /// 2. `~/.config/pageflash/config.toml`
    /// 3. `./config.toml` (current working directory)
    ///
    /// If no config file is found, the embedded defaults are used.
    pub fn find_and_load(explicit_path: Option<&Path>) -> Result<ConfigLoadResult> {
        if let Some(path) = explicit_path {
            let config = Self::load(path)?;
            return Ok(ConfigLoadResult {
                config,
                source: Some(path.to_path_buf()),
                used_defaults: false,
            });
        }

        // A config file that exists but fails to load is an error, never a
        // silent fallback to defaults.
        let search_paths = Self::config_search_paths();
        let mut first_error: Option<(PathBuf, Error)> = None;

        for path in &search_paths {
            if !path.exists() {
                continue;
            }
            match Self::load(path) {
                Ok(config) => {
                    return Ok(ConfigLoadResult {
                        config,
                        source: Some(path.clone()),
                        used_defaults: false,
                    });
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some((path.clone(), e));
                    }
                }
            }
        }

        if let Some((path, error)) = first_error {
            tracing::error!("Config file {:?} exists but failed to load: {}", path, error);
            return Err(error);
        }

        tracing::info!("No config file found, using built-in default config");
        tracing::debug!(
            "Searched: {}",
            search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(ConfigLoadResult {
            config: Self::from_default_toml()?,
            source: None,
            used_defaults: true,
        })
    }

    /// Get the list of paths to search for config files.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_config).join("pageflash/config.toml"));
        }

        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(".config/pageflash/config.toml"));
        }

        paths.push(PathBuf::from("config.toml"));

        paths
    }

    /// Validate the configuration, returning every invalid value at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let n = &self.notifications;
        for (name, value) in [
            ("notifications.timeout_ms", n.timeout_ms),
            ("notifications.discovered_timeout_ms", n.discovered_timeout_ms),
            ("notifications.exit_transition_ms", n.exit_transition_ms),
        ] {
            if value == 0 {
                errors.push(format!("{name}: must be greater than 0"));
            }
        }

        if n.container_root.trim().is_empty() {
            errors.push("notifications.container_root: must not be empty".to_string());
        }

        if self.locale.number_locale().is_err() {
            errors.push(format!(
                "locale.number_locale: invalid value '{}', expected one of: {}",
                self.locale.number_locale,
                NumberLocale::TAGS.join(", ")
            ));
        }

        let v = &self.validation;
        if v.year_min > v.year_max {
            errors.push(format!(
                "validation.year_min: {} is greater than validation.year_max ({})",
                v.year_min, v.year_max
            ));
        }

        if !v.csv_extension.starts_with('.') || v.csv_extension.len() < 2 {
            errors.push(format!(
                "validation.csv_extension: invalid value '{}', expected an extension like '.csv'",
                v.csv_extension
            ));
        }

        let e = &self.effects;
        if e.confetti_colors.is_empty() {
            errors.push("effects.confetti_colors: must contain at least one color".to_string());
        }
        for color in &e.confetti_colors {
            if !is_hex_color(color) {
                errors.push(format!(
                    "effects.confetti_colors: invalid value '{}', expected a hex color like '#3b82f6'",
                    color
                ));
            }
        }

        if !(0.0..=1.0).contains(&e.reveal_threshold) {
            errors.push(format!(
                "effects.reveal_threshold: invalid value '{}', must be between 0.0 and 1.0",
                e.reveal_threshold
            ));
        }

        if e.typewriter_char_delay_ms == 0 {
            errors.push("effects.typewriter_char_delay_ms: must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigValidation(errors))
        }
    }

    /// Check for potential configuration issues and return warnings.
    ///
    /// Unlike `validate()`, these never stop the program.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let n = &self.notifications;

        if n.discovered_timeout_ms < n.timeout_ms {
            warnings.push(format!(
                "notifications.discovered_timeout_ms ({}ms) is shorter than timeout_ms ({}ms); \
                 pre-rendered messages will disappear before runtime ones",
                n.discovered_timeout_ms, n.timeout_ms
            ));
        }

        if n.enter_delay_ms >= n.timeout_ms {
            warnings.push(format!(
                "notifications.enter_delay_ms ({}ms) is not shorter than timeout_ms ({}ms); \
                 notifications will fade out before they ever slide in",
                n.enter_delay_ms, n.timeout_ms
            ));
        }

        if self.effects.confetti_count == 0 {
            warnings.push("effects.confetti_count: 0 disables confetti entirely".to_string());
        }

        warnings
    }

    /// Human-readable summary of the configuration.
    pub fn summary(&self) -> String {
        let n = &self.notifications;
        let v = &self.validation;
        let e = &self.effects;

        let mut lines = Vec::new();

        lines.push("Notifications:".to_string());
        lines.push(format!("  timeout: {}ms", n.timeout_ms));
        lines.push(format!("  discovered timeout: {}ms", n.discovered_timeout_ms));
        lines.push(format!(
            "  transitions: enter after {}ms, exit over {}ms",
            n.enter_delay_ms, n.exit_transition_ms
        ));
        lines.push(format!("  container root: {}", n.container_root));

        lines.push("\nLocale:".to_string());
        lines.push(format!("  number_locale: {}", self.locale.number_locale));

        lines.push("\nValidation:".to_string());
        lines.push(format!("  year range: {}..={}", v.year_min, v.year_max));
        lines.push(format!("  csv extension: {}", v.csv_extension));

        lines.push("\nEffects:".to_string());
        lines.push(format!("  bubbles: {}", e.bubble_count));
        lines.push(format!(
            "  confetti: {} particles, colors {}",
            e.confetti_count,
            e.confetti_colors.join(" ")
        ));
        lines.push(format!(
            "  typewriter: start after {}ms, {}ms per char",
            e.typewriter_start_delay_ms, e.typewriter_char_delay_ms
        ));
        lines.push(format!(
            "  reveal: threshold {}, bottom margin {}px",
            e.reveal_threshold, e.reveal_bottom_margin_px
        ));

        lines.join("\n")
    }
}

/// Deep merge two TOML tables, with `overlay` values taking precedence.
///
/// For nested tables, recursively merges. For arrays and other values,
/// the overlay value completely replaces the base value.
fn deep_merge_toml(base: &mut Table, overlay: Table) {
    for (key, overlay_value) in overlay {
        match (base.get_mut(&key), overlay_value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge_toml(base_table, overlay_table);
            }
            (_, overlay_value) => {
                base.insert(key, overlay_value);
            }
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value.starts_with('#') && {
        let hex = value.trim_start_matches('#');
        (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Notification timing and placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Auto-dismiss delay for notifications shown at runtime.
    pub timeout_ms: u64,

    /// Auto-dismiss delay for flash messages rendered with the page.
    pub discovered_timeout_ms: u64,

    /// Duration of the exit transition before the node is detached.
    pub exit_transition_ms: u64,

    /// Delay before the enter transition starts.
    pub enter_delay_ms: u64,

    /// Selector of the element the container is prepended to when created.
    pub container_root: String,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            discovered_timeout_ms: 6000,
            exit_transition_ms: 500,
            enter_delay_ms: 10,
            container_root: ".container".to_string(),
        }
    }
}

impl NotificationsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn discovered_timeout(&self) -> Duration {
        Duration::from_millis(self.discovered_timeout_ms)
    }

    pub fn exit_transition(&self) -> Duration {
        Duration::from_millis(self.exit_transition_ms)
    }

    pub fn enter_delay(&self) -> Duration {
        Duration::from_millis(self.enter_delay_ms)
    }
}

/// Number formatting locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// BCP 47 tag, e.g. `id-ID`.
    pub number_locale: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            number_locale: "id-ID".to_string(),
        }
    }
}

impl LocaleConfig {
    /// Parse the configured tag.
    pub fn number_locale(&self) -> Result<NumberLocale> {
        self.number_locale.parse()
    }
}

/// Form validation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Lowest accepted value of a `year` field.
    pub year_min: i64,

    /// Highest accepted value of a `year` field.
    pub year_max: i64,

    /// Extension required on CSV upload fields, including the dot.
    pub csv_extension: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            year_min: 2000,
            year_max: 2030,
            csv_extension: ".csv".to_string(),
        }
    }
}

impl ValidationConfig {
    pub fn year_in_range(&self, year: i64) -> bool {
        (self.year_min..=self.year_max).contains(&year)
    }
}

/// User-facing strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MessagesConfig {
    pub required: String,
    /// Supports `{min}` and `{max}` placeholders.
    pub year_range: String,
    pub csv_format: String,
    pub form_invalid: String,
    pub form_valid: String,
    /// Label shown on a file input with nothing selected.
    pub file_placeholder: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            required: "Field ini wajib diisi".to_string(),
            year_range: "Tahun harus antara {min} dan {max}".to_string(),
            csv_format: "File harus berformat CSV".to_string(),
            form_invalid: "Harap perbaiki error pada form sebelum melanjutkan".to_string(),
            form_valid: "Form berhasil divalidasi! Memproses...".to_string(),
            file_placeholder: "Pilih file".to_string(),
        }
    }
}

impl MessagesConfig {
    /// Render the year range message for the given bounds.
    pub fn year_range_message(&self, min: i64, max: i64) -> String {
        self.year_range
            .replace("{min}", &min.to_string())
            .replace("{max}", &max.to_string())
    }
}

/// Decorative effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    pub bubble_count: usize,
    pub confetti_count: usize,
    pub confetti_colors: Vec<String>,
    /// Distance each particle travels from the burst origin.
    pub confetti_distance_px: f64,
    pub typewriter_start_delay_ms: u64,
    pub typewriter_char_delay_ms: u64,
    /// Visible fraction (0.0-1.0) at which an element is revealed.
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: f64,
    pub menu_stagger_ms: u64,
    pub card_stagger_ms: u64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            bubble_count: 6,
            confetti_count: 30,
            confetti_colors: ["#3b82f6", "#06b6d4", "#1e40af", "#67e8f9"]
                .into_iter()
                .map(String::from)
                .collect(),
            confetti_distance_px: 100.0,
            typewriter_start_delay_ms: 1000,
            typewriter_char_delay_ms: 100,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
            menu_stagger_ms: 100,
            card_stagger_ms: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.notifications.timeout_ms, 5000);
        assert_eq!(config.notifications.discovered_timeout_ms, 6000);
        assert_eq!(config.notifications.exit_transition_ms, 500);
        assert_eq!(config.locale.number_locale, "id-ID");
        assert_eq!(config.validation.year_min, 2000);
        assert_eq!(config.validation.year_max, 2030);
        assert_eq!(config.effects.confetti_colors.len(), 4);
    }

    #[test]
    fn test_embedded_default_config_parses_and_validates() {
        let config = Config::from_default_toml().expect("embedded default config should parse");
        assert!(config.validate().is_ok());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_embedded_default_matches_struct_defaults() {
        let from_toml = Config::from_default_toml().unwrap();
        let from_struct = Config::default();

        assert_eq!(
            from_toml.notifications.timeout_ms,
            from_struct.notifications.timeout_ms
        );
        assert_eq!(
            from_toml.notifications.discovered_timeout_ms,
            from_struct.notifications.discovered_timeout_ms
        );
        assert_eq!(
            from_toml.notifications.container_root,
            from_struct.notifications.container_root
        );
        assert_eq!(from_toml.messages.required, from_struct.messages.required);
        assert_eq!(
            from_toml.effects.confetti_colors,
            from_struct.effects.confetti_colors
        );
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml = r#"
            [notifications]
            timeout_ms = 3000
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.notifications.timeout_ms, 3000);
        assert_eq!(config.notifications.exit_transition_ms, 500);
    }

    #[test]
    fn test_load_with_defaults_nested_override() {
        let user_toml = r#"
            [notifications]
            discovered_timeout_ms = 9000

            [messages]
            required = "This field is required"
        "#;

        let config = Config::load_with_defaults(user_toml).unwrap();
        assert_eq!(config.notifications.discovered_timeout_ms, 9000);
        assert_eq!(config.notifications.timeout_ms, 5000);
        assert_eq!(config.messages.required, "This field is required");
        assert_eq!(config.messages.file_placeholder, "Pilih file");
    }

    #[test]
    fn test_load_with_defaults_empty_config() {
        let config = Config::load_with_defaults("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.notifications.timeout_ms, 5000);
    }

    #[test]
    fn test_deep_merge_toml_tables() {
        let mut base: Table = toml::from_str(
            r#"
            [a]
            x = 1
            y = 2
        "#,
        )
        .unwrap();
        let overlay: Table = toml::from_str(
            r#"
            [a]
            y = 3
            z = 4
        "#,
        )
        .unwrap();

        deep_merge_toml(&mut base, overlay);

        let a = base["a"].as_table().unwrap();
        assert_eq!(a["x"].as_integer(), Some(1));
        assert_eq!(a["y"].as_integer(), Some(3));
        assert_eq!(a["z"].as_integer(), Some(4));
    }

    #[test]
    fn test_deep_merge_toml_arrays_replace() {
        let config = Config::load_with_defaults(
            r##"
            [effects]
            confetti_colors = ["#ffffff"]
        "##,
        )
        .unwrap();
        assert_eq!(config.effects.confetti_colors, vec!["#ffffff".to_string()]);
    }

    #[test]
    fn test_load_with_defaults_rejects_unknown_fields() {
        let result = Config::load_with_defaults(
            r#"
            [notifications]
            timeout = 10
        "#,
        );
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_load_with_defaults_rejects_unknown_section() {
        let result = Config::load_with_defaults(
            r#"
            [toasts]
            timeout_ms = 10
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/pageflash/config.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound(_))));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.notifications.timeout_ms = 0;

        let Err(Error::ConfigValidation(errors)) = config.validate() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("notifications.timeout_ms"));
    }

    #[test]
    fn test_validate_unsupported_locale() {
        let mut config = Config::default();
        config.locale.number_locale = "tlh-KL".to_string();

        let Err(Error::ConfigValidation(errors)) = config.validate() else {
            panic!("expected validation error");
        };
        assert!(errors[0].contains("locale.number_locale"));
    }

    #[test]
    fn test_validate_bad_colors() {
        let mut config = Config::default();
        config.effects.confetti_colors = vec!["blue".to_string(), "#12345".to_string()];

        let Err(Error::ConfigValidation(errors)) = config.validate() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = Config::default();
        config.validation.year_min = 2040;
        config.effects.reveal_threshold = 1.5;
        config.notifications.container_root = "  ".to_string();

        let Err(Error::ConfigValidation(errors)) = config.validate() else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_warning_when_discovered_timeout_is_shorter() {
        let mut config = Config::default();
        config.notifications.discovered_timeout_ms = 4000;

        let warnings = config.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("discovered_timeout_ms"));
        // Still valid: this is a choice, not an error.
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_year_range_message() {
        let messages = MessagesConfig::default();
        assert_eq!(
            messages.year_range_message(2000, 2030),
            "Tahun harus antara 2000 dan 2030"
        );
    }

    #[test]
    fn test_year_in_range_is_inclusive() {
        let rules = ValidationConfig::default();
        assert!(rules.year_in_range(2000));
        assert!(rules.year_in_range(2030));
        assert!(!rules.year_in_range(1999));
        assert!(!rules.year_in_range(2031));
    }

    #[test]
    fn test_durations() {
        let n = NotificationsConfig::default();
        assert_eq!(n.timeout(), Duration::from_secs(5));
        assert_eq!(n.discovered_timeout(), Duration::from_secs(6));
        assert_eq!(n.exit_transition(), Duration::from_millis(500));
        assert_eq!(n.enter_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_config_search_paths() {
        let paths = Config::config_search_paths();
        assert!(!paths.is_empty());
        assert_eq!(paths.last().unwrap(), &PathBuf::from("config.toml"));
    }
}
