//! Common definitions shared by the notification modules.

use std::fmt;

use tracing::debug;

use crate::styles::flash;

/// Transform of a toast that is off-screen (before enter, while fading).
pub const HIDDEN_TRANSFORM: &str = "translateX(100%)";
/// Transform of a toast in its resting position.
pub const SHOWN_TRANSFORM: &str = "translateX(0)";

/// Close button glyph.
pub const CLOSE_GLYPH: &str = "✕";
pub const CLOSE_HOVER_TRANSFORM: &str = "scale(1.2) rotate(90deg)";
pub const CLOSE_REST_TRANSFORM: &str = "scale(1) rotate(0deg)";

/// Notification severity. Unknown names fall back to `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Info, Kind::Success, Kind::Warning, Kind::Error];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Info => "info",
            Kind::Success => "success",
            Kind::Warning => "warning",
            Kind::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Kind::Info => "ℹ️",
            Kind::Success => "🎉",
            Kind::Warning => "⚠️",
            Kind::Error => "❌",
        }
    }

    /// Modifier class, e.g. `flash-success`.
    pub fn css_class(self) -> String {
        format!("{}{}", flash::KIND_PREFIX, self.name())
    }

    /// Exact, case-insensitive match on a kind name.
    pub fn parse(name: &str) -> Option<Kind> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Kind for a name coming from page scripts or markup.
    pub fn from_name(name: &str) -> Kind {
        Kind::parse(name).unwrap_or_else(|| {
            debug!("Notification: unknown kind '{}', using info", name);
            Kind::Info
        })
    }

    /// Kind encoded in an element's `flash-{kind}` class, if any.
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> Option<Kind> {
        classes.iter().find_map(|class| {
            class
                .as_ref()
                .strip_prefix(flash::KIND_PREFIX)
                .and_then(Kind::parse)
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons() {
        assert_eq!(Kind::Success.icon(), "🎉");
        assert_eq!(Kind::Error.icon(), "❌");
        assert_eq!(Kind::Warning.icon(), "⚠️");
        assert_eq!(Kind::Info.icon(), "ℹ️");
    }

    #[test]
    fn test_from_name_fallback() {
        assert_eq!(Kind::from_name("success"), Kind::Success);
        assert_eq!(Kind::from_name("ERROR"), Kind::Error);
        assert_eq!(Kind::from_name("debug"), Kind::Info);
        assert_eq!(Kind::from_name(""), Kind::Info);
    }

    #[test]
    fn test_from_classes() {
        assert_eq!(
            Kind::from_classes(&["flash-message", "flash-warning"]),
            Some(Kind::Warning)
        );
        assert_eq!(Kind::from_classes(&["flash-message"]), None);
        assert_eq!(Kind::from_classes::<&str>(&[]), None);
    }

    #[test]
    fn test_css_class() {
        assert_eq!(Kind::Success.css_class(), "flash-success");
    }
}
