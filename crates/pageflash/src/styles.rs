//! Shared CSS class names and selectors for pageflash.
//!
//! Page markup and the helpers agree on these names; keeping them here
//! avoids typos between the stylesheet, the DOM queries and the tests.
//!
//! # Usage
//!
//! ```ignore
//! use crate::styles::{flash, form};
//!
//! doc.add_class(node, flash::MESSAGE);
//! let errors = doc.query_selector_all_from(parent, form::FIELD_ERROR_SELECTOR);
//! ```

/// Flash message / notification toast classes.
pub mod flash {
    /// Stacking container for notifications (`.flash-messages`).
    pub const CONTAINER: &str = "flash-messages";
    pub const CONTAINER_SELECTOR: &str = ".flash-messages";

    /// A single notification (`.flash-message`).
    pub const MESSAGE: &str = "flash-message";
    pub const MESSAGE_SELECTOR: &str = ".flash-message";

    /// Prefix of the kind modifier class (`flash-success`, ...).
    pub const KIND_PREFIX: &str = "flash-";

    /// Icon element (`.flash-icon`).
    pub const ICON: &str = "flash-icon";

    /// Message text element (`.flash-text`).
    pub const TEXT: &str = "flash-text";

    /// Close affordance (`.flash-close`).
    pub const CLOSE: &str = "flash-close";
    pub const CLOSE_SELECTOR: &str = ".flash-close";
}

/// Navigation classes.
pub mod nav {
    pub const MOBILE_MENU_BUTTON_SELECTOR: &str = ".mobile-menu-btn";

    /// Navigation list toggled by the menu button.
    pub const MENU_SELECTOR: &str = "nav ul";

    /// Open state of the navigation list (`.active`).
    pub const ACTIVE: &str = "active";
}

/// Form and upload classes.
pub mod form {
    /// Inline validation message (`.field-error`).
    pub const FIELD_ERROR: &str = "field-error";
    pub const FIELD_ERROR_SELECTOR: &str = ".field-error";

    /// Styled wrapper around a file input (`.file-input`).
    pub const FILE_INPUT_SELECTOR: &str = ".file-input";

    /// Label showing the selected file name (`.file-label`).
    pub const FILE_LABEL_SELECTOR: &str = ".file-label";

    pub const FILE_INPUTS_SELECTOR: &str = r#"input[type="file"]"#;
    pub const REQUIRED_SELECTOR: &str = "[required]";
}

/// Decorative effect classes.
pub mod effects {
    /// Animated background host (`.animated-bg`).
    pub const BACKGROUND_SELECTOR: &str = ".animated-bg";

    /// Floating background bubble (`.bubble`).
    pub const BUBBLE: &str = "bubble";

    /// Confetti particle (`.confetti`).
    pub const CONFETTI: &str = "confetti";

    /// Section whose cards stagger in (`.features`).
    pub const FEATURES: &str = "features";
    pub const FEATURE_CARD_SELECTOR: &str = ".feature-card";

    /// Elements revealed on scroll.
    pub const REVEAL_SELECTOR: &str =
        ".feature-card, .stat-card, .chart-container, .suggestion-item";

    /// Cards that lift on hover.
    pub const HOVER_SELECTOR: &str = ".feature-card, .stat-card, .chart-container";

    /// Hero heading retyped on load.
    pub const HERO_TITLE_SELECTOR: &str = ".hero h1";
}

/// Colors applied inline.
pub mod color {
    pub const ERROR: &str = "#ef4444";
    pub const DROP_BORDER: &str = "#3b82f6";
    pub const DROP_BACKGROUND: &str = "rgba(6, 182, 212, 0.2)";
}
