//! Page stylesheet.
//!
//! CSS is organized into submodules by concern:
//! - `animations` - keyframes used by the helpers (`shake`, `slideInRight`, `pulse`)
//! - `forms` - inline validation errors and file inputs
//! - `notifications` - flash message container, toasts and close buttons
//! - `effects` - background bubbles and confetti particles
//!
//! The sheet is assembled once per process and installed once per document.

mod animations;
mod effects;
mod forms;
mod notifications;

use std::sync::LazyLock;

use tracing::debug;

use crate::dom::Document;

/// `id` of the installed `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "pageflash-styles";

static STYLESHEET: LazyLock<String> = LazyLock::new(|| {
    let animations_css = animations::css();
    let forms_css = forms::css();
    let notifications_css = notifications::css();
    let effects_css = effects::css();

    format!("{animations_css}\n{forms_css}\n{notifications_css}\n{effects_css}")
});

/// The full page stylesheet.
pub fn stylesheet() -> &'static str {
    &STYLESHEET
}

/// Append the stylesheet to `<head>` unless it is already there.
///
/// Returns true if a `<style>` element was added.
pub fn install(doc: &mut Document) -> bool {
    let selector = format!("style#{STYLE_ELEMENT_ID}");
    if doc.query_selector(&selector).is_some() {
        return false;
    }

    let head = doc.head();
    let style = doc.create_child(head, "style", &[]);
    doc.set_attr(style, "id", STYLE_ELEMENT_ID);
    doc.set_text(style, stylesheet());
    debug!("Installed page stylesheet ({} bytes)", stylesheet().len());
    true
}
