//! Page helpers.
//!
//! Each helper is a small, self-contained piece of page behavior wired up at
//! load time. Helpers only touch the page through a [`Surface`]; anything
//! they need later (a transition, a timeout, a particle cleanup) is scheduled
//! as a [`Task`] and comes back through the page runtime.
//!
//! - `notification_toast` - flash message lifecycle (`NotificationManager`)
//! - `background` - floating background bubbles
//! - `menu` - mobile navigation toggle
//! - `upload` - drag-and-drop file inputs
//! - `form_validation` - required/year/CSV checks with inline errors
//! - `reveal` - scroll-triggered reveal of cards
//! - `hover` - card lift on hover
//! - `typewriter` - hero heading retyped character by character
//! - `confetti` - particle burst

pub mod background;
pub mod confetti;
pub mod css;
pub mod form_validation;
pub mod hover;
pub mod menu;
pub mod notification_common;
pub mod notification_toast;
pub mod reveal;
pub mod typewriter;
pub mod upload;

pub use notification_common::Kind;
pub use notification_toast::{NotificationManager, Origin, Phase, Toast, ToastId};

use std::time::Duration;

use crate::dom::NodeId;
use crate::services::surface::{Surface, Task};

/// Gap between clearing an animation and setting it again.
pub const ANIMATION_RESTART_DELAY: Duration = Duration::from_millis(10);

/// Restart a CSS animation: clear it now, set it again shortly after.
pub fn restart_animation(surface: &mut impl Surface, node: NodeId, animation: &str) {
    surface.document_mut().set_style(node, "animation", "none");
    surface.schedule(
        ANIMATION_RESTART_DELAY,
        Task::SetStyle {
            node,
            property: "animation",
            value: animation.to_string(),
        },
    );
}

/// CSS seconds value, e.g. `0.3s`.
pub fn css_seconds(duration: Duration) -> String {
    format!("{}s", duration.as_millis() as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::surface::PageSurface;

    #[test]
    fn test_css_seconds() {
        assert_eq!(css_seconds(Duration::ZERO), "0s");
        assert_eq!(css_seconds(Duration::from_millis(100)), "0.1s");
        assert_eq!(css_seconds(Duration::from_millis(300)), "0.3s");
        assert_eq!(css_seconds(Duration::from_millis(1500)), "1.5s");
    }

    #[test]
    fn test_restart_animation() {
        let mut surface = PageSurface::default();
        let body = surface.document().body();
        surface.document_mut().set_style(body, "animation", "shake 0.5s ease");
        restart_animation(&mut surface, body, "shake 0.5s ease");

        assert_eq!(surface.document().style(body, "animation"), Some("none"));
        let (due, task) = surface.timers_mut().pop_due(Duration::MAX).unwrap();
        assert_eq!(due, Duration::from_millis(10));
        assert_eq!(
            task,
            Task::SetStyle {
                node: body,
                property: "animation",
                value: "shake 0.5s ease".into()
            }
        );
    }
}
