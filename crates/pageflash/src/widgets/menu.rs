//! Mobile navigation toggle.

use std::time::Duration;

use tracing::debug;

use crate::dom::NodeId;
use crate::services::events::{EventKind, Listener};
use crate::services::surface::Surface;
use crate::styles::nav;

use super::css_seconds;

const OPEN_GLYPH: &str = "✕";
const CLOSED_GLYPH: &str = "☰";

/// Wire `.mobile-menu-btn` to `nav ul`. Returns false when either is missing.
pub fn init(surface: &mut impl Surface) -> bool {
    let doc = surface.document();
    let (Some(button), Some(menu)) = (
        doc.query_selector(nav::MOBILE_MENU_BUTTON_SELECTOR),
        doc.query_selector(nav::MENU_SELECTOR),
    ) else {
        return false;
    };

    surface.listen(button, EventKind::Click, Listener::MenuToggle { menu });
    true
}

/// Toggle the menu open or closed. Returns whether it is now open.
///
/// Opening staggers a slide-in across the menu items.
pub fn toggle(surface: &mut impl Surface, button: NodeId, menu: NodeId, stagger: Duration) -> bool {
    let doc = surface.document_mut();
    let open = doc.toggle_class(menu, nav::ACTIVE);

    doc.set_text(button, if open { OPEN_GLYPH } else { CLOSED_GLYPH });
    doc.set_style(
        button,
        "transform",
        if open { "rotate(180deg)" } else { "rotate(0deg)" },
    );

    if open {
        let items = doc.query_selector_all_from(menu, "li");
        for (index, item) in items.iter().enumerate() {
            let delay = css_seconds(stagger * index as u32);
            doc.set_style(*item, "animation", &format!("slideInRight 0.5s ease {delay} both"));
        }
    }

    debug!("Menu: {}", if open { "opened" } else { "closed" });
    open
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::services::surface::PageSurface;

    fn menu_page() -> (PageSurface, NodeId, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let nav_node = doc.create_child(doc.body(), "nav", &[]);
        let button = doc.create_child(nav_node, "button", &["mobile-menu-btn"]);
        doc.set_text(button, "☰");
        let menu = doc.create_child(nav_node, "ul", &[]);
        let items = (0..3).map(|_| doc.create_child(menu, "li", &[])).collect();
        (PageSurface::new(doc), button, menu, items)
    }

    #[test]
    fn test_init_registers_click() {
        let (mut surface, button, menu, _) = menu_page();
        assert!(init(&mut surface));
        assert_eq!(
            surface.listeners().listeners_for(button, EventKind::Click),
            vec![Listener::MenuToggle { menu }]
        );
    }

    #[test]
    fn test_init_without_menu_is_noop() {
        let mut surface = PageSurface::default();
        assert!(!init(&mut surface));
        assert!(surface.listeners().is_empty());
    }

    #[test]
    fn test_toggle_open_and_close() {
        let (mut surface, button, menu, items) = menu_page();
        let stagger = Duration::from_millis(100);

        assert!(toggle(&mut surface, button, menu, stagger));
        let doc = surface.document();
        assert!(doc.has_class(menu, "active"));
        assert_eq!(doc.text_content(button), "✕");
        assert_eq!(doc.style(button, "transform"), Some("rotate(180deg)"));
        assert_eq!(doc.style(items[0], "animation"), Some("slideInRight 0.5s ease 0s both"));
        assert_eq!(doc.style(items[2], "animation"), Some("slideInRight 0.5s ease 0.2s both"));

        assert!(!toggle(&mut surface, button, menu, stagger));
        let doc = surface.document();
        assert!(!doc.has_class(menu, "active"));
        assert_eq!(doc.text_content(button), "☰");
        assert_eq!(doc.style(button, "transform"), Some("rotate(0deg)"));
    }
}
