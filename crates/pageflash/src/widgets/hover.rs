//! Card lift on hover.

use crate::dom::NodeId;
use crate::services::events::{EventKind, Listener};
use crate::services::surface::Surface;
use crate::styles::effects;

pub const LIFTED_TRANSFORM: &str = "translateY(-15px) scale(1.02)";
pub const RESTING_TRANSFORM: &str = "translateY(0) scale(1)";

/// Register hover listeners on every card. Returns the cards.
pub fn init(surface: &mut impl Surface) -> Vec<NodeId> {
    let cards = surface.document().query_selector_all(effects::HOVER_SELECTOR);
    for card in &cards {
        surface.listen(*card, EventKind::MouseEnter, Listener::HoverLift);
        surface.listen(*card, EventKind::MouseLeave, Listener::HoverSettle);
    }
    cards
}

pub fn lift(surface: &mut impl Surface, card: NodeId) {
    surface.document_mut().set_style(card, "transform", LIFTED_TRANSFORM);
}

pub fn settle(surface: &mut impl Surface, card: NodeId) {
    surface.document_mut().set_style(card, "transform", RESTING_TRANSFORM);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::services::surface::PageSurface;

    #[test]
    fn test_cards_get_hover_listeners() {
        let mut doc = Document::new();
        let body = doc.body();
        let feature = doc.create_child(body, "div", &["feature-card"]);
        let chart = doc.create_child(body, "div", &["chart-container"]);
        doc.create_child(body, "div", &["suggestion-item"]);
        let mut surface = PageSurface::new(doc);

        assert_eq!(init(&mut surface), vec![feature, chart]);
        assert_eq!(surface.listeners().count(feature, EventKind::MouseEnter), 1);
        assert_eq!(surface.listeners().count(chart, EventKind::MouseLeave), 1);
    }

    #[test]
    fn test_lift_and_settle() {
        let mut surface = PageSurface::default();
        let body = surface.document().body();
        lift(&mut surface, body);
        assert_eq!(
            surface.document().style(body, "transform"),
            Some("translateY(-15px) scale(1.02)")
        );
        settle(&mut surface, body);
        assert_eq!(
            surface.document().style(body, "transform"),
            Some("translateY(0) scale(1)")
        );
    }
}
