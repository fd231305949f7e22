//! Floating background bubbles.

use tracing::debug;

use crate::dom::NodeId;
use crate::services::surface::Surface;
use crate::styles::effects;

/// Add `count` bubbles to `.animated-bg`. No-op when the page has none.
pub fn init(surface: &mut impl Surface, count: usize) -> Vec<NodeId> {
    let Some(host) = surface.document().query_selector(effects::BACKGROUND_SELECTOR) else {
        return Vec::new();
    };

    let bubbles: Vec<NodeId> = (0..count)
        .map(|_| {
            surface
                .document_mut()
                .create_child(host, "div", &[effects::BUBBLE])
        })
        .collect();
    debug!("Background: added {} bubbles", bubbles.len());
    bubbles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::services::surface::PageSurface;

    #[test]
    fn test_bubbles_added_to_background() {
        let mut doc = Document::new();
        let host = doc.create_child(doc.body(), "div", &["animated-bg"]);
        let mut surface = PageSurface::new(doc);

        let bubbles = init(&mut surface, 6);
        assert_eq!(bubbles.len(), 6);
        assert_eq!(surface.document().children(host), bubbles.as_slice());
        assert!(surface.document().has_class(bubbles[0], "bubble"));
    }

    #[test]
    fn test_missing_background_is_noop() {
        let mut surface = PageSurface::default();
        assert!(init(&mut surface, 6).is_empty());
        assert!(surface.document().query_selector_all(".bubble").is_empty());
    }
}
