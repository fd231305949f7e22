//! Hero heading typewriter reveal.

use std::time::Duration;

use tracing::debug;

use crate::dom::NodeId;
use crate::services::surface::{Surface, Task};
use crate::styles::effects;

/// Clear `.hero h1` and schedule it to be retyped after `start_delay`.
pub fn init(surface: &mut impl Surface, start_delay: Duration) -> Option<NodeId> {
    let node = surface.document().query_selector(effects::HERO_TITLE_SELECTOR)?;
    let text = surface.document().text_content(node);
    surface.document_mut().set_text(node, "");
    debug!("Typewriter: {} chars queued", text.chars().count());

    surface.schedule(
        start_delay,
        Task::Typewriter {
            node,
            text,
            index: 0,
        },
    );
    Some(node)
}

/// Type the character at `index` and queue the next one.
pub fn tick(
    surface: &mut impl Surface,
    node: NodeId,
    text: String,
    index: usize,
    char_delay: Duration,
) {
    let Some(ch) = text.chars().nth(index) else {
        return;
    };
    surface.document_mut().append_text(node, ch.encode_utf8(&mut [0; 4]));
    surface.schedule(
        char_delay,
        Task::Typewriter {
            node,
            text,
            index: index + 1,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::services::surface::PageSurface;

    fn drain(surface: &mut PageSurface, until: Duration) {
        while let Some((_, task)) = surface.timers_mut().pop_due(until) {
            if let Task::Typewriter { node, text, index } = task {
                tick(surface, node, text, index, Duration::from_millis(100));
            }
        }
    }

    #[test]
    fn test_retypes_one_char_per_delay() {
        let mut doc = Document::new();
        let hero = doc.create_child(doc.body(), "section", &["hero"]);
        let h1 = doc.create_child(hero, "h1", &[]);
        doc.set_text(h1, "Halo");
        let mut surface = PageSurface::new(doc);

        assert_eq!(init(&mut surface, Duration::from_millis(1000)), Some(h1));
        assert_eq!(surface.document().text_content(h1), "");

        drain(&mut surface, Duration::from_millis(999));
        assert_eq!(surface.document().text_content(h1), "");
        drain(&mut surface, Duration::from_millis(1000));
        assert_eq!(surface.document().text_content(h1), "H");
        drain(&mut surface, Duration::from_millis(1200));
        assert_eq!(surface.document().text_content(h1), "Hal");
        drain(&mut surface, Duration::from_millis(5000));
        assert_eq!(surface.document().text_content(h1), "Halo");
        assert!(surface.timers().is_empty());
    }

    #[test]
    fn test_multibyte_text() {
        let mut doc = Document::new();
        let hero = doc.create_child(doc.body(), "div", &["hero"]);
        let h1 = doc.create_child(hero, "h1", &[]);
        doc.set_text(h1, "Wisata 🌴");
        let mut surface = PageSurface::new(doc);
        init(&mut surface, Duration::ZERO);
        drain(&mut surface, Duration::from_secs(10));
        assert_eq!(surface.document().text_content(h1), "Wisata 🌴");
    }

    #[test]
    fn test_missing_hero_is_noop() {
        let mut surface = PageSurface::default();
        assert_eq!(init(&mut surface, Duration::ZERO), None);
        assert!(surface.timers().is_empty());
    }
}
