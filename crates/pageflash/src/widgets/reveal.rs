//! Scroll-triggered reveal of cards.
//!
//! Works like an intersection observer with a one-shot callback: elements
//! start hidden and are revealed the first time enough of them is inside the
//! viewport.

use std::collections::HashSet;
use std::time::Duration;

use tracing::debug;

use crate::dom::{NodeId, Rect};
use crate::services::surface::Surface;
use crate::styles::effects;

use super::css_seconds;

pub const HIDDEN_TRANSFORM: &str = "translateY(50px)";
pub const SHOWN_TRANSFORM: &str = "translateY(0)";
const TRANSITION: &str = "opacity 0.8s ease, transform 0.8s ease";

/// Reveal thresholds, taken from the effects config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Visible fraction required, 0.0-1.0.
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport.
    pub bottom_margin: f64,
    /// Animation delay step between `.feature-card`s of a revealed `.features`.
    pub card_stagger: Duration,
}

/// Observed elements and which of them have been revealed.
#[derive(Debug, Clone, Default)]
pub struct ScrollReveal {
    observed: Vec<NodeId>,
    revealed: HashSet<NodeId>,
}

impl ScrollReveal {
    /// Hide every revealable element and start observing it.
    pub fn init(surface: &mut impl Surface) -> Self {
        let observed = surface.document().query_selector_all(effects::REVEAL_SELECTOR);
        let doc = surface.document_mut();
        for node in &observed {
            doc.set_style(*node, "opacity", "0");
            doc.set_style(*node, "transform", HIDDEN_TRANSFORM);
            doc.set_style(*node, "transition", TRANSITION);
        }
        debug!("ScrollReveal: observing {} elements", observed.len());
        Self {
            observed,
            revealed: HashSet::new(),
        }
    }

    pub fn observed(&self) -> &[NodeId] {
        &self.observed
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    /// Reveal observed elements now inside `viewport`. Returns the newly revealed ones.
    ///
    /// Elements without layout information or outside the page are ignored.
    pub fn on_scroll(
        &mut self,
        surface: &mut impl Surface,
        viewport: Rect,
        options: RevealOptions,
    ) -> Vec<NodeId> {
        let mut newly = Vec::new();

        for node in self.observed.clone() {
            if self.revealed.contains(&node) || !surface.document().is_connected(node) {
                continue;
            }
            let Some(rect) = surface.document().rect(node) else {
                continue;
            };
            let ratio = visible_ratio(rect, viewport, options.bottom_margin);
            if ratio <= 0.0 || ratio < options.threshold {
                continue;
            }

            let doc = surface.document_mut();
            doc.set_style(node, "opacity", "1");
            doc.set_style(node, "transform", SHOWN_TRANSFORM);

            if doc.has_class(node, effects::FEATURES) {
                let cards = doc.query_selector_all_from(node, effects::FEATURE_CARD_SELECTOR);
                for (index, card) in cards.iter().enumerate() {
                    let delay = css_seconds(options.card_stagger * index as u32);
                    doc.set_style(*card, "animation-delay", &delay);
                }
            }

            self.revealed.insert(node);
            newly.push(node);
        }

        if !newly.is_empty() {
            debug!("ScrollReveal: revealed {} elements", newly.len());
        }
        newly
    }
}

/// Fraction of `target` inside `viewport` after trimming `bottom_margin`
/// pixels off the viewport's bottom edge.
pub fn visible_ratio(target: Rect, viewport: Rect, bottom_margin: f64) -> f64 {
    let view_top = viewport.top;
    let view_bottom = (viewport.bottom() - bottom_margin).max(view_top);

    if target.height <= 0.0 {
        return if (view_top..=view_bottom).contains(&target.top) {
            1.0
        } else {
            0.0
        };
    }

    let overlap = target.bottom().min(view_bottom) - target.top.max(view_top);
    (overlap / target.height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::services::surface::PageSurface;

    fn options() -> RevealOptions {
        RevealOptions {
            threshold: 0.1,
            bottom_margin: 50.0,
            card_stagger: Duration::from_millis(200),
        }
    }

    #[test]
    fn test_visible_ratio() {
        let viewport = Rect::new(0.0, 800.0);
        assert_eq!(visible_ratio(Rect::new(100.0, 200.0), viewport, 50.0), 1.0);
        assert_eq!(visible_ratio(Rect::new(900.0, 200.0), viewport, 50.0), 0.0);
        // 750 is the effective bottom edge: 50 of 200 visible.
        assert_eq!(visible_ratio(Rect::new(700.0, 200.0), viewport, 50.0), 0.25);
        assert_eq!(visible_ratio(Rect::new(740.0, 200.0), viewport, 50.0), 0.05);
        assert_eq!(visible_ratio(Rect::new(-150.0, 200.0), viewport, 0.0), 0.25);
    }

    #[test]
    fn test_zero_height_target() {
        let viewport = Rect::new(0.0, 800.0);
        assert_eq!(visible_ratio(Rect::new(300.0, 0.0), viewport, 50.0), 1.0);
        assert_eq!(visible_ratio(Rect::new(780.0, 0.0), viewport, 50.0), 0.0);
    }

    fn reveal_page() -> (PageSurface, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let near = doc.create_child(body, "div", &["stat-card"]);
        doc.set_rect(near, Rect::new(100.0, 200.0));
        let far = doc.create_child(body, "div", &["chart-container"]);
        doc.set_rect(far, Rect::new(2000.0, 300.0));
        let no_rect = doc.create_child(body, "div", &["suggestion-item"]);
        (PageSurface::new(doc), near, far, no_rect)
    }

    #[test]
    fn test_init_hides_observed_elements() {
        let (mut surface, near, far, no_rect) = reveal_page();
        let reveal = ScrollReveal::init(&mut surface);
        assert_eq!(reveal.observed(), &[near, far, no_rect]);
        let doc = surface.document();
        assert_eq!(doc.style(near, "opacity"), Some("0"));
        assert_eq!(doc.style(near, "transform"), Some("translateY(50px)"));
        assert_eq!(
            doc.style(near, "transition"),
            Some("opacity 0.8s ease, transform 0.8s ease")
        );
    }

    #[test]
    fn test_reveal_on_scroll_once() {
        let (mut surface, near, far, _) = reveal_page();
        let mut reveal = ScrollReveal::init(&mut surface);

        let first = reveal.on_scroll(&mut surface, Rect::new(0.0, 800.0), options());
        assert_eq!(first, vec![near]);
        assert_eq!(surface.document().style(near, "opacity"), Some("1"));
        assert_eq!(surface.document().style(far, "opacity"), Some("0"));

        let second = reveal.on_scroll(&mut surface, Rect::new(1600.0, 800.0), options());
        assert_eq!(second, vec![far]);

        // Scrolling back does not reveal anything again.
        assert!(
            reveal
                .on_scroll(&mut surface, Rect::new(0.0, 800.0), options())
                .is_empty()
        );
        assert!(reveal.is_revealed(near) && reveal.is_revealed(far));
    }

    #[test]
    fn test_below_threshold_stays_hidden() {
        let (mut surface, near, _, _) = reveal_page();
        let mut reveal = ScrollReveal::init(&mut surface);
        // Only the last 10px of `near` (100..300) are below the viewport top.
        let revealed = reveal.on_scroll(&mut surface, Rect::new(290.0, 800.0), options());
        assert!(revealed.is_empty());
        assert!(!reveal.is_revealed(near));
    }

    #[test]
    fn test_features_section_staggers_cards() {
        let mut doc = Document::new();
        let features = doc.create_child(doc.body(), "section", &["features", "stat-card"]);
        doc.set_rect(features, Rect::new(0.0, 400.0));
        let cards: Vec<_> = (0..3)
            .map(|_| doc.create_child(features, "div", &["feature-card"]))
            .collect();
        let mut surface = PageSurface::new(doc);
        let mut reveal = ScrollReveal::init(&mut surface);

        reveal.on_scroll(&mut surface, Rect::new(0.0, 800.0), options());
        let doc = surface.document();
        assert_eq!(doc.style(cards[0], "animation-delay"), Some("0s"));
        assert_eq!(doc.style(cards[1], "animation-delay"), Some("0.2s"));
        assert_eq!(doc.style(cards[2], "animation-delay"), Some("0.4s"));
    }
}
