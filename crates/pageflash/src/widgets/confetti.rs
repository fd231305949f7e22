//! Confetti particle burst.

use std::f64::consts::TAU;
use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, warn};

use pageflash_core::config::EffectsConfig;

use crate::dom::NodeId;
use crate::services::surface::{Surface, Task};
use crate::styles::effects;

const PARTICLE_SIZE: &str = "8px";
const EASING: &str = "cubic-bezier(0.25, 0.46, 0.45, 0.94)";
const MIN_DURATION_MS: u64 = 1000;
const MAX_DURATION_MS: u64 = 2000;

/// Burst `confetti_count` particles out of `origin`.
///
/// Each particle records its end transform and lifetime on the node and is
/// removed once that lifetime has passed.
pub fn burst<R: Rng>(
    surface: &mut impl Surface,
    rng: &mut R,
    origin: NodeId,
    config: &EffectsConfig,
) -> Vec<NodeId> {
    if !surface.document().exists(origin) {
        warn!("Confetti: origin #{} does not exist", origin.index());
        return Vec::new();
    }

    let mut particles = Vec::with_capacity(config.confetti_count);
    for _ in 0..config.confetti_count {
        let Some(color) = config.confetti_colors.choose(rng) else {
            warn!("Confetti: no colors configured");
            break;
        };

        let angle = rng.random_range(0.0..TAU);
        let rotation = rng.random_range(0.0..360.0);
        let duration_ms = rng.random_range(MIN_DURATION_MS..MAX_DURATION_MS);
        let dx = angle.cos() * config.confetti_distance_px;
        let dy = angle.sin() * config.confetti_distance_px;

        let doc = surface.document_mut();
        let particle = doc.create_child(origin, "div", &[effects::CONFETTI]);
        for (property, value) in [
            ("position", "absolute"),
            ("width", PARTICLE_SIZE),
            ("height", PARTICLE_SIZE),
            ("background", color.as_str()),
            ("border-radius", "50%"),
            ("left", "50%"),
            ("top", "50%"),
            ("pointer-events", "none"),
            ("z-index", "1000"),
            ("transform", "translate(-50%, -50%) rotate(0deg)"),
            ("opacity", "1"),
        ] {
            doc.set_style(particle, property, value);
        }
        doc.set_style(
            particle,
            "transition",
            &format!("transform {duration_ms}ms {EASING}, opacity {duration_ms}ms {EASING}"),
        );
        doc.set_attr(
            particle,
            "data-end-transform",
            &format!("translate({dx:.1}px, {dy:.1}px) rotate({rotation:.0}deg)"),
        );
        doc.set_attr(particle, "data-duration-ms", &duration_ms.to_string());

        surface.schedule(Duration::from_millis(duration_ms), Task::RemoveNode(particle));
        particles.push(particle);
    }

    debug!(
        "Confetti: {} particles from #{}",
        particles.len(),
        origin.index()
    );
    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::services::surface::PageSurface;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn surface_with_origin() -> (PageSurface, NodeId) {
        let mut doc = Document::new();
        let origin = doc.create_child(doc.body(), "div", &["file-input"]);
        (PageSurface::new(doc), origin)
    }

    #[test]
    fn test_burst_particles() {
        let (mut surface, origin) = surface_with_origin();
        let mut rng = StdRng::seed_from_u64(7);
        let config = EffectsConfig::default();

        let particles = burst(&mut surface, &mut rng, origin, &config);
        assert_eq!(particles.len(), 30);
        assert_eq!(surface.document().children(origin), particles.as_slice());

        let doc = surface.document();
        for particle in &particles {
            assert_eq!(doc.style(*particle, "width"), Some("8px"));
            let background = doc.style(*particle, "background").unwrap();
            assert!(config.confetti_colors.iter().any(|c| c == background));
            let duration: u64 = doc.attr(*particle, "data-duration-ms").unwrap().parse().unwrap();
            assert!((1000..2000).contains(&duration));
            assert!(doc.attr(*particle, "data-end-transform").unwrap().starts_with("translate("));
        }
    }

    #[test]
    fn test_particles_removed_after_their_duration() {
        let (mut surface, origin) = surface_with_origin();
        let mut rng = StdRng::seed_from_u64(42);
        let particles = burst(&mut surface, &mut rng, origin, &EffectsConfig::default());

        assert!(surface.timers().next_due().unwrap() >= Duration::from_millis(1000));
        while let Some((_, task)) = surface.timers_mut().pop_due(Duration::from_millis(2000)) {
            if let Task::RemoveNode(node) = task {
                surface.document_mut().detach(node).unwrap();
            }
        }
        assert!(surface.document().children(origin).is_empty());
        assert!(particles.iter().all(|p| !surface.document().is_connected(*p)));
    }

    #[test]
    fn test_same_seed_same_burst() {
        let config = EffectsConfig::default();
        let render = |seed| {
            let (mut surface, origin) = surface_with_origin();
            let mut rng = StdRng::seed_from_u64(seed);
            burst(&mut surface, &mut rng, origin, &config);
            surface.document().render_html(origin)
        };
        assert_eq!(render(3), render(3));
    }

    #[test]
    fn test_no_colors_no_particles() {
        let (mut surface, origin) = surface_with_origin();
        let config = EffectsConfig {
            confetti_colors: Vec::new(),
            ..EffectsConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(burst(&mut surface, &mut rng, origin, &config).is_empty());
    }
}
