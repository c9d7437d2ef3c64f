use super::config::{BoardConfig, Density};
use super::glyphs::{place_glyphs, Glyph};
use super::layout::{generate_layout, LayerTransform, Layout, Viewport};
use super::rng::RandomSource;

/// Parallax tier; `depth` is in `(0, 1]`, 1 being closest to the viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthLayer {
    pub depth: f64,
}

impl DepthLayer {
    pub const MIN_DEPTH: f64 = 0.05;

    pub fn new(depth: f64) -> Self {
        let depth = if depth.is_finite() { depth } else { 1.0 };
        Self {
            depth: depth.clamp(Self::MIN_DEPTH, 1.0),
        }
    }

    pub fn opacity(&self) -> f64 {
        0.25 + 0.75 * self.depth
    }

    pub fn transform(&self, elapsed: f64, cfg: &BoardConfig) -> LayerTransform {
        let m = &cfg.motion;
        LayerTransform::at(elapsed, self.depth, m.sway_px, m.rotation_deg, m.period_secs)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerLayout {
    pub layer: DepthLayer,
    pub layout: Layout,
}

/// Everything drawn for one viewport size. Replaced wholesale on resize.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub density: Density,
    pub layers: Vec<LayerLayout>,
    pub glyphs: Vec<Glyph>,
}

impl Scene {
    pub fn line_count(&self) -> usize {
        self.layers.iter().map(|l| l.layout.lines.len()).sum()
    }

    pub fn marker_count(&self) -> usize {
        self.layers.iter().map(|l| l.layout.intersections().len()).sum()
    }
}

/// Builds a scene for `viewport`, or `None` while the container is unmeasured.
pub fn generate_scene<R: RandomSource>(viewport: Viewport, cfg: &BoardConfig, rng: &mut R) -> Option<Scene> {
    if !viewport.is_measured() {
        return None;
    }
    let mobile = viewport.width < cfg.mobile_breakpoint;
    let density = cfg.density_for(viewport.width).clone();
    let layers = cfg
        .layers
        .iter()
        .map(|&d| {
            let layer = DepthLayer::new(d);
            let layout = generate_layout(
                viewport,
                &density.scaled(layer.depth),
                cfg.line_thickness * layer.depth,
                cfg.flow_duration_secs.into(),
                rng,
            );
            LayerLayout { layer, layout }
        })
        .collect();
    let glyph_limit = if mobile { cfg.mobile_glyphs } else { usize::MAX };
    Some(Scene {
        viewport,
        density,
        layers,
        glyphs: place_glyphs(viewport, &cfg.glyphs, glyph_limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::rng::SeededRandom;

    #[test]
    fn unmeasured_viewport_yields_nothing() {
        let cfg = BoardConfig::default();
        let mut rng = SeededRandom::new(1);
        assert!(generate_scene(Viewport::new(0.0, 600.0), &cfg, &mut rng).is_none());
        assert!(generate_scene(Viewport::new(800.0, -1.0), &cfg, &mut rng).is_none());
        assert!(generate_scene(Viewport::new(f64::NAN, 10.0), &cfg, &mut rng).is_none());
    }

    #[test]
    fn one_layout_per_layer_with_depth_scaling() {
        let cfg = BoardConfig::default();
        let scene = generate_scene(Viewport::new(1440.0, 900.0), &cfg, &mut SeededRandom::new(3)).unwrap();
        assert_eq!(scene.layers.len(), cfg.layers.len());
        let front = scene.layers.last().unwrap();
        let back = scene.layers.first().unwrap();
        assert!(back.layout.lines.len() < front.layout.lines.len());
        assert!(back.layout.lines[0].thickness < front.layout.lines[0].thickness);
        assert!(back.layer.opacity() < front.layer.opacity());
        assert_eq!(front.layout.lines.len(), cfg.desktop.vertical + cfg.desktop.horizontal);
    }

    #[test]
    fn mobile_uses_low_density_and_fewer_glyphs() {
        let cfg = BoardConfig::default();
        let scene = generate_scene(Viewport::new(390.0, 844.0), &cfg, &mut SeededRandom::new(3)).unwrap();
        assert_eq!(scene.density, cfg.mobile);
        assert_eq!(scene.glyphs.len(), cfg.mobile_glyphs);

        let desktop = generate_scene(Viewport::new(1024.0, 768.0), &cfg, &mut SeededRandom::new(3)).unwrap();
        assert_eq!(desktop.glyphs.len(), cfg.glyphs.len());
    }

    #[test]
    fn counts_are_stable_across_regeneration() {
        let cfg = BoardConfig::default();
        let vp = Viewport::new(1280.0, 800.0);
        let a = generate_scene(vp, &cfg, &mut SeededRandom::new(10)).unwrap();
        let b = generate_scene(vp, &cfg, &mut SeededRandom::new(20)).unwrap();
        assert_eq!(a.line_count(), b.line_count());
        assert_eq!(a.marker_count(), b.marker_count());
    }

    #[test]
    fn depth_is_clamped() {
        assert_eq!(DepthLayer::new(0.0).depth, DepthLayer::MIN_DEPTH);
        assert_eq!(DepthLayer::new(3.0).depth, 1.0);
        assert_eq!(DepthLayer::new(f64::NAN).depth, 1.0);
    }
}
