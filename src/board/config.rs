//! Tunables for the circuit background. Every revision of the background used
//! different constants, so all of them live here rather than in the generator.

use serde::{Deserialize, Serialize};

use super::glyphs::{GlyphKind, GlyphPlacement};

/// Line and decoration counts for one class of viewport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Density {
    pub vertical: usize,
    pub horizontal: usize,
    /// Margin kept free along every edge, in pixels.
    pub gap: f64,
    /// Share of lines per axis that carry a flow pulse.
    pub flow_fraction: f64,
    pub sparks: usize,
}

impl Density {
    pub fn desktop() -> Self {
        Self {
            vertical: 12,
            horizontal: 8,
            gap: 24.0,
            flow_fraction: 0.35,
            sparks: 50,
        }
    }

    pub fn mobile() -> Self {
        Self {
            vertical: 6,
            horizontal: 10,
            gap: 16.0,
            flow_fraction: 0.25,
            sparks: 20,
        }
    }

    /// Density for a layer at `depth`: fewer, sparser lines further back.
    pub fn scaled(&self, depth: f64) -> Self {
        let scale = |n: usize| {
            if n == 0 {
                0
            } else {
                ((n as f64 * depth).round() as usize).max(1)
            }
        };
        Self {
            vertical: scale(self.vertical),
            horizontal: scale(self.horizontal),
            gap: self.gap,
            flow_fraction: self.flow_fraction,
            sparks: (self.sparks as f64 * depth).round() as usize,
        }
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::desktop()
    }
}

/// Parallax sway applied per depth layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub sway_px: f64,
    pub rotation_deg: f64,
    pub period_secs: f64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            sway_px: 6.0,
            rotation_deg: 0.6,
            period_secs: 14.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub desktop: Density,
    pub mobile: Density,
    pub mobile_breakpoint: f64,
    pub line_thickness: f64,
    pub flow_duration_secs: (f64, f64),
    /// Depth of each layer, back to front.
    pub layers: Vec<f64>,
    pub motion: Motion,
    pub glyphs: Vec<GlyphPlacement>,
    /// How many glyphs remain on mobile viewports.
    pub mobile_glyphs: usize,
    pub resize_debounce_ms: u32,
}

impl BoardConfig {
    pub fn density_for(&self, width: f64) -> &Density {
        if width < self.mobile_breakpoint {
            &self.mobile
        } else {
            &self.desktop
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            desktop: Density::desktop(),
            mobile: Density::mobile(),
            mobile_breakpoint: 768.0,
            line_thickness: 2.0,
            flow_duration_secs: (2.5, 6.0),
            layers: vec![0.35, 0.65, 1.0],
            motion: Motion::default(),
            glyphs: default_glyphs(),
            mobile_glyphs: 2,
            resize_debounce_ms: 120,
        }
    }
}

fn default_glyphs() -> Vec<GlyphPlacement> {
    use GlyphKind::*;
    vec![
        GlyphPlacement::new(RaspberryPi, 0.08, 0.14, -5.0, 1.18, 0.16),
        GlyphPlacement::new(Arduino, 0.77, 0.22, 12.0, 0.95, 0.13),
        GlyphPlacement::new(Esp, 0.23, 0.73, 7.0, 1.2, 0.18),
        GlyphPlacement::new(IcChip, 0.60, 0.73, -20.0, 1.18, 0.15),
        GlyphPlacement::new(IcChip, 0.70, 0.08, 34.0, 1.0, 0.10),
        GlyphPlacement::new(Arduino, 0.04, 0.62, 16.0, 0.85, 0.10),
    ]
}
