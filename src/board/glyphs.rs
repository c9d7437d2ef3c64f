use serde::{Deserialize, Serialize};

use super::layout::Viewport;

/// Decorative PCB components drawn behind the traces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlyphKind {
    RaspberryPi,
    Arduino,
    Esp,
    IcChip,
}

impl GlyphKind {
    /// Native icon size in pixels before scaling.
    pub fn size(self) -> (f64, f64) {
        match self {
            GlyphKind::RaspberryPi => (52.0, 36.0),
            GlyphKind::Arduino => (54.0, 30.0),
            GlyphKind::Esp => (30.0, 38.0),
            GlyphKind::IcChip => (38.0, 22.0),
        }
    }
}

/// Placement relative to the viewport: `left`/`top` are fractions in `[0,1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphPlacement {
    pub kind: GlyphKind,
    pub left: f64,
    pub top: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl GlyphPlacement {
    pub fn new(kind: GlyphKind, left: f64, top: f64, rotation_deg: f64, scale: f64, opacity: f64) -> Self {
        Self {
            kind,
            left,
            top,
            rotation_deg,
            scale,
            opacity,
        }
    }
}

/// A glyph resolved to pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub kind: GlyphKind,
    pub x: f64,
    pub y: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    pub opacity: f64,
}

pub fn place_glyphs(viewport: Viewport, placements: &[GlyphPlacement], limit: usize) -> Vec<Glyph> {
    placements
        .iter()
        .take(limit)
        .map(|p| Glyph {
            kind: p.kind,
            x: p.left.clamp(0.0, 1.0) * viewport.width,
            y: p.top.clamp(0.0, 1.0) * viewport.height,
            rotation_deg: p.rotation_deg,
            scale: p.scale.max(0.0),
            opacity: p.opacity.clamp(0.0, 1.0),
        })
        .collect()
}
