//! Canvas 2d drawing of a board scene.

use web_sys::CanvasRenderingContext2d;

use crate::board::{BoardConfig, Glyph, GlyphKind, LayerLayout, Scene, TraceLine};

const TRACE: &str = "rgba(139,92,246,0.35)";
const TRACE_GLOW: &str = "rgba(139,92,246,0.3)";
const DOT: &str = "rgba(167,139,250,0.8)";
const DOT_GLOW: &str = "rgba(139,92,246,0.6)";
const PULSE: &str = "rgba(236,72,153,0.9)";
const BEAD_SPACING: f64 = 40.0;
const PULSE_LEN: f64 = 60.0;
const BASE_ALPHA: f64 = 0.3;

/// Fractions `(tail, head)` of a pulse of `pulse_len` pixels whose head sits at `progress`.
pub fn pulse_span(line: &TraceLine, progress: f64, pulse_len: f64) -> (f64, f64) {
    let len = line.length();
    if len <= 0.0 {
        return (0.0, 0.0);
    }
    let head = progress.clamp(0.0, 1.0);
    let tail = (head - pulse_len / len).max(0.0);
    (tail, head)
}

pub fn draw_scene(ctx: &CanvasRenderingContext2d, scene: &Scene, elapsed: f64, cfg: &BoardConfig) {
    let (w, h) = (scene.viewport.width, scene.viewport.height);
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.clear_rect(0.0, 0.0, w, h);

    for glyph in &scene.glyphs {
        draw_glyph(ctx, glyph);
    }
    for layer in &scene.layers {
        let t = layer.layer.transform(elapsed, cfg);
        ctx.save();
        ctx.translate(w * 0.5 + t.dx, h * 0.5 + t.dy).ok();
        ctx.rotate(t.rotation_deg.to_radians()).ok();
        ctx.translate(-w * 0.5, -h * 0.5).ok();
        ctx.set_global_alpha(BASE_ALPHA * layer.layer.opacity());
        draw_layer(ctx, layer, elapsed);
        ctx.restore();
    }
    ctx.set_global_alpha(1.0);
}

fn dot(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
    ctx.begin_path();
    ctx.arc(x, y, r, 0.0, std::f64::consts::PI * 2.0).ok();
    ctx.fill();
}

fn draw_layer(ctx: &CanvasRenderingContext2d, layer: &LayerLayout, elapsed: f64) {
    let depth = layer.layer.depth;
    let layout = &layer.layout;

    ctx.set_stroke_style_str(TRACE);
    ctx.set_shadow_color(TRACE_GLOW);
    ctx.set_shadow_blur(10.0 * depth);
    for line in &layout.lines {
        let (x0, y0, x1, y1) = line.endpoints();
        ctx.set_line_width(line.thickness.max(0.5));
        ctx.begin_path();
        ctx.move_to(x0, y0);
        ctx.line_to(x1, y1);
        ctx.stroke();
    }

    ctx.set_fill_style_str(DOT);
    ctx.set_shadow_color(DOT_GLOW);
    ctx.set_shadow_blur(15.0 * depth);
    for line in &layout.lines {
        let len = line.length();
        let mut along = 0.0;
        while along <= len {
            let (x, y) = line.point_at(along / len.max(1.0));
            dot(ctx, x, y, 1.2 * depth);
            along += BEAD_SPACING;
        }
    }
    ctx.set_shadow_blur(20.0 * depth);
    for m in layout.intersections() {
        dot(ctx, m.x, m.y, 2.5 * depth);
    }
    for s in &layout.sparks {
        dot(ctx, s.x, s.y, 2.0 * depth);
    }

    ctx.set_stroke_style_str(PULSE);
    ctx.set_shadow_color(PULSE);
    ctx.set_shadow_blur(12.0 * depth);
    for flow in &layout.flows {
        let Some(line) = layout.line(flow.axis, flow.line) else {
            continue;
        };
        let (tail, head) = pulse_span(line, flow.progress(elapsed), PULSE_LEN * depth);
        let (x0, y0) = line.point_at(tail);
        let (x1, y1) = line.point_at(head);
        ctx.set_line_width((line.thickness * 1.5).max(1.0));
        ctx.begin_path();
        ctx.move_to(x0, y0);
        ctx.line_to(x1, y1);
        ctx.stroke();
    }
    ctx.set_shadow_blur(0.0);
}

fn draw_glyph(ctx: &CanvasRenderingContext2d, g: &Glyph) {
    let (w, h) = g.kind.size();
    ctx.save();
    ctx.set_global_alpha(g.opacity);
    ctx.translate(g.x, g.y).ok();
    ctx.rotate(g.rotation_deg.to_radians()).ok();
    ctx.scale(g.scale, g.scale).ok();
    let (body, edge, accent) = match g.kind {
        GlyphKind::RaspberryPi => ("#1a4730", "#34D399", "#A3E635"),
        GlyphKind::Arduino => ("#2563EB", "#60A5FA", "#A21CAF"),
        GlyphKind::Esp => ("#3C3C43", "#a8a29e", "#F59E42"),
        GlyphKind::IcChip => ("#333333", "#6D28D9", "#F3F4F6"),
    };
    ctx.set_fill_style_str(body);
    ctx.set_stroke_style_str(edge);
    ctx.set_line_width(2.0);
    ctx.fill_rect(2.0, 2.0, w - 4.0, h - 4.0);
    ctx.stroke_rect(2.0, 2.0, w - 4.0, h - 4.0);
    ctx.set_fill_style_str(accent);
    match g.kind {
        GlyphKind::Esp | GlyphKind::IcChip => {
            // pins along the long edges
            let pins = 4;
            for i in 0..pins {
                let x = 6.0 + i as f64 * (w - 12.0) / (pins - 1) as f64;
                ctx.fill_rect(x - 1.0, 0.0, 2.0, 3.0);
                ctx.fill_rect(x - 1.0, h - 3.0, 2.0, 3.0);
            }
        }
        GlyphKind::RaspberryPi | GlyphKind::Arduino => {
            dot(ctx, w * 0.25, h * 0.4, 2.0);
            ctx.fill_rect(w * 0.4, h * 0.45, w * 0.25, h * 0.18);
        }
    }
    ctx.restore();
}
