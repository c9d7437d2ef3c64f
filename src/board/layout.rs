//! Pure layout computation for the circuit background.
//! Nothing here touches the DOM; the renderer consumes the returned description.

use std::f64::consts::PI;

use super::config::Density;
use super::rng::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// False until the container has been laid out with a real size.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[cfg(test)]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One straight trace. `position` is on the perpendicular axis; `start..end`
/// runs along the line's own axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceLine {
    pub axis: Axis,
    pub index: usize,
    pub position: f64,
    pub start: f64,
    pub end: f64,
    pub thickness: f64,
}

impl TraceLine {
    /// Endpoints as `(x0, y0, x1, y1)`.
    pub fn endpoints(&self) -> (f64, f64, f64, f64) {
        match self.axis {
            Axis::Horizontal => (self.start, self.position, self.end, self.position),
            Axis::Vertical => (self.position, self.start, self.position, self.end),
        }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).abs()
    }

    /// Point at fraction `t` of the way from start to end.
    pub fn point_at(&self, t: f64) -> (f64, f64) {
        let along = self.start + (self.end - self.start) * t.clamp(0.0, 1.0);
        match self.axis {
            Axis::Horizontal => (along, self.position),
            Axis::Vertical => (self.position, along),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowDirection {
    Forward,
    Reverse,
}

/// A repeating pulse travelling along one line.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowSegment {
    pub axis: Axis,
    pub line: usize,
    pub duration_secs: f64,
    pub offset_secs: f64,
    pub direction: FlowDirection,
}

impl FlowSegment {
    /// Position of the pulse head in `[0,1)` at `elapsed` seconds.
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.duration_secs <= 0.0 || !elapsed.is_finite() {
            return 0.0;
        }
        let p = ((elapsed + self.offset_secs) / self.duration_secs).rem_euclid(1.0);
        match self.direction {
            FlowDirection::Forward => p,
            FlowDirection::Reverse => (1.0 - p).rem_euclid(1.0),
        }
    }
}

/// Bounds for randomly drawn flow timings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowTiming {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl From<(f64, f64)> for FlowTiming {
    fn from((a, b): (f64, f64)) -> Self {
        let (min_secs, max_secs) = if a <= b { (a, b) } else { (b, a) };
        Self { min_secs, max_secs }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub viewport: Viewport,
    pub lines: Vec<TraceLine>,
    pub flows: Vec<FlowSegment>,
    pub sparks: Vec<Marker>,
}

impl Layout {
    pub fn lines_on(&self, axis: Axis) -> impl Iterator<Item = &TraceLine> {
        self.lines.iter().filter(move |l| l.axis == axis)
    }

    pub fn line(&self, axis: Axis, index: usize) -> Option<&TraceLine> {
        self.lines_on(axis).find(|l| l.index == index)
    }

    /// Cross product of horizontal and vertical line positions.
    pub fn intersections(&self) -> Vec<Marker> {
        let xs: Vec<f64> = self.lines_on(Axis::Vertical).map(|l| l.position).collect();
        self.lines_on(Axis::Horizontal)
            .flat_map(|h| xs.iter().map(move |&x| Marker { x, y: h.position }))
            .collect()
    }
}

/// Evenly spaced coordinates across `[gap, extent-gap]`; `n == 1` sits on the gap.
fn spaced(n: usize, extent: f64, gap: f64) -> (Vec<f64>, f64) {
    let gap = gap.clamp(0.0, extent / 2.0);
    let span = extent - 2.0 * gap;
    let step = span / (n.saturating_sub(1).max(1)) as f64;
    let last = extent - gap;
    // float error can push the last coordinate an ulp past the edge
    ((0..n).map(|i| (gap + step * i as f64).min(last)).collect(), gap)
}

fn assign_flows<R: RandomSource>(
    axis: Axis,
    count: usize,
    fraction: f64,
    timing: FlowTiming,
    rng: &mut R,
) -> Vec<FlowSegment> {
    // epsilon keeps 10 * 0.3 from rounding up to 4
    let wanted = ((count as f64) * fraction.clamp(0.0, 1.0) - 1e-9).ceil().max(0.0) as usize;
    // each index appears once in the pool, so no line gets two pulses
    let pool = rng.shuffled_indices(count);
    pool.into_iter()
        .take(wanted.min(count))
        .map(|line| {
            let duration_secs = rng.range(timing.min_secs, timing.max_secs).max(0.1);
            let offset_secs = rng.range(0.0, duration_secs);
            let direction = if rng.chance(0.5) {
                FlowDirection::Forward
            } else {
                FlowDirection::Reverse
            };
            FlowSegment {
                axis,
                line,
                duration_secs,
                offset_secs,
                direction,
            }
        })
        .collect()
}

pub fn generate_layout<R: RandomSource>(
    viewport: Viewport,
    density: &Density,
    thickness: f64,
    timing: FlowTiming,
    rng: &mut R,
) -> Layout {
    let (xs, gap_x) = spaced(density.vertical, viewport.width, density.gap);
    let (ys, gap_y) = spaced(density.horizontal, viewport.height, density.gap);

    let mut lines = Vec::with_capacity(xs.len() + ys.len());
    for (index, &x) in xs.iter().enumerate() {
        lines.push(TraceLine {
            axis: Axis::Vertical,
            index,
            position: x,
            start: gap_y,
            end: viewport.height - gap_y,
            thickness,
        });
    }
    for (index, &y) in ys.iter().enumerate() {
        lines.push(TraceLine {
            axis: Axis::Horizontal,
            index,
            position: y,
            start: gap_x,
            end: viewport.width - gap_x,
            thickness,
        });
    }

    let mut flows = assign_flows(Axis::Vertical, xs.len(), density.flow_fraction, timing, rng);
    flows.extend(assign_flows(
        Axis::Horizontal,
        ys.len(),
        density.flow_fraction,
        timing,
        rng,
    ));

    let sparks = (0..density.sparks)
        .map(|_| Marker {
            x: rng.range(0.0, viewport.width),
            y: rng.range(0.0, viewport.height),
        })
        .collect();

    Layout {
        viewport,
        lines,
        flows,
        sparks,
    }
}

/// Sway of one depth layer at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    pub dx: f64,
    pub dy: f64,
    pub rotation_deg: f64,
}

impl LayerTransform {
    pub const IDENTITY: LayerTransform = LayerTransform {
        dx: 0.0,
        dy: 0.0,
        rotation_deg: 0.0,
    };

    /// Depends only on `elapsed` and the layer parameters.
    pub fn at(elapsed: f64, depth: f64, sway_px: f64, rotation_deg: f64, period_secs: f64) -> Self {
        if period_secs <= 0.0 || !elapsed.is_finite() {
            return Self::IDENTITY;
        }
        let omega = 2.0 * PI / period_secs;
        let phase = depth * PI;
        Self {
            dx: sway_px * depth * (omega * elapsed + phase).sin(),
            dy: 0.6 * sway_px * depth * (0.8 * omega * elapsed + phase).cos(),
            rotation_deg: rotation_deg * depth * (0.5 * omega * elapsed + phase).sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::rng::SeededRandom;
    use std::collections::HashSet;

    fn timing() -> FlowTiming {
        (2.5, 6.0).into()
    }

    #[test]
    fn lines_stay_within_viewport() {
        let mut rng = SeededRandom::new(11);
        for &(w, h) in &[(1920.0, 1080.0), (375.0, 812.0), (10.0, 10.0), (1.0, 3000.0)] {
            let vp = Viewport::new(w, h);
            let layout = generate_layout(vp, &Density::desktop(), 2.0, timing(), &mut rng);
            for line in &layout.lines {
                let (x0, y0, x1, y1) = line.endpoints();
                assert!(vp.contains(x0, y0), "{line:?} in {w}x{h}");
                assert!(vp.contains(x1, y1), "{line:?} in {w}x{h}");
            }
            for m in layout.intersections().iter().chain(&layout.sparks) {
                assert!(vp.contains(m.x, m.y));
            }
        }
    }

    #[test]
    fn zero_gap_lines_stay_within_viewport() {
        let density = Density {
            gap: 0.0,
            ..Density::desktop()
        };
        let mut rng = SeededRandom::new(5);
        for n in 2..40 {
            let d = Density {
                vertical: n,
                horizontal: n,
                ..density.clone()
            };
            for step in 1..200 {
                let w = step as f64 * 0.1;
                let vp = Viewport::new(w, w * 1.7);
                let layout = generate_layout(vp, &d, 2.0, timing(), &mut rng);
                for line in &layout.lines {
                    let (x0, y0, x1, y1) = line.endpoints();
                    assert!(vp.contains(x0, y0) && vp.contains(x1, y1), "{line:?} in {w}");
                }
            }
        }
        let vp = Viewport::new(3.8000000000000003, 3.8000000000000003);
        let d = Density { vertical: 4, horizontal: 4, ..density };
        let layout = generate_layout(vp, &d, 2.0, timing(), &mut rng);
        assert!(layout.lines.iter().all(|l| l.position <= 3.8000000000000003));
    }

    #[test]
    fn regeneration_keeps_structure() {
        let vp = Viewport::new(1280.0, 720.0);
        let d = Density::desktop();
        let a = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(1));
        let b = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(99));
        assert_eq!(a.lines.len(), b.lines.len());
        assert_eq!(a.intersections().len(), b.intersections().len());
        assert_eq!(a.flows.len(), b.flows.len());
        assert_eq!(a.sparks.len(), b.sparks.len());
        assert_eq!(a.lines, b.lines);
    }

    #[test]
    fn same_seed_reproduces_exact_layout() {
        let vp = Viewport::new(800.0, 600.0);
        let d = Density::mobile();
        let a = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(5));
        let b = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn intersections_are_full_cross_product() {
        let vp = Viewport::new(1000.0, 500.0);
        let d = Density {
            vertical: 5,
            horizontal: 3,
            ..Density::desktop()
        };
        let layout = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(2));
        assert_eq!(layout.intersections().len(), 15);
        assert_eq!(layout.lines_on(Axis::Vertical).count(), 5);
        assert_eq!(layout.lines_on(Axis::Horizontal).count(), 3);
    }

    #[test]
    fn single_line_axis_does_not_divide_by_zero() {
        let vp = Viewport::new(400.0, 300.0);
        let d = Density {
            vertical: 1,
            horizontal: 1,
            gap: 20.0,
            ..Density::desktop()
        };
        let layout = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(8));
        let v = layout.line(Axis::Vertical, 0).unwrap();
        let h = layout.line(Axis::Horizontal, 0).unwrap();
        assert_eq!(v.position, 20.0);
        assert_eq!(h.position, 20.0);
        assert!(layout.lines.iter().all(|l| l.position.is_finite()));
    }

    #[test]
    fn even_spacing_reaches_far_margin() {
        let vp = Viewport::new(1000.0, 400.0);
        let d = Density {
            vertical: 5,
            horizontal: 2,
            gap: 100.0,
            ..Density::desktop()
        };
        let layout = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(8));
        let xs: Vec<f64> = layout.lines_on(Axis::Vertical).map(|l| l.position).collect();
        assert_eq!(xs, vec![100.0, 300.0, 500.0, 700.0, 900.0]);
        let ys: Vec<f64> = layout.lines_on(Axis::Horizontal).map(|l| l.position).collect();
        assert_eq!(ys, vec![100.0, 300.0]);
    }

    #[test]
    fn no_line_gets_two_flows() {
        let vp = Viewport::new(1600.0, 900.0);
        let d = Density {
            vertical: 30,
            horizontal: 20,
            flow_fraction: 1.0,
            ..Density::desktop()
        };
        for seed in 1..20 {
            let layout = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(seed));
            let mut seen = HashSet::new();
            for f in &layout.flows {
                assert!(seen.insert((f.axis, f.line)), "duplicate flow on {:?}", (f.axis, f.line));
                assert!(layout.line(f.axis, f.line).is_some());
            }
            assert_eq!(layout.flows.len(), 50);
        }
    }

    #[test]
    fn flow_fraction_limits_flow_count() {
        let vp = Viewport::new(1600.0, 900.0);
        let d = Density {
            vertical: 10,
            horizontal: 4,
            flow_fraction: 0.3,
            ..Density::desktop()
        };
        let layout = generate_layout(vp, &d, 2.0, timing(), &mut SeededRandom::new(4));
        let v = layout.flows.iter().filter(|f| f.axis == Axis::Vertical).count();
        let h = layout.flows.iter().filter(|f| f.axis == Axis::Horizontal).count();
        assert_eq!(v, 3);
        assert_eq!(h, 2);
        for f in &layout.flows {
            assert!((2.5..=6.0).contains(&f.duration_secs));
            assert!(f.offset_secs >= 0.0 && f.offset_secs < f.duration_secs);
        }
    }

    #[test]
    fn flow_progress_wraps_and_reverses() {
        let mut flow = FlowSegment {
            axis: Axis::Horizontal,
            line: 0,
            duration_secs: 4.0,
            offset_secs: 1.0,
            direction: FlowDirection::Forward,
        };
        assert!((flow.progress(0.0) - 0.25).abs() < 1e-9);
        assert!((flow.progress(4.0) - 0.25).abs() < 1e-9);
        assert!((flow.progress(3.0) - 0.0).abs() < 1e-9);
        flow.direction = FlowDirection::Reverse;
        assert!((flow.progress(0.0) - 0.75).abs() < 1e-9);
        for i in 0..200 {
            let p = flow.progress(i as f64 * 0.37);
            assert!((0.0..1.0).contains(&p));
        }
    }

    #[test]
    fn layer_transform_is_deterministic_and_grows_with_depth() {
        let a = LayerTransform::at(3.2, 0.5, 6.0, 0.6, 14.0);
        let b = LayerTransform::at(3.2, 0.5, 6.0, 0.6, 14.0);
        assert_eq!(a, b);

        let peak = |depth: f64| {
            (0..1400)
                .map(|i| LayerTransform::at(i as f64 * 0.01, depth, 6.0, 0.6, 14.0).dx.abs())
                .fold(0.0, f64::max)
        };
        assert!(peak(0.35) < peak(0.65));
        assert!(peak(0.65) < peak(1.0));
        assert!(peak(1.0) <= 6.0 + 1e-9);
    }

    #[test]
    fn degenerate_period_is_identity() {
        assert_eq!(LayerTransform::at(1.0, 1.0, 6.0, 0.6, 0.0), LayerTransform::IDENTITY);
    }
}
