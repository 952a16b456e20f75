use std::f64::consts::TAU;

use crate::foundation::core::{LogicalSize, Point, Vec2};
use crate::foundation::rng::Rng64;

/// Falloff ramp an orb is painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbStyle {
    /// Palette color at 25% alpha fading to transparent.
    Glow,
    /// Three-stop cloud: 40% at the core, 20% halfway, transparent rim.
    Nebula,
}

/// Soft radial blob drifting around a fixed anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orb {
    pub anchor: Point,
    pub radius: f64,
    /// Vertical radius divided by horizontal radius.
    pub aspect: f64,
    pub slot: usize,
    pub speed: f64,
    pub amplitude: f64,
    pub phase: f64,
    pub style: OrbStyle,
}

impl Orb {
    /// Offset from the anchor at `time`. Each axis is bounded by `amplitude`.
    pub fn displacement(&self, time: f64) -> Vec2 {
        let a = time * self.speed + self.phase;
        Vec2::new(
            a.sin() * self.amplitude,
            (time * self.speed * 0.5 + self.phase).cos() * self.amplitude,
        )
    }

    pub fn position(&self, time: f64) -> Point {
        self.anchor + self.displacement(time)
    }
}

/// Width-derived orb count before the quality share is applied.
pub fn base_orb_count(bounds: LogicalSize) -> usize {
    ((bounds.width / 200.0).floor().max(0.0) as usize).clamp(2, 6)
}

/// `count` glow orbs scattered over `bounds`, one palette slot each.
pub fn scatter_glow_orbs(rng: &mut Rng64, bounds: LogicalSize, count: usize) -> Vec<Orb> {
    (0..count)
        .map(|slot| Orb {
            anchor: Point::new(
                rng.range(0.0, bounds.width),
                rng.range(0.0, bounds.height),
            ),
            radius: rng.range(50.0, 200.0),
            aspect: 1.0,
            slot,
            speed: rng.range(0.3, 0.8),
            amplitude: rng.range(50.0, 150.0),
            phase: rng.range(0.0, TAU),
            style: OrbStyle::Glow,
        })
        .collect()
}

/// The three nebula clouds, anchored at fixed fractions of the bounds.
pub fn nebula_clouds(bounds: LogicalSize) -> Vec<Orb> {
    let (w, h) = (bounds.width, bounds.height);
    // (anchor x, anchor y, width share, height share, drift share, speed)
    let layout = [
        (0.2, 0.3, 0.4, 0.3, 0.05, 1.0),
        (0.7, 0.6, 0.5, 0.4, 0.05, 0.7),
        (0.5, 0.8, 0.6, 0.3, 0.07, 0.5),
    ];
    layout
        .iter()
        .enumerate()
        .map(|(slot, &(ax, ay, sw, sh, drift, speed))| {
            let rx = w * sw * 0.5;
            let ry = h * sh * 0.5;
            Orb {
                anchor: Point::new(w * ax, h * ay),
                radius: rx,
                aspect: if rx > 0.0 { ry / rx } else { 1.0 },
                slot,
                speed,
                amplitude: w * drift,
                phase: slot as f64 * 1.3,
                style: OrbStyle::Nebula,
            }
        })
        .collect()
}
