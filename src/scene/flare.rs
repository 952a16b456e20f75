use std::f64::consts::TAU;

use crate::foundation::core::{LogicalSize, Point};
use crate::foundation::rng::Rng64;

/// Radius of the main flare disc.
pub const FLARE_RADIUS: f64 = 200.0;

/// Secondary flare ghost placed relative to the main flare.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Satellite {
    pub angle: f64,
    pub distance: f64,
    pub size: f64,
}

/// Slowly wandering lens flare with a fixed set of satellite ghosts.
#[derive(Clone, Debug, PartialEq)]
pub struct LensFlare {
    pub satellites: Vec<Satellite>,
}

impl LensFlare {
    pub fn generate(rng: &mut Rng64) -> Self {
        let count = 5 + rng.index(4);
        let satellites = (0..count)
            .map(|_| Satellite {
                angle: rng.range(0.0, TAU),
                distance: rng.range(50.0, 200.0),
                size: rng.range(10.0, 40.0),
            })
            .collect();
        Self { satellites }
    }

    /// Main flare center at `time`, confined to the upper-left quadrant.
    pub fn center(bounds: LogicalSize, time: f64) -> Point {
        Point::new(
            bounds.width * (0.3 + 0.2 * (time * 0.2).sin()),
            bounds.height * (0.3 + 0.1 * (time * 0.3).cos()),
        )
    }

    pub fn satellite_center(center: Point, s: &Satellite) -> Point {
        Point::new(
            center.x + s.angle.cos() * s.distance,
            center.y + s.angle.sin() * s.distance,
        )
    }
}

pub const RAY_COUNT: usize = 12;

/// One beam of the light-ray fan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRay {
    pub angle: f64,
    pub length: f64,
    pub width: f64,
}

impl LightRay {
    /// Evenly spaced fan with randomized length and width.
    pub fn fan(rng: &mut Rng64) -> Vec<Self> {
        (0..RAY_COUNT)
            .map(|i| LightRay {
                angle: i as f64 / RAY_COUNT as f64 * TAU,
                length: rng.range(200.0, 500.0),
                width: rng.range(2.0, 7.0),
            })
            .collect()
    }

    /// Common origin of every ray.
    pub fn origin(bounds: LogicalSize) -> Point {
        Point::new(bounds.width * 0.7, bounds.height * 0.3)
    }

    pub fn end(&self, origin: Point) -> Point {
        Point::new(
            origin.x + self.angle.cos() * self.length,
            origin.y + self.angle.sin() * self.length,
        )
    }
}
