use crate::foundation::core::{LogicalSize, Point};
use crate::foundation::rng::Rng64;

/// Base star pool at full quality.
pub const STAR_COUNT: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Point,
    pub size: f64,
    pub opacity: f64,
    /// Upward drift in px per frame.
    pub speed: f64,
}

impl Star {
    pub fn spawn(rng: &mut Rng64, bounds: LogicalSize) -> Self {
        Self {
            position: Point::new(
                rng.range(0.0, bounds.width),
                rng.range(0.0, bounds.height),
            ),
            size: rng.range(0.5, 2.5),
            opacity: rng.range(0.2, 1.0),
            speed: rng.range(0.05, 0.3),
        }
    }

    /// Drift upward; a star leaving the top re-enters at the bottom edge with
    /// a fresh horizontal position.
    pub fn update(&mut self, rng: &mut Rng64, bounds: LogicalSize) {
        self.position.y -= self.speed;
        if self.position.y < 0.0 {
            self.position.y = bounds.height;
            self.position.x = rng.range(0.0, bounds.width);
        }
    }
}
