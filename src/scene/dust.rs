use crate::foundation::core::{LogicalSize, Point};
use crate::foundation::rng::Rng64;

/// Base dust pool at full quality.
pub const DUST_COUNT: usize = 50;

/// A static speck of dust. Motes are scattered once per layout and never
/// move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mote {
    pub position: Point,
    pub size: f64,
    pub opacity: f64,
}

impl Mote {
    pub fn spawn(rng: &mut Rng64, bounds: LogicalSize) -> Self {
        Self {
            position: Point::new(
                rng.range(0.0, bounds.width),
                rng.range(0.0, bounds.height),
            ),
            size: rng.range(0.5, 2.5),
            opacity: rng.range(0.0, 0.2),
        }
    }
}
