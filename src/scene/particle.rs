use crate::foundation::core::{LogicalSize, Point, Vec2};
use crate::foundation::rng::Rng64;

/// Spawn ranges for one particle pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpec {
    /// Pool size at full quality.
    pub count: usize,
    pub size: (f64, f64),
    /// Each velocity component is drawn from `-speed..speed` (px per frame).
    pub speed: f64,
    pub opacity: (f64, f64),
    /// Lifetime in frames; `None` for particles that live forever.
    pub life: Option<(u32, u32)>,
    /// Number of palette slots particles are spread across.
    pub slots: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vec2,
    pub size: f64,
    pub slot: usize,
    pub opacity: f64,
    pub base_opacity: f64,
    pub life: u32,
    pub max_life: Option<u32>,
    /// How many times this particle has been respawned.
    pub resets: u32,
}

impl Particle {
    pub fn spawn(rng: &mut Rng64, bounds: LogicalSize, spec: &ParticleSpec) -> Self {
        let base_opacity = rng.range(spec.opacity.0, spec.opacity.1);
        Self {
            position: Point::new(
                rng.range(0.0, bounds.width),
                rng.range(0.0, bounds.height),
            ),
            velocity: Vec2::new(
                rng.range(-spec.speed, spec.speed),
                rng.range(-spec.speed, spec.speed),
            ),
            size: rng.range(spec.size.0, spec.size.1),
            slot: rng.index(spec.slots.max(1)),
            opacity: base_opacity,
            base_opacity,
            life: 0,
            max_life: spec
                .life
                .map(|(lo, hi)| (rng.range(f64::from(lo), f64::from(hi)).floor() as u32).max(1)),
            resets: 0,
        }
    }

    /// Advance one frame: move, age, fade, respawn and wrap. Returns `true`
    /// when the particle was respawned.
    pub fn update(&mut self, rng: &mut Rng64, bounds: LogicalSize, spec: &ParticleSpec) -> bool {
        self.position += self.velocity;

        if let Some(max_life) = self.max_life {
            self.life += 1;
            if self.life >= max_life {
                self.respawn(rng, bounds, spec);
                return true;
            }
            let half = f64::from(max_life) * 0.5;
            let life = f64::from(self.life);
            if life > half {
                self.opacity = (self.base_opacity * (1.0 - (life - half) / half)).max(0.0);
            }
        }

        self.wrap(bounds);
        false
    }

    fn respawn(&mut self, rng: &mut Rng64, bounds: LogicalSize, spec: &ParticleSpec) {
        self.position = Point::new(
            rng.range(0.0, bounds.width),
            rng.range(0.0, bounds.height),
        );
        self.base_opacity = rng.range(spec.opacity.0, spec.opacity.1);
        self.opacity = self.base_opacity;
        self.life = 0;
        self.resets = self.resets.saturating_add(1);
    }

    fn wrap(&mut self, bounds: LogicalSize) {
        if self.position.x < 0.0 {
            self.position.x = bounds.width;
        } else if self.position.x > bounds.width {
            self.position.x = 0.0;
        }
        if self.position.y < 0.0 {
            self.position.y = bounds.height;
        } else if self.position.y > bounds.height {
            self.position.y = 0.0;
        }
    }
}
