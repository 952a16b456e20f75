//! Element state: what exists in a backdrop and how it moves.
//!
//! Nothing in here touches pixels; [`crate::render`] turns a [`Scene`] into a
//! frame.

pub mod dust;
pub mod flare;
pub mod orb;
pub mod particle;
pub mod profile;
pub mod star;
pub mod wave;

use crate::config::{Quality, Variant};
use crate::foundation::core::LogicalSize;
use crate::foundation::rng::Rng64;

use dust::Mote;
use flare::{LensFlare, LightRay};
use orb::{Orb, OrbStyle};
use particle::Particle;
use profile::VariantProfile;
use star::Star;
use wave::Wave;

/// One drawing step of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    Backdrop,
    Orbs,
    Waves,
    Particles,
    LensFlare,
    LightRays,
    Starfield,
    Dust,
    Vignette,
    Grain,
}

impl Pass {
    /// Canonical draw order. Grain must stay last: it perturbs whatever the
    /// earlier passes composed.
    pub const ORDER: [Pass; 10] = [
        Pass::Backdrop,
        Pass::Orbs,
        Pass::Waves,
        Pass::Particles,
        Pass::LensFlare,
        Pass::LightRays,
        Pass::Starfield,
        Pass::Dust,
        Pass::Vignette,
        Pass::Grain,
    ];
}

/// Animation clock; advances once per rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    time: f64,
    increment: f64,
}

impl Clock {
    pub fn new(quality: Quality) -> Self {
        Self {
            time: 0.0,
            increment: quality.clock_increment(),
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn advance(&mut self) {
        self.time += self.increment;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

/// Element pool sizes; independent of the random seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ElementCounts {
    pub orbs: usize,
    pub waves: usize,
    pub particles: usize,
    pub stars: usize,
    pub rays: usize,
    pub dust: usize,
}

/// Every element of a backdrop laid out against one set of bounds.
#[derive(Clone, Debug)]
pub struct Scene {
    variant: Variant,
    quality: Quality,
    profile: VariantProfile,
    bounds: LogicalSize,
    pub(crate) orbs: Vec<Orb>,
    pub(crate) waves: Vec<Wave>,
    pub(crate) particles: Vec<Particle>,
    pub(crate) stars: Vec<Star>,
    pub(crate) flare: Option<LensFlare>,
    pub(crate) rays: Vec<LightRay>,
    pub(crate) dust: Vec<Mote>,
    pub(crate) rng: Rng64,
}

impl Scene {
    #[tracing::instrument(level = "debug", skip(rng))]
    pub fn build(variant: Variant, quality: Quality, bounds: LogicalSize, rng: &mut Rng64) -> Self {
        let profile = VariantProfile::of(variant);
        let mut rng = rng.fork();

        let orbs = match profile.orbs {
            Some(OrbStyle::Glow) => {
                let count = scaled(orb::base_orb_count(bounds), quality.orb_share());
                orb::scatter_glow_orbs(&mut rng, bounds, count)
            }
            Some(OrbStyle::Nebula) => orb::nebula_clouds(bounds),
            None => Vec::new(),
        };

        let waves = if profile.waves {
            (0..quality.wave_count()).map(Wave::layered).collect()
        } else {
            Vec::new()
        };

        let particles = match profile.particles {
            Some(spec) => {
                let count = scaled(spec.count, quality.pool_share());
                (0..count)
                    .map(|_| Particle::spawn(&mut rng, bounds, &spec))
                    .collect()
            }
            None => Vec::new(),
        };

        let stars = if profile.stars {
            let count = scaled(star::STAR_COUNT, quality.pool_share());
            (0..count).map(|_| Star::spawn(&mut rng, bounds)).collect()
        } else {
            Vec::new()
        };

        let flare = profile.lens_flare.then(|| LensFlare::generate(&mut rng));
        let rays = if profile.light_rays {
            LightRay::fan(&mut rng)
        } else {
            Vec::new()
        };
        let dust = if profile.dust {
            let count = scaled(dust::DUST_COUNT, quality.pool_share());
            (0..count).map(|_| Mote::spawn(&mut rng, bounds)).collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            orbs = orbs.len(),
            waves = waves.len(),
            particles = particles.len(),
            stars = stars.len(),
            dust = dust.len(),
            "scene built"
        );

        Self {
            variant,
            quality,
            profile,
            bounds,
            orbs,
            waves,
            particles,
            stars,
            flare,
            rays,
            dust,
            rng,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn bounds(&self) -> LogicalSize {
        self.bounds
    }

    pub fn profile(&self) -> &VariantProfile {
        &self.profile
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn dust(&self) -> &[Mote] {
        &self.dust
    }

    pub fn counts(&self) -> ElementCounts {
        ElementCounts {
            orbs: self.orbs.len(),
            waves: self.waves.len(),
            particles: self.particles.len(),
            stars: self.stars.len(),
            rays: self.rays.len(),
            dust: self.dust.len(),
        }
    }

    /// Whether `pass` draws anything for this variant.
    pub fn runs(&self, pass: Pass) -> bool {
        let p = &self.profile;
        match pass {
            Pass::Backdrop => true,
            Pass::Orbs => !self.orbs.is_empty(),
            Pass::Waves => !self.waves.is_empty(),
            Pass::Particles => !self.particles.is_empty(),
            Pass::LensFlare => p.lens_flare || p.center_glow,
            Pass::LightRays => !self.rays.is_empty(),
            Pass::Starfield => !self.stars.is_empty(),
            Pass::Dust => !self.dust.is_empty(),
            Pass::Vignette => p.vignette,
            Pass::Grain => p.grain,
        }
    }

    /// Passes this variant runs, in draw order.
    pub fn passes(&self) -> Vec<Pass> {
        Pass::ORDER
            .into_iter()
            .filter(|&pass| self.runs(pass))
            .collect()
    }

    /// Advance every particle by one frame against the current bounds.
    pub fn update_particles(&mut self) -> usize {
        let Some(spec) = self.profile.particles else {
            return 0;
        };
        let bounds = self.bounds;
        let mut respawned = 0;
        for p in &mut self.particles {
            if p.update(&mut self.rng, bounds, &spec) {
                respawned += 1;
            }
        }
        respawned
    }

    pub fn update_stars(&mut self) {
        let bounds = self.bounds;
        for s in &mut self.stars {
            s.update(&mut self.rng, bounds);
        }
    }
}

/// `ceil(base × share)`, at least one when `base` is non-zero.
fn scaled(base: usize, share: f64) -> usize {
    if base == 0 {
        return 0;
    }
    ((base as f64 * share).ceil() as usize).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mod.rs"]
mod tests;
