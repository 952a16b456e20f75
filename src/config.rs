use std::path::Path;
use std::time::Duration;

use crate::foundation::error::{BackdropError, BackdropResult};

/// Debounce applied to resize signals before the surface is reallocated.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

/// Performance/quality tradeoff knob.
///
/// Lower settings shrink the backing resolution, sample waves more coarsely,
/// create fewer elements and advance the clock in coarser increments.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    High,
    #[default]
    Medium,
    Low,
}

impl Quality {
    pub const ALL: [Quality; 3] = [Quality::High, Quality::Medium, Quality::Low];

    /// Backing-resolution multiplier applied on top of the device pixel ratio.
    pub fn factor(self) -> f64 {
        match self {
            Quality::High => 1.0,
            Quality::Medium => 0.75,
            Quality::Low => 0.5,
        }
    }

    /// Horizontal sampling step for wave curves, in logical pixels.
    pub fn wave_step(self) -> f64 {
        match self {
            Quality::High => 5.0,
            Quality::Medium => 10.0,
            Quality::Low => 20.0,
        }
    }

    /// Clock advance per rendered frame.
    pub fn clock_increment(self) -> f64 {
        match self {
            Quality::High => 0.01,
            Quality::Medium => 0.015,
            Quality::Low => 0.02,
        }
    }

    pub fn wave_count(self) -> usize {
        match self {
            Quality::High => 4,
            Quality::Medium => 3,
            Quality::Low => 2,
        }
    }

    /// Fraction of the width-derived orb count that is kept.
    pub fn orb_share(self) -> f64 {
        match self {
            Quality::High => 1.0,
            Quality::Medium => 0.6,
            Quality::Low => 0.4,
        }
    }

    /// Fraction of a variant's particle/star pool that is allocated.
    pub fn pool_share(self) -> f64 {
        match self {
            Quality::High => 1.0,
            Quality::Medium => 0.75,
            Quality::Low => 0.5,
        }
    }
}

/// Named visual preset.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Vertical gradient, drifting orbs and layered sine waves.
    #[default]
    WavesAndOrbs,
    /// Finite-life particles with lens flare, light rays, vignette and grain.
    ParticlesAndFlares,
    /// Rising stars over slowly drifting nebula clouds.
    StarfieldNebula,
    /// Wrapping particles joined by proximity lines, with a soft center glow.
    Constellation,
    /// Radial backdrop with orbs, waves and dust, finished with vignette and grain.
    Aurora,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::WavesAndOrbs,
        Variant::ParticlesAndFlares,
        Variant::StarfieldNebula,
        Variant::Constellation,
        Variant::Aurora,
    ];
}

/// Mount-time configuration. Immutable for the lifetime of a renderer
/// instance; changing it means unmounting and mounting again.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropOptions {
    /// Scales the scroll-linked overlay displacement only.
    pub intensity: f64,
    pub quality: Quality,
    pub variant: Variant,
}

impl Default for BackdropOptions {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            quality: Quality::Medium,
            variant: Variant::WavesAndOrbs,
        }
    }
}

impl BackdropOptions {
    pub fn new(variant: Variant, quality: Quality) -> Self {
        Self {
            variant,
            quality,
            ..Self::default()
        }
    }

    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn validate(&self) -> BackdropResult<()> {
        if !self.intensity.is_finite() || self.intensity < 0.0 {
            return Err(BackdropError::validation(format!(
                "intensity must be finite and >= 0 (got {})",
                self.intensity
            )));
        }
        Ok(())
    }

    /// Copy with invalid fields replaced by their defaults.
    pub(crate) fn sanitized(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                tracing::warn!(error = %e, "invalid backdrop options, using default intensity");
                Self {
                    intensity: Self::default().intensity,
                    ..self
                }
            }
        }
    }

    pub fn from_json_str(s: &str) -> BackdropResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json_file(path: &Path) -> BackdropResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BackdropError::validation(format!(
                "failed to read options '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&text)
    }
}

/// Resize debounce, overridable through `BACKDROP_RESIZE_DEBOUNCE_MS`.
pub fn resize_debounce() -> Duration {
    std::env::var("BACKDROP_RESIZE_DEBOUNCE_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_RESIZE_DEBOUNCE)
}
