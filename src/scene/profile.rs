use crate::config::Variant;
use crate::foundation::core::Rgba8;
use crate::render::gradient::{ColorStop, stop};
use crate::scene::orb::OrbStyle;
use crate::scene::particle::ParticleSpec;
use crate::theme::Theme;

/// Shape of the full-surface backdrop gradient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackdropKind {
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// From the center out to the farthest corner.
    Radial,
    /// Single color.
    Flat,
}

/// Film grain parameters for one theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrainSpec {
    /// Peak-to-peak per-channel noise.
    pub noise: f64,
    /// Chance that a given pixel is perturbed at all.
    pub probability: f64,
}

/// Which element pools and passes a variant uses. Theme-independent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantProfile {
    pub backdrop: BackdropKind,
    pub orbs: Option<OrbStyle>,
    pub waves: bool,
    pub particles: Option<ParticleSpec>,
    pub links: bool,
    pub stars: bool,
    /// Static dust specks drawn under the vignette.
    pub dust: bool,
    pub lens_flare: bool,
    pub center_glow: bool,
    pub light_rays: bool,
    pub vignette: bool,
    pub grain: bool,
}

impl VariantProfile {
    pub fn of(variant: Variant) -> Self {
        let none = Self {
            backdrop: BackdropKind::Flat,
            orbs: None,
            waves: false,
            particles: None,
            links: false,
            stars: false,
            dust: false,
            lens_flare: false,
            center_glow: false,
            light_rays: false,
            vignette: false,
            grain: false,
        };
        match variant {
            Variant::WavesAndOrbs => Self {
                backdrop: BackdropKind::Vertical,
                orbs: Some(OrbStyle::Glow),
                waves: true,
                ..none
            },
            Variant::ParticlesAndFlares => Self {
                particles: Some(ParticleSpec {
                    count: 150,
                    size: (1.0, 4.0),
                    speed: 0.5,
                    opacity: (0.1, 0.6),
                    life: Some((100, 300)),
                    slots: 4,
                }),
                lens_flare: true,
                light_rays: true,
                dust: true,
                vignette: true,
                grain: true,
                ..none
            },
            Variant::StarfieldNebula => Self {
                orbs: Some(OrbStyle::Nebula),
                stars: true,
                ..none
            },
            Variant::Constellation => Self {
                backdrop: BackdropKind::Diagonal,
                particles: Some(ParticleSpec {
                    count: 100,
                    size: (0.5, 2.5),
                    speed: 0.15,
                    opacity: (0.1, 0.6),
                    life: None,
                    slots: 3,
                }),
                links: true,
                center_glow: true,
                grain: true,
                ..none
            },
            Variant::Aurora => Self {
                backdrop: BackdropKind::Radial,
                orbs: Some(OrbStyle::Glow),
                waves: true,
                particles: Some(ParticleSpec {
                    count: 80,
                    size: (0.5, 2.0),
                    speed: 0.2,
                    opacity: (0.1, 0.4),
                    life: None,
                    slots: 4,
                }),
                vignette: true,
                grain: true,
                ..none
            },
        }
    }
}

/// Theme-dependent colors for one variant.
///
/// Elements store palette slots, never colors, so a theme flip recolors the
/// very next frame without touching element state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Backdrop start/end colors; a flat backdrop uses only the first.
    pub backdrop: [Rgba8; 2],
    /// Colors for orbs, waves and particles, indexed by slot.
    pub accents: &'static [Rgba8],
    pub flare: &'static [ColorStop],
    pub satellite: &'static [ColorStop],
    pub glow: &'static [ColorStop],
    pub star: Rgba8,
    pub dust: Rgba8,
    pub vignette: &'static [ColorStop],
    pub grain: GrainSpec,
}

impl Palette {
    pub fn accent(&self, slot: usize) -> Rgba8 {
        if self.accents.is_empty() {
            return Rgba8::rgb(255, 255, 255);
        }
        self.accents[slot % self.accents.len()]
    }

    /// Color shown when no frame has been drawn yet, or drawing is
    /// impossible.
    pub fn base_color(&self) -> Rgba8 {
        self.backdrop[0]
    }

    pub fn of(variant: Variant, theme: Theme) -> Self {
        let dark = theme.is_dark();
        let grain = |noise: f64, probability: f64| GrainSpec { noise, probability };
        let base = Self {
            backdrop: if dark { [DEEP_NAVY, DEEP_NAVY] } else { [PALE, PALE] },
            accents: if dark { &CINEMATIC_DARK } else { &CINEMATIC_LIGHT },
            flare: if dark { &FLARE_DARK } else { &FLARE_LIGHT },
            satellite: if dark { &SATELLITE_DARK } else { &SATELLITE_LIGHT },
            glow: if dark { &GLOW_DARK } else { &GLOW_LIGHT },
            star: if dark {
                Rgba8::rgb(255, 255, 255)
            } else {
                Rgba8::rgb(60, 60, 110)
            },
            dust: if dark { WHITE } else { Rgba8::rgb(80, 80, 140) },
            vignette: if dark { &VIGNETTE_DARK } else { &VIGNETTE_LIGHT },
            grain: if dark { grain(10.0, 0.1) } else { grain(5.0, 0.05) },
        };
        match variant {
            Variant::WavesAndOrbs => Self {
                backdrop: if dark {
                    [Rgba8::rgb(0, 0, 0), Rgba8::rgb(10, 10, 30)]
                } else {
                    [Rgba8::rgb(255, 255, 255), Rgba8::rgb(240, 240, 255)]
                },
                accents: if dark { &VIVID } else { &PASTEL },
                ..base
            },
            Variant::ParticlesAndFlares => Self {
                grain: if dark { grain(10.0, 1.0) } else { grain(5.0, 1.0) },
                ..base
            },
            Variant::StarfieldNebula => Self {
                accents: if dark { &NEBULA_DARK } else { &NEBULA_LIGHT },
                ..base
            },
            Variant::Constellation => Self {
                backdrop: if dark {
                    [Rgba8::rgb(10, 10, 30), Rgba8::rgb(30, 10, 40)]
                } else {
                    [Rgba8::rgb(240, 240, 255), Rgba8::rgb(255, 240, 250)]
                },
                accents: if dark { &STARLIGHT_DARK } else { &STARLIGHT_LIGHT },
                ..base
            },
            Variant::Aurora => Self {
                backdrop: if dark {
                    [Rgba8::rgb(20, 10, 30), Rgba8::rgb(10, 5, 15)]
                } else {
                    [Rgba8::rgb(245, 240, 255), Rgba8::rgb(235, 245, 255)]
                },
                accents: if dark { &AURORA_DARK } else { &AURORA_LIGHT },
                ..base
            },
        }
    }
}

/// Fallback shown when no drawing context could be acquired.
pub const FALLBACK_COLOR: Rgba8 = Rgba8::rgb(10, 10, 30);

const DEEP_NAVY: Rgba8 = Rgba8::rgb(5, 5, 15);
const PALE: Rgba8 = Rgba8::rgb(245, 245, 250);
const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);

const VIVID: [Rgba8; 4] = [
    Rgba8::rgb(0x8B, 0x5C, 0xF6),
    Rgba8::rgb(0xEC, 0x48, 0x99),
    Rgba8::rgb(0x3B, 0x82, 0xF6),
    Rgba8::rgb(0x10, 0xB9, 0x81),
];
const PASTEL: [Rgba8; 4] = [
    Rgba8::rgb(0xC4, 0xB5, 0xFD),
    Rgba8::rgb(0xF9, 0xA8, 0xD4),
    Rgba8::rgb(0x93, 0xC5, 0xFD),
    Rgba8::rgb(0x6E, 0xE7, 0xB7),
];

const CINEMATIC_DARK: [Rgba8; 4] = [
    WHITE,
    Rgba8::rgb(100, 100, 255),
    Rgba8::rgb(255, 100, 100),
    Rgba8::rgb(255, 200, 100),
];
const CINEMATIC_LIGHT: [Rgba8; 4] = [
    Rgba8::rgb(50, 50, 100),
    Rgba8::rgb(100, 50, 150),
    Rgba8::rgb(150, 50, 100),
    Rgba8::rgb(80, 80, 140),
];

const NEBULA_DARK: [Rgba8; 3] = [
    Rgba8::rgb(70, 0, 150),
    Rgba8::rgb(0, 50, 150),
    Rgba8::rgb(150, 0, 100),
];
const NEBULA_LIGHT: [Rgba8; 3] = [
    Rgba8::rgb(170, 140, 230),
    Rgba8::rgb(140, 180, 240),
    Rgba8::rgb(230, 150, 200),
];

const STARLIGHT_DARK: [Rgba8; 3] = [
    WHITE,
    Rgba8::rgb(200, 200, 255),
    Rgba8::rgb(255, 200, 200),
];
const STARLIGHT_LIGHT: [Rgba8; 3] = [
    Rgba8::rgb(50, 50, 100),
    Rgba8::rgb(100, 50, 150),
    Rgba8::rgb(150, 50, 100),
];

const AURORA_DARK: [Rgba8; 4] = [
    Rgba8::rgb(200, 100, 200),
    Rgba8::rgb(255, 100, 150),
    Rgba8::rgb(150, 100, 255),
    Rgba8::rgb(100, 200, 255),
];
const AURORA_LIGHT: [Rgba8; 4] = [
    Rgba8::rgb(100, 50, 100),
    Rgba8::rgb(150, 50, 100),
    Rgba8::rgb(100, 50, 150),
    Rgba8::rgb(60, 100, 160),
];

const FLARE_DARK: [ColorStop; 5] = [
    stop(0.0, WHITE.with_alpha(204)),
    stop(0.1, Rgba8::rgba(255, 200, 100, 77)),
    stop(0.2, Rgba8::rgba(255, 100, 50, 51)),
    stop(0.8, Rgba8::rgba(50, 0, 100, 26)),
    stop(1.0, Rgba8::rgba(0, 0, 50, 0)),
];
const FLARE_LIGHT: [ColorStop; 5] = [
    stop(0.0, WHITE.with_alpha(204)),
    stop(0.1, Rgba8::rgba(200, 150, 255, 77)),
    stop(0.2, Rgba8::rgba(150, 100, 255, 51)),
    stop(0.8, Rgba8::rgba(100, 50, 200, 26)),
    stop(1.0, Rgba8::rgba(50, 0, 150, 0)),
];

const SATELLITE_DARK: [ColorStop; 3] = [
    stop(0.0, WHITE.with_alpha(204)),
    stop(0.5, Rgba8::rgba(255, 200, 100, 77)),
    stop(1.0, Rgba8::rgba(255, 100, 50, 0)),
];
const SATELLITE_LIGHT: [ColorStop; 3] = [
    stop(0.0, WHITE.with_alpha(204)),
    stop(0.5, Rgba8::rgba(200, 150, 255, 77)),
    stop(1.0, Rgba8::rgba(150, 100, 255, 0)),
];

const GLOW_DARK: [ColorStop; 3] = [
    stop(0.0, WHITE.with_alpha(13)),
    stop(0.5, Rgba8::rgba(150, 100, 255, 8)),
    stop(1.0, BLACK.with_alpha(0)),
];
const GLOW_LIGHT: [ColorStop; 3] = [
    stop(0.0, WHITE.with_alpha(26)),
    stop(0.5, Rgba8::rgba(100, 50, 200, 13)),
    stop(1.0, WHITE.with_alpha(0)),
];

const VIGNETTE_DARK: [ColorStop; 3] = [
    stop(0.0, BLACK.with_alpha(0)),
    stop(0.7, BLACK.with_alpha(51)),
    stop(1.0, BLACK.with_alpha(204)),
];
const VIGNETTE_LIGHT: [ColorStop; 3] = [
    stop(0.0, BLACK.with_alpha(0)),
    stop(0.7, BLACK.with_alpha(20)),
    stop(1.0, BLACK.with_alpha(77)),
];
