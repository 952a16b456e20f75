use crate::foundation::core::Rgba8;
use crate::render::Frame;
use crate::render::composite::over;

/// Scroll-linked fade placed over the backdrop: a gradient mask from
/// transparent (top half) to the page background (bottom edge), pushed down
/// and faded out as the page scrolls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollOverlay {
    /// Downward translation in logical pixels.
    pub translate_y: f64,
    pub opacity: f64,
}

impl ScrollOverlay {
    /// Translation at full scroll and `intensity == 1`.
    pub const MAX_TRAVEL: f64 = 200.0;
    /// Scroll fraction at which the overlay is fully faded.
    pub const FADE_END: f64 = 0.8;

    /// Overlay for a scroll fraction in `[0, 1]`. Out-of-range or NaN
    /// fractions are clamped.
    pub fn at(scroll_fraction: f64, intensity: f64) -> Self {
        let f = if scroll_fraction.is_nan() {
            0.0
        } else {
            scroll_fraction.clamp(0.0, 1.0)
        };
        let intensity = if intensity.is_finite() {
            intensity.max(0.0)
        } else {
            1.0
        };
        Self {
            translate_y: Self::MAX_TRAVEL * intensity * f,
            opacity: (1.0 - f / Self::FADE_END).clamp(0.0, 1.0),
        }
    }

    /// Mask alpha at a vertical position `t ∈ [0, 1)` inside the overlay.
    fn mask(t: f64) -> f64 {
        if t <= 0.5 { 0.0 } else { (t - 0.5) / 0.5 }
    }

    /// Copy of `frame` with the overlay composited on top.
    pub fn compose_onto(&self, frame: &Frame, background: Rgba8) -> Frame {
        let mut out = frame.clone();
        let logical_h = frame.logical.height;
        if self.opacity <= 0.0 || logical_h <= 0.0 || frame.height == 0 {
            return out;
        }
        let scale = f64::from(frame.height) / logical_h;
        let stride = frame.width as usize * 4;
        for (row, line) in out.data.chunks_exact_mut(stride.max(1)).enumerate() {
            let y = (row as f64 + 0.5) / scale - self.translate_y;
            if y < 0.0 || y >= logical_h {
                continue;
            }
            let alpha = Self::mask(y / logical_h) * self.opacity;
            if alpha <= 0.0 {
                continue;
            }
            let src = background.with_opacity(alpha).premul();
            for px in line.chunks_exact_mut(4) {
                let d = [px[0], px[1], px[2], px[3]];
                px.copy_from_slice(&over(d, src, 1.0));
            }
        }
        out
    }
}
