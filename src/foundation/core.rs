use crate::foundation::error::{BackdropError, BackdropResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Size of a container in logical (CSS) pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> BackdropResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(BackdropError::validation("logical size must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(BackdropError::validation("logical size must be >= 0"));
        }
        Ok(Self { width, height })
    }

    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn contains(self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Straight (non-premultiplied) RGBA8 color. Alpha is independent of the
/// color channels so gradient stops can fade to a fully transparent copy of
/// the same hue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same hue with alpha set from a `0.0..=1.0` opacity.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = if opacity.is_finite() {
            (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        };
        self.with_alpha(a)
    }

    /// Premultiplied `[r, g, b, a]` (r,g,b already multiplied by a).
    pub fn premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
