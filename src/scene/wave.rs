use std::f64::consts::{PI, TAU};

use crate::foundation::core::{BezPath, LogicalSize, Point};

/// Horizontal sine band filled from the curve down to the bottom edge.
///
/// Geometry is stored as fractions of the bounds so a wave survives resizes
/// unchanged; only the phase moves with time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    /// Amplitude as a fraction of the surface height.
    pub amplitude: f64,
    /// Wavelength as a fraction of the surface width.
    pub wavelength: f64,
    pub speed: f64,
    pub phase: f64,
    pub slot: usize,
}

impl Wave {
    /// The `index`-th band of a stack: each one a little faster and a
    /// quarter turn out of phase with the previous.
    pub fn layered(index: usize) -> Self {
        Self {
            amplitude: 0.25,
            wavelength: 0.5,
            speed: 0.5 + index as f64 * 0.2,
            phase: index as f64 * PI / 2.0,
            slot: index,
        }
    }

    pub fn amplitude_px(&self, bounds: LogicalSize) -> f64 {
        bounds.height * self.amplitude
    }

    /// Vertical displacement from the baseline at `x`.
    pub fn offset(&self, x: f64, bounds: LogicalSize, time: f64) -> f64 {
        let wavelength = bounds.width * self.wavelength;
        let angle = if wavelength > 0.0 {
            x / wavelength * TAU
        } else {
            0.0
        };
        self.amplitude_px(bounds) * (angle + time * self.speed + self.phase).sin()
    }

    /// Curve samples every `step` logical pixels, always ending at the right
    /// edge.
    pub fn samples(&self, bounds: LogicalSize, time: f64, step: f64) -> Vec<Point> {
        let baseline = bounds.height * 0.5;
        let step = if step > 0.0 { step } else { 1.0 };
        let mut out = Vec::with_capacity((bounds.width / step) as usize + 2);
        let mut i = 0usize;
        loop {
            let x = i as f64 * step;
            if x >= bounds.width {
                break;
            }
            out.push(Point::new(x, baseline + self.offset(x, bounds, time)));
            i += 1;
        }
        out.push(Point::new(
            bounds.width,
            baseline + self.offset(bounds.width, bounds, time),
        ));
        out
    }

    /// Closed area under the curve.
    pub fn path(&self, bounds: LogicalSize, time: f64, step: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, bounds.height));
        for p in self.samples(bounds, time, step) {
            path.line_to(p);
        }
        path.line_to((bounds.width, bounds.height));
        path.close_path();
        path
    }
}
