use crate::foundation::core::{Point, Rgba8};
use crate::foundation::math::lerp;
use crate::render::composite::PremulRgba8;

/// One stop of a gradient ramp. Offsets are expected in ascending order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba8,
}

pub const fn stop(offset: f64, color: Rgba8) -> ColorStop {
    ColorStop { offset, color }
}

/// Sample a ramp at `t`, padding with the first/last stop outside their
/// offsets. Interpolation happens in premultiplied space so a stop fading to
/// a transparent copy of the same hue never darkens.
pub fn sample(stops: &[ColorStop], t: f64) -> PremulRgba8 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return [0, 0, 0, 0];
    };
    let t = if t.is_nan() { 0.0 } else { t };
    if t <= first.offset {
        return first.color.premul();
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span <= 0.0 {
                1.0
            } else {
                (t - a.offset) / span
            };
            return mix_premul(a.color, b.color, u);
        }
    }
    last.color.premul()
}

fn mix_premul(a: Rgba8, b: Rgba8, u: f64) -> PremulRgba8 {
    let pa = premul_f(a);
    let pb = premul_f(b);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let v = lerp(pa[i], pb[i], u);
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    // Rounding must not leave a color channel above alpha.
    for i in 0..3 {
        out[i] = out[i].min(out[3]);
    }
    out
}

fn premul_f(c: Rgba8) -> [f64; 4] {
    let a = f64::from(c.a) / 255.0;
    [
        f64::from(c.r) * a,
        f64::from(c.g) * a,
        f64::from(c.b) * a,
        f64::from(c.a),
    ]
}

/// Gradient position of `p` projected onto the `from → to` axis.
pub fn linear_t(from: Point, to: Point, p: Point) -> f64 {
    let d = to - from;
    let len2 = d.hypot2();
    if len2 <= 0.0 {
        return 0.0;
    }
    (p - from).dot(d) / len2
}

/// Gradient position of `p` for a concentric radial gradient running from
/// radius `r0` to `r1`. `aspect` stretches the gradient vertically
/// (`ry = r * aspect`) to produce elliptical falloffs.
pub fn radial_t(center: Point, r0: f64, r1: f64, aspect: f64, p: Point) -> f64 {
    let dx = p.x - center.x;
    let dy = if aspect > 0.0 {
        (p.y - center.y) / aspect
    } else {
        p.y - center.y
    };
    let dist = dx.hypot(dy);
    let span = r1 - r0;
    if span <= 0.0 {
        return if dist <= r0 { 0.0 } else { 1.0 };
    }
    (dist - r0) / span
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
