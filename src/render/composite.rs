use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::mul_div255;

pub type PremulRgba8 = [u8; 4];

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Scale every channel of a premultiplied pixel by an 8-bit coverage value.
pub fn with_coverage(px: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 255 {
        return px;
    }
    let c = u16::from(coverage);
    [
        mul_div255(u16::from(px[0]), c),
        mul_div255(u16::from(px[1]), c),
        mul_div255(u16::from(px[2]), c),
        mul_div255(u16::from(px[3]), c),
    ]
}

/// Blend `px` over the pixel at byte offset `idx`.
pub(crate) fn over_at(dst: &mut [u8], idx: usize, px: PremulRgba8) {
    let d = [dst[idx], dst[idx + 1], dst[idx + 2], dst[idx + 3]];
    dst[idx..idx + 4].copy_from_slice(&over(d, px, 1.0));
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> BackdropResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BackdropError::draw(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Convert premultiplied RGBA8 bytes to straight alpha, e.g. for PNG output.
pub fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let unpremul = |c: u8| -> u8 {
            (((u32::from(c) * 255) + u32::from(a) / 2) / u32::from(a)).min(255) as u8
        };
        out.extend_from_slice(&[unpremul(px[0]), unpremul(px[1]), unpremul(px[2]), a]);
    }
    out
}
