use crate::config::Quality;
use crate::foundation::core::{Affine, BezPath, LogicalSize, Point, Rect, Rgba8};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::foundation::math::Fnv1a64;
use crate::render::composite::{PremulRgba8, over_at, over_in_place, with_coverage};

/// Backing resolution in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BackingSize {
    pub width: u32,
    pub height: u32,
}

/// `round(logical × dpr × quality factor)` on each axis.
pub fn backing_size(
    logical: LogicalSize,
    device_pixel_ratio: f64,
    quality: Quality,
) -> BackdropResult<BackingSize> {
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return Err(BackdropError::validation(format!(
            "device pixel ratio must be finite and > 0 (got {device_pixel_ratio})"
        )));
    }
    let scale = device_pixel_ratio * quality.factor();
    let width = (logical.width * scale).round();
    let height = (logical.height * scale).round();
    if width > f64::from(u32::MAX) || height > f64::from(u32::MAX) {
        return Err(BackdropError::validation("backing size overflows u32"));
    }
    Ok(BackingSize {
        width: width as u32,
        height: height as u32,
    })
}

/// Double-buffered drawing surface.
///
/// Frames are composed into the back buffer and only become visible through
/// [`Surface::present`], so an aborted frame leaves the front buffer exactly
/// as the last completed frame left it.
pub struct Surface {
    logical: LogicalSize,
    device_pixel_ratio: f64,
    quality: Quality,
    width: u16,
    height: u16,
    front: vello_cpu::Pixmap,
    back: vello_cpu::Pixmap,
    layer: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("logical", &self.logical)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("quality", &self.quality)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    pub fn allocate(
        logical: LogicalSize,
        device_pixel_ratio: f64,
        quality: Quality,
    ) -> BackdropResult<Self> {
        let backing = backing_size(logical, device_pixel_ratio, quality)?;
        if backing.width == 0 || backing.height == 0 {
            return Err(BackdropError::context_unavailable(format!(
                "container {}x{} has no drawable area",
                logical.width, logical.height
            )));
        }
        let width: u16 = backing
            .width
            .try_into()
            .map_err(|_| BackdropError::context_unavailable("surface width exceeds u16"))?;
        let height: u16 = backing
            .height
            .try_into()
            .map_err(|_| BackdropError::context_unavailable("surface height exceeds u16"))?;

        Ok(Self {
            logical,
            device_pixel_ratio,
            quality,
            width,
            height,
            front: vello_cpu::Pixmap::new(width, height),
            back: vello_cpu::Pixmap::new(width, height),
            layer: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn logical(&self) -> LogicalSize {
        self.logical
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn backing(&self) -> BackingSize {
        BackingSize {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Logical units to device pixels.
    pub fn scale(&self) -> f64 {
        self.device_pixel_ratio * self.quality.factor()
    }

    pub fn device_transform(&self) -> Affine {
        Affine::scale(self.scale())
    }

    /// Last presented frame, premultiplied RGBA8.
    pub fn front_pixels(&self) -> &[u8] {
        self.front.data_as_u8_slice()
    }

    pub(crate) fn back_pixels_mut(&mut self) -> &mut [u8] {
        self.back.data_as_u8_slice_mut()
    }

    /// Fill the visible buffer with one flat color.
    pub fn fill_front(&mut self, color: Rgba8) {
        clear_pixmap(&mut self.front, color.premul());
    }

    pub(crate) fn begin_frame(&mut self) {
        clear_pixmap(&mut self.back, [0, 0, 0, 0]);
    }

    /// Make the back buffer visible.
    pub(crate) fn present(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    pub fn snapshot(&self) -> Frame {
        Frame {
            width: u32::from(self.width),
            height: u32::from(self.height),
            logical: self.logical,
            data: self.front.data_as_u8_slice().to_vec(),
        }
    }

    /// Blend `shade` over every back-buffer pixel whose center falls inside
    /// `region` (logical units, whole surface when `None`). `shade` receives
    /// the pixel center in logical coordinates.
    pub(crate) fn shade_region(
        &mut self,
        region: Option<Rect>,
        mut shade: impl FnMut(Point) -> Option<PremulRgba8>,
    ) {
        let scale = self.scale();
        let (x0, y0, x1, y1) = self.device_span(region);
        let stride = usize::from(self.width) * 4;
        let data = self.back.data_as_u8_slice_mut();
        for y in y0..y1 {
            let ly = (y as f64 + 0.5) / scale;
            for x in x0..x1 {
                let lx = (x as f64 + 0.5) / scale;
                if let Some(px) = shade(Point::new(lx, ly)) {
                    if px[3] == 0 {
                        continue;
                    }
                    over_at(data, y * stride + x * 4, px);
                }
            }
        }
    }

    /// Rasterize `path` (logical units) to a coverage mask and blend `shade`
    /// through it.
    pub(crate) fn fill_path_shaded(
        &mut self,
        path: &BezPath,
        mut shade: impl FnMut(Point) -> PremulRgba8,
    ) {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(affine_to_cpu(self.device_transform()));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();
        clear_pixmap(&mut self.layer, [0, 0, 0, 0]);
        ctx.render_to_pixmap(&mut self.layer);

        let scale = self.scale();
        let width = usize::from(self.width);
        let mask = self.layer.data_as_u8_slice();
        let data = self.back.data_as_u8_slice_mut();
        for (i, m) in mask.chunks_exact(4).enumerate() {
            let coverage = m[3];
            if coverage == 0 {
                continue;
            }
            let p = Point::new(
                ((i % width) as f64 + 0.5) / scale,
                ((i / width) as f64 + 0.5) / scale,
            );
            over_at(data, i * 4, with_coverage(shade(p), coverage));
        }
    }

    /// Draw solid-color shapes with vello_cpu into a scratch layer and
    /// composite it over the back buffer.
    pub(crate) fn draw_layer(&mut self, shapes: &[SolidShape]) -> BackdropResult<()> {
        if shapes.is_empty() {
            return Ok(());
        }
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(affine_to_cpu(self.device_transform()));
        for shape in shapes {
            let c = shape.color;
            if c.a == 0 {
                continue;
            }
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            ctx.fill_path(&bezpath_to_cpu(&shape.path));
        }
        ctx.flush();
        clear_pixmap(&mut self.layer, [0, 0, 0, 0]);
        ctx.render_to_pixmap(&mut self.layer);
        over_in_place(
            self.back.data_as_u8_slice_mut(),
            self.layer.data_as_u8_slice(),
            1.0,
        )
    }

    fn device_span(&self, region: Option<Rect>) -> (usize, usize, usize, usize) {
        let (w, h) = (usize::from(self.width), usize::from(self.height));
        let Some(r) = region else {
            return (0, 0, w, h);
        };
        let s = self.scale();
        let clamp = |v: f64, max: usize| -> usize {
            if v.is_nan() || v <= 0.0 {
                0
            } else {
                (v as usize).min(max)
            }
        };
        (
            clamp((r.x0 * s).floor(), w),
            clamp((r.y0 * s).floor(), h),
            clamp((r.x1 * s).ceil(), w),
            clamp((r.y1 * s).ceil(), h),
        )
    }
}

/// A filled path in logical units with a straight-alpha color.
#[derive(Clone, Debug)]
pub(crate) struct SolidShape {
    pub path: BezPath,
    pub color: Rgba8,
}

/// Owned copy of a presented frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub logical: LogicalSize,
    /// Premultiplied RGBA8, row-major.
    pub data: Vec<u8>,
}

impl Frame {
    pub fn digest(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
