use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect, Rgba8};
use crate::foundation::error::BackdropResult;
use crate::foundation::rng::Rng64;
use crate::render::composite::with_coverage;
use crate::render::gradient::{ColorStop, linear_t, radial_t, sample, stop};
use crate::render::surface::{SolidShape, Surface};
use crate::scene::flare::{FLARE_RADIUS, LensFlare, LightRay};
use crate::scene::orb::{Orb, OrbStyle};
use crate::scene::profile::{BackdropKind, Palette};
use crate::scene::{Pass, Scene};

/// Proximity threshold for constellation links, in logical pixels.
pub const LINK_DISTANCE: f64 = 150.0;

/// Per-frame inputs shared by every pass.
pub(crate) struct FrameContext<'a> {
    pub surface: &'a mut Surface,
    pub scene: &'a mut Scene,
    pub palette: Palette,
    pub time: f64,
}

/// Run one pass against the back buffer.
pub(crate) fn render_pass(pass: Pass, f: &mut FrameContext<'_>) -> BackdropResult<()> {
    match pass {
        Pass::Backdrop => {
            draw_backdrop(f.surface, f.scene.profile().backdrop, &f.palette);
            Ok(())
        }
        Pass::Orbs => {
            for orb in &f.scene.orbs {
                draw_orb(f.surface, orb, &f.palette, f.time);
            }
            Ok(())
        }
        Pass::Waves => {
            draw_waves(f);
            Ok(())
        }
        Pass::Particles => {
            let respawned = f.scene.update_particles();
            if respawned > 0 {
                tracing::trace!(respawned, "particles reached max life");
            }
            draw_particles(f)
        }
        Pass::LensFlare => {
            if let Some(flare) = &f.scene.flare {
                draw_lens_flare(f.surface, flare, &f.palette, f.time);
            }
            if f.scene.profile().center_glow {
                draw_center_glow(f.surface, &f.palette);
            }
            Ok(())
        }
        Pass::LightRays => {
            draw_light_rays(f.surface, &f.scene.rays);
            Ok(())
        }
        Pass::Starfield => {
            f.scene.update_stars();
            draw_stars(f)
        }
        Pass::Dust => draw_dust(f),
        Pass::Vignette => {
            draw_vignette(f.surface, &f.palette);
            Ok(())
        }
        Pass::Grain => {
            let grain = f.palette.grain;
            apply_grain(f.surface, &mut f.scene.rng, grain.noise, grain.probability);
            Ok(())
        }
    }
}

fn draw_backdrop(surface: &mut Surface, kind: BackdropKind, palette: &Palette) {
    let b = surface.logical();
    let [from, to] = palette.backdrop;
    let stops = [stop(0.0, from), stop(1.0, to)];
    match kind {
        BackdropKind::Flat => surface.shade_region(None, |_| Some(from.premul())),
        BackdropKind::Vertical => {
            let (a, z) = (Point::new(0.0, 0.0), Point::new(0.0, b.height));
            surface.shade_region(None, |p| Some(sample(&stops, linear_t(a, z, p))));
        }
        BackdropKind::Diagonal => {
            let (a, z) = (Point::new(0.0, 0.0), Point::new(b.width, b.height));
            surface.shade_region(None, |p| Some(sample(&stops, linear_t(a, z, p))));
        }
        BackdropKind::Radial => {
            let c = b.center();
            let r = c.to_vec2().hypot();
            surface.shade_region(None, |p| {
                Some(sample(&stops, radial_t(c, 0.0, r, 1.0, p)))
            });
        }
    }
}

fn orb_stops(orb: &Orb, color: Rgba8) -> Vec<ColorStop> {
    match orb.style {
        OrbStyle::Glow => vec![
            stop(0.0, color.with_alpha(0x40)),
            stop(1.0, color.with_alpha(0)),
        ],
        OrbStyle::Nebula => vec![
            stop(0.0, color.with_opacity(0.4)),
            stop(0.5, color.with_opacity(0.2)),
            stop(1.0, color.with_alpha(0)),
        ],
    }
}

fn draw_orb(surface: &mut Surface, orb: &Orb, palette: &Palette, time: f64) {
    let c = orb.position(time);
    let stops = orb_stops(orb, palette.accent(orb.slot));
    let ry = orb.radius * orb.aspect;
    let bbox = Rect::new(c.x - orb.radius, c.y - ry, c.x + orb.radius, c.y + ry);
    draw_radial(surface, c, orb.radius, orb.aspect, bbox, &stops);
}

/// Radial gradient clipped to its own ellipse.
fn draw_radial(
    surface: &mut Surface,
    c: Point,
    radius: f64,
    aspect: f64,
    bbox: Rect,
    stops: &[ColorStop],
) {
    if radius <= 0.0 {
        return;
    }
    surface.shade_region(Some(bbox), |p| {
        let t = radial_t(c, 0.0, radius, aspect, p);
        (t <= 1.0).then(|| sample(stops, t))
    });
}

fn draw_waves(f: &mut FrameContext<'_>) {
    let b = f.surface.logical();
    let step = f.scene.quality().wave_step();
    for wave in &f.scene.waves {
        let color = f.palette.accent(wave.slot);
        let stops = [
            stop(0.0, color.with_alpha(0)),
            stop(0.5, color.with_alpha(0x40)),
            stop(1.0, color.with_alpha(0)),
        ];
        let path = wave.path(b, f.time, step);
        let (a, z) = (Point::new(0.0, 0.0), Point::new(b.width, 0.0));
        f.surface.fill_path_shaded(&path, |p| sample(&stops, linear_t(a, z, p)));
    }
}

fn circle(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius).to_path(0.1)
}

/// Thin quad covering the segment `a → b` with the given width.
fn segment(a: Point, b: Point, width: f64) -> BezPath {
    let d = b - a;
    let len = d.hypot();
    let mut path = BezPath::new();
    if len <= 0.0 {
        return path;
    }
    let n = kurbo::Vec2::new(-d.y, d.x) * (width * 0.5 / len);
    path.move_to(a + n);
    path.line_to(b + n);
    path.line_to(b - n);
    path.line_to(a - n);
    path.close_path();
    path
}

fn draw_particles(f: &mut FrameContext<'_>) -> BackdropResult<()> {
    let particles = &f.scene.particles;
    let mut shapes = Vec::with_capacity(particles.len());

    if f.scene.profile().links {
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let d = a.position.distance(b.position);
                if d < LINK_DISTANCE {
                    let alpha = 0.2 * (1.0 - d / LINK_DISTANCE);
                    shapes.push(SolidShape {
                        path: segment(a.position, b.position, 0.5),
                        color: f.palette.accent(a.slot).with_opacity(alpha),
                    });
                }
            }
        }
    }

    for p in particles {
        shapes.push(SolidShape {
            path: circle(p.position, p.size),
            color: f.palette.accent(p.slot).with_opacity(p.opacity),
        });
    }
    f.surface.draw_layer(&shapes)
}

fn draw_stars(f: &mut FrameContext<'_>) -> BackdropResult<()> {
    let shapes: Vec<SolidShape> = f
        .scene
        .stars
        .iter()
        .map(|s| SolidShape {
            path: circle(s.position, s.size),
            color: f.palette.star.with_opacity(s.opacity),
        })
        .collect();
    f.surface.draw_layer(&shapes)
}

fn draw_dust(f: &mut FrameContext<'_>) -> BackdropResult<()> {
    let shapes: Vec<SolidShape> = f
        .scene
        .dust
        .iter()
        .map(|m| SolidShape {
            path: circle(m.position, m.size),
            color: f.palette.dust.with_opacity(m.opacity),
        })
        .collect();
    f.surface.draw_layer(&shapes)
}

fn square(c: Point, r: f64) -> Rect {
    Rect::new(c.x - r, c.y - r, c.x + r, c.y + r)
}

fn draw_lens_flare(surface: &mut Surface, flare: &LensFlare, palette: &Palette, time: f64) {
    let c = LensFlare::center(surface.logical(), time);
    draw_radial(surface, c, FLARE_RADIUS, 1.0, square(c, FLARE_RADIUS), palette.flare);
    for s in &flare.satellites {
        let sc = LensFlare::satellite_center(c, s);
        draw_radial(surface, sc, s.size, 1.0, square(sc, s.size), palette.satellite);
    }
}

fn draw_center_glow(surface: &mut Surface, palette: &Palette) {
    let b = surface.logical();
    let c = Point::new(b.width * 0.5, b.height / 3.0);
    let r = b.width * 0.5;
    draw_radial(surface, c, r, 1.0, square(c, r), palette.glow);
}

fn draw_light_rays(surface: &mut Surface, rays: &[LightRay]) {
    let origin = LightRay::origin(surface.logical());
    let white = Rgba8::rgb(255, 255, 255);
    let stops = [stop(0.0, white.with_opacity(0.5)), stop(1.0, white.with_alpha(0))];
    // Coverage ramps over one logical pixel at the beam edge.
    for ray in rays {
        let end = ray.end(origin);
        let half = ray.width * 0.5;
        let bbox = Rect::from_points(origin, end).inflate(half + 1.0, half + 1.0);
        surface.shade_region(Some(bbox), |p| {
            let (t, dist) = project_onto_segment(origin, end, p);
            let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                return None;
            }
            let px = sample(&stops, t);
            Some(with_coverage(px, (coverage * 255.0).round() as u8))
        });
    }
}

/// Position along `a → b` in `[0, 1]` and distance from the segment.
fn project_onto_segment(a: Point, b: Point, p: Point) -> (f64, f64) {
    let t = linear_t(a, b, p).clamp(0.0, 1.0);
    let q = a.lerp(b, t);
    (t, q.distance(p))
}

fn draw_vignette(surface: &mut Surface, palette: &Palette) {
    let b = surface.logical();
    let c = b.center();
    let r0 = b.height * 0.5;
    let r1 = b.width.max(r0 + 1.0);
    surface.shade_region(None, |p| {
        Some(sample(palette.vignette, radial_t(c, r0, r1, 1.0, p)))
    });
}

/// Perturb RGB of the composed back buffer with uniform noise.
fn apply_grain(surface: &mut Surface, rng: &mut Rng64, noise: f64, probability: f64) {
    if noise <= 0.0 || probability <= 0.0 {
        return;
    }
    let data = surface.back_pixels_mut();
    for px in data.chunks_exact_mut(4) {
        if probability < 1.0 && rng.next_f64_01() >= probability {
            continue;
        }
        let delta = (rng.next_f64_01() * noise - noise * 0.5).round() as i16;
        let a = i16::from(px[3]);
        for c in &mut px[..3] {
            *c = (i16::from(*c) + delta).clamp(0, a) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
