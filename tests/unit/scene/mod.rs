use std::f64::consts::PI;

use super::*;
use crate::foundation::core::{Point, Vec2};
use particle::ParticleSpec;

fn bounds(w: f64, h: f64) -> LogicalSize {
    LogicalSize::new(w, h).unwrap()
}

const EPS: f64 = 1e-9;

#[test]
fn orb_displacement_is_bounded_by_amplitude() {
    let mut rng = Rng64::new(11);
    let b = bounds(1200.0, 800.0);
    let orbs = orb::scatter_glow_orbs(&mut rng, b, 6);
    let times = [0.0, 0.37, 1.0, 100.0, 12_345.678, 1.0e6];
    for o in &orbs {
        for phase in [0.0, PI / 2.0, PI, 3.0 * PI / 2.0] {
            let o = Orb { phase, ..*o };
            for &t in &times {
                let d = o.displacement(t);
                assert!(d.x.abs() <= o.amplitude + EPS);
                assert!(d.y.abs() <= o.amplitude + EPS);
            }
        }
    }
}

#[test]
fn orb_drifts_around_its_anchor() {
    let o = Orb {
        anchor: Point::new(100.0, 100.0),
        radius: 50.0,
        aspect: 1.0,
        slot: 0,
        speed: 1.0,
        amplitude: 10.0,
        phase: 0.0,
        style: OrbStyle::Glow,
    };
    assert_eq!(o.position(0.0), Point::new(100.0, 110.0));
    let quarter = o.position(PI / 2.0);
    assert!((quarter.x - 110.0).abs() < EPS);
}

#[test]
fn wave_offset_is_bounded_by_amplitude() {
    let b = bounds(1000.0, 600.0);
    for i in 0..4 {
        let w = Wave::layered(i);
        let amp = w.amplitude_px(b);
        assert_eq!(amp, 150.0);
        for &t in &[0.0, 1.0, 250.0, 1.0e5] {
            for p in w.samples(b, t, 5.0) {
                assert!((p.y - 300.0).abs() <= amp + EPS);
            }
        }
    }
}

#[test]
fn wave_phase_offsets_are_quarter_turns() {
    assert_eq!(Wave::layered(0).phase, 0.0);
    assert_eq!(Wave::layered(1).phase, PI / 2.0);
    assert_eq!(Wave::layered(3).phase, 3.0 * PI / 2.0);
    assert!(Wave::layered(2).speed > Wave::layered(1).speed);
}

#[test]
fn wave_samples_follow_quality_step_and_end_at_right_edge() {
    let b = bounds(100.0, 50.0);
    let w = Wave::layered(0);
    let xs: Vec<f64> = w.samples(b, 0.0, 20.0).iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    let xs: Vec<f64> = w.samples(bounds(95.0, 50.0), 0.0, 20.0).iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 20.0, 40.0, 60.0, 80.0, 95.0]);
}

fn finite_spec(count: usize) -> ParticleSpec {
    ParticleSpec {
        count,
        size: (1.0, 4.0),
        speed: 0.5,
        opacity: (0.1, 0.6),
        life: Some((100, 200)),
        slots: 4,
    }
}

#[test]
fn finite_life_opacity_never_rises_after_half_life() {
    let b = bounds(400.0, 300.0);
    let spec = finite_spec(1);
    let mut rng = Rng64::new(3);
    for _ in 0..20 {
        let mut p = Particle::spawn(&mut rng, b, &spec);
        let max = p.max_life.unwrap();
        let mut last = p.opacity;
        loop {
            let respawned = p.update(&mut rng, b, &spec);
            if respawned {
                assert_eq!(p.life, 0);
                assert_eq!(p.resets, 1);
                break;
            }
            assert!(p.opacity.is_finite());
            assert!(p.opacity >= 0.0);
            if f64::from(p.life) > f64::from(max) / 2.0 {
                assert!(p.opacity <= last);
            }
            last = p.opacity;
        }
    }
}

#[test]
fn particle_resets_exactly_at_max_life() {
    let b = bounds(400.0, 300.0);
    let spec = finite_spec(1);
    let mut rng = Rng64::new(5);
    let mut p = Particle::spawn(&mut rng, b, &spec);
    let max = p.max_life.unwrap();
    for frame in 1..max {
        assert!(!p.update(&mut rng, b, &spec), "early reset at frame {frame}");
        assert_eq!(p.life, frame);
    }
    assert!(p.update(&mut rng, b, &spec));
    assert_eq!(p.life, 0);
    assert_eq!(p.opacity, p.base_opacity);
}

#[test]
fn every_particle_resets_and_pool_size_is_stable() {
    let b = bounds(640.0, 480.0);
    let mut rng = Rng64::new(21);
    let mut scene = Scene::build(Variant::ParticlesAndFlares, Quality::High, b, &mut rng);
    let n = scene.particles().len();
    assert_eq!(n, 150);
    let longest = scene
        .particles()
        .iter()
        .filter_map(|p| p.max_life)
        .max()
        .unwrap();
    for _ in 0..=longest {
        scene.update_particles();
        assert_eq!(scene.particles().len(), n);
    }
    assert!(scene.particles().iter().all(|p| p.resets >= 1));
}

#[test]
fn wrapping_uses_current_bounds() {
    let b = bounds(100.0, 100.0);
    let spec = ParticleSpec {
        life: None,
        ..finite_spec(1)
    };
    let mut rng = Rng64::new(1);
    let mut p = Particle::spawn(&mut rng, b, &spec);
    p.position = Point::new(99.9, 0.05);
    p.velocity = Vec2::new(0.5, -0.1);
    p.update(&mut rng, b, &spec);
    assert_eq!(p.position.x, 0.0);
    assert_eq!(p.position.y, 100.0);
    p.velocity = Vec2::new(-0.5, 0.5);
    p.update(&mut rng, b, &spec);
    assert_eq!(p.position.x, 100.0);
    assert_eq!(p.position.y, 0.0);
}

#[test]
fn stars_wrap_to_bottom_edge() {
    let b = bounds(300.0, 200.0);
    let mut rng = Rng64::new(8);
    let mut s = Star::spawn(&mut rng, b);
    s.position = Point::new(10.0, 0.01);
    s.speed = 0.1;
    s.update(&mut rng, b);
    assert_eq!(s.position.y, 200.0);
    assert!((0.0..300.0).contains(&s.position.x));
}

#[test]
fn element_counts_follow_quality() {
    let b = bounds(1280.0, 720.0);
    let counts = |variant, quality| {
        Scene::build(variant, quality, b, &mut Rng64::new(1)).counts()
    };
    let high = counts(Variant::WavesAndOrbs, Quality::High);
    let medium = counts(Variant::WavesAndOrbs, Quality::Medium);
    let low = counts(Variant::WavesAndOrbs, Quality::Low);
    // floor(1280 / 200) = 6
    assert_eq!((high.orbs, medium.orbs, low.orbs), (6, 4, 3));
    assert_eq!((high.waves, medium.waves, low.waves), (4, 3, 2));

    assert_eq!(counts(Variant::StarfieldNebula, Quality::Medium).stars, 150);
    assert_eq!(counts(Variant::StarfieldNebula, Quality::Low).orbs, 3);
    assert_eq!(counts(Variant::Constellation, Quality::Low).particles, 50);
    assert_eq!(counts(Variant::ParticlesAndFlares, Quality::Low).rays, 12);

    let dust = |quality| counts(Variant::ParticlesAndFlares, quality).dust;
    assert_eq!(
        (dust(Quality::High), dust(Quality::Medium), dust(Quality::Low)),
        (50, 38, 25)
    );
    assert_eq!(counts(Variant::Aurora, Quality::High).dust, 0);
}

#[test]
fn narrow_bounds_keep_at_least_two_orbs() {
    assert_eq!(orb::base_orb_count(bounds(150.0, 300.0)), 2);
    assert_eq!(orb::base_orb_count(bounds(5000.0, 300.0)), 6);
}

#[test]
fn counts_do_not_depend_on_seed() {
    let b = bounds(900.0, 700.0);
    for variant in Variant::ALL {
        let a = Scene::build(variant, Quality::Medium, b, &mut Rng64::new(1)).counts();
        let c = Scene::build(variant, Quality::Medium, b, &mut Rng64::new(999)).counts();
        assert_eq!(a, c, "{variant:?}");
    }
}

#[test]
fn passes_keep_canonical_order_with_grain_last() {
    let b = bounds(800.0, 600.0);
    for variant in Variant::ALL {
        let scene = Scene::build(variant, Quality::High, b, &mut Rng64::new(4));
        let passes = scene.passes();
        assert_eq!(passes[0], Pass::Backdrop);
        let idx: Vec<usize> = passes
            .iter()
            .map(|p| Pass::ORDER.iter().position(|o| o == p).unwrap())
            .collect();
        assert!(idx.windows(2).all(|w| w[0] < w[1]), "{variant:?}");
        if scene.runs(Pass::Grain) {
            assert_eq!(passes.last(), Some(&Pass::Grain));
        }
    }
    let cinematic = Scene::build(Variant::ParticlesAndFlares, Quality::High, b, &mut Rng64::new(4));
    assert_eq!(
        cinematic.passes(),
        vec![
            Pass::Backdrop,
            Pass::Particles,
            Pass::LensFlare,
            Pass::LightRays,
            Pass::Dust,
            Pass::Vignette,
            Pass::Grain
        ]
    );
}

#[test]
fn clock_advances_by_quality_increment_and_resets() {
    let mut c = Clock::new(Quality::Low);
    c.advance();
    c.advance();
    assert!((c.time() - 0.04).abs() < EPS);
    c.reset();
    assert_eq!(c.time(), 0.0);
}
