use super::*;
use crate::config::{Quality, Variant};
use crate::host::{HeadlessContainer, HeadlessHost};
use crate::theme::{Theme, ThemeSwitch};

fn size(w: f64, h: f64) -> LogicalSize {
    LogicalSize::new(w, h).unwrap()
}

fn mount(
    w: f64,
    h: f64,
    dpr: f64,
    options: BackdropOptions,
) -> (HeadlessContainer, Renderer<HeadlessContainer, Theme>) {
    let container = HeadlessContainer::new(size(w, h), dpr);
    let r = Renderer::mount_seeded(container.clone(), Theme::Dark, options, 42);
    (container, r)
}

fn opts(variant: Variant, quality: Quality) -> BackdropOptions {
    BackdropOptions::new(variant, quality)
}

#[test]
fn mount_requests_first_frame_and_shows_base_color() {
    let (_c, r) = mount(64.0, 48.0, 1.0, opts(Variant::WavesAndOrbs, Quality::High));
    assert_eq!(r.state(), RendererState::Running);
    assert!(r.pending_frame().is_some());
    assert_eq!(r.frames_rendered(), 0);
    let f = r.frame().unwrap();
    assert!(f.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn low_quality_retina_backing_matches_logical() {
    let (_c, r) = mount(800.0, 600.0, 2.0, opts(Variant::WavesAndOrbs, Quality::Low));
    assert_eq!(r.backing_size(), Some(BackingSize { width: 800, height: 600 }));
    assert_eq!(r.logical_size(), Some(size(800.0, 600.0)));
}

#[test]
fn frames_advance_clock_and_reissue_tickets() {
    let (_c, mut r) = mount(80.0, 60.0, 1.0, opts(Variant::WavesAndOrbs, Quality::Medium));
    let mut host = HeadlessHost::default();
    let first = r.pending_frame().unwrap();
    let status = host.present(&mut r).unwrap();
    let FrameStatus::Rendered { next } = status else {
        panic!("expected a rendered frame, got {status:?}");
    };
    assert_ne!(next, first);
    assert_eq!(r.pending_frame(), Some(next));
    assert!((r.clock_time() - 0.015).abs() < 1e-12);

    // Redelivering the consumed ticket does nothing.
    let stale = r.on_frame(FrameTick {
        ticket: first,
        now: host.now(),
    });
    assert_eq!(stale, FrameStatus::Ignored);
    assert_eq!(r.frames_rendered(), 1);
}

#[test]
fn injected_failure_stops_loop_and_keeps_last_good_frame() {
    let (_c, mut r) = mount(
        96.0,
        64.0,
        1.0,
        opts(Variant::ParticlesAndFlares, Quality::Medium),
    );
    let mut host = HeadlessHost::default();
    assert_eq!(host.run(&mut r, 3).rendered, 3);
    let good = r.frame().unwrap();

    r.fail_next_frame_at(Pass::Vignette);
    assert_eq!(host.present(&mut r), Some(FrameStatus::Halted));
    assert_eq!(r.state(), RendererState::Halted);
    assert_eq!(r.pending_frame(), None);

    let after = r.frame().unwrap();
    assert_eq!(after.data, good.data);
    assert_eq!(after.digest(), good.digest());
    assert_eq!(host.present(&mut r), None);
}

#[test]
fn panic_inside_a_pass_is_contained() {
    let (_c, mut r) = mount(64.0, 64.0, 1.0, opts(Variant::Aurora, Quality::Low));
    let mut host = HeadlessHost::default();
    host.run(&mut r, 2);
    let good = r.frame().unwrap();
    r.panic_next_frame_at(Pass::Grain);
    assert_eq!(host.present(&mut r), Some(FrameStatus::Halted));
    assert_eq!(r.frame().unwrap(), good);
    r.unmount();
    assert_eq!(r.state(), RendererState::Unmounted);
}

#[test]
fn failure_in_first_frame_keeps_base_color() {
    let (_c, mut r) = mount(32.0, 32.0, 1.0, opts(Variant::StarfieldNebula, Quality::High));
    let blank = r.frame().unwrap();
    r.fail_next_frame_at(Pass::Backdrop);
    assert_eq!(HeadlessHost::default().present(&mut r), Some(FrameStatus::Halted));
    assert_eq!(r.frame().unwrap(), blank);
}

#[test]
fn pending_frame_after_unmount_draws_nothing() {
    let (_c, mut r) = mount(64.0, 48.0, 1.0, opts(Variant::Constellation, Quality::High));
    let mut host = HeadlessHost::default();
    host.run(&mut r, 2);
    let ticket = r.pending_frame().unwrap();
    let rendered = r.frames_rendered();

    r.unmount();
    let status = r.on_frame(FrameTick {
        ticket,
        now: host.now(),
    });
    assert_eq!(status, FrameStatus::Ignored);
    assert_eq!(r.frames_rendered(), rendered);
    assert_eq!(r.pending_frame(), None);
    assert!(r.frame().is_none());

    r.on_resize(host.now());
    assert_eq!(r.state(), RendererState::Unmounted);
}

#[test]
fn resize_is_debounced_then_applied_at_frame_start() {
    let (c, mut r) = mount(100.0, 100.0, 1.0, opts(Variant::WavesAndOrbs, Quality::High));
    let mut host = HeadlessHost::new(10.0); // 100 ms refresh
    host.run(&mut r, 2);
    assert!(r.clock_time() > 0.0);

    c.set_size(size(200.0, 50.0));
    host.resize(&mut r);
    assert!(matches!(r.state(), RendererState::Resizing { .. }));

    // First refresh lands 100 ms later, inside the 200 ms window.
    host.present(&mut r);
    assert_eq!(r.backing_size(), Some(BackingSize { width: 100, height: 100 }));

    // Another resize restarts the window.
    host.resize(&mut r);
    host.present(&mut r);
    assert_eq!(r.backing_size(), Some(BackingSize { width: 100, height: 100 }));

    host.present(&mut r);
    assert_eq!(r.state(), RendererState::Running);
    assert_eq!(r.backing_size(), Some(BackingSize { width: 200, height: 50 }));
    // The clock restarted with the new surface and advanced once.
    assert!((r.clock_time() - 0.01).abs() < 1e-12);
}

#[test]
fn resize_handler_is_idempotent() {
    let (c, mut r) = mount(300.0, 200.0, 1.5, opts(Variant::Aurora, Quality::Medium));
    c.set_size(size(333.0, 222.0));
    r.apply_resize();
    let once = r.backing_size();
    r.apply_resize();
    assert_eq!(r.backing_size(), once);
    assert_eq!(once, Some(BackingSize { width: 375, height: 250 }));
}

#[test]
fn failed_measurement_keeps_previous_surface() {
    let (c, mut r) = mount(120.0, 90.0, 1.0, opts(Variant::WavesAndOrbs, Quality::High));
    let mut host = HeadlessHost::default();
    host.run(&mut r, 1);
    c.set_attached(false);
    host.resize(&mut r);
    host.advance(Duration::from_secs(1));
    assert!(matches!(host.present(&mut r), Some(FrameStatus::Rendered { .. })));
    assert_eq!(r.state(), RendererState::Running);
    assert_eq!(r.backing_size(), Some(BackingSize { width: 120, height: 90 }));
}

#[test]
fn missing_2d_support_degrades_to_fallback_color() {
    let c = HeadlessContainer::new(size(40.0, 30.0), 1.0);
    c.set_supports_2d(false);
    let mut r = Renderer::mount_seeded(c, Theme::Dark, BackdropOptions::default(), 1);
    assert_eq!(r.state(), RendererState::Degraded);
    assert_eq!(r.pending_frame(), None);
    assert_eq!(r.background_color(), FALLBACK_COLOR);
    let f = r.frame().unwrap();
    assert!(f.data.chunks_exact(4).all(|px| px == FALLBACK_COLOR.premul()));
    assert_eq!(HeadlessHost::default().present(&mut r), None);
    r.unmount();
    assert_eq!(r.state(), RendererState::Unmounted);
}

#[test]
fn zero_area_container_degrades_without_surface() {
    let (_c, r) = mount(0.0, 300.0, 1.0, BackdropOptions::default());
    assert_eq!(r.state(), RendererState::Degraded);
    assert!(r.frame().is_none());
}

#[test]
fn theme_flip_recolors_next_frame_without_touching_elements() {
    let c = HeadlessContainer::new(size(60.0, 40.0), 1.0);
    let theme = ThemeSwitch::new(Theme::Dark);
    let mut r = Renderer::mount_seeded(
        c,
        theme.clone(),
        opts(Variant::WavesAndOrbs, Quality::High),
        5,
    );
    let mut host = HeadlessHost::default();
    host.run(&mut r, 1);
    let dark_corner = r.frame().unwrap().pixel(0, 0).unwrap();
    let orbs_before = r.scene().unwrap().orbs().to_vec();

    theme.set(Theme::Light);
    host.run(&mut r, 1);
    let light_corner = r.frame().unwrap().pixel(0, 0).unwrap();
    assert!(light_corner[0] > dark_corner[0]);
    assert_eq!(r.scene().unwrap().orbs(), &orbs_before[..]);
}

#[test]
fn remount_preserves_seed_independent_invariants() {
    let options = opts(Variant::Aurora, Quality::Medium);
    let c = HeadlessContainer::new(size(500.0, 400.0), 1.0);
    let mut first = Renderer::mount_seeded(c.clone(), Theme::Dark, options, 1);
    let counts = first.element_counts();
    let backing = first.backing_size();
    let base = first.background_color();
    first.unmount();

    let second = Renderer::mount_seeded(c, Theme::Dark, options, 2);
    assert_eq!(second.element_counts(), counts);
    assert_eq!(second.backing_size(), backing);
    assert_eq!(second.background_color(), base);
    assert_eq!(second.state(), RendererState::Running);
}

#[test]
fn invalid_intensity_is_replaced_not_fatal() {
    let (_c, r) = mount(
        10.0,
        10.0,
        1.0,
        BackdropOptions::default().with_intensity(-4.0),
    );
    assert_eq!(r.options().intensity, 1.0);
    assert_eq!(r.state(), RendererState::Running);
}

#[test]
fn every_variant_renders_opaque_frames() {
    for variant in Variant::ALL {
        for quality in Quality::ALL {
            let (_c, mut r) = mount(90.0, 70.0, 1.0, opts(variant, quality));
            let summary = HeadlessHost::default().run(&mut r, 3);
            assert_eq!(summary.rendered, 3, "{variant:?} {quality:?}");
            assert!(!summary.halted);
            let f = r.frame().unwrap();
            assert!(f.data.chunks_exact(4).all(|px| px[3] == 255));
        }
    }
}
